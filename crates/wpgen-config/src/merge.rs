//! Deep merge used to apply a caller override onto an assembled configuration.

use serde_json::Value;

/// Merge `update` into `target`.
///
/// Objects merge key by key, arrays concatenate (`target` items first), and
/// any other `update` value replaces what was in `target`.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match target_map.get_mut(key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target_items), Value::Array(update_items)) => {
            target_items.extend(update_items.iter().cloned());
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replaces_leaves() {
        let mut base = json!({ "mode": "development", "output": { "path": "/a" } });
        merge_values(&mut base, &json!({ "output": { "path": "/b" } }));
        assert_eq!(base, json!({ "mode": "development", "output": { "path": "/b" } }));
    }

    #[test]
    fn concatenates_arrays() {
        let mut base = json!({ "plugins": [1, 2] });
        merge_values(&mut base, &json!({ "plugins": [3] }));
        assert_eq!(base, json!({ "plugins": [1, 2, 3] }));
    }

    #[test]
    fn adds_new_keys() {
        let mut base = json!({ "mode": "production" });
        merge_values(&mut base, &json!({ "devServer": { "port": 8080 } }));
        assert_eq!(base["devServer"]["port"], json!(8080));
    }

    #[test]
    fn array_replaces_non_array() {
        let mut base = json!({ "devtool": false });
        merge_values(&mut base, &json!({ "devtool": ["a"] }));
        assert_eq!(base["devtool"], json!(["a"]));
    }

    #[test]
    fn null_update_replaces() {
        let mut base = json!({ "devtool": "source-map" });
        merge_values(&mut base, &json!({ "devtool": null }));
        assert!(base["devtool"].is_null());
    }
}
