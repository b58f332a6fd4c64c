use wpgen_config::entry::is_page_name;

/// Parse a comma separated stage list.
///
/// Every non-empty name must be a valid, non-private page name. An empty
/// value is passed through so the assembler can reject it with a proper
/// diagnostic.
///
/// # Errors
///
/// Returns an error message naming the first invalid page.
pub fn parse_stage(s: &str) -> Result<String, String> {
    for name in s.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        if name.starts_with('_') {
            return Err(format!("'{name}' is a private page and is never built"));
        }
        if !is_page_name(name) {
            return Err(format!(
                "Page names may only contain letters, digits, '_' and '-': '{name}'"
            ));
        }
    }

    Ok(s.to_string())
}
