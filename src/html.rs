//! Identifier and class-name sanitizing for render data

/// Turn arbitrary text into a usable element id
///
/// Runs of characters outside `[A-Za-z0-9-_:.]` collapse to a single `_`,
/// repeated underscores merge, and leading/trailing underscores are dropped.
pub fn html_id(raw: &str) -> String {
    let mut id = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.') {
            c
        } else {
            '_'
        };
        if c == '_' && id.ends_with('_') {
            continue;
        }
        id.push(c);
    }
    id.trim_matches('_').to_string()
}

/// Replace every non-alphanumeric character with `_`
pub fn sanitize_class(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Join class names, skipping empty ones
pub fn join_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> String {
    classes
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
