//! Navigation link highlighting

/// Strip trailing slashes, keeping the root as `/`
pub fn clean_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Whether a navigation link should be marked active for the current path.
///
/// External (`http…`) and fragment (`#…`) links never match. A link matches its
/// own path and, unless it is the root, every path below it.
pub fn link_is_active(current_path: &str, href: &str) -> bool {
    if href.is_empty() || href.starts_with("http") || href.starts_with('#') {
        return false;
    }

    let current = clean_path(current_path);
    let link = clean_path(href);
    current == link || (link != "/" && current.starts_with(link))
}
