/// Shortens an address for display: the first 6 and last 4 characters joined
/// by an ellipsis. Addresses too short to shorten are returned unchanged.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Presentation name for an actor: the resolved name when there is one,
/// otherwise the truncated address.
pub fn display_name(actor_id: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => truncate_address(actor_id),
    }
}
