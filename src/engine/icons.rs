/// Glyph used for any category without a dedicated icon.
pub const DEFAULT_ICON: &str = "🏷️";

/// Resolve the display icon for a category name. Total: unknown names get
/// [`DEFAULT_ICON`].
pub fn icon_for(category_name: &str) -> &'static str {
    match category_name {
        "Food" => "🍔",
        "Transport" => "🚗",
        "Shopping" => "🛍️",
        "Bills" => "📄",
        "Entertainment" => "🎬",
        "Health" => "💊",
        "Education" => "📚",
        _ => DEFAULT_ICON,
    }
}

/// Prefer the icon stored on a record; fall back to the table when it is blank.
pub(crate) fn icon_or_default(stored: &str, category_name: &str) -> String {
    if stored.trim().is_empty() {
        icon_for(category_name).to_string()
    } else {
        stored.to_string()
    }
}
