pub mod auth;
pub mod categories;
pub mod items;
pub mod products;
pub mod sales;
pub mod store_status;
pub mod stores;
pub mod users;

/// Collapse inner whitespace runs and trim the ends.
pub(crate) fn normalize_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an optional text field, mapping whitespace-only input to `None`.
pub(crate) fn normalize_optional_text(input: Option<String>) -> Option<String> {
    input
        .as_deref()
        .map(normalize_text)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  Fresh   Produce "), "Fresh Produce");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn normalize_optional_text_drops_blank_values() {
        assert_eq!(normalize_optional_text(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional_text(Some(" hello  world ".to_string())),
            Some("hello world".to_string())
        );
        assert_eq!(normalize_optional_text(None), None);
    }
}
