/// Case-insensitive substring match of `query` against a snippet label.
///
/// Only labels are matched, never bodies. An empty query matches everything.
pub fn is_visible(label: &str, query: &str) -> bool {
    label.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_matches_everything() {
        assert!(is_visible("Boilerplate", ""));
        assert!(is_visible("", ""));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(is_visible("Console Log", "console"));
        assert!(is_visible("Console Log", "LOG"));
        assert!(is_visible("list (ul)", "(UL)"));
    }

    #[test]
    fn query_must_be_contiguous() {
        assert!(is_visible("Flex Center", "x ce"));
        assert!(!is_visible("Flex Center", "flexcenter"));
        assert!(!is_visible("Flex Center", "center flex"));
        assert!(!is_visible("", "a"));
    }

    #[test]
    fn body_text_is_not_searched() {
        // The Boilerplate body starts with <!DOCTYPE html>.
        assert!(!is_visible("Boilerplate", "doctype"));
        assert!(is_visible("Boilerplate", "plate"));
    }
}
