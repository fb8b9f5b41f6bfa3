//! Helpers for fully-qualified column identifiers.
//!
//! Identifiers look like `qbank_viewquestiontype\question_type_column`: an
//! owning plugin path followed by the column's simple name, joined by `\`.

/// Separator between identifier path segments.
pub const SEPARATOR: char = '\\';

/// Namespace shared by every column that renders a user-defined custom field.
pub const CUSTOM_FIELD_NAMESPACE: &str = "qbank_customfields\\custom_field_column";

/// Order key of the selection column, always rendered first.
pub const CHECKBOX_COLUMN: &str = "checkbox_column";

/// Internal name reported by the column source for the selection column.
pub const CHECKBOX_NAME: &str = "checkbox";

/// Last path segment of `identifier`.
pub fn short_name(identifier: &str) -> &str {
    identifier.rsplit(SEPARATOR).next().unwrap_or(identifier)
}

/// True if `identifier` names a custom-field column.
///
/// Substring match, so a namespace appearing anywhere in the path counts.
pub fn is_custom_field(identifier: &str) -> bool {
    identifier.contains(CUSTOM_FIELD_NAMESPACE)
}

/// Key under which a persisted identifier takes part in the order merge.
///
/// Custom-field columns drop only the leading namespace segment so that
/// multi-segment field paths survive; everything else reduces to its short
/// name.
pub fn order_key(identifier: &str) -> &str {
    if is_custom_field(identifier) {
        return identifier
            .split_once(SEPARATOR)
            .map_or(identifier, |(_, rest)| rest);
    }
    short_name(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_takes_last_segment() {
        assert_eq!(
            short_name("qbank_viewquestiontype\\question_type_column"),
            "question_type_column"
        );
        assert_eq!(short_name("plain"), "plain");
    }

    #[test]
    fn order_key_keeps_custom_field_path() {
        assert_eq!(
            order_key("qbank_customfields\\custom_field_column\\field_42"),
            "custom_field_column\\field_42"
        );
        assert_eq!(order_key("qbank_a\\col_x"), "col_x");
    }

    #[test]
    fn custom_field_detection_is_substring_based() {
        assert!(is_custom_field(
            "qbank_customfields\\custom_field_column\\field_42"
        ));
        assert!(!is_custom_field("qbank_customfields\\other_column"));
    }
}
