use pretty_assertions::assert_eq;

use super::*;

#[test]
fn headline_only() {
    let message = DiagnosticMessage::new("Expected value to be None");
    assert_eq!(message.to_string(), "Expected value to be None");
    assert!(!message.has_hints());
}

#[test]
fn sections_in_fixed_order() {
    let message = DiagnosticMessage::new("Expected collection to contain element")
        .with_hint(r#""user-3" has 1 extra character (index 3)"#)
        .with_note("collection has 5 elements")
        .with_detail("Collection", r#"["user-3"]"#)
        .with_detail("Missing", r#""user3""#)
        .with_custom(Some("lookup by name"));

    assert_eq!(
        message.to_string(),
        [
            "lookup by name",
            "Expected collection to contain element",
            r#"  Collection: ["user-3"]"#,
            r#"  Missing:    "user3""#,
            "  = note: collection has 5 elements",
            r#"  = hint: "user-3" has 1 extra character (index 3)"#,
        ]
        .join("\n")
    );
}

#[test]
fn multi_line_blocks_are_indented_under_label() {
    let block = FormattedBlock {
        lines: vec!["[0] 1".into(), "... 9 more".into(), "(showing first 1 of 10)".into()],
        total_count: 10,
        shown: 1,
        truncated: true,
    };
    let message = DiagnosticMessage::new("Expected value to be empty")
        .with_detail("Length", "10")
        .with_block("Value", block);

    assert_eq!(
        message.to_string(),
        [
            "Expected value to be empty",
            "  Length: 10",
            "  Value:",
            "    [0] 1",
            "    ... 9 more",
            "    (showing first 1 of 10)",
        ]
        .join("\n")
    );
}

#[test]
fn custom_message_is_verbatim() {
    let message = DiagnosticMessage::new("Expected true").with_custom(Some("  keep  {spacing} "));
    assert_eq!(message.to_string(), "  keep  {spacing} \nExpected true");
}

#[test]
fn empty_custom_message_is_dropped() {
    let message = DiagnosticMessage::new("Expected true").with_custom(Some(""));
    assert_eq!(message.custom, None);
    assert_eq!(message.to_string(), "Expected true");
}
