//! Scenario Sc6 (spec.md §6, §8): string-table parsing and named
//! `Parameter` substitution over the Markdown-subset format.

use gapir_core::stringtable::{Msg, Node, StringTable, Value};

const SOURCE: &str = r#"
# GREET
Hello {{name}}, welcome to *replay*.

# FAREWELL
## See you soon
- pack your things
- check the **exit** sign

# CODE_SAMPLE
```rust
let x = 1;
```
"#;

#[test]
fn sc6_substitutes_a_named_parameter() {
    let table = StringTable::parse(SOURCE).unwrap();
    let msg = Msg::new("GREET").with_argument("name", Value::from("world"));
    assert_eq!(msg.text(&table), "Hello world, welcome to replay.");
}

#[test]
fn missing_arguments_render_as_their_key() {
    let table = StringTable::parse(SOURCE).unwrap();
    let msg = Msg::new("GREET");
    assert_eq!(msg.text(&table), "Hello name, welcome to replay.");
}

#[test]
fn missing_identifier_renders_bracketed() {
    let table = StringTable::parse(SOURCE).unwrap();
    let msg = Msg::new("NOT_AN_ENTRY");
    assert_eq!(msg.text(&table), "<NOT_AN_ENTRY>");
}

#[test]
fn nested_headings_and_lists_parse_under_an_entry() {
    let table = StringTable::parse(SOURCE).unwrap();
    let body = table.get("FAREWELL").unwrap();

    assert!(matches!(&body[0], Node::Heading { scale: 2, .. }));
    match &body[1] {
        Node::List {
            items,
        } => assert_eq!(items.len(), 2),
        other => panic!("expected a List node, got {:?}", other),
    }
}

#[test]
fn fenced_code_blocks_preserve_their_body_verbatim() {
    let table = StringTable::parse(SOURCE).unwrap();
    let body = table.get("CODE_SAMPLE").unwrap();
    match &body[0] {
        Node::Code {
            language,
            body,
        } => {
            assert_eq!(language, "rust");
            assert_eq!(body, "let x = 1;");
        }
        other => panic!("expected a Code node, got {:?}", other),
    }
}

#[test]
fn rejects_a_line_with_no_top_level_entry_header() {
    let err = StringTable::parse("not a header at all").unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn rejects_an_unterminated_parameter() {
    let err = StringTable::parse("# BAD\nhello {{name").unwrap_err();
    assert_eq!(err.line, 2);
}
