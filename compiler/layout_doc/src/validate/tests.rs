use super::*;
use crate::builders::{conditional_group, group, hardline, line, text, GroupOptions};
use crate::doc::Group;

#[test]
fn builder_output_is_valid() {
    let cond = conditional_group(
        vec![text("a b"), Doc::from(vec![text("a"), hardline(), text("b")])],
        GroupOptions::default(),
    )
    .unwrap();
    let doc = group(vec![cond, line(), text("c")]);
    assert_eq!(validate_doc(&doc), Ok(()));
}

#[test]
fn rejects_empty_expanded_states() {
    let doc = Doc::new(DocKind::Group(Group {
        contents: text("x"),
        id: None,
        should_break: false,
        expanded_states: Some(Vec::new()),
    }));
    assert_eq!(
        validate_doc(&Doc::from(vec![text("a"), doc])),
        Err(InvalidDoc::EmptyExpandedStates)
    );
}

#[test]
fn rejects_contents_that_differ_from_first_state() {
    let doc = Doc::new(DocKind::Group(Group {
        contents: text("contents"),
        id: None,
        should_break: false,
        expanded_states: Some(vec![text("first"), text("second")]),
    }));
    let Err(InvalidDoc::ContentsMismatch { doc: rendered }) = validate_doc(&doc) else {
        panic!("expected a contents mismatch");
    };
    assert!(rendered.contains("conditional_group"));

    let message = validate_doc(&doc).unwrap_err().to_string();
    assert!(message.contains(&rendered));
}

#[test]
fn empty_states_message_names_no_value() {
    assert_eq!(
        InvalidDoc::EmptyExpandedStates.to_string(),
        "conditional group needs at least one expanded state"
    );
}
