#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end layout tests.
//!
//! Docs are built the way a translator would build them and rendered through
//! the public entry point, checking:
//! 1. Width-driven group, fill and conditional-content decisions
//! 2. Forced breaks, line suffixes and literal lines
//! 3. Cursor recovery and error reporting
//! 4. Docs arriving as JSON and docs rewritten by the doc utilities

use layout_doc::builders::{
    add_alignment_to_doc, conditional_group, cursor, fill, group, group_with, hardline,
    if_break, if_break_with, indent, join, line, line_suffix, literalline, softline, text,
    GroupOptions,
};
use layout_doc::{
    clean_doc, json, replace_end_of_line, strip_trailing_hardline, Doc, DocKind, Group,
    GroupId, InvalidDoc,
};
use layout_print::{init_tracing, print_doc_to_string, EndOfLine, PrintError, PrintOptions};

fn print(doc: &Doc, width: usize) -> String {
    init_tracing();
    print_doc_to_string(doc, &PrintOptions::with_print_width(width))
        .unwrap()
        .into_string()
}

/// `[a, b, c]` that breaks one element per line, with a trailing comma when
/// broken.
fn array(items: &[&str]) -> Doc {
    group(vec![
        text("["),
        indent(vec![
            softline(),
            join(
                &Doc::from(vec![text(","), line()]),
                items.iter().map(|item| text(*item)),
            ),
            if_break(",", ""),
        ]),
        softline(),
        text("]"),
    ])
}

mod properties {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn group_fits_flat() {
        let doc = group(vec![text("foo"), line(), text("bar")]);
        assert_eq!(print(&doc, 10), "foo bar");
    }

    #[test]
    fn group_too_wide_breaks() {
        let doc = group(vec![text("foooooo"), line(), text("barbaz")]);
        assert_eq!(print(&doc, 10), "foooooo\nbarbaz");
    }

    #[test]
    fn hardline_is_width_independent() {
        let doc = Doc::from(vec![text("a"), hardline(), text("b")]);
        for width in [0, 1, 10, 80, 1000] {
            assert_eq!(print(&doc, width), "a\nb");
        }
    }

    #[test]
    fn fill_breaks_separators_independently() {
        let doc = fill(vec![text("aaaa"), line(), text("bb"), line(), text("cc")]);
        assert_eq!(print(&doc, 6), "aaaa\nbb cc");
    }

    #[test]
    fn if_break_follows_group_elsewhere_in_tree() {
        let id = GroupId::fresh();
        let doc = Doc::from(vec![
            group_with(
                vec![text("callee("), indent(vec![softline(), text("argument")]), softline(), text(")")],
                GroupOptions::with_id(id),
            ),
            // Lexically inside a group that fits, yet resolved by `id`.
            group(vec![text(" "), if_break_with("/* broken */", "/* flat */", id)]),
        ]);
        assert_eq!(print(&doc, 80), "callee(argument) /* flat */");
        assert_eq!(print(&doc, 12), "callee(\n  argument\n) /* broken */");
    }

    #[test]
    fn cursor_region_text() {
        let doc = Doc::from(vec![text("let "), cursor(), text("X"), cursor(), text(" = 1;")]);
        let printed = print_doc_to_string(&doc, &PrintOptions::default()).unwrap();
        assert_eq!(printed.as_str(), "let X = 1;");
        assert_eq!(printed.cursor_node_text(), Some("X"));
        assert_eq!(printed.cursor_node_start(), Some(4));
    }

    #[test]
    fn rendering_is_idempotent() {
        let doc = array(&["alpha", "beta", "gamma", "delta"]);
        let options = PrintOptions::with_print_width(20);
        let first = print_doc_to_string(&doc, &options).unwrap();
        let second = print_doc_to_string(&doc, &options).unwrap();
        assert_eq!(first, second);
    }
}

mod layouts {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn array_flat_and_broken() {
        let doc = array(&["1", "2", "3"]);
        assert_eq!(print(&doc, 80), "[1, 2, 3]");
        assert_eq!(print(&doc, 5), "[\n  1,\n  2,\n  3,\n]");
    }

    #[test]
    fn nested_arrays_break_outside_in() {
        let doc = array(&[]);
        assert_eq!(print(&doc, 80), "[]");

        let inner = array(&["1", "2"]);
        let doc = group(vec![
            text("["),
            indent(vec![softline(), inner.clone(), text(","), line(), inner]),
            softline(),
            text("]"),
        ]);
        assert_eq!(print(&doc, 14), "[\n  [1, 2],\n  [1, 2]\n]");
    }

    #[test]
    fn trailing_comment_stays_on_its_line() {
        let doc = Doc::from(vec![
            text("let a = 1;"),
            line_suffix(" // first"),
            hardline(),
            text("let b = 2;"),
        ]);
        assert_eq!(print(&doc, 80), "let a = 1; // first\nlet b = 2;");
    }

    #[test]
    fn conditional_group_picks_first_fitting_state() {
        let expanded = Doc::from(vec![
            text("f("),
            indent(vec![hardline(), text("argument")]),
            hardline(),
            text(")"),
        ]);
        let doc = conditional_group(
            vec![
                text("f(argument)"),
                Doc::from(vec![text("f(arg"), text("ument)")]),
                expanded,
            ],
            GroupOptions::default(),
        )
        .unwrap();
        assert_eq!(print(&doc, 80), "f(argument)");
        assert_eq!(print(&doc, 5), "f(\n  argument\n)");
    }

    #[test]
    fn aligned_embed_with_literal_lines() {
        let code = replace_end_of_line(&text("line one\nline two"));
        let doc = Doc::from(vec![
            text("{"),
            indent(vec![hardline(), text("embed:"), hardline(), add_alignment_to_doc(code, 4, 2)]),
            hardline(),
            text("}"),
        ]);
        // Literal lines inside the alignment return to the captured root,
        // which is the zero indentation here.
        assert_eq!(print(&doc, 80), "{\n  embed:\n  line one\nline two\n}");
    }

    #[test]
    fn literal_lines_return_to_root() {
        let doc = indent(vec![
            text("`"),
            literalline(),
            text("raw"),
            literalline(),
            text("`"),
        ]);
        assert_eq!(print(&doc, 80), "`\nraw\n`");
    }

    #[test]
    fn tabs_and_crlf() {
        let doc = Doc::from(vec![
            text("fn main() {"),
            indent(vec![hardline(), text("body();")]),
            hardline(),
            text("}"),
        ]);
        let options = PrintOptions {
            use_tabs: true,
            end_of_line: EndOfLine::Crlf,
            ..PrintOptions::default()
        };
        let printed = print_doc_to_string(&doc, &options).unwrap();
        assert_eq!(printed.as_str(), "fn main() {\r\n\tbody();\r\n}");
    }
}

mod deep_docs {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nested(depth: usize) -> Doc {
        let mut doc = text("x");
        for i in 0..depth {
            doc = if i % 2 == 0 { group(doc) } else { Doc::from(vec![doc]) };
        }
        doc
    }

    #[test]
    fn deep_doc_prints_and_drops() {
        let doc = nested(200_000);
        assert_eq!(print(&doc, 80), "x");
        drop(doc);
    }
}

mod utilities {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tracing_setup_is_repeatable() {
        init_tracing();
        init_tracing();
        assert_eq!(print(&text("a"), 80), "a");
    }

    #[test]
    fn cleaned_doc_prints_the_same() {
        let doc = Doc::from(vec![
            Doc::from(vec![text("a"), text("")]),
            group(Doc::from(Vec::<Doc>::new())),
            group(group(vec![text("b"), line(), text("c")])),
            Doc::from(vec![text("d")]),
        ]);
        let cleaned = clean_doc(&doc);
        for width in [2, 80] {
            assert_eq!(print(&cleaned, width), print(&doc, width));
        }
    }

    #[test]
    fn stripped_trailing_hardline() {
        let doc = Doc::from(vec![text("a"), hardline(), text("b"), hardline()]);
        assert_eq!(print(&doc, 80), "a\nb\n");
        assert_eq!(print(&strip_trailing_hardline(&doc), 80), "a\nb");
    }
}

mod json_docs {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prints_json_doc() {
        let doc = json::from_str(
            r#"{
                "type": "group",
                "contents": [
                    "call(",
                    { "type": "indent", "contents": [{ "type": "line", "soft": true }, "argument"] },
                    { "type": "line", "soft": true },
                    ")"
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(print(&doc, 80), "call(argument)");
        assert_eq!(print(&doc, 10), "call(\n  argument\n)");
    }

    #[test]
    fn json_group_ids_link_if_break() {
        let doc = json::from_str(
            r#"[
                { "type": "group", "id": "g", "contents": ["aaaa", { "type": "line" }, "bbbb"] },
                { "type": "if-break", "breakContents": ";", "flatContents": "", "groupId": "g" }
            ]"#,
        )
        .unwrap();
        assert_eq!(print(&doc, 80), "aaaa bbbb");
        assert_eq!(print(&doc, 5), "aaaa\nbbbb;");
    }

    #[test]
    fn unknown_json_type_is_invalid() {
        let err = json::from_str(r#"{ "type": "paragraph" }"#).unwrap_err();
        assert!(matches!(err, InvalidDoc::UnknownType { .. }));
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mismatched_conditional_group() -> Doc {
        Doc::new(DocKind::Group(Group {
            contents: text("a"),
            id: None,
            should_break: false,
            expanded_states: Some(vec![text("b"), text("c")]),
        }))
    }

    #[test]
    fn validation_rejects_mismatched_states() {
        let options = PrintOptions {
            validate_docs: true,
            ..PrintOptions::default()
        };
        let err = print_doc_to_string(&mismatched_conditional_group(), &options).unwrap_err();
        assert!(matches!(
            err,
            PrintError::InvalidDoc(InvalidDoc::ContentsMismatch { .. })
        ));
    }

    #[test]
    fn validation_can_be_turned_off() {
        let options = PrintOptions {
            validate_docs: false,
            ..PrintOptions::default()
        };
        let printed = print_doc_to_string(&mismatched_conditional_group(), &options).unwrap();
        assert_eq!(printed.as_str(), "a");
    }

    #[test]
    fn too_many_cursors() {
        let doc = Doc::from(vec![cursor(), text("a"), cursor(), text("b"), cursor()]);
        let err = print_doc_to_string(&doc, &PrintOptions::default()).unwrap_err();
        assert_eq!(err, PrintError::TooManyCursors);
        assert!(err.to_string().contains("too many cursors"));
    }

    #[test]
    fn invalid_doc_message_passes_through() {
        let err = PrintError::from(InvalidDoc::EmptyExpandedStates);
        assert_eq!(err.to_string(), InvalidDoc::EmptyExpandedStates.to_string());
    }
}
