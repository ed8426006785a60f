use super::*;
use crate::indent::Indentation;
use layout_doc::builders::{
    conditional_group, group, group_with, hardline, if_break, if_break_with, line,
    line_suffix, line_suffix_boundary, softline, text, trim as trim_doc, GroupOptions,
};
use layout_doc::{propagate_breaks, GroupId};

fn flat(doc: &Doc) -> Command<'_> {
    Command::doc(Indentation::root(), Mode::Flat, doc)
}

fn fits_flat(doc: &Doc, width: isize) -> bool {
    let breaks = propagate_breaks(doc);
    fits(&flat(doc), &[], width, false, &GroupModeMap::default(), &breaks, false)
}

#[test]
fn text_within_width() {
    let doc = text("hello");
    assert!(fits_flat(&doc, 5));
    assert!(!fits_flat(&doc, 4));
}

#[test]
fn negative_width_never_fits() {
    assert!(!fits_flat(&text(""), -1));
}

#[test]
fn flat_line_costs_one_column() {
    let doc = Doc::from(vec![text("foo"), line(), text("bar")]);
    assert!(fits_flat(&doc, 7));
    assert!(!fits_flat(&doc, 6));

    let doc = Doc::from(vec![text("foo"), softline(), text("bar")]);
    assert!(fits_flat(&doc, 6));
}

#[test]
fn hard_line_ends_measurement() {
    let doc = Doc::from(vec![text("ab"), hardline(), text("much too long")]);
    assert!(fits_flat(&doc, 2));
}

#[test]
fn break_mode_line_ends_measurement() {
    let doc = Doc::from(vec![text("ab"), line(), text("much too long")]);
    let breaks = propagate_breaks(&doc);
    let cmd = Command::doc(Indentation::root(), Mode::Break, &doc);
    assert!(fits(&cmd, &[], 2, false, &GroupModeMap::default(), &breaks, false));
}

#[test]
fn rest_commands_are_measured_until_newline() {
    let head = text("abc");
    let tail = Doc::from(vec![text("def"), line(), text("ignored")]);
    let breaks = PropagatedBreaks::none();
    let rest = [Command::doc(Indentation::root(), Mode::Break, &tail)];
    let modes = GroupModeMap::default();

    assert!(fits(&flat(&head), &rest, 6, false, &modes, &breaks, false));
    assert!(!fits(&flat(&head), &rest, 5, false, &modes, &breaks, false));
}

#[test]
fn rest_is_consumed_innermost_first() {
    let head = text("a");
    let outer = Doc::from(vec![line(), text("never")]);
    let inner = text("bc");
    let breaks = PropagatedBreaks::none();
    // The innermost pending command is last on the stack.
    let rest = [
        Command::doc(Indentation::root(), Mode::Break, &outer),
        Command::doc(Indentation::root(), Mode::Break, &inner),
    ];
    let modes = GroupModeMap::default();
    assert!(fits(&flat(&head), &rest, 3, false, &modes, &breaks, false));
    assert!(!fits(&flat(&head), &rest, 2, false, &modes, &breaks, false));
}

#[test]
fn trim_gives_back_width() {
    let doc = Doc::from(vec![text("ab   "), trim_doc(), text("cd")]);
    assert!(fits_flat(&doc, 5));
}

#[test]
fn must_be_flat_rejects_broken_group() {
    let doc = Doc::from(vec![text("a"), group(vec![text("b"), hardline()])]);
    let breaks = propagate_breaks(&doc);
    let modes = GroupModeMap::default();
    assert!(!fits(&flat(&doc), &[], 80, false, &modes, &breaks, true));
    assert!(fits(&flat(&doc), &[], 80, false, &modes, &breaks, false));
}

#[test]
fn broken_conditional_group_measures_last_state() {
    let doc = conditional_group(
        vec![text("a very long first state"), text("b")],
        GroupOptions::broken(),
    )
    .unwrap();
    assert!(fits_flat(&doc, 1));
}

#[test]
fn if_break_uses_recorded_group_mode() {
    let id = GroupId::fresh();
    let doc = if_break_with("long break branch", "f", id);
    let breaks = PropagatedBreaks::none();

    let mut modes = GroupModeMap::default();
    modes.insert(id, Mode::Flat);
    assert!(fits(&flat(&doc), &[], 1, false, &modes, &breaks, false));

    modes.insert(id, Mode::Break);
    assert!(!fits(&flat(&doc), &[], 1, false, &modes, &breaks, false));
}

#[test]
fn if_break_with_unseen_group_uses_inherited_mode() {
    let id = GroupId::fresh();
    let doc = if_break_with("long break branch", "f", id);
    assert!(fits_flat(&doc, 1));

    let doc = if_break("long break branch", "f");
    assert!(fits_flat(&doc, 1));
}

#[test]
fn explicit_id_group_inside_flat_measurement() {
    let id = GroupId::fresh();
    let doc = group_with(vec![text("x"), line(), text("y")], GroupOptions::with_id(id));
    assert!(fits_flat(&doc, 3));
    assert!(!fits_flat(&doc, 2));
}

#[test]
fn boundary_with_pending_suffix_fails() {
    let doc = Doc::from(vec![line_suffix(" // c"), text("a"), line_suffix_boundary()]);
    assert!(!fits_flat(&doc, 80));

    let doc = Doc::from(vec![text("a"), line_suffix_boundary()]);
    let breaks = PropagatedBreaks::none();
    assert!(!fits(&flat(&doc), &[], 80, true, &GroupModeMap::default(), &breaks, false));
    assert!(fits_flat(&doc, 80));
}

#[test]
fn line_suffix_costs_nothing() {
    let doc = Doc::from(vec![text("ab"), line_suffix(" // a long trailing comment")]);
    assert!(fits_flat(&doc, 2));
}

#[test]
fn wide_text_counts_display_columns() {
    assert!(!fits_flat(&text("日本語"), 5));
    assert!(fits_flat(&text("日本語"), 6));
}
