//! JSON doc interchange.
//!
//! Translators living outside the process (or written in another language)
//! hand docs over as JSON in the conventional shape: strings are texts,
//! arrays are concats, and everything else is an object tagged by `type`:
//!
//! ```json
//! { "type": "group", "contents": ["foo", { "type": "line" }, "bar"], "break": false }
//! ```
//!
//! Group ids are arbitrary strings in JSON; each decode maps them to fresh
//! [`GroupId`]s. An alignment of `null` means dedent-to-root, a negative
//! number means dedent and `{ "type": "root" }` marks the root.

use rustc_hash::FxHashMap;
use serde_json::{json, Map, Value};

use crate::doc::{Alignment, Doc, DocKind, Group, GroupId, LineKind};
use crate::error::InvalidDoc;
use crate::stack::ensure_sufficient_stack;

/// Decode a doc from its JSON shape.
pub fn from_value(value: &Value) -> Result<Doc, InvalidDoc> {
    Decoder::default().decode(value)
}

/// Decode a doc from JSON text.
pub fn from_str(source: &str) -> Result<Doc, InvalidDoc> {
    let value: Value = serde_json::from_str(source).map_err(|err| InvalidDoc::UnexpectedValue {
        found: format!("malformed JSON ({err})"),
    })?;
    from_value(&value)
}

/// Encode a doc into its JSON shape.
pub fn to_value(doc: &Doc) -> Value {
    ensure_sufficient_stack(|| match doc.kind() {
        DocKind::Text(text) => Value::String(text.clone()),
        DocKind::Concat(parts) => Value::Array(parts.iter().map(to_value).collect()),
        DocKind::Line(kind) => {
            let mut line = Map::new();
            line.insert("type".into(), "line".into());
            match kind {
                LineKind::Normal => {}
                LineKind::Soft => {
                    line.insert("soft".into(), true.into());
                }
                LineKind::Hard => {
                    line.insert("hard".into(), true.into());
                }
                LineKind::Literal => {
                    line.insert("hard".into(), true.into());
                    line.insert("literal".into(), true.into());
                }
            }
            Value::Object(line)
        }
        DocKind::Group(group) => {
            let mut object = Map::new();
            object.insert("type".into(), "group".into());
            object.insert("contents".into(), to_value(&group.contents));
            object.insert("break".into(), group.should_break.into());
            if let Some(id) = group.id {
                object.insert("id".into(), id.to_string().into());
            }
            if let Some(states) = &group.expanded_states {
                object.insert(
                    "expandedStates".into(),
                    Value::Array(states.iter().map(to_value).collect()),
                );
            }
            Value::Object(object)
        }
        DocKind::Fill(parts) => json!({
            "type": "fill",
            "parts": parts.iter().map(to_value).collect::<Vec<_>>(),
        }),
        DocKind::IfBreak {
            break_contents,
            flat_contents,
            group_id,
        } => {
            let mut object = Map::new();
            object.insert("type".into(), "if-break".into());
            object.insert("breakContents".into(), to_value(break_contents));
            object.insert("flatContents".into(), to_value(flat_contents));
            if let Some(id) = group_id {
                object.insert("groupId".into(), id.to_string().into());
            }
            Value::Object(object)
        }
        DocKind::IndentIfBreak {
            contents,
            group_id,
            negate,
        } => json!({
            "type": "indent-if-break",
            "contents": to_value(contents),
            "groupId": group_id.to_string(),
            "negate": negate,
        }),
        DocKind::Indent(contents) => json!({ "type": "indent", "contents": to_value(contents) }),
        DocKind::Align {
            alignment,
            contents,
        } => {
            let n = match alignment {
                Alignment::Spaces(width) => json!(width),
                Alignment::Text(prefix) => json!(prefix),
                Alignment::Dedent => json!(-1),
                Alignment::DedentToRoot => Value::Null,
                Alignment::MarkAsRoot => json!({ "type": "root" }),
            };
            json!({ "type": "align", "n": n, "contents": to_value(contents) })
        }
        DocKind::Trim => json!({ "type": "trim" }),
        DocKind::LineSuffix(contents) => {
            json!({ "type": "line-suffix", "contents": to_value(contents) })
        }
        DocKind::LineSuffixBoundary => json!({ "type": "line-suffix-boundary" }),
        DocKind::BreakParent => json!({ "type": "break-parent" }),
        DocKind::Cursor => json!({ "type": "cursor" }),
        DocKind::Label { label, contents } => {
            json!({ "type": "label", "label": label, "contents": to_value(contents) })
        }
    })
}

#[derive(Default)]
struct Decoder {
    ids: FxHashMap<String, GroupId>,
}

impl Decoder {
    fn decode(&mut self, value: &Value) -> Result<Doc, InvalidDoc> {
        ensure_sufficient_stack(|| match value {
            Value::String(text) => Ok(Doc::from(text.as_str())),
            Value::Array(parts) => Ok(Doc::from(self.decode_all(parts)?)),
            Value::Object(object) => self.decode_object(value, object),
            Value::Null | Value::Bool(_) | Value::Number(_) => Err(InvalidDoc::UnexpectedValue {
                found: value.to_string(),
            }),
        })
    }

    fn decode_all(&mut self, values: &[Value]) -> Result<Vec<Doc>, InvalidDoc> {
        values.iter().map(|value| self.decode(value)).collect()
    }

    fn group_id(&mut self, name: &str) -> GroupId {
        *self
            .ids
            .entry(name.to_owned())
            .or_insert_with(GroupId::fresh)
    }

    fn decode_object(&mut self, value: &Value, object: &Map<String, Value>) -> Result<Doc, InvalidDoc> {
        let Some(kind) = object.get("type").and_then(Value::as_str) else {
            return Err(InvalidDoc::UnknownType {
                kind: object.get("type").map_or_else(|| "undefined".to_owned(), Value::to_string),
                doc: value.to_string(),
            });
        };
        let flag = |name: &str| object.get(name).is_some_and(is_truthy);
        let missing = |kind: &'static str, field: &'static str| InvalidDoc::MissingField {
            kind,
            field,
            doc: value.to_string(),
        };

        let doc = match kind {
            "line" => DocKind::Line(if flag("literal") {
                LineKind::Literal
            } else if flag("hard") {
                LineKind::Hard
            } else if flag("soft") {
                LineKind::Soft
            } else {
                LineKind::Normal
            }),
            "group" => {
                let id = match object.get("id") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(name)) => Some(self.group_id(name)),
                    Some(_) => return Err(missing("group", "id")),
                };
                let expanded_states = match object.get("expandedStates") {
                    None | Some(Value::Null) => None,
                    Some(Value::Array(states)) => Some(self.decode_all(states)?),
                    Some(_) => return Err(missing("group", "expandedStates")),
                };
                // Explicit contents are kept as given so validation can compare
                // them with the first state.
                let contents = match (object.get("contents"), &expanded_states) {
                    (Some(contents), _) => self.decode(contents)?,
                    (None, Some(states)) => {
                        states.first().cloned().ok_or(InvalidDoc::EmptyExpandedStates)?
                    }
                    (None, None) => return Err(missing("group", "contents")),
                };
                DocKind::Group(Group {
                    contents,
                    id,
                    should_break: flag("break"),
                    expanded_states,
                })
            }
            "fill" => match object.get("parts") {
                Some(Value::Array(parts)) => DocKind::Fill(self.decode_all(parts)?),
                _ => return Err(missing("fill", "parts")),
            },
            "if-break" => {
                let break_contents = self.decode_optional(object.get("breakContents"))?;
                let flat_contents = self.decode_optional(object.get("flatContents"))?;
                let group_id = match object.get("groupId") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(name)) => Some(self.group_id(name)),
                    Some(_) => return Err(missing("if-break", "groupId")),
                };
                DocKind::IfBreak {
                    break_contents,
                    flat_contents,
                    group_id,
                }
            }
            "indent-if-break" => {
                let Some(Value::String(name)) = object.get("groupId") else {
                    return Err(missing("indent-if-break", "groupId"));
                };
                let group_id = self.group_id(name);
                DocKind::IndentIfBreak {
                    contents: self.decode_contents(object, "indent-if-break", value)?,
                    group_id,
                    negate: flag("negate"),
                }
            }
            "indent" => DocKind::Indent(self.decode_contents(object, "indent", value)?),
            "align" => {
                let alignment = match object.get("n") {
                    None | Some(Value::Null) => Alignment::DedentToRoot,
                    Some(Value::String(prefix)) => Alignment::Text(prefix.clone()),
                    Some(Value::Number(n)) => match n.as_u64() {
                        Some(width) => Alignment::Spaces(usize::try_from(width).map_err(|_| missing("align", "n"))?),
                        None if n.as_f64().is_some_and(|n| n < 0.0) => Alignment::Dedent,
                        None => return Err(missing("align", "n")),
                    },
                    Some(Value::Object(marker))
                        if marker.get("type").and_then(Value::as_str) == Some("root") =>
                    {
                        Alignment::MarkAsRoot
                    }
                    Some(_) => return Err(missing("align", "n")),
                };
                DocKind::Align {
                    alignment,
                    contents: self.decode_contents(object, "align", value)?,
                }
            }
            "trim" => DocKind::Trim,
            "line-suffix" => DocKind::LineSuffix(self.decode_contents(object, "line-suffix", value)?),
            "line-suffix-boundary" => DocKind::LineSuffixBoundary,
            "break-parent" => DocKind::BreakParent,
            "cursor" => DocKind::Cursor,
            "label" => {
                let label = match object.get("label") {
                    Some(Value::String(name)) => name.clone(),
                    Some(other) => other.to_string(),
                    None => return Err(missing("label", "label")),
                };
                DocKind::Label {
                    label,
                    contents: self.decode_contents(object, "label", value)?,
                }
            }
            other => {
                return Err(InvalidDoc::UnknownType {
                    kind: other.to_owned(),
                    doc: value.to_string(),
                })
            }
        };
        Ok(Doc::new(doc))
    }

    fn decode_contents(
        &mut self,
        object: &Map<String, Value>,
        kind: &'static str,
        value: &Value,
    ) -> Result<Doc, InvalidDoc> {
        match object.get("contents") {
            Some(contents) => self.decode(contents),
            None => Err(InvalidDoc::MissingField {
                kind,
                field: "contents",
                doc: value.to_string(),
            }),
        }
    }

    /// Absent (or `null`) branches of an `if-break` are empty.
    fn decode_optional(&mut self, value: Option<&Value>) -> Result<Doc, InvalidDoc> {
        match value {
            None | Some(Value::Null) => Ok(Doc::empty()),
            Some(value) => self.decode(value),
        }
    }
}

/// JSON truthiness for flags (`"propagated"` counts as a set `break`).
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
mod tests;
