//! Flow-style YAML rendering for follow-list configs.
//!
//! serde_yaml only emits block-style sequences, while the bot's config
//! files keep their lists inline (`users: [a, b, c]`) so hand edits stay
//! one-liners. Rendering is done here instead: block mappings, inline
//! sequences, minimal scalar quoting, key order untouched.

use crate::error::{Result, SourcesError};
use serde_yaml::{Mapping, Value};

/// Render a YAML document with block-style mappings and inline lists.
pub fn to_flow_yaml(doc: &Mapping) -> Result<String> {
    if doc.is_empty() {
        return Ok("{}\n".to_string());
    }
    let mut out = String::new();
    write_mapping(&mut out, doc, 0)?;
    Ok(out)
}

fn write_mapping(out: &mut String, mapping: &Mapping, indent: usize) -> Result<()> {
    for (key, value) in mapping {
        out.push_str(&" ".repeat(indent));
        match value {
            Value::Mapping(child) if !child.is_empty() => {
                out.push_str(&format!("{}:\n", scalar_text(key)?));
                write_mapping(out, child, indent + 2)?;
            }
            _ => {
                out.push_str(&format!("{}: {}\n", scalar_text(key)?, flow_text(value)?));
            }
        }
    }
    Ok(())
}

/// Inline rendering for scalars, sequences, and empty mappings.
fn flow_text(value: &Value) -> Result<String> {
    match value {
        Value::Sequence(items) => {
            let rendered: Result<Vec<String>> = items.iter().map(flow_text).collect();
            Ok(format!("[{}]", rendered?.join(", ")))
        }
        Value::Mapping(mapping) => {
            // Only empty mappings and mappings nested inside sequences
            // reach this point.
            let mut parts = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                parts.push(format!("{}: {}", scalar_text(key)?, flow_text(value)?));
            }
            Ok(format!("{{{}}}", parts.join(", ")))
        }
        _ => scalar_text(value),
    }
}

/// Plain or quoted text for a scalar value.
fn scalar_text(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(quoted(s)),
        Value::Sequence(_) | Value::Mapping(_) => Err(SourcesError::Unsupported(
            "collection used where a scalar is required".to_string(),
        )),
        Value::Tagged(_) => Err(SourcesError::Unsupported(
            "YAML tags are not supported".to_string(),
        )),
    }
}

/// Quote a string scalar when plain style would be read back as another
/// type or break the flow syntax.
fn quoted(s: &str) -> String {
    if s.contains('\n') || s.contains('\t') {
        return format!(
            "\"{}\"",
            s.replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
                .replace('\t', "\\t")
        );
    }
    if needs_quotes(s) {
        format!("'{}'", s.replace('\'', "''"))
    } else {
        s.to_string()
    }
}

fn needs_quotes(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    let lowered = s.to_ascii_lowercase();
    if matches!(
        lowered.as_str(),
        "null" | "~" | "true" | "false" | "yes" | "no" | "on" | "off"
    ) {
        return true;
    }
    // Anything the parser would resolve as a number must stay a string.
    if s.parse::<f64>().is_ok() || lowered.starts_with("0x") || lowered.starts_with("0o") {
        return true;
    }
    if s.starts_with(|c: char| {
        matches!(
            c,
            '!' | '&' | '*' | '-' | '?' | ':' | ',' | '[' | ']' | '{' | '}' | '#' | '|' | '>'
                | '@' | '`' | '"' | '\'' | '%' | ' '
        )
    }) {
        return true;
    }
    if s.ends_with(' ') {
        return true;
    }
    s.chars()
        .any(|c| matches!(c, ':' | '#' | ',' | '[' | ']' | '{' | '}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_lists_render_inline() {
        let rendered = to_flow_yaml(&doc(
            "username: alice\nactions:\n  blogger-followers:\n    - bob\n    - carol\n",
        ))
        .unwrap();
        assert_eq!(
            rendered,
            "username: alice\nactions:\n  blogger-followers: [bob, carol]\n"
        );
    }

    #[test]
    fn test_empty_list_renders_brackets() {
        let rendered = to_flow_yaml(&doc("users: []\n")).unwrap();
        assert_eq!(rendered, "users: []\n");
    }

    #[test]
    fn test_key_order_is_preserved() {
        let rendered = to_flow_yaml(&doc("zeta: 1\nalpha: 2\nmiddle: 3\n")).unwrap();
        assert_eq!(rendered, "zeta: 1\nalpha: 2\nmiddle: 3\n");
    }

    #[test]
    fn test_scalars_render_bare() {
        let rendered = to_flow_yaml(&doc(
            "likes-count: 10\nenabled: true\nratio: 1.5\nnote: null\n",
        ))
        .unwrap();
        assert_eq!(
            rendered,
            "likes-count: 10\nenabled: true\nratio: 1.5\nnote: null\n"
        );
    }

    #[test]
    fn test_ambiguous_strings_are_quoted() {
        let mut mapping = Mapping::new();
        mapping.insert(
            Value::String("users".to_string()),
            Value::Sequence(vec![
                Value::String("true".to_string()),
                Value::String("123".to_string()),
                Value::String("a,b".to_string()),
                Value::String("plain.name_1".to_string()),
            ]),
        );

        let rendered = to_flow_yaml(&mapping).unwrap();
        assert_eq!(rendered, "users: ['true', '123', 'a,b', plain.name_1]\n");
    }

    #[test]
    fn test_single_quotes_escape_apostrophes() {
        let mut mapping = Mapping::new();
        mapping.insert(
            Value::String("note".to_string()),
            Value::String("it's: quoted".to_string()),
        );

        let rendered = to_flow_yaml(&mapping).unwrap();
        assert_eq!(rendered, "note: 'it''s: quoted'\n");

        let reparsed: Mapping = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(reparsed, mapping);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_flow_yaml(&Mapping::new()).unwrap(), "{}\n");
    }

    #[test]
    fn test_rendered_output_parses_back_unchanged() {
        let original = doc(concat!(
            "username: michael.babiy1\n",
            "actions:\n",
            "  blogger-followers: [userA, '007', carol]\n",
            "  likes-count: 15\n",
            "stories: true\n",
        ));

        let rendered = to_flow_yaml(&original).unwrap();
        let reparsed: Mapping = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_nested_empty_mapping_renders_inline() {
        let rendered = to_flow_yaml(&doc("actions: {}\n")).unwrap();
        assert_eq!(rendered, "actions: {}\n");
    }
}
