use super::{Dom, NodeId};

impl Dom {
    /// Inline style lookup; `key` may be a CSS name or its camelCase form.
    pub(crate) fn style_get(&self, node_id: NodeId, key: &str) -> Option<String> {
        let element = self.element(node_id)?;
        let name = js_prop_to_css_name(key);
        parse_style_declarations(element.attrs.get("style").map(String::as_str))
            .into_iter()
            .find(|(prop, _)| prop == &name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
    }

    /// Returns `false` when `node_id` is not an element.
    pub(crate) fn style_set(&mut self, node_id: NodeId, key: &str, value: &str) -> bool {
        let name = js_prop_to_css_name(key);
        let Some(element) = self.element_mut(node_id) else {
            return false;
        };

        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(prop, _)| prop == &name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name, value.to_string()));
        }

        // Keep an empty style attribute to match CSSStyleDeclaration behavior.
        element
            .attrs
            .insert("style".to_string(), serialize_style_declarations(&decls));
        true
    }

    /// `parseInt(style[key])`, `None` when unset or not numeric.
    pub(crate) fn style_int(&self, node_id: NodeId, key: &str) -> Option<i64> {
        self.style_get(node_id, key)
            .and_then(|value| parse_int_prefix(&value))
    }
}

fn js_prop_to_css_name(prop: &str) -> String {
    let mut out = String::new();
    for ch in prop.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Leading-integer parse in the manner of `parseInt(text, 10)`.
pub(crate) fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    // Only overflow can fail here; clamp like a saturating cast.
    Some(
        trimmed[..end]
            .parse::<i64>()
            .unwrap_or(if negative { i64::MIN } else { i64::MAX }),
    )
}

fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    let mut start = 0usize;
    let mut i = 0usize;
    let bytes = style_attr.as_bytes();
    let mut paren_depth = 0isize;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let ch = bytes[i];
        match (quote, ch) {
            (Some(_), b'\\') if i + 1 < bytes.len() => {
                i += 2;
                continue;
            }
            (Some(q), _) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, b'\'') | (None, b'"') => quote = Some(ch),
            (None, b'(') => paren_depth += 1,
            (None, b')') => paren_depth = (paren_depth - 1).max(0),
            (None, b';') if paren_depth == 0 => {
                push_style_declaration(&style_attr[start..i], &mut out);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    push_style_declaration(&style_attr[start..], &mut out);
    out
}

fn push_style_declaration(raw_decl: &str, out: &mut Vec<(String, String)>) {
    let decl = raw_decl.trim();
    let Some((name, value)) = decl.split_once(':') else {
        return;
    };

    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return;
    }
    let value = value.trim().to_string();

    if let Some(pos) = out.iter().position(|(existing, _)| existing == &name) {
        out[pos].1 = value;
    } else {
        out.push((name, value));
    }
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    let mut out = String::new();
    for (idx, (name, value)) in decls.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}
