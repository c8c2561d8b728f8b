use fancy_regex::Regex;

use crate::dom::parse_int_prefix;
use crate::{Error, Result};

/// Shim operation an inline handler call maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// `(group, name...)`: show the names as the group's visible members.
    ShowLayers,
    /// `(reference, target, dx, dy)...`: position targets.
    Snap,
    /// `(name...)`: enable hover auto-hide.
    AutoHide,
    /// `(name, _, visibility)...`: explicit visibility.
    ShowHideLayers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HandlerArg {
    Str(String),
    Int(i64),
    Ident(String),
}

impl HandlerArg {
    /// Element names come from string or numeric literals only.
    pub(crate) fn as_name(&self) -> Option<String> {
        match self {
            Self::Str(value) => Some(value.clone()),
            Self::Int(value) => Some(value.to_string()),
            Self::Ident(_) => None,
        }
    }

    /// `parseInt` coercion; anything without a leading integer is 0.
    pub(crate) fn as_int(&self) -> i64 {
        match self {
            Self::Str(value) => parse_int_prefix(value).unwrap_or(0),
            Self::Int(value) => *value,
            Self::Ident(_) => 0,
        }
    }

    pub(crate) fn as_text(&self) -> String {
        match self {
            Self::Str(value) | Self::Ident(value) => value.clone(),
            Self::Int(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HandlerCall {
    pub(crate) function: String,
    pub(crate) args: Vec<HandlerArg>,
}

const CALL_PATTERN: &str = r"(?s)^([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)\s*\((.*)\)$";
const ARG_PATTERN: &str = r#"^\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|([-+]?\d+)(?:\.\d*)?|([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*))\s*(,|$)"#;

/// Parses inline event attribute text into the calls it makes.
#[derive(Debug, Clone)]
pub(crate) struct HandlerParser {
    call: Regex,
    arg: Regex,
}

impl HandlerParser {
    pub(crate) fn new() -> Result<Self> {
        let compile =
            |pattern: &str| Regex::new(pattern).map_err(|err| Error::HandlerParse(err.to_string()));
        Ok(Self {
            call: compile(CALL_PATTERN)?,
            arg: compile(ARG_PATTERN)?,
        })
    }

    pub(crate) fn parse(&self, source: &str) -> Result<Vec<HandlerCall>> {
        let mut source = source.trim();
        if let Some(rest) = strip_prefix_ignore_case(source, "javascript:") {
            source = rest;
        }

        let mut calls = Vec::new();
        for statement in split_statements(source)? {
            let statement = statement.trim();
            if statement.is_empty() || is_return_statement(statement) {
                continue;
            }
            calls.push(self.parse_call(statement)?);
        }
        Ok(calls)
    }

    fn parse_call(&self, statement: &str) -> Result<HandlerCall> {
        let captures = self
            .call
            .captures(statement)
            .map_err(|err| Error::HandlerParse(err.to_string()))?
            .ok_or_else(|| Error::HandlerParse(format!("not a call: {statement}")))?;
        let function = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let raw_args = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        Ok(HandlerCall {
            function,
            args: self.parse_args(raw_args)?,
        })
    }

    fn parse_args(&self, raw: &str) -> Result<Vec<HandlerArg>> {
        let mut args = Vec::new();
        let mut rest = raw;
        if rest.trim().is_empty() {
            return Ok(args);
        }

        loop {
            let captures = self
                .arg
                .captures(rest)
                .map_err(|err| Error::HandlerParse(err.to_string()))?
                .ok_or_else(|| Error::HandlerParse(format!("bad argument list: {raw}")))?;

            let arg = if let Some(single) = captures.get(1) {
                HandlerArg::Str(unescape_string(single.as_str()))
            } else if let Some(double) = captures.get(2) {
                HandlerArg::Str(unescape_string(double.as_str()))
            } else if let Some(number) = captures.get(3) {
                HandlerArg::Int(parse_int_prefix(number.as_str()).unwrap_or(0))
            } else if let Some(ident) = captures.get(4) {
                HandlerArg::Ident(ident.as_str().to_string())
            } else {
                return Err(Error::HandlerParse(format!("bad argument list: {raw}")));
            };
            args.push(arg);

            let end = captures.get(0).map(|m| m.end()).unwrap_or(rest.len());
            let separator = captures.get(5).map(|m| m.as_str()).unwrap_or_default();
            rest = &rest[end..];
            if separator.is_empty() {
                return Ok(args);
            }
            if rest.trim().is_empty() {
                return Err(Error::HandlerParse(format!("trailing comma: {raw}")));
            }
        }
    }
}

fn strip_prefix_ignore_case<'a>(source: &'a str, prefix: &str) -> Option<&'a str> {
    let head = source.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &source[prefix.len()..])
}

fn is_return_statement(statement: &str) -> bool {
    statement == "return"
        || statement
            .strip_prefix("return")
            .is_some_and(|rest| rest.starts_with(|ch: char| ch.is_whitespace()))
}

/// Splits on `;` outside quotes and parentheses.
fn split_statements(source: &str) -> Result<Vec<&str>> {
    let mut out = Vec::new();
    let bytes = source.as_bytes();
    let mut start = 0usize;
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0usize;

    while i < bytes.len() {
        let ch = bytes[i];
        match (quote, ch) {
            (Some(_), b'\\') => {
                i += 2;
                continue;
            }
            (Some(q), _) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, b'\'') | (None, b'"') => quote = Some(ch),
            (None, b'(') => depth += 1,
            (None, b')') => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::HandlerParse(format!("unbalanced ')': {source}")))?;
            }
            (None, b';') if depth == 0 => {
                out.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if quote.is_some() {
        return Err(Error::HandlerParse(format!("unclosed string: {source}")));
    }
    if depth != 0 {
        return Err(Error::HandlerParse(format!("unbalanced '(': {source}")));
    }
    out.push(&source[start..]);
    Ok(out)
}

fn unescape_string(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex = chars.by_ref().take(4).collect::<String>();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    _ => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
