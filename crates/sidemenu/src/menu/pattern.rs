//! Route pattern compilation.
//!
//! Menu keys double as route patterns. A pattern is compiled into an anchored,
//! case-insensitive regular expression:
//!
//! - `:name` matches one segment (`/blog/:slug`)
//! - `:name?`, `:name*` and `:name+` make the segment optional or repeated
//! - `:name(\d+)` and bare `(\d+)` restrict what the segment accepts
//! - `*` matches anything
//! - a trailing `/` on the path is always optional

use std::collections::HashMap;

use regex::Regex;

use crate::error::PatternError;

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
    /// Parameter names, in capture order. Unnamed groups are numbered.
    params: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl PathPattern {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut expr = String::from("(?i)^");
        let mut params: Vec<String> = Vec::new();
        // A `/` or `.` is held back until we know whether a parameter owns it.
        let mut prefix: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '\\' => {
                    flush_prefix(&mut expr, &mut prefix);
                    let escaped = chars.get(i + 1).copied().unwrap_or('\\');
                    push_literal(&mut expr, escaped);
                    i += 2;
                }
                '/' | '.' => {
                    flush_prefix(&mut expr, &mut prefix);
                    prefix = Some(c);
                    i += 1;
                }
                ':' => {
                    let name_end = scan_name(&chars, i + 1);
                    if name_end == i + 1 {
                        flush_prefix(&mut expr, &mut prefix);
                        push_literal(&mut expr, ':');
                        i += 1;
                        continue;
                    }
                    let name: String = chars[i + 1..name_end].iter().collect();
                    i = name_end;

                    let custom = if chars.get(i) == Some(&'(') {
                        let (group, end) = read_group(&chars, i, pattern)?;
                        i = end;
                        Some(group)
                    } else {
                        None
                    };
                    let modifier = read_modifier(&chars, &mut i);

                    push_param(&mut expr, prefix.take(), custom.as_deref(), modifier, params.len());
                    params.push(name);
                }
                '(' => {
                    let (group, end) = read_group(&chars, i, pattern)?;
                    i = end;
                    let modifier = read_modifier(&chars, &mut i);

                    push_param(&mut expr, prefix.take(), Some(&group), modifier, params.len());
                    params.push(params.len().to_string());
                }
                '*' => {
                    push_param(&mut expr, prefix.take(), Some(".*"), None, params.len());
                    params.push(params.len().to_string());
                    i += 1;
                }
                _ => {
                    flush_prefix(&mut expr, &mut prefix);
                    push_literal(&mut expr, c);
                    i += 1;
                }
            }
        }

        // A dangling `/` is absorbed by the optional trailing slash below.
        if prefix == Some('.') {
            push_literal(&mut expr, '.');
        }
        expr.push_str("/?$");

        let regex = Regex::new(&expr).map_err(|e| PatternError::InvalidRegex {
            pattern: pattern.to_string(),
            details: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            params,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parameter names in declaration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match a path and extract its parameters.
    ///
    /// Pattern: "/blog/:slug/edit"
    /// Path: "/blog/my-post/edit"
    /// Result: Some({"slug": "my-post"})
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;
        let params = self
            .params
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                caps.name(&group_name(index))
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();
        Some(params)
    }
}

fn group_name(index: usize) -> String {
    format!("p{index}")
}

fn push_literal(expr: &mut String, c: char) {
    expr.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
}

fn flush_prefix(expr: &mut String, prefix: &mut Option<char>) {
    if let Some(c) = prefix.take() {
        push_literal(expr, c);
    }
}

fn scan_name(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while chars
        .get(end)
        .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '_')
    {
        end += 1;
    }
    end
}

/// Read a parenthesized group starting at `start`, returning its body and
/// the index just past the closing parenthesis.
fn read_group(chars: &[char], start: usize, pattern: &str) -> Result<(String, usize), PatternError> {
    let mut depth = 0usize;
    let mut body = String::new();
    let mut i = start;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                body.push(c);
                if let Some(next) = chars.get(i + 1) {
                    body.push(*next);
                }
                i += 2;
                continue;
            }
            '(' => {
                depth += 1;
                if depth > 1 {
                    body.push(c);
                }
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((body, i + 1));
                }
                body.push(c);
            }
            _ => body.push(c),
        }
        i += 1;
    }

    Err(PatternError::UnbalancedGroup {
        pattern: pattern.to_string(),
        offset: start,
    })
}

fn read_modifier(chars: &[char], i: &mut usize) -> Option<Modifier> {
    let modifier = match chars.get(*i) {
        Some('?') => Modifier::Optional,
        Some('*') => Modifier::ZeroOrMore,
        Some('+') => Modifier::OneOrMore,
        _ => return None,
    };
    *i += 1;
    Some(modifier)
}

fn push_param(
    expr: &mut String,
    prefix: Option<char>,
    custom: Option<&str>,
    modifier: Option<Modifier>,
    index: usize,
) {
    let delimiter = prefix.unwrap_or('/');
    let capture = match custom {
        Some(group) => group.to_string(),
        None => format!("[^{}]+?", regex::escape(delimiter.encode_utf8(&mut [0; 4]))),
    };
    let prefix = prefix
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .unwrap_or_default();
    let name = group_name(index);

    let fragment = match modifier {
        None => format!("{prefix}(?P<{name}>{capture})"),
        Some(Modifier::Optional) => format!("(?:{prefix}(?P<{name}>{capture}))?"),
        Some(Modifier::OneOrMore) => {
            format!("{prefix}(?P<{name}>(?:{capture})(?:{prefix}(?:{capture}))*)")
        }
        Some(Modifier::ZeroOrMore) => {
            format!("(?:{prefix}(?P<{name}>(?:{capture})(?:{prefix}(?:{capture}))*))?")
        }
    };
    expr.push_str(&fragment);
}
