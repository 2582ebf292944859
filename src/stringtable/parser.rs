//! Hand-rolled recursive-descent parser for the string table's Markdown
//! subset (spec.md §6). No external markdown crate: the grammar is a
//! deliberate subset built for exactly one purpose (localized message
//! presentation), not general document rendering.
//!
//! ```text
//! # GREET
//! Hello {{name}}, welcome to *replay*.
//!
//! # FAREWELL
//! ## See you soon
//! - pack your things
//! - check the **exit** sign
//! ```

use std::collections::HashMap;

use super::node::Node;

#[derive(Debug, Clone)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parse a whole string-table source into `identifier -> body`.
pub fn parse(source: &str) -> Result<HashMap<String, Vec<Node>>, ParseError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut table = HashMap::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }
        let identifier = entry_header(lines[i], i + 1)?.ok_or_else(|| ParseError {
            line: i + 1,
            message: "expected a top-level `# IDENT` entry header".to_string(),
        })?;
        i += 1;

        let body_start = i;
        while i < lines.len() && entry_header(lines[i], i + 1)?.is_none() {
            i += 1;
        }

        let body = parse_body(&lines[body_start..i], body_start + 1)?;
        table.insert(identifier, body);
    }

    Ok(table)
}

/// A line is a top-level entry header iff it starts with exactly one `#`
/// followed by whitespace and an identifier. A line starting with two or
/// more `#`s is a nested [`Node::Heading`] that belongs to the current
/// entry's body instead.
fn entry_header(line: &str, line_no: usize) -> Result<Option<String>, ParseError> {
    if !line.starts_with('#') || line.starts_with("##") {
        return Ok(None);
    }
    let rest = line[1..].trim();
    if rest.is_empty() {
        return Err(ParseError {
            line: line_no,
            message: "entry header is missing its identifier".to_string(),
        });
    }
    Ok(Some(rest.to_string()))
}

fn parse_body(lines: &[&str], start_line: usize) -> Result<Vec<Node>, ParseError> {
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line_no = start_line + i;
        let line = lines[i];

        if line.trim().is_empty() {
            i += 1;
            continue;
        }
        if line.starts_with('#') {
            nodes.push(parse_heading(line, line_no)?);
            i += 1;
            continue;
        }
        if let Some(language) = line.trim().strip_prefix("```") {
            let (code, consumed) = parse_code_block(lines, i, language, line_no)?;
            nodes.push(code);
            i += consumed;
            continue;
        }
        if line.trim_start().starts_with("- ") {
            let (list, consumed) = parse_list(lines, i, line_no)?;
            nodes.push(list);
            i += consumed;
            continue;
        }

        let block_start = i;
        while i < lines.len() && is_paragraph_line(lines[i]) {
            i += 1;
        }
        nodes.push(parse_block(&lines[block_start..i], start_line + block_start)?);
    }

    Ok(nodes)
}

fn is_paragraph_line(line: &str) -> bool {
    !line.trim().is_empty() && !line.starts_with('#') && !line.trim().starts_with("```") && !line.trim_start().starts_with("- ")
}

fn parse_heading(line: &str, line_no: usize) -> Result<Node, ParseError> {
    let scale = line.chars().take_while(|&c| c == '#').count();
    let body = parse_inline(line[scale..].trim(), line_no)?;
    Ok(Node::Heading {
        scale: scale as u8,
        body,
    })
}

fn parse_code_block(lines: &[&str], start: usize, language: &str, line_no: usize) -> Result<(Node, usize), ParseError> {
    let mut body = String::new();
    let mut j = start + 1;
    while j < lines.len() && lines[j].trim() != "```" {
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(lines[j]);
        j += 1;
    }
    if j >= lines.len() {
        return Err(ParseError {
            line: line_no,
            message: "unterminated fenced code block".to_string(),
        });
    }
    Ok((
        Node::Code {
            language: language.trim().to_string(),
            body,
        },
        j - start + 1,
    ))
}

fn parse_list(lines: &[&str], start: usize, line_no: usize) -> Result<(Node, usize), ParseError> {
    let mut items = Vec::new();
    let mut j = start;
    while j < lines.len() && lines[j].trim_start().starts_with("- ") {
        let text = lines[j].trim_start().strip_prefix("- ").unwrap();
        items.push(parse_inline(text, line_no + (j - start))?);
        j += 1;
    }
    Ok((
        Node::List {
            items,
        },
        j - start,
    ))
}

fn parse_block(lines: &[&str], line_no: usize) -> Result<Node, ParseError> {
    let mut children = Vec::new();
    for (offset, line) in lines.iter().enumerate() {
        if offset > 0 {
            children.push(Node::LineBreak);
        }
        children.extend(parse_inline(line, line_no + offset)?);
    }
    Ok(Node::Block {
        children,
    })
}

/// Parses one line's worth of inline markup: literal text, whitespace
/// runs, `{{key}}`/`{{key:type}}` parameters, `**bold**`, `*italic*`,
/// `__underlined__`, and `[text](target)` links.
fn parse_inline(text: &str, line_no: usize) -> Result<Vec<Node>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut nodes = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            flush_text(&mut buf, &mut nodes);
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            nodes.push(Node::Whitespace);
            continue;
        }

        if c == '{' && chars.get(i + 1) == Some(&'{') {
            flush_text(&mut buf, &mut nodes);
            let (param, consumed) = parse_parameter(&chars, i, line_no)?;
            nodes.push(param);
            i += consumed;
            continue;
        }

        if c == '*' && chars.get(i + 1) == Some(&'*') {
            flush_text(&mut buf, &mut nodes);
            let (node, consumed) = parse_delimited(&chars, i, "**", line_no, Node::Bold as fn(Vec<Node>) -> Node)?;
            nodes.push(node);
            i += consumed;
            continue;
        }

        if c == '_' && chars.get(i + 1) == Some(&'_') {
            flush_text(&mut buf, &mut nodes);
            let (node, consumed) = parse_delimited(&chars, i, "__", line_no, Node::Underlined as fn(Vec<Node>) -> Node)?;
            nodes.push(node);
            i += consumed;
            continue;
        }

        if c == '*' {
            flush_text(&mut buf, &mut nodes);
            let (node, consumed) = parse_delimited(&chars, i, "*", line_no, Node::Italic as fn(Vec<Node>) -> Node)?;
            nodes.push(node);
            i += consumed;
            continue;
        }

        if c == '[' {
            flush_text(&mut buf, &mut nodes);
            let (node, consumed) = parse_link(&chars, i, line_no)?;
            nodes.push(node);
            i += consumed;
            continue;
        }

        buf.push(c);
        i += 1;
    }
    flush_text(&mut buf, &mut nodes);
    Ok(nodes)
}

fn flush_text(buf: &mut String, nodes: &mut Vec<Node>) {
    if !buf.is_empty() {
        nodes.push(Node::Text(std::mem::take(buf)));
    }
}

fn find_sequence(chars: &[char], from: usize, seq: &[char]) -> Option<usize> {
    if seq.is_empty() || from + seq.len() > chars.len() {
        return None;
    }
    (from..=chars.len() - seq.len()).find(|&idx| chars[idx..idx + seq.len()] == *seq)
}

fn parse_parameter(chars: &[char], start: usize, line_no: usize) -> Result<(Node, usize), ParseError> {
    let close = find_sequence(chars, start + 2, &['}', '}']).ok_or_else(|| ParseError {
        line: line_no,
        message: "unterminated parameter `{{...}}`".to_string(),
    })?;
    let inner: String = chars[start + 2..close].iter().collect();
    let (key, ty) = match inner.split_once(':') {
        Some((k, t)) => (k.trim().to_string(), t.trim().to_string()),
        None => (inner.trim().to_string(), "string".to_string()),
    };
    if key.is_empty() {
        return Err(ParseError {
            line: line_no,
            message: "parameter is missing its key".to_string(),
        });
    }
    Ok((
        Node::Parameter {
            key,
            ty,
        },
        close + 2 - start,
    ))
}

fn parse_delimited(chars: &[char], start: usize, delim: &str, line_no: usize, wrap: fn(Vec<Node>) -> Node) -> Result<(Node, usize), ParseError> {
    let delim_chars: Vec<char> = delim.chars().collect();
    let content_start = start + delim_chars.len();
    let close = find_sequence(chars, content_start, &delim_chars).ok_or_else(|| ParseError {
        line: line_no,
        message: format!("unterminated `{}`", delim),
    })?;
    let inner: String = chars[content_start..close].iter().collect();
    let body = parse_inline(&inner, line_no)?;
    Ok((wrap(body), close + delim_chars.len() - start))
}

fn parse_link(chars: &[char], start: usize, line_no: usize) -> Result<(Node, usize), ParseError> {
    let close_bracket = find_sequence(chars, start + 1, &[']']).ok_or_else(|| ParseError {
        line: line_no,
        message: "unterminated link text `[...]`".to_string(),
    })?;
    if chars.get(close_bracket + 1) != Some(&'(') {
        return Err(ParseError {
            line: line_no,
            message: "link text must be immediately followed by `(target)`".to_string(),
        });
    }
    let close_paren = find_sequence(chars, close_bracket + 2, &[')']).ok_or_else(|| ParseError {
        line: line_no,
        message: "unterminated link target `(...)`".to_string(),
    })?;
    let body_text: String = chars[start + 1..close_bracket].iter().collect();
    let target: String = chars[close_bracket + 2..close_paren].iter().collect();
    let body = parse_inline(&body_text, line_no)?;
    Ok((
        Node::Link {
            body,
            target,
        },
        close_paren + 1 - start,
    ))
}
