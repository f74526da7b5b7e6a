//! The key expression compiler.
//!
//! An expression is scanned left to right. At each position the scanner decides
//! whether a field reference, a built-in generator or a run of literal text starts
//! there, and emits one [`GeneratorNode`] per unit.
use crate::error::KeygenError;
use crate::field_path::{BACKTICK, FieldPath, PERIOD};
use crate::generator::{GeneratorNode, parse_generator_token};
use crate::scan::{peek, starts_reference, unescape};

/// The pair of characters that open and close field references and generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: char,
    pub generator: char,
}

impl Default for Delimiters {
    /// `%field%` and `#GENERATOR#`.
    fn default() -> Self {
        Self {
            field: '%',
            generator: '#',
        }
    }
}

impl Delimiters {
    pub fn new(field: char, generator: char) -> Result<Self, KeygenError> {
        validate_delimiters(field, generator)?;
        Ok(Self { field, generator })
    }

    pub fn validate(&self) -> Result<(), KeygenError> {
        validate_delimiters(self.field, self.generator)
    }

    fn contains(&self, c: char) -> bool {
        c == self.field || c == self.generator
    }
}

/// Checks that the delimiters can be told apart from each other and from the field
/// path syntax.
pub fn validate_delimiters(field: char, generator: char) -> Result<(), KeygenError> {
    let invalid = |reason: &str| Err(KeygenError::InvalidDelimiters(reason.to_string()));

    if field == '\0' {
        return invalid("field delimiter can not be the empty string");
    }
    if generator == '\0' {
        return invalid("generator delimiter can not be the empty string");
    }
    if field == PERIOD || generator == PERIOD {
        return invalid("cannot use . as a field or generator delimiter");
    }
    if field == BACKTICK || generator == BACKTICK {
        return invalid("cannot use ` as a field or generator delimiter");
    }
    if field == generator {
        return invalid("field delimiter and generator delimiter can not be the same");
    }
    Ok(())
}

pub fn parse_expression(
    expression: &str,
    delimiters: Delimiters,
) -> Result<Vec<GeneratorNode>, KeygenError> {
    delimiters.validate()?;

    if expression.is_empty() {
        return Err(KeygenError::EmptyExpression);
    }

    let chars: Vec<char> = expression.chars().collect();
    let mut nodes = Vec::new();
    let mut idx = 0;

    while idx < chars.len() {
        let (node, consumed) = parse_node(&chars, idx, delimiters)?;
        nodes.push(node);
        idx += consumed;
    }

    Ok(nodes)
}

/// Parses the unit starting at `idx`, returning it with the number of characters
/// it spans.
fn parse_node(
    chars: &[char],
    idx: usize,
    delimiters: Delimiters,
) -> Result<(GeneratorNode, usize), KeygenError> {
    if starts_reference(chars, idx, delimiters.field) {
        let (path, len) = parse_field(&chars[idx + 1..], idx + 1, delimiters.field)?;
        return Ok((GeneratorNode::Field(path), len + 2));
    }

    if starts_reference(chars, idx, delimiters.generator) {
        let (node, len) = parse_generator(&chars[idx + 1..], idx + 1, delimiters)?;
        return Ok((node, len + 2));
    }

    parse_text(&chars[idx..], idx, delimiters)
}

/// `body` starts just after the opening delimiter, `offset` is its position in the
/// full expression. Returns the path and the length of the body.
fn parse_field(
    body: &[char],
    offset: usize,
    delim: char,
) -> Result<(FieldPath, usize), KeygenError> {
    let mut idx = 0;

    while idx < body.len() {
        if body[idx] != delim {
            idx += 1;
            continue;
        }

        if peek(body, idx) == Some(delim) {
            idx += 2;
            continue;
        }

        let path = FieldPath::parse(&unescape(&body[..idx], delim))?;
        return Ok((path, idx));
    }

    Err(KeygenError::expression(
        offset + idx,
        "unclosed field at end of expression",
    ))
}

/// The generator name runs to the first generator delimiter; a field delimiter
/// before that is an error.
fn parse_generator(
    body: &[char],
    offset: usize,
    delimiters: Delimiters,
) -> Result<(GeneratorNode, usize), KeygenError> {
    let end = body.iter().position(|&c| delimiters.contains(c));

    match end {
        None => Err(KeygenError::expression(
            offset + body.len(),
            "unclosed generator at end of expression",
        )),
        Some(idx) if body[idx] == delimiters.field => Err(KeygenError::expression(
            offset + idx,
            "attempting to start a field inside a generator",
        )),
        Some(idx) => {
            let token: String = body[..idx].iter().collect();
            let node = parse_generator_token(&token)
                .ok_or_else(|| KeygenError::expression(offset, "invalid generator"))?;
            Ok((node, idx))
        }
    }
}

fn parse_text(
    rest: &[char],
    offset: usize,
    delimiters: Delimiters,
) -> Result<(GeneratorNode, usize), KeygenError> {
    let mut text = String::new();
    let mut idx = 0;

    while idx < rest.len() {
        let c = rest[idx];
        if !delimiters.contains(c) {
            text.push(c);
            idx += 1;
            continue;
        }

        match peek(rest, idx) {
            None => {
                return Err(KeygenError::expression(
                    offset + idx + 1,
                    start_at_end_reason(c, delimiters),
                ));
            }
            Some(next) if next == c => {
                text.push(c);
                idx += 2;
            }
            Some(_) => break,
        }
    }

    Ok((GeneratorNode::Text(text), idx))
}

fn start_at_end_reason(delim: char, delimiters: Delimiters) -> &'static str {
    if delim == delimiters.generator {
        "start of generator at end of expression"
    } else {
        "start of field at end of expression"
    }
}
