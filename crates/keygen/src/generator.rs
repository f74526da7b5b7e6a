//! The compiled units of a key expression and their runtime behaviour.
use crate::error::KeygenError;
use crate::field_path::FieldPath;
use crate::lookup::LookupValue;
use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{char, i64 as nom_i64},
    combinator::{all_consuming, opt},
    sequence::{delimited, preceded},
};
use uuid::Uuid;

pub const MONO_INCR: &str = "MONO_INCR";
pub const UUID: &str = "UUID";

/// One fragment producer in a compiled pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorNode {
    /// Static text, returned unchanged on every call.
    Text(String),
    /// The scalar value found at a path in the document.
    Field(FieldPath),
    /// A counter holding the value the next call will return.
    MonoIncr { next: u64 },
    /// A fresh random v4 UUID on every call.
    Uuid,
}

impl GeneratorNode {
    /// A counter whose first value is `start`; a missing or non-positive start
    /// counts from 1.
    pub fn mono_incr(start: Option<i64>) -> Self {
        let next = start.filter(|n| *n > 0).map_or(1, |n| n as u64);
        GeneratorNode::MonoIncr { next }
    }

    /// Produces this node's fragment of the key. `resolve` looks a field up in the
    /// current document and is only called by `Field` nodes. The counter advances
    /// on every call, whether or not the rest of the pipeline succeeds.
    pub fn next<F>(&mut self, resolve: F) -> Result<String, KeygenError>
    where
        F: FnOnce(&FieldPath) -> LookupValue,
    {
        match self {
            GeneratorNode::Text(text) => Ok(text.clone()),
            GeneratorNode::Field(path) => match resolve(path) {
                LookupValue::Scalar(value) => Ok(value),
                LookupValue::Absent => Err(KeygenError::result("resulting field does not exist")),
                LookupValue::Null => Err(KeygenError::result("resulting field is null")),
                LookupValue::Array | LookupValue::Object => {
                    Err(KeygenError::result("resulting field is a JSON array/object"))
                }
            },
            GeneratorNode::MonoIncr { next } => {
                let value = *next;
                *next = next.wrapping_add(1);
                Ok(value.to_string())
            }
            GeneratorNode::Uuid => Ok(Uuid::new_v4().to_string()),
        }
    }
}

/// `MONO_INCR` with an optional `[N]` start argument.
fn mono_incr(input: &str) -> IResult<&str, Option<i64>> {
    preceded(tag(MONO_INCR), opt(delimited(char('['), nom_i64, char(']')))).parse(input)
}

/// Resolves the name between two generator delimiters, `None` if it names no
/// built-in generator.
pub(crate) fn parse_generator_token(token: &str) -> Option<GeneratorNode> {
    if token == UUID {
        return Some(GeneratorNode::Uuid);
    }

    let (_, start) = all_consuming(mono_incr).parse(token).ok()?;
    Some(GeneratorNode::mono_incr(start))
}
