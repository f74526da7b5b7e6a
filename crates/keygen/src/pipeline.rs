use crate::error::KeygenError;
use crate::generator::GeneratorNode;
use crate::lookup::{FieldLookup, JsonLookup};
use crate::parser::{Delimiters, parse_expression};
use std::cell::OnceCell;

/// The largest key, in bytes, a pipeline will return.
pub const MAX_KEY_SIZE: usize = 250;

/// A compiled key expression.
///
/// Compile once and call [`Pipeline::next`] for every document. Counters live inside
/// the pipeline, so `next` takes `&mut self`; share a pipeline between threads only
/// behind a lock. A pipeline is not `Clone`: two copies would hand out the same
/// counter values.
#[derive(Debug)]
pub struct Pipeline<L = JsonLookup> {
    nodes: Vec<GeneratorNode>,
    lookup: L,
}

impl Pipeline<JsonLookup> {
    pub fn compile(
        expression: &str,
        field_delimiter: char,
        generator_delimiter: char,
    ) -> Result<Self, KeygenError> {
        Self::compile_with(
            expression,
            Delimiters {
                field: field_delimiter,
                generator: generator_delimiter,
            },
        )
    }

    pub fn compile_with(expression: &str, delimiters: Delimiters) -> Result<Self, KeygenError> {
        let nodes = parse_expression(expression, delimiters)?;
        log::trace!(
            "Compiled key expression '{}' into {} generators",
            expression,
            nodes.len()
        );
        Ok(Self {
            nodes,
            lookup: JsonLookup,
        })
    }
}

impl<L: FieldLookup> Pipeline<L> {
    /// Replaces the field lookup, keeping the compiled generators and their state.
    pub fn with_lookup<M: FieldLookup>(self, lookup: M) -> Pipeline<M> {
        Pipeline {
            nodes: self.nodes,
            lookup,
        }
    }

    /// Generates the key for `document`. The first failing generator aborts the call
    /// and its error is returned as is.
    ///
    /// The document is decoded on the first field reference and reused by the rest.
    pub fn next(&mut self, document: &[u8]) -> Result<Vec<u8>, KeygenError> {
        let lookup = &self.lookup;
        let decoded = OnceCell::new();

        let mut key = String::new();
        for node in &mut self.nodes {
            key.push_str(&node.next(|path| {
                lookup.lookup(decoded.get_or_init(|| lookup.decode(document)), path)
            })?);
        }

        if key.is_empty() {
            return Err(KeygenError::result("generated key is an empty string"));
        }

        if key.len() > MAX_KEY_SIZE {
            return Err(KeygenError::result(format!(
                "generated key is larger than {} bytes",
                MAX_KEY_SIZE
            )));
        }

        Ok(key.into_bytes())
    }

    pub fn nodes(&self) -> &[GeneratorNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Compiles `expression` with the default JSON lookup.
pub fn compile(
    expression: &str,
    field_delimiter: char,
    generator_delimiter: char,
) -> Result<Pipeline, KeygenError> {
    Pipeline::compile(expression, field_delimiter, generator_delimiter)
}
