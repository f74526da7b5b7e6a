// src/builder.rs
use crate::assigner::KeyAssigner;
use crate::config::KeygenConfig;
use crate::error::DockeyError;
use dockey_keygen::{Delimiters, FieldPath, Pipeline};

/// A builder for creating a [`KeyAssigner`].
#[derive(Debug, Default)]
pub struct KeyGeneratorBuilder {
    expression: Option<String>,
    delimiters: Delimiters,
    ignore_fields: Vec<String>,
}

impl KeyGeneratorBuilder {
    /// Creates a builder with the default `%` and `#` delimiters.
    pub fn new() -> Self {
        Default::default()
    }

    /// Takes the expression, delimiters and ignore fields from `config`.
    pub fn with_config(mut self, config: KeygenConfig) -> Self {
        self.delimiters = config.delimiters();
        self.expression = Some(config.expression);
        self.ignore_fields = config.ignore_fields;
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn with_delimiters(mut self, field: char, generator: char) -> Self {
        self.delimiters = Delimiters { field, generator };
        self
    }

    pub fn with_ignore_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Compiles the expression and parses the ignore fields.
    pub fn build(self) -> Result<KeyAssigner, DockeyError> {
        let expression = self.expression.ok_or_else(|| {
            DockeyError::Config(
                "No key expression has been configured. Use `with_expression` or `with_config`."
                    .to_string(),
            )
        })?;

        let pipeline = Pipeline::compile_with(&expression, self.delimiters)?;
        let ignore_fields = self
            .ignore_fields
            .iter()
            .map(|field| FieldPath::parse(field))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Built key generator for '{}' with {} generators and {} ignored fields",
            expression,
            pipeline.len(),
            ignore_fields.len()
        );
        Ok(KeyAssigner::new(pipeline, ignore_fields))
    }
}
