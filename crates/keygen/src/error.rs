use thiserror::Error;

/// Raised when a field path string is malformed, e.g. unbalanced backticks or an
/// empty nested segment. Parsing a path on its own returns this directly; inside an
/// expression it is wrapped by [`KeygenError::FieldPath`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct FieldPathError {
    reason: String,
}

impl FieldPathError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeygenError {
    #[error("{0}")]
    InvalidDelimiters(String),

    #[error("key generator contains an empty expression")]
    EmptyExpression,

    /// A syntax problem in the expression. `index` is the character offset reported
    /// to the user.
    #[error("error in key expression at char {index}, {reason}")]
    Expression { index: usize, reason: String },

    #[error(transparent)]
    FieldPath(#[from] FieldPathError),

    /// A per-document failure. Callers processing a batch should skip the document
    /// and carry on.
    #[error("key generation for document failed, {0}")]
    Result(String),
}

impl KeygenError {
    pub(crate) fn expression(index: usize, reason: impl Into<String>) -> Self {
        KeygenError::Expression {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn result(reason: impl Into<String>) -> Self {
        KeygenError::Result(reason.into())
    }

    pub fn is_expression_error(&self) -> bool {
        matches!(
            self,
            KeygenError::Expression { .. } | KeygenError::EmptyExpression
        )
    }

    pub fn is_field_path_error(&self) -> bool {
        matches!(self, KeygenError::FieldPath(_))
    }

    pub fn is_result_error(&self) -> bool {
        matches!(self, KeygenError::Result(_))
    }
}
