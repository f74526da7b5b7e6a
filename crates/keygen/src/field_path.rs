//! Parsing of (possibly nested) field references such as `parent.child` or
//! ``another.`not.nested`.field``.
use crate::error::FieldPathError;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const BACKTICK: char = '`';
pub const PERIOD: char = '.';

/// The path to a field in a JSON document, one entry per level of nesting.
///
/// Syntax:
/// 1. Nested fields are separated by `.`
/// 2. Text between backticks is taken literally, so ``` `a.b` ``` names a single key
/// 3. A doubled backtick represents one literal backtick, inside or outside quotes
///
/// | Input              | Segments            |
/// |--------------------|---------------------|
/// | `key`              | `["key"]`           |
/// | `nested.key`       | `["nested", "key"]` |
/// | ``` `a.b`.key ```  | `["a.b", "key"]`    |
/// | ```` ```.key` ```` | ``["`.key"]``       |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, FieldPathError> {
        let chars: Vec<char> = path.chars().collect();
        match chars.first() {
            None => return Err(FieldPathError::new("empty field name")),
            Some(&PERIOD) => {
                return Err(FieldPathError::new(
                    "cannot find nested object of field without name",
                ));
            }
            Some(_) => {}
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        // Whether any input has been consumed for `current`; a quoted segment may
        // contribute nothing but still counts.
        let mut started = false;
        let mut open = false;
        let mut idx = 0;

        while idx < chars.len() {
            let c = chars[idx];

            if c == BACKTICK && chars.get(idx + 1) == Some(&BACKTICK) {
                current.push(BACKTICK);
                started = true;
                idx += 2;
                continue;
            }

            match c {
                BACKTICK => {
                    open = !open;
                    started = true;
                }
                PERIOD if !open => {
                    if !started {
                        return Err(FieldPathError::new("empty field name"));
                    }
                    segments.push(std::mem::take(&mut current));
                    started = false;
                }
                _ => {
                    current.push(c);
                    started = true;
                }
            }
            idx += 1;
        }

        if open {
            return Err(FieldPathError::new("unbalanced backticks"));
        }
        // A trailing `.` ends the path without adding an empty segment.
        if started {
            segments.push(current);
        }

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deletes the field this path points at from `object`. Nothing happens when an
    /// intermediate level is missing or is not an object, so calling this twice is
    /// the same as calling it once.
    pub fn remove_from(&self, object: &mut Map<String, Value>) {
        let Some((last, parents)) = self.0.split_last() else {
            return;
        };

        let mut current = object;
        for name in parents {
            match current.get_mut(name) {
                Some(Value::Object(next)) => current = next,
                _ => return,
            }
        }

        current.remove(last);
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl fmt::Display for FieldPath {
    /// Writes the path back in a form `FieldPath::parse` accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PERIOD)?;
            }
            if segment.contains([PERIOD, BACKTICK]) {
                write!(f, "`{}`", segment.replace('`', "``"))?;
            } else {
                write!(f, "{}", segment)?;
            }
        }
        Ok(())
    }
}
