//! Sorting types for page queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AppError::validation(format!(
                "Invalid sort order '{other}', expected ASC or DESC"
            ))),
        }
    }
}

/// A dotted path into a document's JSON body, e.g. `createdBy.name`.
///
/// Every segment must be an identifier (`[A-Za-z_][A-Za-z0-9_]*`), so a
/// path can be bound into a query without quoting concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortPath(Vec<String>);

impl SortPath {
    /// Parse and validate a dotted path.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::validation("Sort field must not be empty"));
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if let Some(bad) = segments.iter().find(|s| !is_identifier(s)) {
            return Err(AppError::validation(format!(
                "Invalid sort field '{raw}': segment '{bad}' is not an identifier"
            )));
        }

        Ok(Self(segments))
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Resolve the path against a document body. Missing fields resolve to
    /// `null`.
    pub fn lookup(&self, body: &Value) -> Value {
        let mut current = body;
        for segment in &self.0 {
            match current.get(segment) {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }
        current.clone()
    }
}

impl fmt::Display for SortPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for SortPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A sort specification consisting of a field path and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field path to sort by.
    pub path: SortPath,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a new sort specification.
    pub fn new(path: SortPath, direction: SortDirection) -> Self {
        Self { path, direction }
    }

    /// Parse a field and an order string (`ASC`/`DESC`, any case).
    pub fn parse(field: &str, order: &str) -> Result<Self, AppError> {
        Ok(Self::new(SortPath::parse(field)?, order.parse()?))
    }
}
