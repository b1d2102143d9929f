//! Query-string helpers.
//!
//! Every query string the client sends goes through [`QueryBuilder`], so
//! values are percent-encoded the same way everywhere and unset values are
//! never sent. [`SearchQuery`] renders expressions for the
//! `/api/v2/search/*` endpoints.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::FreshdeskError;

/// Longest search expression the search API accepts (quotes excluded).
pub const MAX_SEARCH_QUERY_LEN: usize = 512;

/// Ordered collection of query parameters.
///
/// Names and values are percent-encoded with `urlencoding`, which escapes
/// everything outside the RFC 3986 unreserved set (`:`, `[`, `]`, `"`, `'`,
/// space, `&`, `=` included).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.pairs.push((name.into(), value.to_string()));
        self
    }

    /// Appends a parameter only when a value is present.
    pub fn push_opt<V: fmt::Display>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(name, value),
            None => self,
        }
    }

    /// Appends an RFC 3339 timestamp when present.
    pub fn push_time(self, name: impl Into<String>, value: Option<DateTime<Utc>>) -> Self {
        self.push_opt(name, value.map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)))
    }

    /// Appends a comma-separated list; omitted when the list is empty.
    pub fn push_list<S: AsRef<str>>(self, name: impl Into<String>, values: &[S]) -> Self {
        if values.is_empty() {
            return self;
        }
        let joined = values.iter().map(|v| v.as_ref()).collect::<Vec<_>>().join(",");
        self.push(name, joined)
    }

    /// Appends every pair of another builder.
    pub fn extend(mut self, other: &QueryBuilder) -> Self {
        self.pairs.extend(other.pairs.iter().cloned());
        self
    }

    /// Returns true if no parameter was added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the raw (unencoded) pairs.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Renders `name=value&...` with encoded values.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the query to a path, respecting an existing `?`.
    pub fn apply_to(&self, path: &str) -> String {
        if self.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", path, separator, self.to_query_string())
    }
}

/// A literal in a search expression.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    /// Rendered bare.
    Number(i64),
    /// Rendered in single quotes.
    Text(String),
    /// Rendered as `true`/`false`.
    Bool(bool),
    /// Rendered as `'YYYY-MM-DD'`.
    Date(NaiveDate),
    /// Rendered as `null`.
    Null,
}

impl fmt::Display for SearchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchValue::Number(n) => write!(f, "{}", n),
            SearchValue::Text(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            SearchValue::Bool(b) => write!(f, "{}", b),
            SearchValue::Date(d) => write!(f, "'{}'", d.format("%Y-%m-%d")),
            SearchValue::Null => f.write_str("null"),
        }
    }
}

impl From<i64> for SearchValue {
    fn from(value: i64) -> Self {
        SearchValue::Number(value)
    }
}

impl From<i32> for SearchValue {
    fn from(value: i32) -> Self {
        SearchValue::Number(value.into())
    }
}

impl From<&str> for SearchValue {
    fn from(value: &str) -> Self {
        SearchValue::Text(value.to_string())
    }
}

impl From<String> for SearchValue {
    fn from(value: String) -> Self {
        SearchValue::Text(value)
    }
}

impl From<bool> for SearchValue {
    fn from(value: bool) -> Self {
        SearchValue::Bool(value)
    }
}

impl From<NaiveDate> for SearchValue {
    fn from(value: NaiveDate) -> Self {
        SearchValue::Date(value)
    }
}

/// A search API expression such as `status:2 AND priority:>3`.
///
/// ```
/// use freshdesk::query::SearchQuery;
///
/// let q = SearchQuery::eq("status", 2).and(SearchQuery::at_least("priority", 3));
/// assert_eq!(q.expression(), "status:2 AND priority:>3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    expr: String,
    compound: bool,
}

impl SearchQuery {
    /// `field:value`
    pub fn eq(field: &str, value: impl Into<SearchValue>) -> Self {
        Self::term(format!("{}:{}", field, value.into()))
    }

    /// `field:>value` (greater than or equal).
    pub fn at_least(field: &str, value: impl Into<SearchValue>) -> Self {
        Self::term(format!("{}:>{}", field, value.into()))
    }

    /// `field:<value` (less than or equal).
    pub fn at_most(field: &str, value: impl Into<SearchValue>) -> Self {
        Self::term(format!("{}:<{}", field, value.into()))
    }

    /// A pre-built expression, used verbatim.
    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            compound: true,
        }
    }

    fn term(expr: String) -> Self {
        Self {
            expr,
            compound: false,
        }
    }

    fn combine(self, op: &str, other: SearchQuery) -> Self {
        Self {
            expr: format!("{} {} {}", self.grouped(), op, other.grouped()),
            compound: true,
        }
    }

    fn grouped(&self) -> String {
        if self.compound {
            format!("({})", self.expr)
        } else {
            self.expr.clone()
        }
    }

    /// `self AND other`
    pub fn and(self, other: SearchQuery) -> Self {
        let lhs_plain = !self.compound;
        let rhs_plain = !other.compound;
        if lhs_plain && rhs_plain {
            return Self {
                expr: format!("{} AND {}", self.expr, other.expr),
                compound: true,
            };
        }
        self.combine("AND", other)
    }

    /// `self OR other`
    pub fn or(self, other: SearchQuery) -> Self {
        self.combine("OR", other)
    }

    /// The bare expression.
    pub fn expression(&self) -> &str {
        &self.expr
    }

    /// The `query` parameter value: the expression wrapped in double quotes.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if the expression is empty or
    /// longer than the search API accepts.
    pub fn render(&self) -> Result<String, FreshdeskError> {
        if self.expr.trim().is_empty() {
            return Err(FreshdeskError::validation("search query must not be empty"));
        }
        if self.expr.chars().count() > MAX_SEARCH_QUERY_LEN {
            return Err(FreshdeskError::validation(format!(
                "search query exceeds {} characters",
                MAX_SEARCH_QUERY_LEN
            )));
        }
        Ok(format!("\"{}\"", self.expr))
    }
}

impl From<&str> for SearchQuery {
    fn from(value: &str) -> Self {
        SearchQuery::raw(value)
    }
}
