//! SQL rendering for listing queries.
//!
//! Every user-supplied value becomes a numbered placeholder (`$1`, `$2`, ...)
//! with a matching entry in [`SqlStatement::binds`]. Column and table names
//! come from closed enums, never from request input.

use crate::domain::{Condition, FilterField, ListingQuery, BLANK_CHARS, FOUNDER_COLUMNS};

/// Table holding the founder observations.
pub const FOUNDERS_TABLE: &str = "founders";

/// A statement plus its positional bind values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    pub sql: String,
    pub binds: Vec<String>,
}

/// Accumulates `WHERE` clauses and their bind values.
#[derive(Debug, Default)]
pub struct WhereBuilder {
    clauses: Vec<String>,
    binds: Vec<String>,
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bind value and return its placeholder.
    fn bind(&mut self, value: String) -> String {
        self.binds.push(value);
        format!("${}", self.binds.len())
    }

    pub fn push(&mut self, condition: &Condition) -> &mut Self {
        let clause = match condition {
            Condition::IsFounder => "founder = true".to_string(),
            Condition::Equals(column, value) => {
                let p = self.bind((*value).to_string());
                format!("{} = {}", column.as_sql(), p)
            }
            Condition::OneOf(column, values) => {
                let placeholders: Vec<String> =
                    values.iter().map(|v| self.bind((*v).to_string())).collect();
                format!("{} IN ({})", column.as_sql(), placeholders.join(", "))
            }
            Condition::NotEmpty(column) => {
                let c = column.as_sql();
                format!("({c} IS NOT NULL AND {c} <> '')")
            }
            Condition::Contains(column, needle) => {
                let p = self.bind(format!("%{}%", escape_like(needle)));
                ilike(column.as_sql(), &p)
            }
            Condition::StartsWith(column, prefix) => {
                let p = self.bind(format!("{}%", escape_like(prefix)));
                ilike(column.as_sql(), &p)
            }
            Condition::AnyContains(columns, needle) => {
                let p = self.bind(format!("%{}%", escape_like(needle)));
                let alternatives: Vec<String> =
                    columns.iter().map(|c| ilike(c.as_sql(), &p)).collect();
                format!("({})", alternatives.join(" OR "))
            }
        };
        self.clauses.push(clause);
        self
    }

    /// `WHERE a AND b ...`, or an empty string when nothing was pushed.
    pub fn finish(self) -> (String, Vec<String>) {
        if self.clauses.is_empty() {
            (String::new(), self.binds)
        } else {
            (format!(" WHERE {}", self.clauses.join(" AND ")), self.binds)
        }
    }
}

fn ilike(column: &str, placeholder: &str) -> String {
    format!("{column} ILIKE {placeholder} ESCAPE '\\'")
}

/// Escape LIKE metacharacters so user input matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Deduplicated listing: latest `id` per `name`, ordered by name.
pub fn listing_statement(query: &ListingQuery) -> SqlStatement {
    let mut filters = WhereBuilder::new();
    for condition in query.conditions() {
        filters.push(&condition);
    }
    let (where_clause, binds) = filters.finish();

    let sql = format!(
        "SELECT DISTINCT ON (name) {} FROM {}{} ORDER BY name ASC, id DESC",
        FOUNDER_COLUMNS.join(", "),
        FOUNDERS_TABLE,
        where_clause
    );

    SqlStatement { sql, binds }
}

/// Distinct non-blank values of one filter column, ascending.
///
/// Blank means empty after trimming [`BLANK_CHARS`].
pub fn distinct_statement(field: FilterField) -> SqlStatement {
    let c = field.column().as_sql();
    SqlStatement {
        sql: format!(
            "SELECT DISTINCT {c} FROM {FOUNDERS_TABLE} \
             WHERE {c} IS NOT NULL AND BTRIM({c}, E'{}') <> '' ORDER BY {c} ASC",
            sql_blank_chars()
        ),
        binds: Vec::new(),
    }
}

/// [`BLANK_CHARS`] as the body of a Postgres escape string.
fn sql_blank_chars() -> String {
    BLANK_CHARS
        .iter()
        .map(|ch| match ch {
            '\t' => "\\t".to_string(),
            '\r' => "\\r".to_string(),
            '\n' => "\\n".to_string(),
            other => other.to_string(),
        })
        .collect()
}
