//! The founder record projected by every listing endpoint.
//!
//! The column set is fixed so the public JSON shape stays stable no matter
//! which filters a query applies.

use serde::{Deserialize, Serialize, Serializer};

/// Columns projected by every listing query, in output order.
pub const FOUNDER_COLUMNS: &[&str] = &[
    "id",
    "name",
    "founder",
    "company_name",
    "location",
    "tree_path",
    "tree_result",
    "history",
    "access_date",
    "company_tags",
    "funding",
    "founder_score",
    "company_score",
    "description_1",
    "description_2",
    "linkedin_url",
    "company_website",
];

/// One row of the `founders` table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct FounderRecord {
    pub id: i64,
    pub name: String,
    pub founder: bool,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub tree_path: Option<String>,
    pub tree_result: Option<String>,
    pub history: Option<String>,
    pub access_date: Option<String>,
    pub company_tags: Option<String>,
    pub funding: Option<String>,
    #[serde(serialize_with = "finite_or_null")]
    pub founder_score: Option<f64>,
    #[serde(serialize_with = "finite_or_null")]
    pub company_score: Option<f64>,
    pub description_1: Option<String>,
    pub description_2: Option<String>,
    pub linkedin_url: Option<String>,
    pub company_website: Option<String>,
}

impl FounderRecord {
    /// Minimal visible record, handy for building fixtures.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            founder: true,
            ..Self::default()
        }
    }

    /// Text value of a filterable column.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Name => Some(self.name.as_str()),
            Column::CompanyName => self.company_name.as_deref(),
            Column::Location => self.location.as_deref(),
            Column::TreePath => self.tree_path.as_deref(),
            Column::TreeResult => self.tree_result.as_deref(),
            Column::History => self.history.as_deref(),
            Column::AccessDate => self.access_date.as_deref(),
            Column::CompanyTags => self.company_tags.as_deref(),
            Column::Description => self.description_1.as_deref(),
        }
    }
}

/// Text columns that listing filters may reference.
///
/// Keeping this closed means column names in generated SQL never come from
/// request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    CompanyName,
    Location,
    TreePath,
    TreeResult,
    History,
    AccessDate,
    CompanyTags,
    Description,
}

impl Column {
    pub fn as_sql(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::CompanyName => "company_name",
            Column::Location => "location",
            Column::TreePath => "tree_path",
            Column::TreeResult => "tree_result",
            Column::History => "history",
            Column::AccessDate => "access_date",
            Column::CompanyTags => "company_tags",
            Column::Description => "description_1",
        }
    }
}

/// JSON has no NaN or Infinity, so non-finite scores go out as `null`.
fn finite_or_null<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.is_finite() => serializer.serialize_some(v),
        _ => serializer.serialize_none(),
    }
}
