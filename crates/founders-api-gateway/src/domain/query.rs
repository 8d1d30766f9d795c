//! Typed listing queries.
//!
//! A [`ListingQuery`] describes one of the listing endpoints together with
//! its optional filters. It lowers to a list of [`Condition`]s which every
//! store backend interprets: the Postgres adapter renders them into a
//! parameterized `WHERE` clause, the in-memory adapter evaluates them
//! directly against rows.

use crate::domain::error::ApiError;
use crate::domain::record::{Column, FounderRecord};

/// History value for founders already recommended to the dashboard.
pub const HISTORY_RECOMMENDED: &str = "recommended";

/// Tree verdicts that qualify a founder for the unseen listing.
pub const UNSEEN_VERDICTS: &[&str] = &["Strong recommend", "Recommend"];

/// Columns a keyword search looks into.
pub const KEYWORD_COLUMNS: &[Column] = &[Column::Name, Column::CompanyName, Column::Description];

/// Filter on the hierarchical `tree_path` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFilter {
    /// Case-insensitive substring match
    Contains(String),
    /// Case-insensitive prefix match
    Prefix(String),
}

impl PathFilter {
    /// Build from the raw query parameters. The substring form wins when both
    /// are present.
    pub fn from_params(tree_path: Option<String>, tree_path_prefix: Option<String>) -> Option<Self> {
        match (non_empty(tree_path), non_empty(tree_path_prefix)) {
            (Some(path), _) => Some(PathFilter::Contains(path)),
            (None, Some(prefix)) => Some(PathFilter::Prefix(prefix)),
            (None, None) => None,
        }
    }

    fn condition(&self) -> Condition {
        match self {
            PathFilter::Contains(v) => Condition::Contains(Column::TreePath, v.clone()),
            PathFilter::Prefix(v) => Condition::StartsWith(Column::TreePath, v.clone()),
        }
    }
}

/// Optional filters accepted by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub tag: Option<String>,
    pub path: Option<PathFilter>,
}

/// One listing request, ready to run against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingQuery {
    Recommended { path: Option<PathFilter> },
    Unseen,
    Search(SearchFilters),
}

impl ListingQuery {
    pub fn name(&self) -> &'static str {
        match self {
            ListingQuery::Recommended { .. } => "recommended",
            ListingQuery::Unseen => "unseen",
            ListingQuery::Search(_) => "search",
        }
    }

    /// All conditions a row must satisfy, combined with AND.
    pub fn conditions(&self) -> Vec<Condition> {
        let mut conditions = vec![Condition::IsFounder];

        match self {
            ListingQuery::Recommended { path } => {
                conditions.push(Condition::Equals(Column::History, HISTORY_RECOMMENDED));
                conditions.push(Condition::NotEmpty(Column::TreePath));
                conditions.push(Condition::NotEmpty(Column::AccessDate));
                conditions.extend(path.iter().map(PathFilter::condition));
            }
            ListingQuery::Unseen => {
                conditions.push(Condition::Equals(Column::History, ""));
                conditions.push(Condition::OneOf(Column::TreeResult, UNSEEN_VERDICTS));
                conditions.push(Condition::NotEmpty(Column::AccessDate));
            }
            ListingQuery::Search(filters) => {
                conditions.push(Condition::NotEmpty(Column::AccessDate));
                if let Some(keyword) = &filters.keyword {
                    conditions.push(Condition::AnyContains(KEYWORD_COLUMNS, keyword.clone()));
                }
                if let Some(location) = &filters.location {
                    conditions.push(Condition::Contains(Column::Location, location.clone()));
                }
                if let Some(path) = &filters.path {
                    conditions.push(path.condition());
                }
                if let Some(tag) = &filters.tag {
                    conditions.push(Condition::Contains(Column::CompanyTags, tag.clone()));
                }
            }
        }

        conditions
    }

    /// Whether a single row passes every condition, ignoring deduplication.
    pub fn matches(&self, record: &FounderRecord) -> bool {
        self.conditions().iter().all(|c| c.matches(record))
    }
}

/// A single row predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `founder = true`
    IsFounder,
    /// Exact equality against a fixed literal
    Equals(Column, &'static str),
    /// Exact membership in a fixed set of literals
    OneOf(Column, &'static [&'static str]),
    /// Non-null and not the empty string
    NotEmpty(Column),
    /// Case-insensitive substring
    Contains(Column, String),
    /// Case-insensitive prefix
    StartsWith(Column, String),
    /// Case-insensitive substring of any of the columns
    AnyContains(&'static [Column], String),
}

impl Condition {
    pub fn matches(&self, record: &FounderRecord) -> bool {
        match self {
            Condition::IsFounder => record.founder,
            Condition::Equals(column, value) => record.text(*column) == Some(*value),
            Condition::OneOf(column, values) => record
                .text(*column)
                .is_some_and(|v| values.iter().any(|allowed| *allowed == v)),
            Condition::NotEmpty(column) => record.text(*column).is_some_and(|v| !v.is_empty()),
            Condition::Contains(column, needle) => record
                .text(*column)
                .is_some_and(|v| v.to_lowercase().contains(&needle.to_lowercase())),
            Condition::StartsWith(column, prefix) => record
                .text(*column)
                .is_some_and(|v| v.to_lowercase().starts_with(&prefix.to_lowercase())),
            Condition::AnyContains(columns, needle) => columns
                .iter()
                .any(|c| Condition::Contains(*c, needle.clone()).matches(record)),
        }
    }
}

/// Characters stripped before deciding a filter option is blank.
pub const BLANK_CHARS: &[char] = &[' ', '\t', '\r', '\n'];

/// Whether a filter option is empty once [`BLANK_CHARS`] are trimmed.
pub fn is_blank(value: &str) -> bool {
    value.trim_matches(BLANK_CHARS).is_empty()
}

/// Column backing one of the filter option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Location,
    TreePath,
}

impl FilterField {
    pub fn column(self) -> Column {
        match self {
            FilterField::Location => Column::Location,
            FilterField::TreePath => Column::TreePath,
        }
    }
}

/// Query string of `/recommended-founders`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendedParams {
    pub tree_path: Option<String>,
    pub tree_path_prefix: Option<String>,
}

impl RecommendedParams {
    /// Collect decoded query pairs. A repeated key keeps its last value and
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "tree_path" => params.tree_path = Some(value),
                "tree_path_prefix" => params.tree_path_prefix = Some(value),
                _ => {}
            }
        }
        params
    }

    pub fn into_query(self, max_len: usize) -> Result<ListingQuery, ApiError> {
        check_len("tree_path", self.tree_path.as_deref(), max_len)?;
        check_len("tree_path_prefix", self.tree_path_prefix.as_deref(), max_len)?;

        Ok(ListingQuery::Recommended {
            path: PathFilter::from_params(self.tree_path, self.tree_path_prefix),
        })
    }
}

/// Query string of `/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub tag: Option<String>,
    pub tree_path: Option<String>,
    pub tree_path_prefix: Option<String>,
}

impl SearchParams {
    /// Same rules as [`RecommendedParams::from_pairs`].
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "keyword" => &mut params.keyword,
                "location" => &mut params.location,
                "tag" => &mut params.tag,
                "tree_path" => &mut params.tree_path,
                "tree_path_prefix" => &mut params.tree_path_prefix,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }

    pub fn into_query(self, max_len: usize) -> Result<ListingQuery, ApiError> {
        check_len("keyword", self.keyword.as_deref(), max_len)?;
        check_len("location", self.location.as_deref(), max_len)?;
        check_len("tag", self.tag.as_deref(), max_len)?;
        check_len("tree_path", self.tree_path.as_deref(), max_len)?;
        check_len("tree_path_prefix", self.tree_path_prefix.as_deref(), max_len)?;

        Ok(ListingQuery::Search(SearchFilters {
            keyword: non_empty(self.keyword),
            location: non_empty(self.location),
            tag: non_empty(self.tag),
            path: PathFilter::from_params(self.tree_path, self.tree_path_prefix),
        }))
    }
}

/// An empty parameter (`?tag=`) counts as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn check_len(param: &str, value: Option<&str>, max_len: usize) -> Result<(), ApiError> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(ApiError::invalid_params(format!(
            "{param} exceeds {max_len} characters"
        ))),
        _ => Ok(()),
    }
}
