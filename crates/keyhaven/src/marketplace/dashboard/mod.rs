//! Back-office desks for administrators and homeowners.
//!
//! Each desk owns its tables behind a process-local mutex. Every table supports the same text
//! search: the query is trimmed and lowercased, a blank query returns the whole table, and
//! otherwise a row matches when any of its searchable fields contains the query.

pub mod admin;
pub mod homeowner;
pub mod router;
mod seed;

pub use admin::{AdminDesk, AdminSummary, RecordKind};
pub use homeowner::{HomeownerDesk, HomeownerSummary};
pub use router::{admin_router, homeowner_router};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{0}")]
    Invalid(&'static str),
    #[error("dashboard state unavailable")]
    Unavailable,
}

/// `?q=` parameter shared by every table listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            q: Some(query.into()),
        }
    }

    /// Lowercased needle, or `None` when the query is blank.
    pub fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(|raw| raw.trim().to_lowercase())
            .filter(|needle| !needle.is_empty())
    }
}

pub(crate) fn any_field_contains<'a, I>(needle: &str, fields: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Applies the table search rule to `rows`.
pub(crate) fn search_rows<T, F>(rows: &[T], query: &SearchQuery, fields: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Vec<String>,
{
    match query.needle() {
        None => rows.to_vec(),
        Some(needle) => rows
            .iter()
            .filter(|row| any_field_contains(&needle, fields(row).iter().map(String::as_str)))
            .cloned()
            .collect(),
    }
}
