//! # Derived View
//!
//! The listing the user sees is never stored. It is recomputed from the current user
//! list and three controls every time it is needed:
//!
//! 1. **Filter**: a record survives if the case-folded search term is a substring of
//!    its case-folded name, email, or company name. An empty term keeps everything.
//! 2. **Sort**: by name, email, company name (all case-folded) or numeric id.
//! 3. **Direction**: descending flips the comparator rather than reversing the output,
//!    so records with equal keys keep their original relative order either way.
//!
//! The sort is stable, which makes the output a pure function of the inputs.

use crate::model::{User, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Email,
    Company,
    Id,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Name, SortKey::Email, SortKey::Company, SortKey::Id];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::Company => "company",
            SortKey::Id => "id",
        }
    }

    /// The value a user is ordered by, case-folded for the text keys.
    fn sort_value(&self, user: &User) -> SortValue {
        match self {
            SortKey::Name => SortValue::Text(user.name.to_lowercase()),
            SortKey::Email => SortValue::Text(user.email.to_lowercase()),
            SortKey::Company => SortValue::Text(user.company.name.to_lowercase()),
            SortKey::Id => SortValue::Id(user.id),
        }
    }
}

/// One key produces one variant, so comparisons never cross variants.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Id(UserId),
}

/// Unrecognized keys fall back to [`SortKey::Name`].
impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "email" => SortKey::Email,
            "company" => SortKey::Company,
            "id" => SortKey::Id,
            _ => SortKey::Name,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// The controls a listing is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search_term: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl ViewQuery {
    pub fn new(search_term: impl Into<String>, sort_by: SortKey, sort_order: SortOrder) -> Self {
        Self {
            search_term: search_term.into(),
            sort_by,
            sort_order,
        }
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }
}

pub fn matches_search(user: &User, term_lower: &str) -> bool {
    term_lower.is_empty()
        || user.name.to_lowercase().contains(term_lower)
        || user.email.to_lowercase().contains(term_lower)
        || user.company.name.to_lowercase().contains(term_lower)
}

pub fn derive_view<'a>(
    users: &'a [User],
    search_term: &str,
    sort_by: SortKey,
    sort_order: SortOrder,
) -> Vec<&'a User> {
    let term_lower = search_term.to_lowercase();

    let mut keyed: Vec<(SortValue, &User)> = users
        .iter()
        .filter(|u| matches_search(u, &term_lower))
        .map(|u| (sort_by.sort_value(u), u))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match sort_order {
        SortOrder::Asc => a.cmp(b),
        SortOrder::Desc => b.cmp(a),
    });

    keyed.into_iter().map(|(_, user)| user).collect()
}

pub fn derive_with<'a>(users: &'a [User], query: &ViewQuery) -> Vec<&'a User> {
    derive_view(users, &query.search_term, query.sort_by, query.sort_order)
}
