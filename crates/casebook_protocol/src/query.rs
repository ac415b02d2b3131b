//! The list query descriptor and page envelope.
//!
//! A `ListQuery` is an immutable value: every user-driven change produces a
//! new descriptor, and descriptor equality decides whether a new fetch is
//! needed.

use casebook_ids::CaseId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Server-side sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortKey {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "_id")]
    Id,
    #[serde(rename = "assignedTo")]
    AssignedTo,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::Id => "_id",
            SortKey::AssignedTo => "assignedTo",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created" | "date" => Ok(SortKey::CreatedAt),
            "_id" | "id" => Ok(SortKey::Id),
            "assignedTo" | "officer" => Ok(SortKey::AssignedTo),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Full set of filter/sort/page parameters for one list request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Status filter, in the resource's wire spelling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Restrict to records attached to one case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<CaseId>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            case: None,
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Encode as HTTP query parameters. Empty filters are omitted; `page`
    /// and `limit` are always present.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(7);
        if let Some(search) = self.search.as_deref() {
            if !search.is_empty() {
                params.push(("search", search.to_string()));
            }
        }
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.limit.to_string()));
        if let Some(status) = self.status.as_deref() {
            if !status.is_empty() {
                params.push(("status", status.to_string()));
            }
        }
        if let Some(case) = self.case.as_ref() {
            params.push(("case", case.to_string()));
        }
        params.push(("sortBy", self.sort_by.as_str().to_string()));
        params.push(("sortOrder", self.sort_order.as_str().to_string()));
        params
    }
}

/// Pagination metadata returned with every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: u32,
    pub pages: u32,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Build consistent metadata for `current` out of `total` records at
    /// `limit` per page.
    pub fn for_page(current: u32, total: u64, limit: u32) -> Self {
        let limit = limit.max(1);
        let pages = (total.div_ceil(u64::from(limit)) as u32).max(1);
        let current = current.clamp(1, pages);
        Self {
            current,
            pages,
            total,
            has_next: current < pages,
            has_prev: current > 1,
        }
    }

    pub fn empty() -> Self {
        Self::for_page(1, 0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}
