//! # List Query
//!
//! Filtering and pagination for record listings.
//!
//! Recognized parameters:
//! - `search`: case-insensitive substring match on name or email
//! - `minAmount` / `maxAmount`: inclusive bounds on transactionAmount
//! - `page` / `limit`: 1-based page of `limit` records
//!
//! Unknown parameters are ignored. Empty values count as absent.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::Record;

use super::errors::{StoreError, StoreResult};

/// Page size used when only `page` is given
pub const DEFAULT_LIMIT: usize = 10;

/// Largest accepted page size
pub const MAX_LIMIT: usize = 1000;

/// Parsed list parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Parse query parameters from a HashMap
    pub fn parse(params: &HashMap<String, String>) -> StoreResult<Self> {
        let mut query = ListQuery::default();

        for (key, value) in params {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "search" => query.search = Some(value.to_string()),
                "minAmount" => query.min_amount = Some(parse_amount_bound(key, value)?),
                "maxAmount" => query.max_amount = Some(parse_amount_bound(key, value)?),
                "page" => query.page = Some(parse_positive(key, value)?),
                "limit" => query.limit = Some(parse_positive(key, value)?),
                _ => {}
            }
        }

        if let Some(limit) = query.limit {
            if limit > MAX_LIMIT {
                return Err(StoreError::Validation(format!(
                    "limit {} exceeds maximum {}",
                    limit, MAX_LIMIT
                )));
            }
        }

        Ok(query)
    }

    /// Whether a page was requested
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }

    /// Whether `record` passes every filter
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = ["name", "email"]
                .iter()
                .any(|field| record.text(field).to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if self.min_amount.is_some() || self.max_amount.is_some() {
            let amount = match record.amount() {
                Some(a) => a,
                None => return false,
            };
            if self.min_amount.map_or(false, |min| amount < min) {
                return false;
            }
            if self.max_amount.map_or(false, |max| amount > max) {
                return false;
            }
        }

        true
    }

    /// Filter records, then slice the requested page if any
    pub fn apply(&self, records: Vec<Record>) -> ListOutcome {
        let filtered: Vec<Record> = records.into_iter().filter(|r| self.matches(r)).collect();

        if !self.is_paginated() {
            return ListOutcome::All(filtered);
        }

        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        let pagination = Pagination::new(page, limit, filtered.len());

        let data = filtered
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        ListOutcome::Paged(Page { data, pagination })
    }
}

fn parse_positive(key: &str, value: &str) -> StoreResult<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(StoreError::Validation(format!(
            "Invalid {}: {}",
            key, value
        ))),
    }
}

fn parse_amount_bound(key: &str, value: &str) -> StoreResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| StoreError::Validation(format!("Invalid {}: {}", key, value)))
}

/// Page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(limit);
        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }
}

/// A page of records with its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Result of a listing: the bare array, or a page envelope
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ListOutcome {
    All(Vec<Record>),
    Paged(Page<Record>),
}

impl ListOutcome {
    /// Records included in the response
    pub fn records(&self) -> &[Record] {
        match self {
            ListOutcome::All(records) => records,
            ListOutcome::Paged(page) => &page.data,
        }
    }
}
