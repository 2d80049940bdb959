//! Offset pagination for list operations.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// 1-based page selection carried by every list request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Result<Self, AppError> {
        let request = Self { page, page_size };
        request.ensure_valid()?;
        Ok(request)
    }

    /// Reject out-of-range values before they reach an OFFSET computation.
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        if self.page < 1 {
            return Err(AppError::InvalidInput(format!(
                "page must be at least 1, got {}",
                self.page
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(AppError::InvalidInput(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.checked_offset().is_none() {
            return Err(AppError::InvalidInput(format!(
                "page {} is out of range for page_size {}",
                self.page, self.page_size
            )));
        }
        Ok(())
    }

    fn checked_offset(&self) -> Option<i64> {
        self.page.checked_sub(1)?.checked_mul(self.page_size)
    }

    /// Row offset of this page. Saturates for a request that skipped
    /// `ensure_valid`.
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Envelope metadata derived from a page request and a row count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn compute(page: i64, page_size: i64, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = if page_size <= 0 {
            0
        } else {
            total / page_size + i64::from(total % page_size != 0)
        };
        Self {
            total,
            page,
            page_size,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Paginated list response
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: PageRequest) -> Self {
        let meta = PageMeta::compute(page.page, page.page_size, total);
        Self {
            data,
            total: meta.total,
            page: meta.page,
            page_size: meta.page_size,
            total_pages: meta.total_pages,
            has_next: meta.has_next,
            has_prev: meta.has_prev,
        }
    }

    /// Maps the rows to a different type, keeping the envelope.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}
