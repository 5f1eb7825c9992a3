//! Offset/limit pagination mapped onto storage pages.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Validated `(limit, offset)` pair for listing tasks.
///
/// Storage is paged by page number and page size. The page number is
/// `offset / limit` using integer division, so an offset that is not a
/// multiple of the limit selects the page containing that offset rather than
/// a slice starting exactly at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    limit: NonZeroU32,
    offset: u32,
}

impl PageRequest {
    /// Page size used when the caller does not supply a limit.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ZeroPageLimit`] when `limit` is zero.
    pub fn new(limit: u32, offset: u32) -> Result<Self, TaskDomainError> {
        let non_zero_limit = NonZeroU32::new(limit).ok_or(TaskDomainError::ZeroPageLimit)?;
        Ok(Self {
            limit: non_zero_limit,
            offset,
        })
    }

    /// Returns the requested limit.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit.get()
    }

    /// Returns the requested offset.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Returns the storage page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.limit.get()
    }

    /// Returns the zero-based storage page number.
    #[must_use]
    pub const fn page_number(self) -> u32 {
        self.offset.div_euclid(self.limit.get())
    }

    /// Returns the index of the first row in the storage page.
    #[must_use]
    pub fn first_row(self) -> u64 {
        u64::from(self.page_number()) * u64::from(self.page_size())
    }

    /// Returns the cache key for this request.
    #[must_use]
    pub const fn cache_key(self) -> PageKey {
        PageKey {
            limit: self.limit.get(),
            offset: self.offset,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: NonZeroU32::MIN.saturating_add(Self::DEFAULT_LIMIT - 1),
            offset: 0,
        }
    }
}

/// Cache key for a listed page, keyed by the caller's original
/// `(limit, offset)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageKey {
    limit: u32,
    offset: u32,
}

impl PageKey {
    /// Returns the limit component.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the offset component.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.limit, self.offset)
    }
}
