//! Pagination and sorting for listing queries
//!
//! Provides `Pagination`, `Sort` and the `Page` result wrapper.

use std::str::FromStr;

use serde::Serialize;

use configs::MAX_PAGE_SIZE;

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self { Self { page, per_page } }

    /// Clamp per_page to 1..=100; the page index is kept as requested.
    pub fn clamped(self) -> Self {
        Self { page: self.page, per_page: self.per_page.clamp(1, MAX_PAGE_SIZE) }
    }

    /// Page index and page size, ready for the paginator.
    pub fn normalize(self) -> (u64, u64) {
        let p = self.clamped();
        (p.page as u64, p.per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 0, per_page: 20 } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Name,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Listing order; parsed from `field[,asc|desc]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Default for Sort {
    fn default() -> Self { Self { field: SortField::Name, direction: Direction::Asc } }
}

impl FromStr for Sort {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',').map(str::trim);
        let field = match parts.next().unwrap_or_default() {
            "" | "name" => SortField::Name,
            "displayOrder" | "display_order" => SortField::DisplayOrder,
            "createdAt" | "created_at" => SortField::CreatedAt,
            "updatedAt" | "updated_at" => SortField::UpdatedAt,
            other => return Err(ServiceError::Validation(format!("unknown sort field: {}", other))),
        };
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("") | Some("asc") => Direction::Asc,
            Some("desc") => Direction::Desc,
            Some(other) => return Err(ServiceError::Validation(format!("unknown sort direction: {}", other))),
        };
        Ok(Self { field, direction })
    }
}

/// One page of results plus totals.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        let p = pagination.clamped();
        let total_pages = total.div_ceil(p.per_page as u64);
        Self { items, total, page: p.page, per_page: p.per_page, total_pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_first_page_and_clamps_size() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 5);
        assert_eq!(per, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 0);
        assert_eq!(d.per_page, 20);
    }

    #[test]
    fn sort_parses_field_and_direction() {
        assert_eq!("name".parse::<Sort>().unwrap(), Sort::default());
        let s: Sort = "displayOrder,DESC".parse().unwrap();
        assert_eq!(s.field, SortField::DisplayOrder);
        assert_eq!(s.direction, Direction::Desc);
        assert_eq!("updated_at, asc".parse::<Sort>().unwrap().field, SortField::UpdatedAt);
    }

    #[test]
    fn sort_rejects_unknown_field() {
        let err = "price,asc".parse::<Sort>().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!("name,sideways".parse::<Sort>().is_err());
    }

    #[test]
    fn page_counts_total_pages() {
        let page = Page::new(vec![1, 2, 3], 45, Pagination::new(0, 20));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 0);
        let empty: Page<i32> = Page::new(vec![], 0, Pagination::new(3, 500));
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.page, 3);
        assert_eq!(empty.per_page, 100);
    }
}
