//! Pagination primitives shared by the repositories and the HTTP layer.

use crate::domain::Anime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    Name,
}

impl SortProperty {
    pub fn column(&self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Sort {
            property: SortProperty::Id,
            direction: SortDirection::Asc,
        }
    }
}

/// Parses `property[,direction]`, e.g. `name,desc`.
impl FromStr for Sort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let property = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("id") => SortProperty::Id,
            Some("name") => SortProperty::Name,
            Some(other) => return Err(format!("unknown sort property '{}'", other)),
            None => return Err("empty sort expression".to_string()),
        };
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("") | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => return Err(format!("unknown sort direction '{}'", other)),
        };
        if parts.next().is_some() {
            return Err(format!("invalid sort expression '{}'", s));
        }
        Ok(Sort {
            property,
            direction,
        })
    }
}

/// A 0-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// `size` is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::of(0, DEFAULT_PAGE_SIZE)
    }
}

/// One slice of a larger result set. Serialized with the same field names
/// Spring Data clients expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[aliases(AnimePage = Page<Anime>)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number_of_elements: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        let total_pages = total_elements.div_ceil(size as u64) as u32;
        let number_of_elements = content.len() as u32;
        Self {
            number: request.page,
            size,
            total_elements,
            total_pages,
            number_of_elements,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
            empty: content.is_empty(),
            content,
        }
    }
}
