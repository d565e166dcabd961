/// Search and paging contracts shared by every listing
use super::value_objects::{CastMemberId, CategoryId, GenreId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `desc` (case-insensitive) sorts ascending
    pub fn of(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Search parameters. `page` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub page: u32,
    pub per_page: u32,
    pub terms: String,
    pub sort: String,
    pub direction: SortDirection,
}

impl SearchQuery {
    pub fn new(
        page: u32,
        per_page: u32,
        terms: impl Into<String>,
        sort: impl Into<String>,
        direction: &str,
    ) -> Self {
        SearchQuery {
            page,
            per_page,
            terms: terms.into(),
            sort: sort.into(),
            direction: SortDirection::of(direction),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.per_page as u64
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery::new(0, 10, "", "", "asc")
    }
}

/// Video search: the common query narrowed by related aggregates.
/// An empty filter set does not restrict the result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoSearchQuery {
    pub query: SearchQuery,
    pub categories: Vec<CategoryId>,
    pub genres: Vec<GenreId>,
    pub cast_members: Vec<CastMemberId>,
}

impl VideoSearchQuery {
    pub fn new(query: SearchQuery) -> Self {
        VideoSearchQuery {
            query,
            ..Default::default()
        }
    }

    pub fn with_categories(mut self, categories: Vec<CategoryId>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_genres(mut self, genres: Vec<GenreId>) -> Self {
        self.genres = genres;
        self
    }

    pub fn with_cast_members(mut self, cast_members: Vec<CastMemberId>) -> Self {
        self.cast_members = cast_members;
        self
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination<T> {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Pagination<T> {
    pub fn new(current_page: u32, per_page: u32, total: u64, items: Vec<T>) -> Self {
        Pagination {
            current_page,
            per_page,
            total,
            items,
        }
    }

    pub fn map<U>(self, mapper: impl FnMut(T) -> U) -> Pagination<U> {
        Pagination {
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            items: self.items.into_iter().map(mapper).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!(SortDirection::of("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::of("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::of("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::of("sideways"), SortDirection::Asc);
    }

    #[test]
    fn test_offset() {
        let query = SearchQuery::new(2, 15, "", "name", "asc");
        assert_eq!(query.offset(), 30);
    }

    #[test]
    fn test_map_keeps_paging_metadata() {
        let page = Pagination::new(1, 2, 5, vec![1, 2]);
        let mapped = page.map(|n| n.to_string());

        assert_eq!(mapped.current_page, 1);
        assert_eq!(mapped.per_page, 2);
        assert_eq!(mapped.total, 5);
        assert_eq!(mapped.items, vec!["1".to_string(), "2".to_string()]);
    }
}
