//! This modules defines the common functionality for paging data.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum records to display per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_pages: 5,
        }
    }
}

/// The pagination query parameters carried by listing pages.
///
/// The search form deliberately omits the page field, so submitting a new
/// search key always lands on the first page. Without that reset, a search
/// issued from a late page would ask the backend for a page that no longer
/// exists and render an empty table.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PageQuery {
    pub page: Option<u64>,
    pub search: Option<String>,
    /// The column to sort by, when the listing supports sorting.
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
}

impl PageQuery {
    /// The search key with empty strings treated as no search.
    pub(crate) fn search_key(&self) -> Option<&str> {
        self.search.as_deref().filter(|key| !key.is_empty())
    }

    /// The sort field, falling back to `default` for unsorted requests.
    pub(crate) fn sort_field<'a>(&'a self, default: &'a str) -> &'a str {
        self.sort.as_deref().filter(|field| !field.is_empty()).unwrap_or(default)
    }

    pub(crate) fn sort_direction(&self) -> SortDirection {
        self.direction.unwrap_or_default()
    }
}

/// Sort direction for sortable listing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The value the backend expects in its sort query parameter.
    pub(crate) fn as_query(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// The direction a column header link should offer next.
    pub(crate) fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The resolved pagination state for one rendered page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageState {
    /// The current page, 1-based.
    pub page: u64,
    pub page_size: u64,
    /// Total pages reported by the backend for the current search key.
    pub total_pages: u64,
    /// Total records reported by the backend for the current search key.
    pub total_records: u64,
}

impl PageState {
    /// Clamp the requested page into the valid range `1..=total_pages`.
    ///
    /// A page of zero or none falls back to `default_page`.
    pub(crate) fn resolve_page(requested: Option<u64>, config: &PaginationConfig) -> u64 {
        match requested {
            Some(0) | None => config.default_page,
            Some(page) => page,
        }
    }

    /// The page a "next" link should point at. Stays on the last page rather
    /// than walking off the end.
    pub(crate) fn next_page(&self) -> u64 {
        if self.page >= self.total_pages {
            self.page
        } else {
            self.page + 1
        }
    }

    /// The page a "previous" link should point at. Stays on the first page.
    pub(crate) fn prev_page(&self) -> u64 {
        if self.page <= 1 { self.page } else { self.page - 1 }
    }

    /// A human-readable summary of the visible records, e.g.
    /// "Showing 11-20 of 54".
    pub(crate) fn page_info(&self) -> String {
        if self.total_records == 0 {
            return "Showing 0-0 of 0".to_owned();
        }

        let first = (self.page - 1) * self.page_size + 1;
        let last = (self.page * self.page_size).min(self.total_records);

        format!("Showing {first}-{last} of {}", self.total_records)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

#[derive(Serialize)]
struct PageLinkParams<'a> {
    page: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<&'static str>,
}

/// A link to `page` of the listing at `base`, carrying the current search and
/// sort parameters so moving between pages never drops them.
pub(crate) fn page_url(base: &str, page: u64, query: &PageQuery) -> String {
    let params = PageLinkParams {
        page,
        search: query.search_key(),
        sort: query.sort.as_deref().filter(|field| !field.is_empty()),
        direction: query.direction.map(SortDirection::as_query),
    };

    // Serializing a struct of scalars cannot fail.
    let query_string = serde_urlencoded::to_string(&params).unwrap_or_default();

    format!("{base}?{query_string}")
}

const INDICATOR_STYLE: &str = "px-3 py-1 rounded text-sm text-blue-600 \
    hover:bg-blue-100 dark:text-blue-400 dark:hover:bg-gray-700";
const CURRENT_INDICATOR_STYLE: &str =
    "px-3 py-1 rounded text-sm bg-blue-500 text-white font-semibold";

/// The numbered page links, ellipses and back/next buttons under a listing
/// table.
pub(crate) fn pagination_nav(
    base: &str,
    query: &PageQuery,
    state: &PageState,
    max_pages: u64,
) -> Markup {
    let indicators = create_pagination_indicators(state.page, state.total_pages, max_pages);

    html!(
        nav
            aria-label="pagination"
            class="flex items-center justify-between mt-4"
        {
            span class="text-sm text-gray-600 dark:text-gray-400" { (state.page_info()) }

            div class="flex items-center gap-1"
            {
                @for indicator in &indicators {
                    @match indicator {
                        PaginationIndicator::BackButton(page) => {
                            a href=(page_url(base, *page, query)) class=(INDICATOR_STYLE)
                            {
                                "Back"
                            }
                        }
                        PaginationIndicator::Page(page) => {
                            a href=(page_url(base, *page, query)) class=(INDICATOR_STYLE)
                            {
                                (page)
                            }
                        }
                        PaginationIndicator::CurrPage(page) => {
                            span class=(CURRENT_INDICATOR_STYLE) aria-current="page" { (page) }
                        }
                        PaginationIndicator::Ellipsis => {
                            span class="px-1 text-gray-500" { "..." }
                        }
                        PaginationIndicator::NextButton(page) => {
                            a href=(page_url(base, *page, query)) class=(INDICATOR_STYLE)
                            {
                                "Next"
                            }
                        }
                    }
                }
            }
        }
    )
}



#[cfg(test)]
mod tests {
    use crate::pagination::{PaginationIndicator, create_pagination_indicators};

    #[test]
    fn shows_all_pages() {
        let max_pages = 5;
        let page_count = 5;
        let curr_page = 1;
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_left() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 1;
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_both_buttons_and_trailing_ellipsis() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 3;
        let want = [
            PaginationIndicator::BackButton(2),
            PaginationIndicator::Page(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::CurrPage(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(4),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_right() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 10;
        let want = [
            PaginationIndicator::BackButton(9),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Page(8),
            PaginationIndicator::Page(9),
            PaginationIndicator::CurrPage(10),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_both_buttons_and_leading_ellipsis() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 8;
        let want = [
            PaginationIndicator::BackButton(7),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::CurrPage(8),
            PaginationIndicator::Page(9),
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(9),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn pagination_indicator_shows_page_subset_in_center() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 5;
        let want = [
            PaginationIndicator::BackButton(4),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::CurrPage(5),
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(6),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }
}
