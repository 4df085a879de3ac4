use crate::models::{Article, Links, ResultEnvelope};

pub const PAGE_SIZE: usize = 10;

/// Path the navigation links point back to.
pub const SEARCH_PATH: &str = "/search";

/// Query-string shape shared by the `self`, `prev` and `next` links.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    pub fn new(keyword: &str, city: &str) -> Self {
        Self {
            base: format!(
                "{}?keyword={}&city={}",
                SEARCH_PATH,
                urlencoding::encode(keyword),
                urlencoding::encode(city)
            ),
        }
    }

    pub fn page(&self, page: u32) -> String {
        format!("{}&page={}", self.base, page)
    }
}

/// Slices one page out of an already deduplicated, ordered list.
///
/// A requested page past the end clamps to the last page; an empty list
/// yields page 0 of 0.
pub fn paginate(
    items: Vec<Article>,
    requested_page: u32,
    page_size: usize,
    links: &LinkBuilder,
) -> ResultEnvelope {
    let page_size = page_size.max(1);
    let total_results = items.len();
    let total_pages = u32::try_from(total_results.div_ceil(page_size)).unwrap_or(u32::MAX);

    let current_page = if total_pages == 0 {
        0
    } else {
        requested_page.clamp(1, total_pages)
    };

    let articles = if current_page == 0 {
        Vec::new()
    } else {
        let start = (current_page as usize - 1) * page_size;
        items.into_iter().skip(start).take(page_size).collect()
    };

    let prev_page = (current_page > 1).then(|| current_page - 1);
    let next_page = (current_page < total_pages).then(|| current_page + 1);

    ResultEnvelope {
        total_results,
        total_pages,
        current_page,
        articles,
        prev_page,
        next_page,
        links: Links {
            self_link: links.page(current_page),
            prev: prev_page.map(|p| links.page(p)),
            next: next_page.map(|p| links.page(p)),
        },
    }
}
