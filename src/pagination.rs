//! Lazy multi-page listings.
//!
//! Freshdesk list endpoints paginate in three different ways. Each is a
//! variant of [`PaginationStrategy`]; all of them are consumed through the
//! same [`Paginated`] stream, which fetches one page at a time, yields its
//! items in server order, and only then asks the strategy for the next page.
//!
//! | Strategy | Request | Response | Next page |
//! |---|---|---|---|
//! | `PageNumber` | `page=N` | `{"total": n, "results": [...]}` | `N + 1`, at most page 10 |
//! | `LinkHeader` | `page=N&per_page=M` | `[...]` | `Link: <url>; rel="next"` |
//! | `Token` | `page_size=M` | `{"records": [...], "_links": {"next": {"href": ...}}}` | `next_token` from the href |

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use futures::stream::{self, Stream};
use reqwest::header::{HeaderMap, LINK};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::query::QueryBuilder;

/// Highest page number the search API serves.
pub const SEARCH_MAX_PAGE: u32 = 10;

/// Largest `per_page` list endpoints accept.
pub const MAX_PER_PAGE: u32 = 100;

/// A lazily fetched sequence of items spanning any number of pages.
///
/// Dropping the stream stops fetching. Errors are yielded once and end the
/// stream.
pub type Paginated<T> = Pin<Box<dyn Stream<Item = Result<T, FreshdeskError>> + Send>>;

/// Callback run before a page is requested: `(page_number, url)`.
pub type BeforePageHook = Arc<dyn Fn(u32, &str) + Send + Sync>;

/// Callback run after a page is parsed: `(page_number, url, item_count)`.
pub type AfterPageHook = Arc<dyn Fn(u32, &str, usize) + Send + Sync>;

/// Optional callbacks around every page a [`Paginated`] stream fetches.
#[derive(Clone, Default)]
pub struct PaginationHooks {
    before_page: Option<BeforePageHook>,
    after_page: Option<AfterPageHook>,
}

impl PaginationHooks {
    /// Creates hooks that do nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `hook` before each page request.
    pub fn before_page(mut self, hook: impl Fn(u32, &str) + Send + Sync + 'static) -> Self {
        self.before_page = Some(Arc::new(hook));
        self
    }

    /// Runs `hook` after each page is parsed.
    pub fn after_page(mut self, hook: impl Fn(u32, &str, usize) + Send + Sync + 'static) -> Self {
        self.after_page = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for PaginationHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationHooks")
            .field("before_page", &self.before_page.is_some())
            .field("after_page", &self.after_page.is_some())
            .finish()
    }
}

/// `page=N` pagination over `{"total", "results"}` bodies (search API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumberPagination {
    /// First page to request (1-based).
    pub start_page: u32,
    /// Highest page number that will be requested.
    pub max_page: u32,
}

impl Default for PageNumberPagination {
    fn default() -> Self {
        Self {
            start_page: 1,
            max_page: SEARCH_MAX_PAGE,
        }
    }
}

impl PageNumberPagination {
    /// Pages `start_page..=max_page`, never past page 10.
    pub fn new(start_page: u32, max_page: u32) -> Self {
        Self {
            start_page,
            max_page,
        }
    }

    /// Last page that will be requested.
    fn last_page(&self) -> u32 {
        self.max_page.min(SEARCH_MAX_PAGE)
    }
}

/// `page`/`per_page` pagination following the `Link` header (list endpoints).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkHeaderPagination {
    /// First page to request (1-based).
    pub start_page: u32,
    /// Items per page, clamped to `1..=100`.
    pub per_page: u32,
}

impl Default for LinkHeaderPagination {
    fn default() -> Self {
        Self {
            start_page: 1,
            per_page: MAX_PER_PAGE,
        }
    }
}

impl LinkHeaderPagination {
    /// Starts at `start_page` with `per_page` items per page.
    pub fn new(start_page: u32, per_page: u32) -> Self {
        Self {
            start_page,
            per_page,
        }
    }
}

/// Opaque `next_token` pagination (custom object records).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenPagination {
    /// Records per page; the server default applies when unset.
    pub page_size: Option<u32>,
}

/// How a list endpoint pages its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStrategy {
    /// Search endpoints.
    PageNumber(PageNumberPagination),
    /// Classic list endpoints.
    LinkHeader(LinkHeaderPagination),
    /// Custom object records.
    Token(TokenPagination),
}

impl From<PageNumberPagination> for PaginationStrategy {
    fn from(value: PageNumberPagination) -> Self {
        PaginationStrategy::PageNumber(value)
    }
}

impl From<LinkHeaderPagination> for PaginationStrategy {
    fn from(value: LinkHeaderPagination) -> Self {
        PaginationStrategy::LinkHeader(value)
    }
}

impl From<TokenPagination> for PaginationStrategy {
    fn from(value: TokenPagination) -> Self {
        PaginationStrategy::Token(value)
    }
}

/// One parsed page.
#[derive(Debug)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
    /// Total match count (page-number strategy only).
    pub total: Option<u64>,
    /// `_links.next.href` (token strategy only).
    pub next_href: Option<String>,
}

/// Where the iteration currently stands.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    /// Endpoint path without pagination parameters.
    pub path: String,
    /// Caller's filters, without pagination parameters.
    pub query: QueryBuilder,
    /// Page number of the page just fetched.
    pub page: u32,
    /// Items received so far, this page included.
    pub fetched: u64,
}

#[derive(Deserialize)]
struct SearchBody<T> {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Deserialize)]
struct TokenBody<T> {
    #[serde(default = "Vec::new")]
    records: Vec<T>,
    #[serde(default, rename = "_links")]
    links: Option<TokenLinks>,
}

#[derive(Deserialize)]
struct TokenLinks {
    #[serde(default)]
    next: Option<TokenHref>,
}

#[derive(Deserialize)]
struct TokenHref {
    #[serde(default)]
    href: Option<String>,
}

impl PaginationStrategy {
    /// Page number of the first request, for hooks and logging.
    fn first_page(&self) -> u32 {
        match self {
            PaginationStrategy::PageNumber(p) => p.start_page.max(1),
            PaginationStrategy::LinkHeader(p) => p.start_page.max(1),
            PaginationStrategy::Token(_) => 1,
        }
    }

    /// True when the first page already lies past the last allowed page.
    fn starts_past_end(&self) -> bool {
        match self {
            PaginationStrategy::PageNumber(p) => p.start_page.max(1) > p.last_page(),
            PaginationStrategy::LinkHeader(_) | PaginationStrategy::Token(_) => false,
        }
    }

    /// Pagination parameters for the first request.
    pub(crate) fn initial_query(&self) -> QueryBuilder {
        match self {
            PaginationStrategy::PageNumber(p) => QueryBuilder::new().push("page", p.start_page.max(1)),
            PaginationStrategy::LinkHeader(p) => QueryBuilder::new()
                .push("page", p.start_page.max(1))
                .push("per_page", p.per_page.clamp(1, MAX_PER_PAGE)),
            PaginationStrategy::Token(p) => QueryBuilder::new().push_opt("page_size", p.page_size),
        }
    }

    /// Deserializes one page body.
    pub(crate) fn parse_page<T: DeserializeOwned>(&self, body: &str) -> Result<Page<T>, FreshdeskError> {
        match self {
            PaginationStrategy::PageNumber(_) => {
                let parsed: SearchBody<T> = serde_json::from_str(body)?;
                Ok(Page {
                    items: parsed.results,
                    total: parsed.total,
                    next_href: None,
                })
            }
            PaginationStrategy::LinkHeader(_) => {
                let items: Vec<T> = if body.trim().is_empty() {
                    Vec::new()
                } else {
                    serde_json::from_str(body)?
                };
                Ok(Page {
                    items,
                    total: None,
                    next_href: None,
                })
            }
            PaginationStrategy::Token(_) => {
                let parsed: TokenBody<T> = serde_json::from_str(body)?;
                Ok(Page {
                    items: parsed.records,
                    total: None,
                    next_href: parsed.links.and_then(|l| l.next).and_then(|n| n.href),
                })
            }
        }
    }

    /// URL of the page after `cursor`, or `None` when the listing is complete.
    pub(crate) fn next_url<T>(
        &self,
        cursor: &Cursor,
        page: &Page<T>,
        headers: &HeaderMap,
        base: &Url,
    ) -> Option<String> {
        match self {
            PaginationStrategy::PageNumber(p) => {
                if page.items.is_empty() {
                    return None;
                }
                if page.total.is_some_and(|total| cursor.fetched >= total) {
                    return None;
                }
                let next = cursor.page + 1;
                if next > p.last_page() {
                    return None;
                }
                Some(
                    cursor
                        .query
                        .clone()
                        .push("page", next)
                        .apply_to(&cursor.path),
                )
            }
            PaginationStrategy::LinkHeader(_) => next_link(headers, base),
            PaginationStrategy::Token(p) => {
                let token = page
                    .next_href
                    .as_deref()
                    .and_then(|href| next_token(href, base))?;
                Some(
                    cursor
                        .query
                        .clone()
                        .push_opt("page_size", p.page_size)
                        .push("next_token", token)
                        .apply_to(&cursor.path),
                )
            }
        }
    }
}

/// Extracts the `rel="next"` target from a `Link` header.
///
/// Parsing is loose: any `<target>` followed by a `rel=next` parameter
/// (quoted or not) qualifies. Targets may contain commas. Relative targets
/// are resolved against `base`.
pub(crate) fn next_link(headers: &HeaderMap, base: &Url) -> Option<String> {
    let mut rest = headers.get(LINK)?.to_str().ok()?;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>')?;
        let target = after[..end].trim();
        let tail = &after[end + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());
        let params = &tail[..params_end];
        rest = &tail[params_end..];

        let is_next = params.split([';', ',']).any(|param| {
            let param = param.trim().to_ascii_lowercase();
            matches!(param.as_str(), "rel=\"next\"" | "rel=next" | "rel='next'")
        });
        if !is_next || target.is_empty() {
            continue;
        }

        return match Url::parse(target) {
            Ok(url) => Some(url.to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => base.join(target).ok().map(|u| u.to_string()),
            Err(_) => None,
        };
    }

    None
}

/// Reads the `next_token` query parameter of a `_links.next.href`.
pub(crate) fn next_token(href: &str, base: &Url) -> Option<String> {
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(href).ok()?,
        Err(_) => return None,
    };
    url.query_pairs()
        .find(|(name, _)| name == "next_token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Iteration state carried between stream polls.
struct State<T> {
    client: FreshdeskClient,
    strategy: PaginationStrategy,
    hooks: PaginationHooks,
    cursor: Cursor,
    next_url: Option<String>,
    next_page: u32,
    buffer: VecDeque<T>,
    done: bool,
}

impl<T: DeserializeOwned> State<T> {
    /// Fetches the page at `url` into the buffer and works out the next URL.
    async fn fetch(&mut self, url: String) -> Result<(), FreshdeskError> {
        let page_number = self.next_page;

        if let Some(hook) = &self.hooks.before_page {
            hook(page_number, &url);
        }

        let response = self.client.fetch_page(&url).await?;
        let page: Page<T> = self.strategy.parse_page(&response.body)?;

        self.cursor.page = page_number;
        self.cursor.fetched += page.items.len() as u64;

        tracing::debug!(
            page = page_number,
            items = page.items.len(),
            status = %response.status,
            path = %response.url.path(),
            "Fetched page"
        );

        if let Some(hook) = &self.hooks.after_page {
            hook(page_number, &url, page.items.len());
        }

        self.next_url = self
            .strategy
            .next_url(&self.cursor, &page, &response.headers, self.client.base_url());
        self.next_page = page_number + 1;
        self.buffer.extend(page.items);
        Ok(())
    }
}

/// A listing that fails before its first request, e.g. on invalid input.
pub(crate) fn failed<T: Send + 'static>(error: FreshdeskError) -> Paginated<T> {
    Box::pin(stream::once(async move { Err(error) }))
}

/// Builds the stream behind [`FreshdeskClient::paginate`].
pub(crate) fn paginate<T>(
    client: FreshdeskClient,
    path: String,
    query: QueryBuilder,
    strategy: PaginationStrategy,
    hooks: PaginationHooks,
) -> Paginated<T>
where
    T: DeserializeOwned + Send + 'static,
{
    let first_url = query.clone().extend(&strategy.initial_query()).apply_to(&path);

    let state = State {
        client,
        strategy,
        hooks,
        cursor: Cursor {
            path,
            query,
            page: 0,
            fetched: 0,
        },
        next_url: (!strategy.starts_past_end()).then_some(first_url),
        next_page: strategy.first_page(),
        buffer: VecDeque::new(),
        done: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if state.done {
                return None;
            }
            if state.client.is_cancelled() {
                state.done = true;
                return Some((Err(FreshdeskError::Cancelled), state));
            }
            if let Some(item) = state.buffer.pop_front() {
                return Some((Ok(item), state));
            }
            let url = state.next_url.take()?;
            if let Err(e) = state.fetch(url).await {
                state.done = true;
                return Some((Err(e), state));
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn base() -> Url {
        Url::parse("https://acme.freshdesk.com/").unwrap()
    }

    fn link_headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_static(value));
        headers
    }

    fn cursor(page: u32, fetched: u64) -> Cursor {
        Cursor {
            path: "/api/v2/search/tickets".to_string(),
            query: QueryBuilder::new().push("query", "\"status:2\""),
            page,
            fetched,
        }
    }

    fn page(items: usize, total: Option<u64>) -> Page<i32> {
        Page {
            items: vec![0; items],
            total,
            next_href: None,
        }
    }

    #[test]
    fn test_initial_query() {
        assert_eq!(
            PaginationStrategy::from(PageNumberPagination::default()).initial_query().to_query_string(),
            "page=1"
        );
        assert_eq!(
            PaginationStrategy::LinkHeader(LinkHeaderPagination::new(1, 500))
                .initial_query()
                .to_query_string(),
            "page=1&per_page=100"
        );
        assert!(PaginationStrategy::from(TokenPagination::default()).initial_query().is_empty());
        assert_eq!(
            PaginationStrategy::Token(TokenPagination { page_size: Some(2) })
                .initial_query()
                .to_query_string(),
            "page_size=2"
        );
    }

    #[test]
    fn test_next_link_absolute() {
        let headers = link_headers(
            "<https://acme.freshdesk.com/api/v2/contacts?page=2&per_page=2>; rel=\"next\"",
        );
        assert_eq!(
            next_link(&headers, &base()).as_deref(),
            Some("https://acme.freshdesk.com/api/v2/contacts?page=2&per_page=2")
        );
    }

    #[test]
    fn test_next_link_relative_and_multiple_entries() {
        let headers = link_headers(
            "</api/v2/tickets?page=1>; rel=\"prev\", </api/v2/tickets?page=3>; rel=next",
        );
        assert_eq!(
            next_link(&headers, &base()).as_deref(),
            Some("https://acme.freshdesk.com/api/v2/tickets?page=3")
        );
    }

    #[test]
    fn test_next_link_target_with_commas() {
        let headers = link_headers(
            "<https://acme.freshdesk.com/api/v2/tickets?include=requester,stats&page=2>; rel=\"next\"",
        );
        assert_eq!(
            next_link(&headers, &base()).as_deref(),
            Some("https://acme.freshdesk.com/api/v2/tickets?include=requester,stats&page=2")
        );
    }

    #[test]
    fn test_next_link_missing_or_garbage() {
        assert_eq!(next_link(&HeaderMap::new(), &base()), None);
        assert_eq!(next_link(&link_headers("garbage"), &base()), None);
        assert_eq!(next_link(&link_headers("<>; rel=\"next\""), &base()), None);
        assert_eq!(
            next_link(&link_headers("<https://acme.freshdesk.com/x>; rel=\"prev\""), &base()),
            None
        );
    }

    #[test]
    fn test_next_token() {
        assert_eq!(
            next_token(
                "/api/v2/custom_objects/schemas/7/records?page_size=2&next_token=abc%3D%3D",
                &base()
            )
            .as_deref(),
            Some("abc==")
        );
        assert_eq!(
            next_token("/api/v2/custom_objects/schemas/7/records?page_size=2", &base()),
            None
        );
        assert_eq!(next_token("/x?next_token=", &base()), None);
    }

    #[test]
    fn test_page_number_next_url() {
        let strategy = PaginationStrategy::from(PageNumberPagination::default());
        let next = strategy.next_url(&cursor(1, 30), &page(30, Some(100)), &HeaderMap::new(), &base());
        assert_eq!(
            next.as_deref(),
            Some("/api/v2/search/tickets?query=%22status%3A2%22&page=2")
        );
    }

    #[test]
    fn test_page_number_stops_at_total_empty_and_cap() {
        let strategy = PaginationStrategy::from(PageNumberPagination::default());
        let headers = HeaderMap::new();
        assert_eq!(strategy.next_url(&cursor(2, 45), &page(15, Some(45)), &headers, &base()), None);
        assert_eq!(strategy.next_url(&cursor(2, 30), &page(0, Some(90)), &headers, &base()), None);
        assert_eq!(
            strategy.next_url(&cursor(10, 300), &page(30, Some(1000)), &headers, &base()),
            None
        );
    }

    #[test]
    fn test_page_number_respects_caller_range() {
        let strategy = PaginationStrategy::PageNumber(PageNumberPagination::new(3, 4));
        let headers = HeaderMap::new();
        assert_eq!(strategy.initial_query().to_query_string(), "page=3");
        assert!(strategy.next_url(&cursor(3, 30), &page(30, Some(1000)), &headers, &base()).is_some());
        assert_eq!(strategy.next_url(&cursor(4, 60), &page(30, Some(1000)), &headers, &base()), None);
    }

    #[test]
    fn test_start_past_search_cap_requests_nothing() {
        assert!(PaginationStrategy::PageNumber(PageNumberPagination::new(11, 20)).starts_past_end());
        assert!(PaginationStrategy::PageNumber(PageNumberPagination::new(5, 4)).starts_past_end());
        assert!(!PaginationStrategy::from(PageNumberPagination::default()).starts_past_end());
        assert!(!PaginationStrategy::from(LinkHeaderPagination::default()).starts_past_end());
    }

    #[test]
    fn test_token_next_url_keeps_filters() {
        let strategy = PaginationStrategy::Token(TokenPagination { page_size: Some(2) });
        let cursor = Cursor {
            path: "/api/v2/custom_objects/schemas/7/records".to_string(),
            query: QueryBuilder::new().push("status", "open"),
            page: 1,
            fetched: 2,
        };
        let page = Page::<i32> {
            items: vec![1, 2],
            total: None,
            next_href: Some("/api/v2/custom_objects/schemas/7/records?page_size=2&next_token=t1".to_string()),
        };
        assert_eq!(
            strategy.next_url(&cursor, &page, &HeaderMap::new(), &base()).as_deref(),
            Some("/api/v2/custom_objects/schemas/7/records?status=open&page_size=2&next_token=t1")
        );
    }

    #[test]
    fn test_parse_page_shapes() {
        let search: Page<i32> = PaginationStrategy::from(PageNumberPagination::default())
            .parse_page(r#"{"total": 3, "results": [1, 2, 3]}"#)
            .unwrap();
        assert_eq!(search.items, vec![1, 2, 3]);
        assert_eq!(search.total, Some(3));

        let list: Page<i32> = PaginationStrategy::from(LinkHeaderPagination::default()).parse_page("[4, 5]").unwrap();
        assert_eq!(list.items, vec![4, 5]);

        let records: Page<i32> = PaginationStrategy::from(TokenPagination::default())
            .parse_page(r#"{"records": [6], "_links": {"next": {"href": "/x?next_token=n"}}}"#)
            .unwrap();
        assert_eq!(records.items, vec![6]);
        assert_eq!(records.next_href.as_deref(), Some("/x?next_token=n"));

        let last: Page<i32> = PaginationStrategy::from(TokenPagination::default())
            .parse_page(r#"{"records": [], "_links": {}}"#)
            .unwrap();
        assert!(last.next_href.is_none());
    }

    #[test]
    fn test_hooks_debug() {
        let hooks = PaginationHooks::new().before_page(|_, _| {});
        assert_eq!(
            format!("{:?}", hooks),
            "PaginationHooks { before_page: true, after_page: false }"
        );
    }
}
