//! Pagination: client intent vs server fulfillment, in focus or bulk mode.

use serde::Serialize;

use crate::config::PageConfig;
use crate::grammar::SEGMENT_SEPARATOR;

use super::Criteria;

/// How records are paged through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageMode {
    /// One record at a time; the URL carries only the page number.
    #[default]
    Focus,
    /// A window of records; the URL carries `page~many`.
    Bulk,
}

/// The page the user asked to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClientPage {
    pub page: u32,
    pub many: u32,
}

/// The window the last completed fetch actually returned.
///
/// Written only by [`PageCriteria::synchronize_pagination`]; it may lag
/// behind [`ClientPage`] while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerPage {
    pub from: u32,
    pub many: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageCriteria {
    mode: PageMode,
    client: ClientPage,
    server: Option<ServerPage>,
    config: PageConfig,
}

impl Default for PageCriteria {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}

impl PageCriteria {
    pub fn new(config: PageConfig) -> Self {
        Self {
            mode: PageMode::default(),
            client: ClientPage {
                page: 1,
                many: config.default_page_size,
            },
            server: None,
            config,
        }
    }

    pub fn focus_mode(&mut self) {
        self.mode = PageMode::Focus;
    }

    pub fn bulk_mode(&mut self) {
        self.mode = PageMode::Bulk;
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    pub fn is_focus_mode(&self) -> bool {
        self.mode == PageMode::Focus
    }

    pub fn is_bulk_mode(&self) -> bool {
        self.mode == PageMode::Bulk
    }

    pub fn client(&self) -> ClientPage {
        self.client
    }

    pub fn server(&self) -> Option<ServerPage> {
        self.server
    }

    /// Allowed page sizes, in configured order.
    pub fn page_sizes(&self) -> &[u32] {
        &self.config.page_sizes
    }

    /// Page after the current one. Does not move.
    pub fn next(&self) -> u32 {
        self.client.page.saturating_add(1)
    }

    /// Page before the current one. Does not move and does not stop at 1;
    /// check [`is_first_page`](Self::is_first_page) first.
    pub fn previous(&self) -> u32 {
        self.client.page.saturating_sub(1)
    }

    pub fn go_to(&mut self, page: u32) {
        self.client.page = page.max(1);
    }

    pub fn go_to_first(&mut self) {
        self.client.page = 1;
    }

    pub fn is_first_page(&self) -> bool {
        self.client.page == 1
    }

    /// Set the page size; sizes outside the allow-list fall back to the default.
    pub fn set_page_size(&mut self, many: u32) {
        self.client.many = self.config.resolve(Some(many));
    }

    /// Record the window the last fetch returned.
    pub fn synchronize_pagination(&mut self, server: ServerPage) {
        self.server = Some(server);
    }

    /// 1-based offset of the first record of the requested page.
    pub fn client_from(&self) -> u64 {
        u64::from(self.client.page.saturating_sub(1)) * u64::from(self.client.many) + 1
    }

    /// Number of pages needed for `total` records at the current page size.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.client.many.max(1)))
    }

    pub fn is_last_page(&self, total: u64) -> bool {
        u64::from(self.client.page) >= self.total_pages(total)
    }

    fn default_client(&self) -> ClientPage {
        ClientPage {
            page: 1,
            many: self.config.default_page_size,
        }
    }
}

/// Unsigned `digit+`; no sign, no decimal point.
fn parse_digits(raw: &str) -> Option<u32> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Page number, or 1 when missing, malformed or zero.
fn parse_page(raw: &str) -> u32 {
    match parse_digits(raw) {
        Some(page) if page >= 1 => page,
        _ => {
            if !raw.is_empty() {
                tracing::debug!(raw, "invalid page number, using first page");
            }
            1
        }
    }
}

impl Criteria for PageCriteria {
    type Value = ClientPage;

    fn complete(&mut self, raw: &str) {
        let raw = raw.trim();

        match self.mode {
            PageMode::Focus => {
                self.client.page = parse_page(raw);
            }
            PageMode::Bulk => {
                let (page, many) = match raw.split_once(SEGMENT_SEPARATOR) {
                    Some((page, many)) => (page, Some(many)),
                    None => (raw, None),
                };
                let requested = many.and_then(parse_digits);
                let resolved = self.config.resolve(requested);
                if requested.is_some_and(|m| m != resolved) {
                    tracing::debug!(?requested, resolved, "page size not allowed, using default");
                }

                self.client = ClientPage {
                    page: parse_page(page),
                    many: resolved,
                };
            }
        }
    }

    fn value(&self) -> &ClientPage {
        &self.client
    }

    fn url_params(&self) -> String {
        match self.mode {
            PageMode::Focus => self.client.page.to_string(),
            PageMode::Bulk => format!(
                "{}{}{}",
                self.client.page, SEGMENT_SEPARATOR, self.client.many
            ),
        }
    }

    fn reset(&mut self) {
        self.client = self.default_client();
        if self.server.is_some() {
            self.server = Some(ServerPage {
                from: 1,
                many: self.config.default_page_size,
            });
        }
    }

    fn is_empty(&self) -> bool {
        self.client == self.default_client()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk() -> PageCriteria {
        let mut criteria = PageCriteria::default();
        criteria.bulk_mode();
        criteria
    }

    #[test]
    fn test_defaults() {
        let criteria = PageCriteria::default();
        assert!(criteria.is_focus_mode());
        assert_eq!(criteria.client(), ClientPage { page: 1, many: 10 });
        assert_eq!(criteria.server(), None);
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_bulk_complete() {
        let mut criteria = bulk();
        criteria.complete("3~20");
        assert_eq!(criteria.value(), &ClientPage { page: 3, many: 20 });
    }

    #[test]
    fn test_bulk_missing_many_falls_back() {
        let mut criteria = bulk();
        criteria.complete("1~");
        assert_eq!(criteria.client(), ClientPage { page: 1, many: 10 });
    }

    #[test]
    fn test_bulk_many_outside_allow_list_falls_back() {
        let mut criteria = bulk();
        criteria.complete("1~11");
        assert_eq!(criteria.client(), ClientPage { page: 1, many: 10 });
    }

    #[test]
    fn test_bulk_page_only() {
        let mut criteria = bulk();
        criteria.complete("4");
        assert_eq!(criteria.client(), ClientPage { page: 4, many: 10 });
    }

    #[test]
    fn test_bulk_malformed_page() {
        let mut criteria = bulk();
        criteria.complete("abc~50");
        assert_eq!(criteria.client(), ClientPage { page: 1, many: 50 });

        criteria.complete("0~50");
        assert_eq!(criteria.client().page, 1);

        criteria.complete("-2~50");
        assert_eq!(criteria.client().page, 1);
    }

    #[test]
    fn test_bulk_round_trip() {
        for page in [1, 2, 7, 1000] {
            for many in [1, 10, 20, 50, 100] {
                let mut source = bulk();
                source.go_to(page);
                source.set_page_size(many);

                let mut target = bulk();
                target.complete(&source.url_params());
                assert_eq!(target.client(), ClientPage { page, many });
            }
        }
    }

    #[test]
    fn test_focus_complete_keeps_many() {
        let mut criteria = bulk();
        criteria.complete("2~50");
        criteria.focus_mode();
        criteria.complete("7");
        assert_eq!(criteria.client(), ClientPage { page: 7, many: 50 });
        assert_eq!(criteria.url_params(), "7");
    }

    #[test]
    fn test_signed_page_rejected() {
        let mut criteria = bulk();
        criteria.complete("+5~20");
        assert_eq!(criteria.client(), ClientPage { page: 1, many: 20 });
        criteria.complete("2~+20");
        assert_eq!(criteria.client(), ClientPage { page: 2, many: 10 });

        criteria.focus_mode();
        criteria.complete("+5");
        assert_eq!(criteria.client().page, 1);
        criteria.complete(" 5 ");
        assert_eq!(criteria.client().page, 5);
    }

    #[test]
    fn test_focus_malformed_page() {
        let mut criteria = PageCriteria::default();
        criteria.complete("seven");
        assert_eq!(criteria.client().page, 1);
        criteria.complete("");
        assert_eq!(criteria.client().page, 1);
    }

    #[test]
    fn test_url_params_by_mode() {
        let mut criteria = bulk();
        criteria.complete("3~20");
        assert_eq!(criteria.url_params(), "3~20");
        criteria.focus_mode();
        assert_eq!(criteria.url_params(), "3");
    }

    #[test]
    fn test_next_previous_pure() {
        let mut criteria = PageCriteria::default();
        criteria.complete("5");
        assert_eq!(criteria.next(), 6);
        assert_eq!(criteria.previous(), 4);
        assert_eq!(criteria.client().page, 5);
    }

    #[test]
    fn test_previous_not_clamped() {
        let criteria = PageCriteria::default();
        assert!(criteria.is_first_page());
        assert_eq!(criteria.previous(), 0);
    }

    #[test]
    fn test_go_to_first_keeps_many() {
        let mut criteria = bulk();
        criteria.complete("9~100");
        criteria.go_to_first();
        assert_eq!(criteria.client(), ClientPage { page: 1, many: 100 });
        assert!(criteria.is_first_page());
    }

    #[test]
    fn test_synchronize_pagination_is_independent() {
        let mut criteria = bulk();
        criteria.complete("2~20");
        criteria.synchronize_pagination(ServerPage { from: 1, many: 10 });

        // Client moved on while the fetch for the old window completed
        criteria.complete("3~20");
        assert_eq!(criteria.server(), Some(ServerPage { from: 1, many: 10 }));
        assert_eq!(criteria.client(), ClientPage { page: 3, many: 20 });
    }

    #[test]
    fn test_reset_without_server() {
        let mut criteria = bulk();
        criteria.complete("4~50");
        criteria.reset();
        assert_eq!(criteria.client(), ClientPage { page: 1, many: 10 });
        assert_eq!(criteria.server(), None);
    }

    #[test]
    fn test_reset_restores_server() {
        let mut criteria = bulk();
        criteria.synchronize_pagination(ServerPage { from: 41, many: 20 });
        criteria.complete("3~20");
        criteria.reset();
        criteria.reset();
        assert_eq!(criteria.client(), ClientPage { page: 1, many: 10 });
        assert_eq!(criteria.server(), Some(ServerPage { from: 1, many: 10 }));
    }

    #[test]
    fn test_set_page_size_uses_allow_list() {
        let mut criteria = bulk();
        criteria.set_page_size(20);
        assert_eq!(criteria.client().many, 20);
        criteria.set_page_size(33);
        assert_eq!(criteria.client().many, 10);
    }

    #[test]
    fn test_custom_page_sizes() {
        let mut criteria = PageCriteria::new(PageConfig {
            page_sizes: vec![25, 75],
            default_page_size: 25,
        });
        criteria.bulk_mode();
        criteria.complete("2~75");
        assert_eq!(criteria.client(), ClientPage { page: 2, many: 75 });
        criteria.complete("2~10");
        assert_eq!(criteria.client(), ClientPage { page: 2, many: 25 });
        assert_eq!(criteria.page_sizes(), &[25, 75]);
    }

    #[test]
    fn test_offsets_and_totals() {
        let mut criteria = bulk();
        criteria.complete("3~20");
        assert_eq!(criteria.client_from(), 41);
        assert_eq!(criteria.total_pages(45), 3);
        assert!(criteria.is_last_page(45));
        assert!(!criteria.is_last_page(61));
        assert_eq!(criteria.total_pages(0), 0);
    }
}
