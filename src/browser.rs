use crate::config::BrowserConfig;
use crate::error::BrowseError;
use crate::model::{GameListPage, Menu, Page, PageKind, Platforms};
use crate::parsers;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

/// Retrieves page text. Parsing never happens here.
pub trait Fetch: Send + Sync {
    fn get(&self, url: Url) -> impl Future<Output = Result<String, BrowseError>> + Send;
}

/// Plain HTTP GET through reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &BrowserConfig) -> Result<Self, BrowseError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, url: Url) -> Result<String, BrowseError> {
        ::log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowseError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Fetches archive pages and parses them into catalog records
pub struct Browser<F = HttpFetcher> {
    fetcher: Arc<F>,
    config: Arc<BrowserConfig>,
}

impl<F> Clone for Browser<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            config: Arc::clone(&self.config),
        }
    }
}

impl Browser<HttpFetcher> {
    /// Browser over HTTP with the given configuration
    pub fn new(config: BrowserConfig) -> Result<Self, BrowseError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: Fetch> Browser<F> {
    pub fn with_fetcher(fetcher: F, config: BrowserConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Request URL for a site path with query parameters
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, BrowseError> {
        let mut url = Url::parse(&self.config.base_url)?.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<String, BrowseError> {
        let url = self.url(path, params)?;
        self.fetcher.get(url).await
    }

    /// Root menu and search platforms from the search page
    pub async fn home(&self) -> Result<(Menu, Platforms), BrowseError> {
        let text = self.fetch(&self.config.search_path, &[]).await?;
        Ok(parsers::parse_search_page(&text)?)
    }

    /// Any supported page at `path`
    pub async fn page(&self, path: &str) -> Result<Page, BrowseError> {
        let text = self.fetch(path, &[]).await?;
        let page = parsers::parse_page(&text)?;
        ::log::info!("Parsed {} page at {}", page.kind(), path);
        Ok(page)
    }

    /// Page `number` of the game list at `path`
    pub async fn gamelist(&self, path: &str, number: u32) -> Result<GameListPage, BrowseError> {
        let number = number.to_string();
        let text = self.fetch(path, &[("page", &number)]).await?;
        expect_gamelist(parsers::parse_page(&text)?)
    }

    async fn first_gamelist(&self, path: &str) -> Result<GameListPage, BrowseError> {
        expect_gamelist(self.page(path).await?)
    }

    /// Every page of the game list at `path`, one request after another.
    ///
    /// `max_pages` caps how many pages are requested. The first page is always fetched.
    pub async fn gamelist_all(
        &self,
        path: &str,
        max_pages: Option<u32>,
    ) -> Result<Vec<GameListPage>, BrowseError> {
        let first = self.first_gamelist(path).await?;
        let last = max_pages.map_or(first.total_pages, |max| max.min(first.total_pages));
        let mut number = first.page;
        let mut pages = vec![first];

        while number < last {
            number += 1;
            ::log::debug!("Fetching page {} of {} for {}", number, last, path);
            pages.push(self.gamelist(path, number).await?);
        }

        Ok(pages)
    }

    /// Searches game titles on one platform. Results always fit one page.
    pub async fn search(&self, text: &str, platform_id: &str) -> Result<GameListPage, BrowseError> {
        let params = [("search", text), ("search_consoleid", platform_id)];
        let body = self.fetch(&self.config.search_path, &params).await?;
        let page = expect_gamelist(parsers::parse_page(&body)?)?;

        if page.total_pages != 1 {
            return Err(BrowseError::PaginatedSearch(page.total_pages));
        }

        ::log::info!("Search {:?} found {} games", text, page.entries.len());
        Ok(page)
    }
}

impl<F: Fetch + 'static> Browser<F> {
    /// Streams the pages of a game list as they are fetched.
    ///
    /// Pages are requested in order by a background task which stops after the
    /// last page, after the first error, or once the receiver is dropped.
    pub fn gamelist_pages(&self, path: &str) -> mpsc::Receiver<Result<GameListPage, BrowseError>> {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let browser = self.clone();
        let path = path.to_string();

        tokio::spawn(async move {
            let mut next = None;
            loop {
                let result = match next {
                    None => browser.first_gamelist(&path).await,
                    Some(number) => browser.gamelist(&path, number).await,
                };

                next = match &result {
                    Ok(page) if page.has_next() => Some(page.page + 1),
                    _ => None,
                };

                if tx.send(result).await.is_err() {
                    ::log::debug!("Page receiver for {} dropped, stopping", path);
                    break;
                }
                if next.is_none() {
                    break;
                }
            }
        });

        rx
    }
}

fn expect_gamelist(page: Page) -> Result<GameListPage, BrowseError> {
    match page {
        Page::GameList(list) => Ok(list),
        other => Err(BrowseError::UnexpectedPage {
            expected: PageKind::GameList,
            found: other.kind(),
        }),
    }
}
