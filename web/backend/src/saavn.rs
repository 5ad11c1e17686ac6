use artistfeed_core::{Language, SearchError, SearchResult, parse_provider_payload};
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Client;

/// One upstream search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pub text: String,
    pub page: u32,
    pub page_size: u32,
    /// Language the query was planned for. The Saavn endpoint has no language
    /// parameter and only sees it through `text`.
    pub language: Option<Language>,
}

/// Anything that can answer an artist search.
///
/// Implementations perform exactly one upstream call per invocation and do
/// no caching of their own; timeouts are applied by the caller.
pub trait ArtistSource: Send + Sync {
    fn search<'a>(&'a self, query: &'a UpstreamQuery)
    -> BoxFuture<'a, Result<SearchResult, SearchError>>;
}

/// Client for the JioSaavn artist search endpoint.
pub struct SaavnClient {
    client: Client,
    base_url: String,
}

impl SaavnClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn search_url(&self, query: &UpstreamQuery) -> String {
        format!(
            "{}?p={}&q={}&_format=json&_marker=0&api_version=4&ctx=wap6dot0&n={}&__call=search.getArtistResults",
            self.base_url,
            query.page,
            urlencoding::encode(&query.text),
            query.page_size
        )
    }

    async fn fetch(&self, query: &UpstreamQuery) -> Result<SearchResult, SearchError> {
        let url = self.search_url(query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::UpstreamUnavailable(format!(
                "provider answered {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::UpstreamUnavailable(e.to_string()))?;

        parse_provider_payload(&body)
    }
}

impl ArtistSource for SaavnClient {
    fn search<'a>(
        &'a self,
        query: &'a UpstreamQuery,
    ) -> BoxFuture<'a, Result<SearchResult, SearchError>> {
        self.fetch(query).boxed()
    }
}
