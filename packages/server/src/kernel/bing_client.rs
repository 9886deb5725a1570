use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{BaseSearchService, SearchResult};

/// Default market sent with every query.
pub const DEFAULT_MARKET: &str = "en-US";

/// Bing Web Search v7 client
pub struct BingSearchClient {
    subscription_key: String,
    search_url: Url,
    market: String,
    client: reqwest::Client,
}

/// Bing API response (only the parts we read)
#[derive(Debug, Deserialize)]
struct BingResponse {
    #[serde(rename = "webPages", default)]
    web_pages: Option<WebPages>,
}

#[derive(Debug, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

/// Individual ranked web page from Bing
#[derive(Debug, Deserialize)]
struct WebPage {
    name: String,
    url: String,
    #[serde(default)]
    snippet: Option<String>,
}

impl BingResponse {
    fn into_results(self) -> Vec<SearchResult> {
        self.web_pages
            .map(|pages| pages.value)
            .unwrap_or_default()
            .into_iter()
            .map(|page| SearchResult {
                title: page.name,
                url: page.url,
                snippet: page.snippet,
            })
            .collect()
    }
}

impl BingSearchClient {
    /// Create a client for the resource at `endpoint` (e.g. `https://api.bing.microsoft.com`).
    pub fn new(subscription_key: impl Into<String>, endpoint: &str) -> Result<Self> {
        let search_url = Url::parse(&format!("{}/v7.0/search", endpoint.trim_end_matches('/')))
            .with_context(|| format!("Invalid Bing search endpoint: {}", endpoint))?;

        Ok(Self {
            subscription_key: subscription_key.into(),
            search_url,
            market: DEFAULT_MARKET.to_string(),
            client: reqwest::Client::new(),
        })
    }

    /// Override the market/locale (default `en-US`).
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

#[async_trait]
impl BaseSearchService for BingSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        tracing::debug!(url = %self.search_url, query, "Bing search");

        let response = self
            .client
            .get(self.search_url.clone())
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .query(&[("q", query), ("mkt", self.market.as_str())])
            .send()
            .await
            .context("Failed to send Bing search request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Bing API error {}: {}", status, body);
        }

        let bing_response: BingResponse = response
            .json()
            .await
            .context("Failed to parse Bing response")?;

        Ok(bing_response.into_results())
    }
}
