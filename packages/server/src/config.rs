use std::env;
use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use tracing::warn;

use crate::domains::pipeline::GroundingConfig;
use crate::kernel::{BaseAI, BaseSearchService, BingSearchClient, LlmClient, OpenAIClient, ServerDeps, GPT_4O};

const DEFAULT_AZURE_API_VERSION: &str = "2024-10-21";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Which chat completion service backs the pipeline.
#[derive(Clone, PartialEq, Eq)]
pub enum ModelProvider {
    Azure {
        endpoint: String,
        api_key: String,
        deployment: String,
        api_version: String,
    },
    OpenAi {
        api_key: String,
        model: String,
    },
}

impl fmt::Debug for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Azure {
                endpoint,
                deployment,
                api_version,
                ..
            } => f
                .debug_struct("Azure")
                .field("endpoint", endpoint)
                .field("api_key", &"[redacted]")
                .field("deployment", deployment)
                .field("api_version", api_version)
                .finish(),
            Self::OpenAi { model, .. } => f
                .debug_struct("OpenAi")
                .field("api_key", &"[redacted]")
                .field("model", model)
                .finish(),
        }
    }
}

/// Bing Web Search credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub subscription_key: String,
    pub endpoint: String,
    pub market: String,
}

impl fmt::Debug for SearchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSettings")
            .field("subscription_key", &"[redacted]")
            .field("endpoint", &self.endpoint)
            .field("market", &self.market)
            .finish()
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub model: ModelProvider,
    /// `None` runs grounding in placeholder mode
    pub search: Option<SearchSettings>,
    pub grounding: GroundingConfig,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through `var`. Empty values count as unset.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let model = match (var("AZURE_OPENAI_ENDPOINT"), var("AZURE_OPENAI_API_KEY")) {
            (Some(endpoint), Some(api_key)) => ModelProvider::Azure {
                endpoint,
                api_key,
                deployment: var("AZURE_OPENAI_DEPLOYMENT").unwrap_or_else(|| GPT_4O.to_string()),
                api_version: var("AZURE_OPENAI_VERSION")
                    .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
            },
            (Some(_), None) => bail!("AZURE_OPENAI_API_KEY must be set when AZURE_OPENAI_ENDPOINT is set"),
            (None, _) => match var("OPENAI_API_KEY") {
                Some(api_key) => ModelProvider::OpenAi {
                    api_key,
                    model: var("OPENAI_MODEL").unwrap_or_else(|| GPT_4O.to_string()),
                },
                None => bail!(
                    "AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY (or OPENAI_API_KEY) must be set"
                ),
            },
        };

        let search = match (var("BING_SEARCH_SUBSCRIPTION_KEY"), var("BING_SEARCH_ENDPOINT")) {
            (Some(subscription_key), Some(endpoint)) => Some(SearchSettings {
                subscription_key,
                endpoint,
                market: var("BING_SEARCH_MARKET")
                    .unwrap_or_else(|| crate::kernel::bing_client::DEFAULT_MARKET.to_string()),
            }),
            _ => None,
        };

        let max_concurrent_searches = match var("GROUNDING_MAX_CONCURRENCY") {
            Some(v) => v
                .parse::<usize>()
                .context("GROUNDING_MAX_CONCURRENCY must be a positive number")?,
            None => GroundingConfig::default().max_concurrent_searches,
        };
        if max_concurrent_searches == 0 {
            bail!("GROUNDING_MAX_CONCURRENCY must be a positive number");
        }

        let port = match var("PORT") {
            Some(v) => v.parse().context("PORT must be a valid number")?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = match var("ALLOWED_ORIGINS") {
            Some(v) => v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            port,
            model,
            search,
            grounding: GroundingConfig::with_max_concurrent_searches(max_concurrent_searches),
            allowed_origins,
        })
    }

    /// Build the live service dependencies.
    ///
    /// Missing search credentials are not an error: grounding falls back to
    /// placeholder text and a warning is logged once here.
    pub fn build_deps(&self) -> Result<ServerDeps> {
        let llm = match &self.model {
            ModelProvider::Azure {
                endpoint,
                api_key,
                deployment,
                api_version,
            } => LlmClient::new(
                OpenAIClient::azure(endpoint, api_key, deployment, api_version),
                deployment,
            ),
            ModelProvider::OpenAi { api_key, model } => {
                LlmClient::new(OpenAIClient::new(api_key), model)
            }
        };
        let ai: Arc<dyn BaseAI> = Arc::new(llm);

        let searcher: Option<Arc<dyn BaseSearchService>> = match &self.search {
            Some(settings) => {
                let client = BingSearchClient::new(&settings.subscription_key, &settings.endpoint)?
                    .with_market(&settings.market);
                Some(Arc::new(client) as Arc<dyn BaseSearchService>)
            }
            None => {
                warn!("BING_SEARCH_SUBSCRIPTION_KEY or BING_SEARCH_ENDPOINT not set; web search grounding will use placeholder text");
                None
            }
        };

        Ok(ServerDeps::new(ai, searcher).with_grounding(self.grounding.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    const AZURE: [(&str, &str); 2] = [
        ("AZURE_OPENAI_ENDPOINT", "https://writer.openai.azure.com"),
        ("AZURE_OPENAI_API_KEY", "azure-secret"),
    ];

    #[test]
    fn test_azure_defaults() {
        let config = config(&AZURE).unwrap();

        assert_eq!(
            config.model,
            ModelProvider::Azure {
                endpoint: "https://writer.openai.azure.com".to_string(),
                api_key: "azure-secret".to_string(),
                deployment: "gpt-4o".to_string(),
                api_version: "2024-10-21".to_string(),
            }
        );
        assert_eq!(config.port, 8000);
        assert_eq!(config.grounding.max_concurrent_searches, 1);
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert!(config.search.is_none());
    }

    #[test]
    fn test_openai_fallback() {
        let config = config(&[("OPENAI_API_KEY", "sk-test"), ("OPENAI_MODEL", "gpt-4o-mini")]).unwrap();

        assert_eq!(
            config.model,
            ModelProvider::OpenAi {
                api_key: "sk-test".to_string(),
                model: "gpt-4o-mini".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_model_credentials_is_error() {
        assert!(config(&[]).is_err());
        assert!(config(&[("AZURE_OPENAI_ENDPOINT", "https://x.openai.azure.com")]).is_err());
        assert!(config(&[("OPENAI_API_KEY", "   ")]).is_err());
    }

    #[test]
    fn test_search_needs_key_and_endpoint() {
        let mut vars = AZURE.to_vec();
        vars.push(("BING_SEARCH_SUBSCRIPTION_KEY", "bing-secret"));
        assert!(config(&vars).unwrap().search.is_none());

        vars.push(("BING_SEARCH_ENDPOINT", "https://api.bing.microsoft.com"));
        let search = config(&vars).unwrap().search.unwrap();
        assert_eq!(search.endpoint, "https://api.bing.microsoft.com");
        assert_eq!(search.market, "en-US");
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let mut vars = AZURE.to_vec();
        vars.push(("PORT", "eighty"));
        assert!(config(&vars).is_err());

        let mut vars = AZURE.to_vec();
        vars.push(("GROUNDING_MAX_CONCURRENCY", "0"));
        assert!(config(&vars).is_err());
    }

    #[test]
    fn test_allowed_origins_list() {
        let mut vars = AZURE.to_vec();
        vars.push(("ALLOWED_ORIGINS", "https://a.example, https://b.example,"));

        assert_eq!(
            config(&vars).unwrap().allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut vars = AZURE.to_vec();
        vars.push(("BING_SEARCH_SUBSCRIPTION_KEY", "bing-secret"));
        vars.push(("BING_SEARCH_ENDPOINT", "https://api.bing.microsoft.com"));

        let rendered = format!("{:?}", config(&vars).unwrap());

        assert!(!rendered.contains("azure-secret"));
        assert!(!rendered.contains("bing-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn test_build_deps_reports_search_mode() {
        let deps = config(&AZURE).unwrap().build_deps().unwrap();
        assert!(!deps.search_configured());

        let mut vars = AZURE.to_vec();
        vars.push(("BING_SEARCH_SUBSCRIPTION_KEY", "bing-secret"));
        vars.push(("BING_SEARCH_ENDPOINT", "https://api.bing.microsoft.com"));
        let deps = config(&vars).unwrap().build_deps().unwrap();
        assert!(deps.search_configured());
    }
}
