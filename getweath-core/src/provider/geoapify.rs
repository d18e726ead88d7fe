use reqwest::Client;
use serde::Deserialize;

pub(crate) const GEOAPIFY_BASE_URL: &str = "https://api.geoapify.com/v1/geocode/autocomplete";

/// Client for the Geoapify autocomplete endpoint.
///
/// Autocomplete is best-effort: every failure degrades to an empty candidate
/// list and is logged at debug level, never surfaced to the user.
#[derive(Debug, Clone)]
pub struct GeoapifyClient {
    base_url: String,
    api_key: String,
}

impl GeoapifyClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(GEOAPIFY_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: String) -> Self {
        Self { base_url: base_url.into(), api_key }
    }

    /// Formatted place names matching `text`.
    pub async fn autocomplete(&self, http: &Client, text: &str) -> Vec<String> {
        let res = match http
            .get(&self.base_url)
            .query(&[("text", text), ("apiKey", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::debug!(%err, "autocomplete request failed");
                return Vec::new();
            }
        };

        if !res.status().is_success() {
            tracing::debug!(status = %res.status(), "autocomplete returned non-success");
            return Vec::new();
        }

        let body: GeoapifyResponse = match res.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(%err, "autocomplete payload did not parse");
                return Vec::new();
            }
        };

        body.features
            .into_iter()
            .filter_map(|feature| feature.properties.and_then(|p| p.formatted))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct GeoapifyResponse {
    #[serde(default)]
    features: Vec<GeoapifyFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoapifyFeature {
    properties: Option<GeoapifyProperties>,
}

#[derive(Debug, Deserialize)]
struct GeoapifyProperties {
    formatted: Option<String>,
}
