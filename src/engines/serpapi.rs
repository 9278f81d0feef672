//! SerpApi Google search engine implementation

use super::traits::*;
use crate::config::ProviderSettings;
use crate::results::RawResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;
use tracing::debug;

/// Error text SerpApi uses when Google simply had nothing to return
const NO_RESULTS_ERROR: &str = "hasn't returned any results for this query";

/// Google results through the SerpApi JSON API
pub struct SerpApi {
    base_url: String,
    engine: String,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<RawResult>,
    #[serde(default)]
    error: Option<String>,
}

impl SerpApi {
    pub fn new() -> Self {
        Self::with_settings(&ProviderSettings::default())
    }

    pub fn with_settings(settings: &ProviderSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            engine: settings.engine.clone(),
        }
    }

    /// Point the engine at another endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for SerpApi {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for SerpApi {
    fn name(&self) -> &str {
        "serpapi"
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<EngineRequest> {
        if params.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("SerpApi requires an API key"));
        }

        let num = if params.num == 0 {
            self.results_per_page()
        } else {
            params.num
        };

        Ok(EngineRequest::get(&self.base_url)
            .header("Accept", "application/json")
            .param("engine", &self.engine)
            .param("q", &params.query)
            .param("num", num.to_string())
            .param("api_key", &params.api_key))
    }

    fn response(&self, response: EngineResponse) -> AnyhowResult<Vec<RawResult>> {
        if !response.is_success() {
            // SerpApi explains most failures in an `error` field
            let message = response
                .json::<SerpApiResponse>()
                .ok()
                .and_then(|body| body.error);
            debug!("SerpApi returned {}: {:?}", response.status, message);
            return Err(ResponseError::Status {
                code: response.status,
                message,
            }
            .into());
        }

        let body: SerpApiResponse = response.json()?;

        if let Some(message) = body.error {
            if message.contains(NO_RESULTS_ERROR) {
                return Ok(Vec::new());
            }
            return Err(ResponseError::Provider(message).into());
        }

        Ok(body.organic_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_response(text: &str) -> EngineResponse {
        EngineResponse {
            status: 200,
            text: text.to_string(),
            url: "https://serpapi.com/search.json".to_string(),
        }
    }

    #[test]
    fn test_serpapi_request() {
        let engine = SerpApi::new();
        let params = RequestParams::new("site:linkedin.com/in/ \"PM\"", "secret").with_num(20);
        let request = engine.request(&params).unwrap();

        assert!(request.url.contains("serpapi.com"));
        assert!(request.params.contains(&("engine".to_string(), "google".to_string())));
        assert!(request.params.contains(&("num".to_string(), "20".to_string())));
        assert!(request.params.contains(&("api_key".to_string(), "secret".to_string())));
    }

    #[test]
    fn test_request_without_key_fails() {
        let engine = SerpApi::new();
        assert!(engine.request(&RequestParams::new("q", " ")).is_err());
    }

    #[test]
    fn test_parse_organic_results() {
        let engine = SerpApi::new();
        let results = engine
            .response(ok_response(
                r#"{
                    "search_metadata": {"status": "Success"},
                    "organic_results": [
                        {"position": 1, "title": "Jane Doe - Product Manager - Google", "link": "https://www.linkedin.com/in/janedoe", "snippet": "Started August 2025"},
                        {"position": 2, "link": "https://www.linkedin.com/in/nosnippet"}
                    ]
                }"#,
            ))
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title(), "Jane Doe - Product Manager - Google");
        assert_eq!(results[1].snippet(), "N/A");
    }

    #[test]
    fn test_missing_organic_results_is_empty() {
        let engine = SerpApi::new();
        let results = engine.response(ok_response(r#"{"search_metadata": {}}"#)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_no_results_error_is_empty() {
        let engine = SerpApi::new();
        let results = engine
            .response(ok_response(
                r#"{"error": "Google hasn't returned any results for this query."}"#,
            ))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_provider_error() {
        let engine = SerpApi::new();
        let err = engine
            .response(ok_response(r#"{"error": "Your account has run out of searches."}"#))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResponseError>(),
            Some(ResponseError::Provider(_))
        ));
    }

    #[test]
    fn test_http_error_status() {
        let engine = SerpApi::new();
        let err = engine
            .response(EngineResponse {
                status: 401,
                text: r#"{"error": "Invalid API key."}"#.to_string(),
                url: String::new(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResponseError>(),
            Some(ResponseError::Status { code: 401, message: Some(m) }) if m == "Invalid API key."
        ));
    }

    #[test]
    fn test_http_error_without_json_body() {
        let engine = SerpApi::new();
        let err = engine
            .response(EngineResponse {
                status: 502,
                text: "<html>Bad Gateway</html>".to_string(),
                url: String::new(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResponseError>(),
            Some(ResponseError::Status { code: 502, message: None })
        ));
    }
}
