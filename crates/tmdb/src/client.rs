use std::time::Duration;

use reqwest::Client;

use crate::error::TmdbError;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_LANGUAGE: &str = "en-US";

pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    pub(crate) lang: String,
}

impl TmdbClient {
    /// Create a TmdbClient on top of an existing reqwest Client.
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            lang: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Build a dedicated reqwest Client with the given request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TmdbError::HttpClient(e.to_string()))?;
        Ok(Self::new(client, api_key))
    }

    /// Override the response language (ISO 639-1 with region, e.g. `fr-FR`).
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Point the client at another API root, e.g. a caching proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: status_message(&body),
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| TmdbError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

/// TMDB error bodies look like `{"status_code": 34, "status_message": "..."}`.
fn status_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("status_message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let client =
            TmdbClient::new(Client::new(), "key").with_base_url("http://localhost:9000/3/");
        assert_eq!(client.url("/movie/603"), "http://localhost:9000/3/movie/603");
    }

    #[test]
    fn test_status_message_extracted_from_error_body() {
        let body = r#"{"success":false,"status_code":34,"status_message":"The resource you requested could not be found."}"#;
        assert_eq!(
            status_message(body),
            "The resource you requested could not be found."
        );
        assert_eq!(status_message("gateway timeout"), "gateway timeout");
    }
}
