use crate::core::{ConfigProvider, Movie, MovieSource};
use crate::domain::model::{OmdbEnvelope, SearchPage};
use crate::utils::error::{Result, ShoppiesError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://www.omdbapi.com/";

/// OMDb client: `?s=` for title search and `?i=` for id lookup.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl OmdbClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.api_endpoint(),
            config.api_key(),
            config.request_timeout(),
        )
    }

    async fn fetch<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        // The key goes in the query string, so the full URL is never logged
        tracing::debug!("Making OMDb request to {} with {:?}", self.endpoint, params);

        let response = self
            .client
            .get(&self.endpoint)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("OMDb response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            // OMDb reports a bad key as 401 with a regular JSON error body
            if let Some(message) = api_error_message(&body) {
                return Err(ShoppiesError::ApiError { message });
            }
            return Err(ShoppiesError::HttpStatusError {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let envelope: OmdbEnvelope<T> = serde_json::from_str(&body)?;
        if !envelope.is_success() {
            return Err(ShoppiesError::ApiError {
                message: envelope
                    .error
                    .unwrap_or_else(|| "Unknown error from the movie database".to_string()),
            });
        }

        envelope.body.ok_or_else(|| ShoppiesError::ApiError {
            message: "Malformed response from the movie database".to_string(),
        })
    }
}

fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("Error")?.as_str().map(str::to_string)
}

#[async_trait]
impl MovieSource for OmdbClient {
    async fn search_by_title(&self, term: &str) -> Result<Vec<Movie>> {
        let page: SearchPage = self.fetch(&[("s", term)]).await?;
        tracing::info!(
            "🔍 '{}': {} of {} results",
            term,
            page.search.len(),
            page.total_results.as_deref().unwrap_or("?")
        );
        Ok(page.search)
    }

    async fn lookup_by_id(&self, imdb_id: &str) -> Result<Movie> {
        let movie: Movie = self.fetch(&[("i", imdb_id)]).await?;
        tracing::debug!("Looked up {} -> {}", imdb_id, movie.title);
        Ok(movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> OmdbClient {
        OmdbClient::new(server.url("/"), "test-key", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_search_by_title_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/")
                .query_param("s", "Batman")
                .query_param("apikey", "test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "Search": [
                        {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://img/1.jpg"},
                        {"Title": "Batman", "Year": "1989", "imdbID": "tt0096895", "Type": "movie", "Poster": "N/A"}
                    ],
                    "totalResults": "2",
                    "Response": "True"
                }));
        });

        let movies = client(&server).search_by_title("Batman").await.unwrap();

        api_mock.assert();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].imdb_id, "tt0372784");
        assert_eq!(movies[1].poster, None);
    }

    #[tokio::test]
    async fn test_search_not_found_returns_api_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/").query_param("s", "zzzzzz");
            then.status(200).json_body(serde_json::json!({
                "Response": "False",
                "Error": "Movie not found!"
            }));
        });

        let err = client(&server).search_by_title("zzzzzz").await.unwrap_err();
        assert!(matches!(err, ShoppiesError::ApiError { ref message } if message == "Movie not found!"));
    }

    #[tokio::test]
    async fn test_lookup_by_id_ignores_extra_fields() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/").query_param("i", "tt0468569");
            then.status(200).json_body(serde_json::json!({
                "Title": "The Dark Knight",
                "Year": "2008",
                "Rated": "PG-13",
                "Director": "Christopher Nolan",
                "Ratings": [{"Source": "Internet Movie Database", "Value": "9.0/10"}],
                "Poster": "https://img/dk.jpg",
                "imdbID": "tt0468569",
                "Type": "movie",
                "Response": "True"
            }));
        });

        let movie = client(&server).lookup_by_id("tt0468569").await.unwrap();

        api_mock.assert();
        assert_eq!(movie.title, "The Dark Knight");
        assert_eq!(movie.year, "2008");
        assert_eq!(movie.poster.as_deref(), Some("https://img/dk.jpg"));
    }

    #[tokio::test]
    async fn test_invalid_key_is_reported_as_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(401).json_body(serde_json::json!({
                "Response": "False",
                "Error": "Invalid API key!"
            }));
        });

        let err = client(&server).lookup_by_id("tt1").await.unwrap_err();
        assert!(matches!(err, ShoppiesError::ApiError { ref message } if message == "Invalid API key!"));
    }

    #[tokio::test]
    async fn test_server_error_without_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(503);
        });

        let err = client(&server).search_by_title("Up").await.unwrap_err();
        match err {
            ShoppiesError::HttpStatusError { status, url } => {
                assert_eq!(status, 503);
                assert!(!url.contains("test-key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_keeps_key_out_of_errors() {
        let client = OmdbClient::new("http://127.0.0.1:9/", "SECRETKEY123", Duration::from_secs(2));

        let err = client.lookup_by_id("tt1").await.unwrap_err();
        assert!(matches!(err, ShoppiesError::HttpError(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
        assert!(!format!("{err:?}").contains("SECRETKEY123"));

        let wrapped = ShoppiesError::RestoreError {
            source: Box::new(err),
        };
        assert!(!wrapped.to_string().contains("SECRETKEY123"));
        assert!(!wrapped.user_friendly_message().contains("SECRETKEY123"));
    }
}
