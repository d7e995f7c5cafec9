use crate::domain::model::{ItemSummary, MovieDetails, Page, TitleQuery};
use crate::domain::ports::{Catalogue, ConfigProvider};
use crate::utils::error::{CatalogueError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SORT_FIELD: &str = "imdb_score";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// `Catalogue` over the REST titles endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogue {
    client: Client,
    base_url: Url,
    sort_field: String,
    page_size: Option<u32>,
}

impl HttpCatalogue {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let catalogue = Self::build(config.base_url(), config.timeout_seconds())?
            .with_sort_field(config.sort_field())
            .with_page_size(config.page_size());
        Ok(catalogue)
    }

    fn build(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CatalogueError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            page_size: None,
        })
    }

    pub fn with_sort_field(mut self, sort_field: &str) -> Self {
        self.sort_field = sort_field.to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn collection_url(&self, query: &TitleQuery) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("sort_by", &format!("-{}", self.sort_field));
            if let Some(genre) = &query.genre {
                pairs.append_pair("genre", genre);
            }
            if let Some(title) = &query.title_contains {
                pairs.append_pair("title_icontains", title);
            }
            if let Some(page) = query.page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(page_size) = query.page_size.or(self.page_size) {
                pairs.append_pair("page_size", &page_size.to_string());
            }
        }
        url
    }

    pub fn details_url(&self, id: u64) -> Result<Url> {
        self.base_url
            .join(&id.to_string())
            .map_err(|e| CatalogueError::ConfigValidationError {
                field: "api.base_url".to_string(),
                message: format!("cannot build details URL for {}: {}", id, e),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Catalogue response status: {}", status);

        if !status.is_success() {
            return Err(CatalogueError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Catalogue for HttpCatalogue {
    async fn titles(&self, query: &TitleQuery) -> Result<Page<ItemSummary>> {
        let url = self.collection_url(query);
        self.get_json(url.as_str()).await
    }

    async fn follow(&self, page_url: &str) -> Result<Page<ItemSummary>> {
        self.get_json(page_url).await
    }

    async fn details(&self, id: u64) -> Result<MovieDetails> {
        let url = self.details_url(id)?;
        self.get_json(url.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn titles_page(ids: &[u64]) -> serde_json::Value {
        let results: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "title": format!("Movie {}", id),
                    "image_url": format!("https://img.example/{}.jpg", id),
                    "url": format!("http://localhost:8000/api/v1/titles/{}", id),
                    "imdb_score": "8.0",
                    "year": 1999
                })
            })
            .collect();

        serde_json::json!({
            "count": ids.len(),
            "next": null,
            "previous": null,
            "results": results
        })
    }

    #[test]
    fn test_collection_url_omits_empty_genre() {
        let catalogue = HttpCatalogue::new("http://localhost:8000/api/v1/titles/").unwrap();

        let unfiltered = catalogue.collection_url(&TitleQuery::genre(""));
        let romance = catalogue.collection_url(&TitleQuery::genre("Romance"));

        assert_eq!(
            unfiltered.as_str(),
            "http://localhost:8000/api/v1/titles/?sort_by=-imdb_score"
        );
        assert_eq!(
            romance.as_str(),
            "http://localhost:8000/api/v1/titles/?sort_by=-imdb_score&genre=Romance"
        );
    }

    #[test]
    fn test_collection_url_encodes_search_and_page_size() {
        let catalogue = HttpCatalogue::new("http://localhost:8000/api/v1/titles/")
            .unwrap()
            .with_page_size(Some(7));

        let url = catalogue.collection_url(&TitleQuery::search("la vie", 2));

        assert_eq!(
            url.as_str(),
            concat!(
                "http://localhost:8000/api/v1/titles/",
                "?sort_by=-imdb_score&title_icontains=la+vie&page=2&page_size=7"
            )
        );
    }

    #[test]
    fn test_details_url_appends_id() {
        let catalogue = HttpCatalogue::new("http://localhost:8000/api/v1/titles/").unwrap();

        assert_eq!(
            catalogue.details_url(1508669).unwrap().as_str(),
            "http://localhost:8000/api/v1/titles/1508669"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = HttpCatalogue::new("not a url").unwrap_err();
        assert!(matches!(err, CatalogueError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_titles_sends_sort_and_genre() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/titles/")
                .query_param("sort_by", "-imdb_score")
                .query_param("genre", "Sci-Fi");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(titles_page(&[1, 2, 3]));
        });

        let catalogue = HttpCatalogue::new(&server.url("/api/v1/titles/")).unwrap();
        let page = catalogue.titles(&TitleQuery::genre("Sci-Fi")).await.unwrap();

        api_mock.assert();
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].title, "Movie 1");
        assert!(page.next_page_url().is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_status_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/titles/");
            then.status(503);
        });

        let catalogue = HttpCatalogue::new(&server.url("/api/v1/titles/")).unwrap();
        let err = catalogue.titles(&TitleQuery::genre("")).await.unwrap_err();

        api_mock.assert();
        match err {
            CatalogueError::HttpStatus { status, url } => {
                assert_eq!(status, 503);
                assert!(url.contains("sort_by=-imdb_score"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/titles/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"id": 1}]));
        });

        let catalogue = HttpCatalogue::new(&server.url("/api/v1/titles/")).unwrap();
        let err = catalogue.titles(&TitleQuery::genre("")).await.unwrap_err();

        assert!(matches!(err, CatalogueError::Decode(_)));
    }

    #[tokio::test]
    async fn test_details_fetches_by_id() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/titles/42");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": 42,
                    "title": "The Answer",
                    "imdb_score": "9.1",
                    "year": 1979,
                    "duration": 112,
                    "genres": ["Sci-Fi", "Comedy"],
                    "rated": 12
                }));
        });

        let catalogue = HttpCatalogue::new(&server.url("/api/v1/titles/")).unwrap();
        let details = catalogue.details(42).await.unwrap();

        api_mock.assert();
        assert_eq!(details.title, "The Answer");
        assert_eq!(details.genres, vec!["Sci-Fi", "Comedy"]);
        assert_eq!(details.score, 9.1);
    }
}
