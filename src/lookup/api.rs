//! Remote API version source
//!
//! Queries the v2 version endpoint of the documentation API.

use super::VersionSource;
use crate::{
    Error, Result,
    config::ApiSettings,
    types::{ApiPage, ApiVersion, Version},
};
use async_trait::async_trait;
use reqwest::{Client, header};
use std::collections::HashSet;
use url::Url;

const VERSION_ENDPOINT: &str = "api/v2/version/";

/// Upper bound on pages followed by a single listing
const MAX_PAGES: usize = 100;

/// Version source backed by the remote API
#[derive(Debug, Clone)]
pub struct ApiVersionSource {
    /// HTTP client
    client: Client,
    /// Base URL of the API host
    base_url: Url,
}

impl ApiVersionSource {
    /// Create a new API version source
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &settings.token {
            let value = header::HeaderValue::from_str(&format!("Token {}", token))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(concat!("docsite-projects/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout())
            .default_headers(headers)
            .build()?;

        Self::with_client(client, &settings.base_url)
    }

    /// Create a source around an existing client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    fn version_url(&self, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.join(VERSION_ENDPOINT)?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    /// Resolve a `next` link; it must stay on the configured host
    fn next_page_url(&self, raw: &str) -> Result<Url> {
        let url = Url::parse(raw)?;
        if url.origin() != self.base_url.origin() {
            return Err(Error::upstream(format!(
                "next page {} is outside {}",
                url, self.base_url
            )));
        }
        Ok(url)
    }

    async fn fetch_page(&self, url: Url) -> Result<ApiPage<ApiVersion>> {
        tracing::debug!("GET {}", url);
        let page = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<ApiPage<ApiVersion>>()
            .await?;
        Ok(page)
    }
}

#[async_trait]
impl VersionSource for ApiVersionSource {
    async fn version_from_slug(&self, project: &str, version: &str) -> Result<Version> {
        let url = self.version_url(&[("project", project), ("slug", version)])?;
        let page = self.fetch_page(url).await?;

        let first = page
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(project, version))?;

        tracing::debug!("Resolved {}/{} via API (id={})", project, version, first.id);
        Ok(first.into())
    }

    async fn list_versions(&self, project: &str) -> Result<Vec<Version>> {
        let mut versions = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.version_url(&[("project", project)])?);

        while let Some(url) = next.take() {
            if visited.len() >= MAX_PAGES {
                return Err(Error::upstream(format!(
                    "more than {} pages of versions for {}",
                    MAX_PAGES, project
                )));
            }
            if !visited.insert(url.clone()) {
                return Err(Error::upstream(format!("pagination loops back to {}", url)));
            }

            let page = self.fetch_page(url).await?;
            versions.extend(page.results.into_iter().map(Version::from));
            next = page
                .next
                .as_deref()
                .map(|raw| self.next_page_url(raw))
                .transpose()?;
        }

        versions.sort_by_key(|v| v.id);
        tracing::debug!("Listed {} versions of {} via API", versions.len(), project);
        Ok(versions)
    }

    fn name(&self) -> &'static str {
        "api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VersionType;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn version_json(id: i64, slug: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "project": {"id": 1, "slug": "pip"},
            "slug": slug,
            "verbose_name": slug,
            "identifier": format!("refs/{}", slug),
            "type": "branch",
            "active": true,
            "built": true,
            "privacy_level": "public"
        })
    }

    fn create_test_source(uri: &str) -> ApiVersionSource {
        let settings = ApiSettings {
            base_url: uri.to_string(),
            token: Some("secret".to_string()),
            timeout_secs: 5,
        };
        ApiVersionSource::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn test_version_from_slug_takes_first_result() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/version/"))
            .and(query_param("project", "pip"))
            .and(query_param("slug", "latest"))
            .and(header("authorization", "Token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [version_json(10, "latest"), version_json(11, "latest")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server.uri());
        let version = source.version_from_slug("pip", "latest").await.unwrap();

        assert_eq!(version.id, 10);
        assert_eq!(version.project, "pip");
        assert_eq!(version.identifier, "refs/latest");
        assert_eq!(version.version_type, VersionType::Branch);
    }

    #[tokio::test]
    async fn test_version_from_slug_empty_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/version/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 0,
                "results": []
            })))
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server.uri());
        let err = source.version_from_slug("pip", "missing").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_version_from_slug_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/version/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server.uri());
        let err = source.version_from_slug("pip", "latest").await.unwrap_err();

        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_list_versions_follows_pagination() {
        let mock_server = MockServer::start().await;
        let next = format!("{}/api/v2/version/?project=pip&page=2", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v2/version/"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 3,
                "next": null,
                "results": [version_json(3, "v2.0")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/version/"))
            .and(query_param("project", "pip"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 3,
                "next": next,
                "results": [version_json(2, "stable"), version_json(1, "latest")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server.uri());
        let versions = source.list_versions("pip").await.unwrap();

        let slugs: Vec<_> = versions.iter().map(|v| v.slug.as_str()).collect();
        assert_eq!(slugs, vec!["latest", "stable", "v2.0"]);
    }

    #[tokio::test]
    async fn test_list_versions_stops_on_cyclic_next() {
        let mock_server = MockServer::start().await;
        let same_page = format!("{}/api/v2/version/?project=pip", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v2/version/"))
            .and(query_param("project", "pip"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "next": same_page,
                "results": [version_json(1, "latest")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server.uri());
        let err = source.list_versions("pip").await.unwrap_err();

        assert!(matches!(err, Error::Upstream(_)));
        assert!(err.to_string().contains("loops back"));
    }

    #[tokio::test]
    async fn test_list_versions_rejects_foreign_next() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/version/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "next": "http://elsewhere.invalid/api/v2/version/?project=pip&page=2",
                "results": [version_json(1, "latest")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server.uri());
        let err = source.list_versions("pip").await.unwrap_err();

        assert!(matches!(err, Error::Upstream(_)));
        assert!(err.to_string().contains("elsewhere.invalid"));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let source =
            ApiVersionSource::with_client(Client::new(), "https://example.com/internal").unwrap();
        let url = source.version_url(&[("project", "pip")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/internal/api/v2/version/?project=pip"
        );
    }
}
