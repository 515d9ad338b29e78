//! HTTP client for the upstream GraphQL API

use async_trait::async_trait;
use calls_core::{
    CallsSource, Error, PageResult, Result,
    config::ListingConfig,
    graphql::{GraphqlResponse, PaginatedCallsData, paginated_calls_request},
    pagination::PageWindow,
};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::debug;

/// Client posting GraphQL documents to a single endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    graphql_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(graphql_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            graphql_url: graphql_url.into(),
            auth_token: None,
        }
    }

    /// Build a client from the `api` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_config(api: &calls_core::config::ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(api.request_timeout))
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            graphql_url: api.graphql_url.clone(),
            auth_token: api.auth_token.clone(),
        })
    }

    /// Endpoint requests are posted to
    #[must_use]
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    fn post<B: Serialize + ?Sized>(&self, body: &B) -> RequestBuilder {
        let request = self.client.post(&self.graphql_url).json(body);
        match self.auth_token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetch one page of calls
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a non-success
    /// status or GraphQL errors, or the payload cannot be decoded.
    pub async fn paginated_calls(&self, window: PageWindow) -> Result<Option<PageResult>> {
        debug!(offset = window.offset, limit = window.limit, "Querying paginated calls");

        let response = self
            .post(&paginated_calls_request(window))
            .send()
            .await
            .map_err(|e| Error::transport(format!("failed to fetch calls: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("failed to read response: {e}")))?;
        let payload: GraphqlResponse<PaginatedCallsData> = serde_json::from_str(&body)?;

        payload.into_page()
    }

    /// Forward a raw GraphQL body upstream, returning the status and JSON answer
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream cannot be reached or answers with
    /// something other than JSON.
    pub async fn forward(&self, body: &serde_json::Value) -> Result<(u16, serde_json::Value)> {
        let response = self
            .post(body)
            .send()
            .await
            .map_err(|e| Error::transport(format!("failed to reach GraphQL API: {e}")))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("failed to read response: {e}")))?;

        Ok((status, serde_json::from_str(&text)?))
    }
}

/// Fetch the listing section the server was configured with
///
/// # Errors
///
/// Returns an error if the request fails, the server answers with a
/// non-success status, or the section does not decode or validate.
pub async fn fetch_listing_config(url: &str) -> Result<ListingConfig> {
    let response = Client::new()
        .get(url)
        .send()
        .await
        .map_err(|e| Error::transport(format!("failed to fetch listing config: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::transport(format!("failed to read response: {e}")))?;
    let listing: ListingConfig = serde_json::from_str(&body)?;
    listing.ensure_valid()?;

    Ok(listing)
}

#[async_trait(?Send)]
impl CallsSource for ApiClient {
    async fn fetch_calls_page(&self, window: PageWindow) -> Result<Option<PageResult>> {
        self.paginated_calls(window).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    fn calls_payload() -> serde_json::Value {
        json!({
            "data": {
                "paginatedCalls": {
                    "totalCount": 12,
                    "hasNextPage": true,
                    "nodes": [{
                        "id": "c-1",
                        "direction": "inbound",
                        "call_type": "missed",
                        "from": "+33 6 00 00 00 01",
                        "to": "+33 1 00 00 00 02",
                        "duration": 65000,
                        "created_at": "2024-03-15T14:25:30Z",
                        "notes": [],
                        "is_archived": false,
                        "via": "+33 1 00 00 00 02"
                    }]
                }
            }
        })
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(format!("{}/graphql", server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_page_posts_window_variables() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "operationName": "paginatedCalls",
                "variables": { "offset": 10, "limit": 5 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(calls_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .fetch_calls_page(PageWindow::for_page(3, 5))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(page.total_count, 12);
        assert_eq!(page.nodes.len(), 1);
        assert_eq!(page.nodes[0].id, "c-1");
    }

    #[tokio::test]
    async fn test_auth_token_is_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(calls_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = calls_core::Config::default().api;
        api.graphql_url = format!("{}/graphql", server.uri());
        api.auth_token = Some("secret".to_string());

        let client = ApiClient::from_config(&api).unwrap();
        assert!(client.fetch_calls_page(PageWindow::for_page(1, 5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_calls_page(PageWindow::for_page(1, 5))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Status { status: 503 }));
    }

    #[tokio::test]
    async fn test_graphql_errors_surface_as_query_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "not authorized" }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_calls_page(PageWindow::for_page(1, 5))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Query { .. }));
        assert!(err.to_string().contains("not authorized"));
    }

    #[tokio::test]
    async fn test_missing_data_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "paginatedCalls": null } })),
            )
            .mount(&server)
            .await;

        let page = client_for(&server)
            .fetch_calls_page(PageWindow::for_page(1, 5))
            .await
            .unwrap();

        assert!(page.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_calls_page(PageWindow::for_page(1, 5))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_forward_passes_status_and_body_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "query": "{ ping }" })))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{ "message": "bad query" }]
            })))
            .mount(&server)
            .await;

        let (status, body) = client_for(&server)
            .forward(&json!({ "query": "{ ping }" }))
            .await
            .unwrap();

        assert_eq!(status, 400);
        assert_eq!(body["errors"][0]["message"], "bad query");
    }

    #[tokio::test]
    async fn test_fetch_listing_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/config/listing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "default_page_size": 10,
                "page_size_options": [10, 20]
            })))
            .mount(&server)
            .await;

        let listing = fetch_listing_config(&format!("{}/config/listing", server.uri()))
            .await
            .unwrap();

        assert_eq!(listing.default_page_size, 10);
        assert_eq!(listing.page_size_options, vec![10, 20]);
    }

    #[tokio::test]
    async fn test_invalid_listing_config_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "default_page_size": 7,
                "page_size_options": [5, 10]
            })))
            .mount(&server)
            .await;

        let err = fetch_listing_config(&format!("{}/config/listing", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_from_config_uses_configured_endpoint() {
        let mut api = calls_core::Config::default().api;
        api.graphql_url = "http://upstream.test/graphql".to_string();
        api.auth_token = Some("t".to_string());

        let client = ApiClient::from_config(&api).unwrap();
        assert_eq!(client.graphql_url(), "http://upstream.test/graphql");
        assert_eq!(client.auth_token.as_deref(), Some("t"));
    }
}
