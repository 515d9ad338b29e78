//! GraphQL query text and envelopes for the paginated calls query

use crate::{pagination::PageWindow, types::PageResult};
use serde::{Deserialize, Serialize};

/// Operation name sent alongside [`PAGINATED_CALLS`]
pub const PAGINATED_CALLS_OPERATION: &str = "paginatedCalls";

/// Query fetching one page of calls
pub const PAGINATED_CALLS: &str = r"query paginatedCalls($offset: Float = 0, $limit: Float = 10) {
  paginatedCalls(offset: $offset, limit: $limit) {
    nodes {
      id
      direction
      from
      to
      duration
      is_archived
      call_type
      via
      created_at
      notes {
        id
        content
      }
    }
    totalCount
    hasNextPage
  }
}";

/// Request body posted to the GraphQL endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<V> {
    /// Query document
    pub query: &'static str,
    /// Operation to run
    pub operation_name: &'static str,
    /// Query variables
    pub variables: V,
}

/// Variables of [`PAGINATED_CALLS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedCallsVariables {
    /// Records to skip
    pub offset: u64,
    /// Records to return
    pub limit: u32,
}

impl From<PageWindow> for PaginatedCallsVariables {
    fn from(window: PageWindow) -> Self {
        Self {
            offset: window.offset,
            limit: window.limit,
        }
    }
}

/// Build the request for one page of calls
#[must_use]
pub fn paginated_calls_request(window: PageWindow) -> GraphqlRequest<PaginatedCallsVariables> {
    GraphqlRequest {
        query: PAGINATED_CALLS,
        operation_name: PAGINATED_CALLS_OPERATION,
        variables: window.into(),
    }
}

/// A single entry of the `errors` array
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GraphqlError {
    /// Human readable message
    pub message: String,
}

/// Standard GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<D> {
    /// Query result, absent when execution failed
    pub data: Option<D>,
    /// Execution errors
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// `data` payload of [`PAGINATED_CALLS`]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedCallsData {
    /// The fetched page
    pub paginated_calls: Option<PageResult>,
}

impl GraphqlResponse<PaginatedCallsData> {
    /// Reduce the envelope to the page it carries
    ///
    /// `Ok(None)` means the query succeeded but returned no data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Query`] when the response lists errors.
    pub fn into_page(self) -> crate::Result<Option<PageResult>> {
        if !self.errors.is_empty() {
            return Err(crate::Error::Query {
                messages: self.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        Ok(self.data.and_then(|data| data.paginated_calls))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(paginated_calls_request(PageWindow::for_page(3, 5))).unwrap();

        assert_eq!(body["operationName"], "paginatedCalls");
        assert_eq!(body["variables"]["offset"], 10);
        assert_eq!(body["variables"]["limit"], 5);
        assert!(body["query"].as_str().unwrap().contains("paginatedCalls(offset: $offset"));
    }

    #[test]
    fn test_into_page_with_data() {
        let json = r#"{"data": {"paginatedCalls": {"totalCount": 0, "nodes": [], "hasNextPage": false}}}"#;
        let response: GraphqlResponse<PaginatedCallsData> = serde_json::from_str(json).unwrap();

        let page = response.into_page().unwrap().unwrap();
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_into_page_null_data() {
        let response: GraphqlResponse<PaginatedCallsData> =
            serde_json::from_str(r#"{"data": null}"#).unwrap();

        assert!(response.into_page().unwrap().is_none());
    }

    #[test]
    fn test_into_page_errors_win_over_data() {
        let json = r#"{
            "data": {"paginatedCalls": null},
            "errors": [{"message": "Unauthorized", "path": ["paginatedCalls"]}]
        }"#;
        let response: GraphqlResponse<PaginatedCallsData> = serde_json::from_str(json).unwrap();

        match response.into_page() {
            Err(crate::Error::Query { messages }) => assert_eq!(messages, vec!["Unauthorized"]),
            other => panic!("expected query error, got {other:?}"),
        }
    }
}
