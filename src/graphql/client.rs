// GraphQL HTTP client.
// Handles request headers, status checking, and the GraphQL response envelope.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

use crate::error::{JobdeckError, Result};

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// GraphQL client bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    /// Create a new client for the given endpoint URL.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("jobdeck"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(JobdeckError::Request)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST a parameterless query and decode its `data` payload.
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        query: &str,
        operation_name: &str,
    ) -> Result<T> {
        let body = json!({
            "operationName": operation_name,
            "query": query,
            "variables": {},
        });

        tracing::debug!(endpoint = %self.endpoint, operation_name, "posting GraphQL query");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(JobdeckError::Request)?;

        let response = check_response(response).await?;
        let text = response.text().await?;
        decode_envelope(&text)
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err(JobdeckError::NotFound(response.url().to_string())),
        status => Err(JobdeckError::Http {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}

/// Decode a GraphQL envelope. Data wins over errors when both are present.
fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(text)?;
    match envelope.data {
        Some(data) => {
            for error in &envelope.errors {
                tracing::warn!(message = %error.message, "GraphQL response carried a partial error");
            }
            Ok(data)
        }
        None if !envelope.errors.is_empty() => Err(JobdeckError::GraphQl(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        )),
        None => Err(JobdeckError::EmptyResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        ok: bool,
    }

    #[test]
    fn test_decode_data() {
        let ping: Ping = decode_envelope(r#"{"data": {"ok": true}}"#).unwrap();
        assert_eq!(ping, Ping { ok: true });
    }

    #[test]
    fn test_decode_errors_without_data() {
        let err = decode_envelope::<Ping>(
            r#"{"data": null, "errors": [{"message": "boom"}, {"message": "bang"}]}"#,
        )
        .unwrap_err();
        match err {
            JobdeckError::GraphQl(messages) => assert_eq!(messages, vec!["boom", "bang"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_partial_errors_keep_data() {
        let ping: Ping =
            decode_envelope(r#"{"data": {"ok": false}, "errors": [{"message": "meh"}]}"#)
                .unwrap();
        assert!(!ping.ok);
    }

    #[test]
    fn test_decode_empty() {
        let err = decode_envelope::<Ping>("{}").unwrap_err();
        assert!(matches!(err, JobdeckError::EmptyResponse));
    }

    fn client_for(server: &MockServer) -> GraphQlClient {
        GraphQlClient::new(&format!("{}/graphql", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_post_query_decodes_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({"operationName": "Ping"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
            .mount(&server)
            .await;

        let ping: Ping = client_for(&server)
            .post_query("query Ping { ok }", "Ping")
            .await
            .unwrap();
        assert_eq!(ping, Ping { ok: true });
    }

    #[tokio::test]
    async fn test_post_query_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .post_query::<Ping>("query Ping { ok }", "Ping")
            .await
            .unwrap_err();
        match err {
            JobdeckError::NotFound(url) => assert_eq!(url, format!("{}/graphql", server.uri())),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_post_query_http_error_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .post_query::<Ping>("query Ping { ok }", "Ping")
            .await
            .unwrap_err();
        match err {
            JobdeckError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_client_keeps_endpoint() {
        let client =
            GraphQlClient::new("http://localhost:3000/graphql", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000/graphql");
    }
}
