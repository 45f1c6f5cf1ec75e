// Workspace queries.
// Typed wrappers around the GraphQL documents jobdeck issues.

use crate::error::Result;

use super::client::GraphQlClient;
use super::types::{OverviewJobsQuery, WorkspaceOrError};

pub const OVERVIEW_JOBS_OPERATION: &str = "OverviewJobsQuery";

pub const OVERVIEW_JOBS_QUERY: &str = r#"
query OverviewJobsQuery {
  workspaceOrError {
    __typename
    ... on Workspace {
      locationEntries {
        id
        name
        locationOrLoadError {
          __typename
          ... on RepositoryLocation {
            id
            name
            repositories {
              id
              name
              pipelines {
                id
                name
                isJob
              }
            }
          }
          ...PythonErrorFragment
        }
      }
    }
    ...PythonErrorFragment
  }
}

fragment PythonErrorFragment on PythonError {
  __typename
  message
  stack
}
"#;

impl GraphQlClient {
    /// Fetch the workspace snapshot used by the jobs overview.
    pub async fn fetch_overview_jobs(&self) -> Result<WorkspaceOrError> {
        let data: OverviewJobsQuery = self
            .post_query(OVERVIEW_JOBS_QUERY, OVERVIEW_JOBS_OPERATION)
            .await?;
        Ok(data.workspace_or_error)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::graphql::LocationOrLoadError;

    #[tokio::test]
    async fn test_fetch_overview_jobs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({"operationName": OVERVIEW_JOBS_OPERATION})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "workspaceOrError": {
                        "__typename": "Workspace",
                        "locationEntries": [{
                            "id": "L1",
                            "name": "L1",
                            "locationOrLoadError": {
                                "__typename": "RepositoryLocation",
                                "id": "L1",
                                "name": "L1",
                                "repositories": [{
                                    "id": "R1",
                                    "name": "R1",
                                    "pipelines": [
                                        {"id": "p1", "name": "job_a", "isJob": true},
                                        {"id": "p2", "name": "__ASSET_JOB_0", "isJob": true}
                                    ]
                                }]
                            }
                        }]
                    }
                }
            })))
            .mount(&server)
            .await;

        let client =
            GraphQlClient::new(&format!("{}/graphql", server.uri()), Duration::from_secs(5))
                .unwrap();
        let snapshot = client.fetch_overview_jobs().await.unwrap();

        let WorkspaceOrError::Workspace(workspace) = snapshot else {
            panic!("expected workspace");
        };
        let Some(LocationOrLoadError::RepositoryLocation(location)) =
            &workspace.location_entries[0].location_or_load_error
        else {
            panic!("expected loaded location");
        };
        assert_eq!(location.repositories[0].pipelines.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_overview_jobs_workspace_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "workspaceOrError": {"__typename": "PythonError", "message": "no workspace"}
                }
            })))
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let snapshot = client.fetch_overview_jobs().await.unwrap();
        assert!(matches!(
            snapshot,
            WorkspaceOrError::PythonError(ref error) if error.message == "no workspace"
        ));
    }
}
