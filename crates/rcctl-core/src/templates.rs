//! Template reads and the raw rollback call.

use rcctl_proto::{ConfigTemplate, ListVersionsResult, ProjectId, VersionNumber};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::api::{ApiClient, ApiRequest, DEFAULT_ORIGIN, DEFAULT_TIMEOUT, Method};
use crate::error::{ApiError, TemplateError};

/// Number of versions listed when the caller gives no limit.
pub const DEFAULT_VERSION_LIMIT: u32 = 10;

/// Largest page the service accepts; used when the caller asks for all versions.
const MAX_PAGE_SIZE: u32 = 300;

/// Remote Config template endpoints for one API origin.
#[derive(Clone)]
pub struct TemplateService {
    client: Arc<dyn ApiClient>,
    origin: String,
    timeout: Duration,
}

impl TemplateService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client,
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn request(&self, method: Method, path: String) -> ApiRequest {
        ApiRequest::new(method, path)
            .authenticated()
            .origin(self.origin.clone())
            .timeout(self.timeout)
    }

    /// Fetches the current template, or a specific historical version.
    pub async fn get_template(
        &self,
        project_id: &ProjectId,
        version_number: Option<VersionNumber>,
    ) -> Result<ConfigTemplate, TemplateError> {
        let mut request = self.request(
            Method::Get,
            format!("/v1/projects/{project_id}/remoteConfig"),
        );
        if let Some(version) = version_number {
            request = request.query("versionNumber", version);
        }

        self.client
            .request(request)
            .await
            .and_then(|response| response.json::<ConfigTemplate>())
            .map_err(|source| TemplateError::Get {
                project_id: project_id.clone(),
                source,
            })
    }

    /// Lists published versions, newest first.
    ///
    /// `limit == 0` asks for every version the service will return in one page.
    pub async fn list_versions(
        &self,
        project_id: &ProjectId,
        limit: u32,
    ) -> Result<ListVersionsResult, TemplateError> {
        let page_size = if limit == 0 { MAX_PAGE_SIZE } else { limit };
        let request = self
            .request(
                Method::Get,
                format!("/v1/projects/{project_id}/remoteConfig:listVersions"),
            )
            .query("pageSize", page_size);

        let listed = self
            .client
            .request(request)
            .await
            .and_then(|response| response.json::<ListVersionsResult>())
            .map_err(|source| TemplateError::ListVersions {
                project_id: project_id.clone(),
                source,
            })?;
        debug!(project = %project_id, count = listed.versions.len(), "Listed template versions");
        Ok(listed)
    }

    /// Issues the rollback call. The version is sent as a query parameter with
    /// an empty body; the response is the new current template.
    pub(crate) async fn post_rollback(
        &self,
        project_id: &ProjectId,
        version_number: VersionNumber,
    ) -> Result<ConfigTemplate, ApiError> {
        let request = self
            .request(
                Method::Post,
                format!("/v1/projects/{project_id}/remoteConfig:rollback"),
            )
            .query("versionNumber", version_number);

        self.client.request(request).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubApiClient, not_found};
    use serde_json::json;
    use std::error::Error as _;

    const PROJECT_ID: &str = "the-remoteconfig-test-project";

    fn template_body(version: &str) -> serde_json::Value {
        json!({
            "parameters": { "flag": { "defaultValue": { "value": "on" } } },
            "version": { "versionNumber": version, "updateOrigin": "REST_API" },
            "etag": "etag-1"
        })
    }

    #[tokio::test]
    async fn test_get_template_requests_current_version() {
        let stub = Arc::new(StubApiClient::new().resolves(template_body("6")));
        let service = TemplateService::new(stub.clone());

        let template = service
            .get_template(&ProjectId::from(PROJECT_ID), None)
            .await
            .unwrap();

        assert_eq!(template.version_number(), Some(VersionNumber::new(6)));
        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(
            calls[0].path_and_query(),
            format!("/v1/projects/{PROJECT_ID}/remoteConfig")
        );
        assert!(calls[0].auth);
        assert_eq!(calls[0].origin, DEFAULT_ORIGIN);
        assert_eq!(calls[0].timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_get_template_with_version_adds_query() {
        let stub = Arc::new(StubApiClient::new().resolves(template_body("3")));
        let service = TemplateService::new(stub.clone()).with_origin("http://localhost:8080");

        service
            .get_template(&ProjectId::from(PROJECT_ID), Some(VersionNumber::new(3)))
            .await
            .unwrap();

        let calls = stub.calls();
        assert_eq!(
            calls[0].path_and_query(),
            format!("/v1/projects/{PROJECT_ID}/remoteConfig?versionNumber=3")
        );
        assert_eq!(calls[0].origin, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_get_template_failure_wraps_api_error() {
        let stub = Arc::new(StubApiClient::new().rejects(not_found()));
        let service = TemplateService::new(stub);

        let err = service
            .get_template(&ProjectId::from(PROJECT_ID), None)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("Failed to get Firebase Remote Config template for project {PROJECT_ID}. ")
        );
        let source = err.source().unwrap().downcast_ref::<ApiError>().unwrap();
        assert_eq!(source.status(), Some(404));
    }

    #[tokio::test]
    async fn test_get_template_rejects_non_object_body() {
        let stub = Arc::new(StubApiClient::new().resolves(json!("not a template")));
        let service = TemplateService::new(stub);

        let err = service
            .get_template(&ProjectId::from(PROJECT_ID), None)
            .await
            .unwrap_err();
        match err {
            TemplateError::Get { source: ApiError::Decode(_), .. } => {}
            other => panic!("expected decode failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_versions_uses_page_size() {
        let stub = Arc::new(StubApiClient::new().resolves(json!({
            "versions": [
                { "versionNumber": "6", "updateType": "ROLLBACK", "rollbackSource": "4" },
                { "versionNumber": "5" }
            ],
            "nextPageToken": "abc"
        })));
        let service = TemplateService::new(stub.clone());

        let listed = service
            .list_versions(&ProjectId::from(PROJECT_ID), DEFAULT_VERSION_LIMIT)
            .await
            .unwrap();

        assert_eq!(listed.versions.len(), 2);
        assert_eq!(listed.versions[0].rollback_source, Some(VersionNumber::new(4)));
        assert_eq!(listed.next_page_token.as_deref(), Some("abc"));
        assert_eq!(
            stub.calls()[0].path_and_query(),
            format!("/v1/projects/{PROJECT_ID}/remoteConfig:listVersions?pageSize=10")
        );
    }

    #[tokio::test]
    async fn test_list_versions_zero_limit_requests_max_page() {
        let stub = Arc::new(StubApiClient::new().resolves(json!({})));
        let service = TemplateService::new(stub.clone());

        let listed = service
            .list_versions(&ProjectId::from(PROJECT_ID), 0)
            .await
            .unwrap();

        assert!(listed.versions.is_empty());
        assert_eq!(stub.calls()[0].query, vec![("pageSize".to_string(), "300".to_string())]);
    }

    #[tokio::test]
    async fn test_list_versions_failure_message() {
        let stub = Arc::new(StubApiClient::new().rejects(not_found()));
        let service = TemplateService::new(stub);

        let err = service
            .list_versions(&ProjectId::from(PROJECT_ID), 5)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Failed to get Remote Config template versions for project {PROJECT_ID}. ")
        );
    }
}
