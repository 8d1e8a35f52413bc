//! Scripted API client for unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::api::{ApiClient, ApiRequest, ApiResponse};
use crate::error::ApiError;

/// Replays queued responses in order and records every request.
///
/// A request with nothing queued panics, so tests fail loudly on calls they
/// did not expect.
#[derive(Default)]
pub struct StubApiClient {
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl StubApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolves(self, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::ok(body)));
        self
    }

    pub fn rejects(self, error: ApiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for StubApiClient {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let next = self.responses.lock().unwrap().pop_front();
        let described = format!("{} {}", request.method, request.path_and_query());
        self.calls.lock().unwrap().push(request);
        match next {
            Some(result) => result,
            None => panic!("Unexpected API request call: {described}"),
        }
    }
}

pub fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not Found".to_string(),
    }
}
