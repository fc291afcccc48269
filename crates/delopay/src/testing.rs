//! In-memory transport for resource client unit tests.

use async_trait::async_trait;
use delopay_core::{ApiError, ApiRequest, ApiResponse, ApiResult, Transport};
use serde_json::Value;
use std::sync::Mutex;

/// Records every request and answers with a canned result.
pub(crate) struct RecordingTransport {
    reply: ApiResult<ApiResponse>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub(crate) fn replying(payload: Option<Value>) -> Self {
        Self {
            reply: Ok(ApiResponse::new(200, payload)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: ApiError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone()
    }
}
