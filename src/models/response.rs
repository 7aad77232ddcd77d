use serde::Serialize;

/// Wire envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            message: message.into(),
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: None,
            error: None,
            message: message.into(),
            count: None,
        }
    }

    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error.into()),
            message: message.into(),
            count: None,
        }
    }
}

/// Successful service result: the payload plus a human readable message.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub data: T,
    pub message: String,
}

impl<T> Outcome<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Outcome {
            data,
            message: message.into(),
        }
    }
}

impl<T: Serialize> From<Outcome<T>> for ApiResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        ApiResponse::ok(outcome.data, outcome.message)
    }
}
