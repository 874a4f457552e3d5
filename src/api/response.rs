//! JSON envelope shared by the demo API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Every API body is `{"data": ...}`; the status travels alongside.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    #[serde(skip)]
    status: StatusCode,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// The analysis was started and finishes in the background.
    pub fn accepted(data: T) -> Self {
        Self {
            status: StatusCode::ACCEPTED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
