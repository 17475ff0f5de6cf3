use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};
use shared::ErrorResponse;

use crate::inference::ml_service::MlServiceError;

pub const NO_FILE_MESSAGE: &str = "No file uploaded";
pub const FILE_TOO_LARGE_MESSAGE: &str = "File too large";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";
pub const INTERNAL_MESSAGE: &str = "Something went wrong!";

/// Every way a relay request can fail. The `Display` text is the internal
/// detail that gets logged; `client_body` is what the caller sees.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("No file uploaded")]
    NoFile,
    #[error("Upload of {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },
    #[error("Prediction error: {0}")]
    Downstream(#[from] MlServiceError),
    #[error("{0}")]
    Internal(String),
}

impl From<MultipartError> for RelayError {
    fn from(err: MultipartError) -> Self {
        RelayError::Internal(format!("Multipart error: {}", err))
    }
}

impl RelayError {
    fn client_body(&self) -> ErrorResponse {
        match self {
            RelayError::NoFile => ErrorResponse::new(NO_FILE_MESSAGE),
            RelayError::FileTooLarge { .. } => ErrorResponse::new(FILE_TOO_LARGE_MESSAGE),
            RelayError::Downstream(e) => {
                ErrorResponse::with_details(PREDICTION_FAILED_MESSAGE, e.to_string())
            }
            RelayError::Internal(_) => ErrorResponse::new(INTERNAL_MESSAGE),
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::NoFile => StatusCode::BAD_REQUEST,
            RelayError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Downstream(_) | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(self.client_body())
    }
}
