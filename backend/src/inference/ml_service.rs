use actix_web::web::Bytes;
use reqwest::Client as HttpClient;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

use super::models::Upload;
use crate::config::RelayConfig;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Error, Debug)]
pub enum MlServiceError {
    #[error("{0}")]
    Http(reqwest::Error),
}

// The error text reaches the browser as `details`; keep the service address out of it.
impl From<reqwest::Error> for MlServiceError {
    fn from(err: reqwest::Error) -> Self {
        MlServiceError::Http(err.without_url())
    }
}

/// Client for the external inference service's `POST /predict`.
#[derive(Clone)]
pub struct MlService {
    http_client: HttpClient,
    predict_url: String,
}

impl MlService {
    pub fn new(config: &RelayConfig) -> Result<Self, MlServiceError> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            predict_url: config.predict_url(),
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    /// Sends the upload as multipart field `file` and returns the response
    /// body untouched. One attempt only; non-2xx statuses are errors.
    pub async fn predict(&self, upload: Upload) -> Result<Bytes, MlServiceError> {
        let content_type = upload
            .content_type
            .as_deref()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let part = Part::bytes(upload.data)
            .file_name(upload.file_name)
            .mime_str(&content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .http_client
            .post(&self.predict_url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?)
    }
}
