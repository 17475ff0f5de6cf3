use gloo_file::{Blob, File as GlooFile};
use gloo_net::http::Request;
use shared::{interpret_reply, PredictionResult, ReplyError};
use web_sys::FormData;

/// Relay base URL, fixed at build time through `API_URL`.
pub const API_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

pub fn predict_url() -> String {
    format!("{}/api/predict", API_URL.trim_end_matches('/'))
}

/// Posts the file as multipart field `file` and interprets the relay's reply.
pub async fn request_prediction(file: &GlooFile) -> Result<PredictionResult, ReplyError> {
    let form_data =
        FormData::new().map_err(|e| ReplyError::Network(format!("{:?}", e)))?;
    let blob: &Blob = file;
    form_data
        .append_with_blob_and_filename("file", blob.as_ref(), &file.name())
        .map_err(|e| ReplyError::Network(format!("{:?}", e)))?;

    let response = Request::post(&predict_url())
        .body(form_data)
        .map_err(|e| ReplyError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ReplyError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ReplyError::Network(e.to_string()))?;

    interpret_reply(status, &body)
}
