use actix_files::Files;
use actix_multipart::{Multipart, MultipartError};
use actix_web::http::header::ContentType;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use log::{info, warn};
use shared::{ErrorResponse, HealthResponse};
use std::path::PathBuf;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::inference::ml_service::MlService;
use crate::inference::models::Upload;

const FILE_FIELD: &str = "file";

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: Option<PathBuf>) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/api/predict").route(web::post().to(predict)));

    match frontend_dir {
        Some(dir) if dir.is_dir() => {
            info!("Serving client bundle from {}", dir.display());
            cfg.service(Files::new("/", dir).index_file("index.html"));
        }
        Some(dir) => warn!("Frontend directory {} not found, not serving it", dir.display()),
        None => {}
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy())
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found"))
}

async fn predict(
    req: HttpRequest,
    payload: Multipart,
    config: web::Data<RelayConfig>,
    ml_service: web::Data<MlService>,
) -> Result<HttpResponse, RelayError> {
    if !req.content_type().eq_ignore_ascii_case("multipart/form-data") {
        return Err(RelayError::NoFile);
    }

    let upload = read_upload(payload, config.max_upload_bytes)
        .await?
        .ok_or(RelayError::NoFile)?;

    info!(
        "Forwarding {} ({} bytes) to {}",
        upload.file_name,
        upload.size(),
        ml_service.predict_url()
    );
    let body = ml_service.predict(upload).await?;

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::json())
        .body(body))
}

/// Pulls the single `file` part out of the form. Parts without a filename,
/// or with an empty one, are plain fields and are skipped; a second file
/// part, or a file under another name, is an unexpected field.
async fn read_upload(
    mut payload: Multipart,
    limit: Option<usize>,
) -> Result<Option<Upload>, RelayError> {
    let mut upload: Option<Upload> = None;
    let mut seen_part = false;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // An empty form is just the closing boundary.
            Err(MultipartError::Incomplete) if !seen_part => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        seen_part = true;

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .filter(|file_name| !file_name.is_empty())
            .map(str::to_owned);

        let Some(file_name) = file_name else {
            while field.try_next().await?.is_some() {}
            continue;
        };

        if name != FILE_FIELD || upload.is_some() {
            return Err(RelayError::Internal(format!("Unexpected field: {}", name)));
        }

        let content_type = field.content_type().map(|mime| mime.to_string());
        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            data.extend_from_slice(&chunk);
            if let Some(limit) = limit {
                if data.len() > limit {
                    return Err(RelayError::FileTooLarge {
                        size: data.len(),
                        limit,
                    });
                }
            }
        }

        upload = Some(Upload::new(file_name, content_type, data));
    }

    Ok(upload)
}
