use super::super::{Model, Msg};
use super::utils::first_image_file;
use crate::api::request_prediction;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{PredictionResult, ReplyError, UploadError};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub fn handle_file_selected(model: &mut Model, file: GlooFile) -> bool {
    let name = file.name();
    let size = file.size();
    let preview_source = file.clone();

    match model.session.select(file, size) {
        Ok(()) => {
            log::info!("Selected {} ({} bytes)", name, size);
            model.preview_url = Some(ObjectUrl::from(preview_source));
        }
        Err(UploadError::Busy) => {
            log::info!("Ignored {} while an analysis is running", name);
            return false;
        }
        Err(e) => {
            log::warn!("Rejected {}: {}", name, e);
            model.preview_url = None;
        }
    }

    true
}

pub fn handle_clear_file(model: &mut Model) -> bool {
    if model.session.is_loading() {
        return false;
    }
    model.session.clear();
    model.preview_url = None;
    true
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    match model.session.begin_submit() {
        Some(file) => {
            send_prediction_request(ctx, file.clone());
            true
        }
        None => false,
    }
}

pub fn handle_prediction_received(
    model: &mut Model,
    outcome: Result<PredictionResult, ReplyError>,
) -> bool {
    model.session.finish(outcome)
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let (image, skipped) = first_image_file(&file_list);

    for name in &skipped {
        log::warn!("Skipping non-image file: {}", name);
    }

    match image {
        Some(file) => ctx.link().send_message(Msg::FileSelected(file)),
        None if !skipped.is_empty() => ctx.link().send_message(Msg::SetError(format!(
            "Skipped non-image file: {}",
            skipped.join(", ")
        ))),
        None => {}
    }
}

pub fn send_prediction_request(ctx: &Context<Model>, file: GlooFile) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = request_prediction(&file).await;
            match &outcome {
                Ok(result) => log::info!(
                    "Prediction for {}: {} ({:.4})",
                    file.name(),
                    result.class,
                    result.confidence
                ),
                Err(e) => log::error!("Prediction error: {}", e),
            }
            link.send_message(Msg::PredictionReceived(outcome));
        }
    });
}
