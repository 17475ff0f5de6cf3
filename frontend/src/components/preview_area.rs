use super::super::Model;
use yew::prelude::*;

pub fn render_preview_area(model: &Model) -> Html {
    match (&model.preview_url, model.session.file()) {
        (Some(url), Some(file)) => html! {
            <div id="preview-container">
                <img id="actual-image-preview"
                    src={url.to_string()}
                    alt={file.name()} />
                <p class="analyzed-filename-display">{ display_name(&file.name()) }</p>
            </div>
        },
        _ => html! {
            <div class="select-preview">
                <p>{"Preview will appear here"}</p>
            </div>
        },
    }
}

fn display_name(filename: &str) -> String {
    if filename.chars().count() > 30 {
        let head: String = filename.chars().take(27).collect();
        format!("{}...", head)
    } else {
        filename.to_string()
    }
}
