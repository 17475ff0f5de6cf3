use super::super::{Model, Msg};
use super::utils::debounce;
use gloo_file::File as GlooFile;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            { render_file_input_area(model, ctx) }
            { render_button_container(model, ctx) }
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.item(0));

        input.set_value("");

        file.map(|file| Msg::FileSelected(GlooFile::from(file)))
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(input) = input {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p><strong>{"Click to upload"}</strong>{" or drag and drop"}</p>
                    <p class="file-types">{"PNG, JPG, JPEG (MAX. 5MB)"}</p>
                </div>
            </div>
        </>
    }
}

fn render_button_container(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();
    let loading = model.session.is_loading();

    html! {
        <div class="button-container">
            <button
                id="clear-btn"
                class="analyze-btn"
                style="background-color: var(--clear-color);"
                disabled={loading || model.session.file().is_none()}
                onclick={link.callback(|_| Msg::ClearFile)}
            >
                <i class="fa-solid fa-trash"></i>{" Clear"}
            </button>
            <button
                id="analyze-btn"
                class="analyze-btn"
                disabled={!model.session.can_submit()}
                onclick={link.callback(|_| Msg::Submit)}
            >
                { render_analyze_button_content(model) }
            </button>
        </div>
    }
}

fn render_analyze_button_content(model: &Model) -> Html {
    if model.session.is_loading() {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze Image"}</> }
    }
}
