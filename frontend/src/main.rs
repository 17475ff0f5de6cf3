mod api;
mod components;

use components::handlers;
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{PredictionResult, ReplyError, UploadSession};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // File operations
    FileSelected(GlooFile),
    ClearFile,

    // Analysis operations
    Submit,
    PredictionReceived(Result<PredictionResult, ReplyError>),

    // UI states
    SetError(String),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    session: UploadSession<GlooFile>,
    preview_url: Option<ObjectUrl>,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            session: UploadSession::new(),
            preview_url: None,
            is_dragging: false,
            paste_listener: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => handlers::handle_file_selected(self, file),
            Msg::ClearFile => handlers::handle_clear_file(self),

            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::PredictionReceived(outcome) => handlers::handle_prediction_received(self, outcome),

            Msg::SetError(message) => {
                self.session.fail(message);
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    <section class="upload-panel">
                        { render_upload_section(self, ctx) }
                        { render_error_message(self) }
                    </section>
                    <section class="results-panel">
                        <h2>{"Analysis Results"}</h2>
                        { render_preview_area(self) }
                        { render_results(self) }
                    </section>
                </main>

                <footer class="app-footer">
                    <p>{"Tomato Disease Classifier | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting, relay at {}", api::API_URL);
    yew::Renderer::<Model>::new().render();
}
