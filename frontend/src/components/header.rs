use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-leaf"></i> {" Tomato Disease Classifier"}</h1>
            <p class="subtitle">{"Upload an image to detect tomato plant diseases"}</p>
        </header>
    }
}
