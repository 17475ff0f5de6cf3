use super::super::Model;
use shared::{confidence_bar_width, confidence_text, display_label, Phase};
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let phase = model.session.phase();

    match phase {
        Phase::Success(result) => html! {
            <div class={classes!("results-container", phase.as_ref().to_string())}>
                <h3>{"Prediction Complete"}</h3>
                <div class="result-item">
                    <div class="result-label">{"Class"}</div>
                    <div class="result-value predicted-class">
                        { display_label(&result.class) }
                    </div>
                </div>
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence"}</div>
                    <div class="meter">
                        <div class="meter-fill"
                            style={format!("width: {}%", confidence_bar_width(result.confidence))}></div>
                    </div>
                    <div class="meter-value">{ confidence_text(result.confidence) }</div>
                </div>
            </div>
        },
        _ => {
            let hint = if model.session.file().is_some() {
                "Click \"Analyze Image\" to get predictions"
            } else {
                "Upload an image to see analysis results"
            };
            html! {
                <div class={classes!("results-placeholder", phase.as_ref().to_string())}>
                    <p class="no-results-message">{ hint }</p>
                </div>
            }
        }
    }
}
