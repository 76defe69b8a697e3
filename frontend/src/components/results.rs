use shared::SnakeReport;
use yew::prelude::*;

pub fn render_loading() -> Html {
    html! {
        <div class="loading-card">
            <i class="fa-solid fa-spinner fa-spin"></i>
            <span>{"Analyzing snake..."}</span>
        </div>
    }
}

/// Status badge plus description card for a resolved classification.
/// The badge styling comes from the fixed status lookup, so even an
/// unknown verdict renders with the neutral gray default.
pub fn render_report(report: &SnakeReport) -> Html {
    let display = report.status.display();

    html! {
        <div class="result-section">
            <div class="badge-row">
                <div
                    class="status-badge"
                    style={format!(
                        "background-color: {}; color: {};",
                        display.background, display.text
                    )}
                >
                    <i class={display.icon}></i>
                    <span>{ report.status.to_string() }</span>
                </div>
            </div>
            <div class="description-card">
                <p>{ &report.description }</p>
            </div>
        </div>
    }
}
