use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1>{"All about Snakes"}</h1>
            <p class="subtitle">{"Discover and learn about snake species"}</p>
        </header>
    }
}
