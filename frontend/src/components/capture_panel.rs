use super::super::Model;
use super::super::Msg;
use super::utils::{debounce, FILE_INPUT_ID};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// The always-visible camera and flip buttons.
pub fn render_capture_controls(ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();
    let open_camera = debounce(300, {
        let link = link.clone();
        move || link.send_message(Msg::OpenCamera)
    });

    html! {
        <div class="capture-controls">
            <button class="camera-btn" onclick={open_camera} title="Take photo or upload image">
                <i class="fa-solid fa-camera"></i>
            </button>
            <button
                class="flip-btn"
                onclick={link.callback(|_| Msg::FlipFacing)}
                title="Flip camera"
            >
                <i class="fa-solid fa-rotate-left"></i>
            </button>
        </div>
    }
}

/// The tap-anywhere placeholder shown while no image is present.
pub fn render_placeholder(ctx: &Context<Model>) -> Html {
    html! {
        <div
            class="upload-placeholder"
            onclick={ctx.link().callback(|_| Msg::OpenCamera)}
        >
            <p>{"Tap anywhere to take photo or upload image"}</p>
        </div>
    }
}

/// Hidden file input backing every picker fallback. Browser-level
/// `accept` filtering is the only MIME validation; a non-image file
/// simply fails downstream at the endpoint.
pub fn render_file_input(ctx: &Context<Model>) -> Html {
    let handle_change = ctx.link().batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input
            .files()
            .and_then(|files| files.item(0))
            .map(gloo_file::File::from);

        input.set_value("");

        file.map(Msg::FileSelected)
    });

    html! {
        <input
            type="file"
            id={FILE_INPUT_ID}
            accept="image/*"
            style="display: none;"
            onchange={handle_change}
        />
    }
}
