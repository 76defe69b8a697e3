use super::super::Model;
use super::super::Msg;
use super::utils::CAMERA_VIDEO_ID;
use yew::prelude::*;

/// Live camera preview with the capture and cancel controls. The
/// stream itself is bound to the `<video>` in the component's render
/// hook, once the element actually exists.
pub fn render_camera_view(ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="camera-section">
            <div class="camera-frame">
                <video
                    id={CAMERA_VIDEO_ID}
                    autoplay=true
                    playsinline=true
                    muted=true
                />
            </div>
            <div class="camera-controls">
                <button
                    class="capture-btn"
                    onclick={link.callback(|_| Msg::Capture)}
                >
                    <i class="fa-solid fa-camera"></i>
                    <span>{"Take Picture"}</span>
                </button>
                <button
                    class="cancel-btn"
                    onclick={link.callback(|_| Msg::CancelCamera)}
                >
                    {"Cancel"}
                </button>
            </div>
        </div>
    }
}
