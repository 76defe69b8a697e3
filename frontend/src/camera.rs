use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack, MediaTrackConstraints,
};

/// Which device camera to ask for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FacingMode {
    User,
    Environment,
}

impl FacingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }
}

/// A live camera stream owned by the view. The device resource is
/// released by stopping every track; `release` is idempotent and also
/// runs on drop, so every path that discards a session gives the
/// camera back.
pub struct CameraSession {
    stream: MediaStream,
    facing: FacingMode,
    attached: bool,
    released: bool,
}

impl CameraSession {
    /// Requests a stream with the given facing-mode hint. Errors cover
    /// both permission denial and missing devices; callers decide the
    /// fallback.
    pub async fn open(facing: FacingMode) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let devices = window.navigator().media_devices()?;

        let video = MediaTrackConstraints::new();
        video.set_facing_mode(&JsValue::from_str(facing.as_str()));
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video.into());

        let promise = devices.get_user_media_with_constraints(&constraints)?;
        let stream = JsFuture::from(promise).await?.dyn_into::<MediaStream>()?;

        Ok(Self {
            stream,
            facing,
            attached: false,
            released: false,
        })
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// Binds the stream to the preview element. Called from the render
    /// hook once the `<video>` exists in the DOM.
    pub fn attach(&mut self, video: &HtmlVideoElement) {
        if self.attached {
            return;
        }
        video.set_src_object(Some(&self.stream));
        let _ = video.play();
        self.attached = true;
    }

    /// Stops every track on the stream. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        self.released = true;
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

/// Draws the current video frame to an offscreen canvas and encodes it
/// as a JPEG data URL.
pub fn capture_frame(video: &HtmlVideoElement) -> Result<String, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(video.video_width());
    canvas.set_height(video.video_height());

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    context.draw_image_with_html_video_element(video, 0.0, 0.0)?;

    canvas.to_data_url_with_type("image/jpeg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipping_toggles_between_the_two_modes() {
        assert_eq!(FacingMode::User.flipped(), FacingMode::Environment);
        assert_eq!(FacingMode::Environment.flipped(), FacingMode::User);
        assert_eq!(FacingMode::User.flipped().flipped(), FacingMode::User);
    }

    #[test]
    fn facing_modes_use_the_dom_string_values() {
        assert_eq!(FacingMode::User.as_str(), "user");
        assert_eq!(FacingMode::Environment.as_str(), "environment");
    }
}
