use gloo_file::callbacks::FileReader;
use gloo_file::File as GlooFile;
use shared::SnakeReport;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlVideoElement;
use yew::prelude::*;

mod api;
pub mod camera;
mod components;

use camera::{CameraSession, FacingMode};
use components::utils::{click_file_input, element_by_id, CAMERA_VIDEO_ID};

/// What happened to the current image so far. `Classifying` exists only
/// inside `Stage::Review`, so a request can never be outstanding
/// without an image on screen.
enum Outcome {
    Classifying,
    Classified(SnakeReport),
}

/// The view's single state machine: idle placeholder, live camera, or a
/// captured image under review. Exactly one stage is active at a time.
enum Stage {
    Idle,
    Camera(CameraSession),
    Review { image: String, outcome: Outcome },
}

// Yew msg components
pub enum Msg {
    // Camera lifecycle
    OpenCamera,
    CameraReady(CameraSession),
    CameraUnavailable,
    FlipFacing,
    FlipFailed,
    Capture,
    CancelCamera,

    // File upload
    FileSelected(GlooFile),
    ImageLoaded(String),

    // Classification
    Classified(SnakeReport),

    // Start over with a fresh picker
    Reset,
}

// Main component
pub struct Model {
    stage: Stage,
    facing: FacingMode,
    pending_read: Option<FileReader>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            stage: Stage::Idle,
            facing: FacingMode::Environment,
            pending_read: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::OpenCamera => self.handle_open_camera(ctx),
            Msg::CameraReady(session) => self.handle_camera_ready(session),
            Msg::CameraUnavailable => self.handle_camera_unavailable(),
            Msg::FlipFacing => self.handle_flip_facing(ctx),
            Msg::FlipFailed => self.handle_flip_failed(),
            Msg::Capture => self.handle_capture(ctx),
            Msg::CancelCamera => self.handle_cancel_camera(),
            Msg::FileSelected(file) => self.handle_file_selected(ctx, file),
            Msg::ImageLoaded(image) => self.handle_image_loaded(ctx, image),
            Msg::Classified(report) => self.handle_classified(report),
            Msg::Reset => self.handle_reset(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { components::header::render_header() }

                <main class="main-content">
                    { components::capture_panel::render_capture_controls(ctx) }
                    { self.render_stage(ctx) }
                    { components::capture_panel::render_file_input(ctx) }
                </main>
            </div>
        }
    }

    // The `<video>` only exists in the DOM once the camera stage has
    // rendered, so stream binding happens here rather than in update.
    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Stage::Camera(session) = &mut self.stage {
            if let Some(video) = element_by_id::<HtmlVideoElement>(CAMERA_VIDEO_ID) {
                session.attach(&video);
            }
        }
    }
}

// Handler methods
impl Model {
    fn handle_open_camera(&mut self, ctx: &Context<Self>) -> bool {
        if matches!(self.stage, Stage::Camera(_)) {
            return false;
        }

        Self::request_camera(ctx, self.facing, Msg::CameraUnavailable);
        false
    }

    fn handle_camera_ready(&mut self, session: CameraSession) -> bool {
        // A stream resolving after the user moved on to an uploaded
        // image must not stomp the review; dropping it stops its tracks.
        if matches!(self.stage, Stage::Review { .. }) {
            return false;
        }

        self.facing = session.facing();
        self.stage = Stage::Camera(session);
        true
    }

    // Permission or device failure: degrade to the native file picker.
    fn handle_camera_unavailable(&mut self) -> bool {
        log::warn!("camera unavailable, falling back to file picker");
        click_file_input();
        false
    }

    fn handle_flip_facing(&mut self, ctx: &Context<Self>) -> bool {
        self.facing = self.facing.flipped();

        // With no live session this is only a mode toggle.
        let Stage::Camera(session) = &mut self.stage else {
            return false;
        };

        // The old stream stops before the new request goes out, but the
        // camera view stays up until the replacement arrives. A failed
        // re-request closes the camera view instead of opening the
        // picker.
        session.release();
        Self::request_camera(ctx, self.facing, Msg::FlipFailed);
        false
    }

    fn handle_flip_failed(&mut self) -> bool {
        // An upload that happened while the re-request was pending
        // keeps its review; there is no camera view left to close.
        if matches!(self.stage, Stage::Review { .. }) {
            return false;
        }

        log::warn!("camera flip failed, closing camera view");
        self.stage = Stage::Idle;
        true
    }

    fn handle_capture(&mut self, ctx: &Context<Self>) -> bool {
        if !matches!(self.stage, Stage::Camera(_)) {
            return false;
        }

        let Some(video) = element_by_id::<HtmlVideoElement>(CAMERA_VIDEO_ID) else {
            return false;
        };

        match camera::capture_frame(&video) {
            Ok(image) => {
                // Replacing the stage drops the session, which stops
                // every track whether or not classification succeeds.
                self.start_classification(ctx, image.clone());
                self.stage = Stage::Review {
                    image,
                    outcome: Outcome::Classifying,
                };
                true
            }
            Err(err) => {
                log::warn!("frame capture failed: {err:?}");
                false
            }
        }
    }

    fn handle_cancel_camera(&mut self) -> bool {
        self.stage = Stage::Idle;
        true
    }

    fn handle_file_selected(&mut self, ctx: &Context<Self>, file: GlooFile) -> bool {
        let link = ctx.link().clone();
        self.pending_read = Some(gloo_file::callbacks::read_as_data_url(
            &file,
            move |result| match result {
                Ok(data_url) => link.send_message(Msg::ImageLoaded(data_url)),
                Err(err) => log::warn!("failed to read selected file: {err:?}"),
            },
        ));
        false
    }

    fn handle_image_loaded(&mut self, ctx: &Context<Self>, image: String) -> bool {
        self.pending_read = None;
        self.start_classification(ctx, image.clone());
        self.stage = Stage::Review {
            image,
            outcome: Outcome::Classifying,
        };
        true
    }

    // Last write wins: overlapping requests both land here and the
    // later arrival simply replaces the outcome.
    fn handle_classified(&mut self, report: SnakeReport) -> bool {
        match &mut self.stage {
            Stage::Review { outcome, .. } => {
                *outcome = Outcome::Classified(report);
                true
            }
            _ => {
                log::debug!("classification resolved after the image was discarded");
                false
            }
        }
    }

    fn handle_reset(&mut self) -> bool {
        self.stage = Stage::Idle;
        click_file_input();
        true
    }

    // Helper methods
    fn request_camera(ctx: &Context<Self>, facing: FacingMode, on_failure: Msg) {
        let link = ctx.link().clone();
        spawn_local(async move {
            match CameraSession::open(facing).await {
                Ok(session) => link.send_message(Msg::CameraReady(session)),
                Err(err) => {
                    log::warn!("getUserMedia failed: {err:?}");
                    link.send_message(on_failure);
                }
            }
        });
    }

    fn start_classification(&self, ctx: &Context<Self>, image: String) {
        let link = ctx.link().clone();
        spawn_local(async move {
            let report = api::classify(&image).await;
            link.send_message(Msg::Classified(report));
        });
    }
}

// Rendering methods
impl Model {
    fn render_stage(&self, ctx: &Context<Self>) -> Html {
        match &self.stage {
            Stage::Idle => components::capture_panel::render_placeholder(ctx),
            Stage::Camera(_) => components::camera_view::render_camera_view(ctx),
            Stage::Review { image, outcome } => self.render_review(ctx, image, outcome),
        }
    }

    fn render_review(&self, ctx: &Context<Self>, image: &str, outcome: &Outcome) -> Html {
        html! {
            <div class="review-section">
                <div class="image-frame">
                    <img src={image.to_owned()} alt="Snake" />
                </div>
                {
                    match outcome {
                        Outcome::Classifying => components::results::render_loading(),
                        Outcome::Classified(report) => html! {
                            <>
                                { components::results::render_report(report) }
                                <button
                                    class="reset-btn"
                                    onclick={ctx.link().callback(|_| Msg::Reset)}
                                >
                                    <i class="fa-solid fa-rotate-left"></i>
                                    {" Upload new image"}
                                </button>
                            </>
                        },
                    }
                }
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::VenomStatus;

    fn model_with(stage: Stage) -> Model {
        Model {
            stage,
            facing: FacingMode::Environment,
            pending_read: None,
        }
    }

    fn review_in_progress() -> Model {
        model_with(Stage::Review {
            image: "data:image/jpeg;base64,AAAA".to_string(),
            outcome: Outcome::Classifying,
        })
    }

    fn report(description: &str) -> SnakeReport {
        SnakeReport {
            status: VenomStatus::Venomous,
            description: description.to_string(),
        }
    }

    #[test]
    fn classification_result_lands_on_the_reviewed_image() {
        let mut model = review_in_progress();

        assert!(model.handle_classified(report("first")));
        match &model.stage {
            Stage::Review {
                outcome: Outcome::Classified(resolved),
                ..
            } => assert_eq!(resolved.description, "first"),
            _ => panic!("expected a classified review stage"),
        }
    }

    #[test]
    fn overlapping_classifications_are_last_write_wins() {
        let mut model = review_in_progress();

        model.handle_classified(report("first"));
        model.handle_classified(report("second"));
        match &model.stage {
            Stage::Review {
                outcome: Outcome::Classified(resolved),
                ..
            } => assert_eq!(resolved.description, "second"),
            _ => panic!("expected a classified review stage"),
        }
    }

    #[test]
    fn late_result_after_the_image_was_discarded_is_dropped() {
        let mut model = model_with(Stage::Idle);

        assert!(!model.handle_classified(report("stale")));
        assert!(matches!(model.stage, Stage::Idle));
    }

    #[test]
    fn flip_failure_does_not_discard_an_uploaded_image() {
        let mut model = review_in_progress();

        assert!(!model.handle_flip_failed());
        assert!(matches!(model.stage, Stage::Review { .. }));
    }

    #[test]
    fn flip_failure_outside_review_lands_on_idle() {
        let mut model = model_with(Stage::Idle);

        model.handle_flip_failed();
        assert!(matches!(model.stage, Stage::Idle));
    }
}
