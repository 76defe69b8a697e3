use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use yew::prelude::*;

pub const FILE_INPUT_ID: &str = "file-input";
pub const CAMERA_VIDEO_ID: &str = "camera-preview";

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Programmatically clicks the hidden file input, opening the native
/// picker. Used both as the camera-denied fallback and by reset.
pub fn click_file_input() {
    if let Some(element) = element_by_id::<web_sys::HtmlElement>(FILE_INPUT_ID) {
        element.click();
    }
}

pub fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<T>().ok())
}
