use super::super::Model;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
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
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Splits a file list into the first image and the names of skipped
/// non-image files.
pub fn first_image_file(file_list: &FileList) -> (Option<GlooFile>, Vec<String>) {
    let mut image = None;
    let mut skipped = Vec::new();

    for file in (0..file_list.length()).filter_map(|i| file_list.item(i)) {
        if !file.type_().starts_with("image/") {
            skipped.push(file.name());
        } else if image.is_none() {
            image = Some(GlooFile::from(file));
        }
    }

    (image, skipped)
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error_msg) = model.session.error() {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg.to_string() }</p>
            </div>
        }
    } else {
        html! {}
    }
}
