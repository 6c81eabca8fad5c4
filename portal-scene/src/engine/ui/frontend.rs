#[cfg(target_arch = "wasm32")]
use crate::constants::frontend::{LOADING_BAR_SELECTOR, LOADING_FILL_SELECTOR};

/// CSS width for a progress value in percent.
#[cfg(any(target_arch = "wasm32", test))]
pub fn progress_width(percent: f32) -> String {
    format!("{}%", percent)
}

/// Set the page's progress element width.
#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
pub fn set_progress_width(percent: f32) {
    #[cfg(target_arch = "wasm32")]
    {
        dom::set_style(LOADING_FILL_SELECTOR, "width", &progress_width(percent));
    }
}

/// Set the page's progress bar container opacity.
#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
pub fn set_loading_bar_opacity(opacity: f32) {
    #[cfg(target_arch = "wasm32")]
    {
        dom::set_style(LOADING_BAR_SELECTOR, "opacity", &opacity.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
mod dom {
    use bevy::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlElement;

    fn find_element(selector: &str) -> Option<HtmlElement> {
        let document = web_sys::window()?.document()?;
        document
            .query_selector(selector)
            .ok()??
            .dyn_into::<HtmlElement>()
            .ok()
    }

    /// Pages without the element are left alone.
    pub fn set_style(selector: &str, property: &str, value: &str) {
        let Some(element) = find_element(selector) else {
            return;
        };

        if let Err(err) = element.style().set_property(property, value) {
            warn!("Failed to set {} on {}: {:?}", property, selector, err);
        }
    }
}
