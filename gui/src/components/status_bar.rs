#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::state::{AppState, Status};

#[component]
pub fn StatusBar() -> Element {
    let state = use_context::<Signal<AppState>>();
    let palette = state.read().palette();
    let (color, message) = match state.read().status.clone() {
        Some(Status::Success(msg)) => (palette.success, msg),
        Some(Status::Warning(msg)) => (palette.warning, msg),
        Some(Status::Error(msg)) => (palette.error, msg),
        None => return None,
    };

    rsx! {
        p { class: "status", style: "color: {color}; margin: 8px 0;", "{message}" }
    }
}
