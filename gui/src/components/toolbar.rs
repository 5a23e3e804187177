// Toolbar: load, reopen latest, export, theme
#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::services::file_dialog;
use crate::state::AppState;

#[component]
pub fn Toolbar() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let export_name = state.read().settings.export_file_name.clone();
    let has_workbook = state.read().workbook.is_some();
    let palette = state.read().palette();

    rsx! {
        div {
            class: "toolbar",
            style: "display: flex; gap: 8px; padding: 8px; background-color: {palette.secondary}; border-radius: 6px;",
            button {
                onclick: move |_| {
                    if let Some(path) = file_dialog::pick_price_list() {
                        state.write().load_file(&path);
                    }
                },
                "📂 Carica nuovo file Excel"
            }
            button {
                onclick: move |_| state.write().open_latest(),
                "🔄 Apri ultimo salvato"
            }
            button {
                disabled: !has_workbook,
                onclick: move |_| {
                    if let Some(path) = file_dialog::pick_export_path(&export_name) {
                        state.write().export_to(&path);
                    }
                },
                "📥 Scarica Excel aggiornato"
            }
            button {
                style: "margin-left: auto;",
                onclick: move |_| state.write().toggle_theme(),
                "🌓"
            }
        }
    }
}
