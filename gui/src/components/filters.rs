// Sheet picker, product search and Maglia / Piatto pickers
#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn SheetPicker() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let names = state.read().sheet_names();
    let current = state.read().sheet.clone().unwrap_or_default();

    rsx! {
        label {
            "📑 Seleziona foglio "
            select {
                onchange: move |evt: FormEvent| state.write().select_sheet(&evt.value()),
                for name in names {
                    option { key: "{name}", value: "{name}", selected: name == current, "{name}" }
                }
            }
        }
    }
}

#[component]
pub fn Filters() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let (query, mesh, plate, mesh_column, plate_column) = {
        let s = state.read();
        (
            s.query.clone(),
            s.mesh.clone(),
            s.plate.clone(),
            s.settings.columns.mesh.clone(),
            s.settings.columns.plate.clone(),
        )
    };
    let mesh_options = state.read().category_options(&mesh_column);
    let plate_options = state.read().category_options(&plate_column);

    rsx! {
        h3 { "🔍 Ricerca e Filtri" }
        div {
            style: "display: flex; gap: 16px; flex-wrap: wrap;",
            label {
                "Cerca prodotto "
                input {
                    r#type: "text",
                    value: "{query}",
                    oninput: move |evt: FormEvent| state.write().query = evt.value(),
                }
            }
            if let Some(options) = mesh_options {
                CategoryPicker {
                    label: mesh_column,
                    options: options,
                    selected: mesh,
                    on_select: move |value: String| state.write().mesh = value,
                }
            }
            if let Some(options) = plate_options {
                CategoryPicker {
                    label: plate_column,
                    options: options,
                    selected: plate,
                    on_select: move |value: String| state.write().plate = value,
                }
            }
        }
    }
}

/// A select whose empty entry means "any value".
#[component]
fn CategoryPicker(label: String, options: Vec<String>, selected: String, on_select: EventHandler<String>) -> Element {
    rsx! {
        label {
            "{label} "
            select {
                onchange: move |evt: FormEvent| on_select.call(evt.value()),
                option { value: "", selected: selected.is_empty(), "" }
                for option_value in options {
                    option {
                        key: "{option_value}",
                        value: "{option_value}",
                        selected: option_value == selected,
                        "{option_value}"
                    }
                }
            }
        }
    }
}
