// Matching products, first rows only, each with its detail toggle
#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::components::DetailPanel;
use crate::state::{AppState, ProductItem};

#[component]
pub fn ProductList() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let items = state.read().preview_items();
    let shown = items.len();
    let total = state.read().matching_count();
    let open = state.read().open_detail;
    let palette = state.read().palette();

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 12px;",
            h3 { "📋 Prodotti ({shown} di {total})" }
            button {
                onclick: move |_| state.write().append_blank_row(),
                "➕ Aggiungi riga"
            }
        }
        for ProductItem { index, product, summary } in items {
            div {
                key: "{index}",
                style: "border-bottom: 1px solid {palette.secondary}; padding: 6px 0;",
                div {
                    style: "display: flex; align-items: center; gap: 12px;",
                    div {
                        style: "flex: 7;",
                        b { "{product}" }
                        " | {summary}"
                    }
                    button {
                        style: "flex: 1;",
                        onclick: move |_| state.write().toggle_detail(index),
                        "🔍 Dettaglio"
                    }
                }
                if open == Some(index) {
                    DetailPanel { index: index }
                }
            }
        }
    }
}
