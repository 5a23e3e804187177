// All fields of one product, its own discounts and both discounted prices
#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::components::DiscountInput;
use crate::state::{AppState, RowDetail};

#[component]
pub fn DetailPanel(index: usize) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let palette = state.read().palette();
    let RowDetail { title, fields, discounts, has_override, raw_price, galvanized_price } =
        state.read().detail(index)?;
    let discounts = discounts.as_array();

    rsx! {
        div {
            class: "detail",
            style: "margin: 8px 0 8px 16px; padding: 8px 12px; border-left: 3px solid {palette.accent};",
            h4 { "📄 Dettaglio: {title}" }
            for (label, value) in fields {
                p { key: "{label}", style: "margin: 2px 0;", b { "{label}:" } " {value}" }
            }
            div {
                style: "display: flex; gap: 16px; margin: 8px 0;",
                for slot in 1..=3usize {
                    DiscountInput {
                        key: "{slot}",
                        label: format!("Sconto{} prodotto (%)", slot),
                        value: discounts[slot - 1],
                        on_change: move |value: f64| state.write().set_row_discount_slot(index, slot, value),
                    }
                }
                if has_override {
                    button {
                        onclick: move |_| state.write().reset_row_discounts(index),
                        "↺ Usa sconti generali"
                    }
                }
            }
            p { style: "color: {palette.success};", "💰 Prezzo Scontato Mq Grezzo: ", b { "{raw_price}" } }
            p { style: "color: {palette.success};", "💰 Prezzo Scontato Mq Zincato: ", b { "{galvanized_price}" } }
        }
    }
}
