// Discount inputs: the three general ones and the shared input widget
#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::state::app_state::parse_percent;
use crate::state::AppState;

#[component]
pub fn GeneralDiscounts() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let general = state.read().general.as_array();

    rsx! {
        h3 { "🧮 Sconti generali" }
        div {
            style: "display: flex; gap: 16px;",
            for slot in 1..=3usize {
                DiscountInput {
                    key: "{slot}",
                    label: format!("Sconto{} (%)", slot),
                    value: general[slot - 1],
                    on_change: move |value: f64| state.write().set_general_slot(slot, value),
                }
            }
        }
    }
}

/// Percentage input. Negative values are a markup; text that is not a number
/// is ignored until it becomes one.
#[component]
pub fn DiscountInput(label: String, value: f64, on_change: EventHandler<f64>) -> Element {
    rsx! {
        label {
            "{label} "
            input {
                r#type: "number",
                step: "0.5",
                value: "{value}",
                oninput: move |evt: FormEvent| {
                    if let Some(parsed) = parse_percent(&evt.value()) {
                        on_change.call(parsed);
                    }
                },
            }
        }
    }
}
