use dioxus::prelude::*;

use crate::explore::tooltip::TooltipState;

/// Offset from the pointer so the tooltip never sits under the cursor.
const OFFSET_X: f64 = 12.0;
const OFFSET_Y: f64 = -24.0;

#[component]
pub fn TooltipOverlay(state: TooltipState) -> Element {
    match state {
        TooltipState::Hidden => rsx! {
            div { class: "tooltip", style: "opacity:0" }
        },
        TooltipState::Visible {
            content,
            page_x,
            page_y,
        } => {
            let left = page_x + OFFSET_X;
            let top = page_y + OFFSET_Y;
            rsx! {
                div {
                    class: "tooltip",
                    style: "opacity:1; left:{left}px; top:{top}px",
                    for line in content.lines {
                        div { class: "tooltip__line",
                            strong { "{line.label}:" }
                            " {line.value}"
                        }
                    }
                }
            }
        }
    }
}
