use dioxus::prelude::*;

use crate::charts::translate;
use crate::core::config::LoyaltyConfig;
use crate::core::format::format_number;
use crate::explore::layout::{axis_ticks, PointVisual, ScatterLayout};
use crate::explore::reconcile::Sprite;
use crate::explore::scatter::Subscription;
use crate::explore::selection::Selection;
use crate::explore::tooltip::{point_tooltip, TooltipState};

/// What the loyalty view currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoyaltyScene {
    #[default]
    Pending,
    Empty,
    Plotted(ScatterLayout),
}

#[component]
pub fn LoyaltyChart(
    config: LoyaltyConfig,
    selection: Selection,
    scene: LoyaltyScene,
    points: Vec<Sprite<usize, PointVisual>>,
    tooltip: Signal<TooltipState>,
) -> Element {
    let outer_w = config.width;
    let outer_h = config.height;
    let inner_w = config.inner_width();
    let inner_h = config.inner_height();
    let title = selection.loyalty_title();

    let layout = match scene {
        LoyaltyScene::Plotted(layout) => layout,
        LoyaltyScene::Empty => {
            return rsx! {
                svg {
                    class: "chart chart--loyalty",
                    view_box: "0 0 {outer_w} {outer_h}",
                    g { transform: translate(config.margin.left, config.margin.top),
                        text { class: "chart-placeholder", x: "0", y: "16",
                            "No data points to display for this selection."
                        }
                    }
                }
            };
        }
        LoyaltyScene::Pending => return rsx! {},
    };

    let x_ticks = axis_ticks(&layout.x, 10, format_number);
    let y_ticks = axis_ticks(&layout.y, 10, format_number);
    let legend: Vec<(f64, &'static str, String)> = Subscription::ALL
        .iter()
        .enumerate()
        .map(|(i, sub)| {
            (
                i as f64 * 70.0,
                sub.label(),
                layout.subscription_color(*sub).to_hex(),
            )
        })
        .collect();
    let legend_x = inner_w - 160.0;
    let label_x = inner_w / 2.0;
    let label_y = inner_h + 40.0;
    let y_label_x = -inner_h / 2.0;

    rsx! {
        svg {
            class: "chart chart--loyalty",
            view_box: "0 0 {outer_w} {outer_h}",
            g { transform: translate(config.margin.left, config.margin.top),
                text { class: "title", x: "0", y: "-32", "{title}" }

                g { class: "axis x", transform: translate(0.0, inner_h),
                    line { x1: "0", x2: "{inner_w}", stroke: "currentColor" }
                    for tick in x_ticks {
                        g { key: "{tick.key}", transform: translate(tick.position, 0.0),
                            line { y2: "6", stroke: "currentColor" }
                            text { y: "18", "text-anchor": "middle", "{tick.label}" }
                        }
                    }
                }

                g { class: "axis y",
                    line { y1: "0", y2: "{inner_h}", stroke: "currentColor" }
                    for tick in y_ticks {
                        g { key: "{tick.key}", transform: translate(0.0, tick.position),
                            line { x1: "-6", x2: "0", stroke: "currentColor" }
                            text { x: "-9", y: "4", "text-anchor": "end", "{tick.label}" }
                        }
                    }
                }

                g { class: "points",
                    for sprite in points {
                        {render_point(sprite, &layout, tooltip)}
                    }
                }

                g { class: "legend", transform: translate(legend_x, -10.0),
                    for (x, label, color) in legend {
                        g { key: "{label}", transform: translate(x, 0.0),
                            circle { r: "6", cy: "-6", fill: "{color}" }
                            text { class: "legend-item__label", x: "12", y: "-2", "{label}" }
                        }
                    }
                }

                text { class: "axis-label", x: "{label_x}", y: "{label_y}", "text-anchor": "middle",
                    "Previous Purchases"
                }
                text {
                    class: "axis-label",
                    transform: "rotate(-90)",
                    x: "{y_label_x}",
                    y: "-48",
                    "text-anchor": "middle",
                    "Purchase Amount (USD)"
                }
            }
        }
    }
}

fn render_point(
    sprite: Sprite<usize, PointVisual>,
    layout: &ScatterLayout,
    mut tooltip: Signal<TooltipState>,
) -> Element {
    let Sprite { key, value, .. } = sprite;
    let content = layout.points.get(key).map(point_tooltip);
    let radius = value.r.max(0.0);

    rsx! {
        circle {
            key: "{key}",
            cx: "{value.cx}",
            cy: "{value.cy}",
            r: "{radius}",
            fill: "{value.fill}",
            opacity: "{value.opacity}",
            onmousemove: move |evt: MouseEvent| {
                if let Some(content) = content.clone() {
                    let point = evt.page_coordinates();
                    tooltip.set(TooltipState::show(content, point.x, point.y));
                }
            },
            onmouseleave: move |_| tooltip.set(TooltipState::Hidden),
        }
    }
}
