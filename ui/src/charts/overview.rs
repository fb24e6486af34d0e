use dioxus::prelude::*;

use crate::charts::translate;
use crate::core::config::ChartConfig;
use crate::core::format::format_tick;
use crate::explore::layout::{axis_ticks, BarKey, BarLayout, BarVisual};
use crate::explore::reconcile::Sprite;
use crate::explore::selection::Selection;
use crate::explore::tooltip::{bar_tooltip, TooltipState};

/// Grouped bar chart. `bars` is the reconciler's current frame, so exiting bars are still
/// drawn while they collapse.
#[component]
pub fn OverviewChart(
    config: ChartConfig,
    selection: Selection,
    layout: Option<BarLayout>,
    bars: Vec<Sprite<BarKey, BarVisual>>,
    tooltip: Signal<TooltipState>,
) -> Element {
    let outer_w = config.width;
    let outer_h = config.height;
    let inner_w = config.inner_width();
    let inner_h = config.inner_height();
    let title = selection.overview_title();
    let metric = selection.metric;

    let is_empty = layout.as_ref().map(|l| l.bars.is_empty()).unwrap_or(true);

    let (y_ticks, categories, legend) = match layout.as_ref() {
        Some(layout) => (
            axis_ticks(&layout.y, config.y_ticks, |value| format_tick(metric, value)),
            layout
                .x
                .domain()
                .iter()
                .filter_map(|category| {
                    layout
                        .x
                        .center(category)
                        .map(|x| (x, category.clone()))
                })
                .collect::<Vec<_>>(),
            layout.legend.clone(),
        ),
        None => (Vec::new(), Vec::new(), Vec::new()),
    };

    rsx! {
        svg {
            class: "chart chart--overview",
            view_box: "0 0 {outer_w} {outer_h}",
            g { transform: translate(config.margin.left, config.margin.top),
                text { class: "title", x: "0", y: "-36", "{title}" }

                g { class: "legend", transform: translate(0.0, -12.0),
                    for item in legend {
                        g {
                            key: "{item.label}",
                            class: "legend-item",
                            transform: translate(item.x, item.y),
                            rect { width: "12", height: "12", y: "-10", rx: "2", ry: "2", fill: "{item.color}" }
                            text { class: "legend-item__label", x: "18", y: "0", "{item.label}" }
                        }
                    }
                }

                g { class: "axis y",
                    for tick in y_ticks {
                        g { key: "{tick.key}", transform: translate(0.0, tick.position),
                            line { x1: "-6", x2: "0", stroke: "currentColor" }
                            text { x: "-9", y: "4", "text-anchor": "end", "{tick.label}" }
                        }
                    }
                }

                g { class: "axis x", transform: translate(0.0, inner_h),
                    line { x1: "0", x2: "{inner_w}", stroke: "currentColor" }
                    for (x, category) in categories {
                        g { key: "{category}", transform: translate(x, 0.0),
                            line { y2: "6", stroke: "currentColor" }
                            text {
                                y: "18",
                                "text-anchor": "end",
                                transform: "rotate(-30)",
                                "{category}"
                            }
                        }
                    }
                }

                g { class: "bars",
                    for sprite in bars {
                        {render_bar(sprite, &selection, layout.as_ref(), tooltip)}
                    }
                }

                if is_empty {
                    text { class: "chart-placeholder", x: "0", y: "20",
                        "No purchases match this selection."
                    }
                }
            }
        }
    }
}

fn render_bar(
    sprite: Sprite<BarKey, BarVisual>,
    selection: &Selection,
    layout: Option<&BarLayout>,
    mut tooltip: Signal<TooltipState>,
) -> Element {
    let Sprite { key, value, .. } = sprite;
    let content = layout
        .and_then(|layout| layout.datum(&key))
        .map(|datum| bar_tooltip(selection, datum));
    let height = value.height.max(0.0);

    rsx! {
        rect {
            key: "{key}",
            x: "{value.x}",
            y: "{value.y}",
            width: "{value.width}",
            height: "{height}",
            fill: "{value.fill}",
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
