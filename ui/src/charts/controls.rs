use dioxus::prelude::*;

use crate::explore::selection::{
    Dimension, MetricType, SeasonFilter, Selection, SelectionEvent, SortMode, ViewMode,
};

#[component]
pub fn ExplorerControls(selection: Selection, on_select: EventHandler<SelectionEvent>) -> Element {
    rsx! {
        div { class: "explorer-controls",
            label { class: "explorer-controls__field",
                span { "Group by" }
                select {
                    onchange: move |evt: FormEvent| {
                        if let Some(dimension) = Dimension::from_label(&evt.value()) {
                            on_select.call(SelectionEvent::SetDimension(dimension));
                        }
                    },
                    for dimension in Dimension::ALL {
                        option {
                            value: dimension.label(),
                            selected: dimension == selection.dimension,
                            "{dimension.label()}"
                        }
                    }
                }
            }

            label { class: "explorer-controls__field",
                span { "Metric" }
                select {
                    onchange: move |evt: FormEvent| {
                        if let Some(metric) = MetricType::from_key(&evt.value()) {
                            on_select.call(SelectionEvent::SetMetric(metric));
                        }
                    },
                    for metric in MetricType::ALL {
                        option {
                            value: metric.key(),
                            selected: metric == selection.metric,
                            "{metric.label()}"
                        }
                    }
                }
            }

            label { class: "explorer-controls__field",
                span { "Sort" }
                select {
                    onchange: move |evt: FormEvent| {
                        if let Some(sort) = SortMode::from_key(&evt.value()) {
                            on_select.call(SelectionEvent::SetSortMode(sort));
                        }
                    },
                    for sort in SortMode::ALL {
                        option {
                            value: sort.key(),
                            selected: sort == selection.sort,
                            "{sort.label()}"
                        }
                    }
                }
            }

            label { class: "explorer-controls__field",
                span { "View" }
                select {
                    onchange: move |evt: FormEvent| {
                        if let Some(view) = ViewMode::from_key(&evt.value()) {
                            on_select.call(SelectionEvent::SetView(view));
                        }
                    },
                    for view in ViewMode::ALL {
                        option {
                            value: view.key(),
                            selected: view == selection.view,
                            "{view.label()}"
                        }
                    }
                }
            }

            div { class: "season-scrubber",
                for filter in SeasonFilter::ALL {
                    button {
                        r#type: "button",
                        class: if filter == selection.season { "season-scrubber__button on" } else { "season-scrubber__button" },
                        onclick: move |_| on_select.call(SelectionEvent::SetSeasonFilter(filter)),
                        "{filter.label()}"
                    }
                }
            }
        }
    }
}
