use dioxus::logger::tracing::{debug, info, warn};
use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::charts::{
    ExplorerControls, LoadState, LoyaltyChart, LoyaltyScene, OverviewChart, TooltipOverlay,
};
use crate::core::config::ExplorerConfig;
use crate::core::dataset::Dataset;
use crate::core::{platform, timing};
use crate::explore::layout::{BarKey, BarLayout, BarVisual, PointVisual, ScatterLayout};
use crate::explore::reconcile::{Motion, Stage};
use crate::explore::selection::AggregateQuery;
use crate::explore::stagger::Cascade;
use crate::explore::tooltip::TooltipState;
use crate::explore::{
    aggregate, project, RenderRequest, SeasonFilter, SelectionEvent, ViewController, ViewMode,
};

#[derive(Debug, Clone, Copy)]
enum ExplorerEvent {
    Select(SelectionEvent),
}

/// Everything a render pass writes. All fields are signals, so the bundle is `Copy`.
#[derive(Clone, Copy)]
struct Scene {
    bars: Signal<Stage<BarKey, BarVisual>>,
    points: Signal<Stage<usize, PointVisual>>,
    bar_layout: Signal<Option<BarLayout>>,
    loyalty: Signal<LoyaltyScene>,
    clock: Signal<f64>,
    animating: Signal<bool>,
}

#[component]
pub fn Explorer(config: ExplorerConfig) -> Element {
    let load_state = use_signal(LoadState::default);
    let controller = use_signal(ViewController::default);
    let mut tooltip = use_signal(TooltipState::default);

    let chart_config = config.chart.clone();
    let loyalty_config = config.loyalty.clone();
    let scene = Scene {
        bars: use_signal(|| {
            Stage::new(Motion::new(
                chart_config.enter_duration_ms,
                chart_config.exit_duration_ms,
            ))
        }),
        points: use_signal(|| {
            Stage::new(Motion::new(
                loyalty_config.enter_duration_ms,
                loyalty_config.exit_duration_ms,
            ))
        }),
        bar_layout: use_signal(|| Option::<BarLayout>::None),
        loyalty: use_signal(LoyaltyScene::default),
        clock: use_signal(timing::now_ms),
        animating: use_signal(|| false),
    };

    let coroutine = {
        let config = config.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<ExplorerEvent>| {
            let config = config.clone();
            let mut load_signal = load_state;
            let mut controller_signal = controller;

            async move {
                match platform::load_dataset(&config.data_source).await {
                    Ok(dataset) => {
                        info!(
                            source = %config.data_source,
                            records = dataset.len(),
                            dropped = dataset.dropped_rows(),
                            "dataset ready"
                        );
                        let request = controller_signal.peek().selection().request();
                        render(request, &dataset, &config, scene);
                        load_signal.set(LoadState::Ready(dataset));
                    }
                    Err(err) => {
                        warn!(source = %config.data_source, "failed to load dataset: {err}");
                        load_signal.set(LoadState::Failed("Failed to load data.".to_string()));
                    }
                }

                while let Some(event) = rx.next().await {
                    match event {
                        ExplorerEvent::Select(selection_event) => {
                            let request =
                                controller_signal.with_mut(|ctl| ctl.dispatch(selection_event));
                            debug!(
                                cycle = controller_signal.peek().cycle(),
                                ?request,
                                "selection changed"
                            );
                            let dataset = load_signal.peek().dataset().cloned();
                            if let Some(dataset) = dataset {
                                render(request, &dataset, &config, scene);
                            }
                        }
                    }
                }
            }
        })
    };

    let selection = controller.read().selection();
    let now = (scene.clock)();
    let bar_frame = scene.bars.read().frame(now);
    let point_frame = scene.points.read().frame(now);
    let bar_layout = scene.bar_layout.read().clone();
    let loyalty_scene = scene.loyalty.read().clone();
    let tooltip_state = tooltip.read().clone();

    let overview_style = if selection.view == ViewMode::Overview {
        ""
    } else {
        "display:none"
    };
    let loyalty_style = if selection.view == ViewMode::Loyalty {
        ""
    } else {
        "display:none"
    };

    let body = match &*load_state.read() {
        LoadState::Loading => rsx! {
            p { class: "chart-placeholder", "Loading data…" }
        },
        LoadState::Failed(message) => rsx! {
            p { class: "chart-placeholder chart-placeholder--error", "{message}" }
        },
        LoadState::Ready(_) => rsx! {
            div { id: "chart", class: "chart-container", style: overview_style,
                OverviewChart {
                    config: config.chart.clone(),
                    selection,
                    layout: bar_layout,
                    bars: bar_frame,
                    tooltip,
                }
            }
            div { id: "loyalty-chart", class: "chart-container", style: loyalty_style,
                LoyaltyChart {
                    config: config.loyalty.clone(),
                    selection,
                    scene: loyalty_scene,
                    points: point_frame,
                    tooltip,
                }
            }
        },
    };

    rsx! {
        div { class: "explorer",
            h1 { class: "explorer__title", "Shopping Behavior Explorer" }
            ExplorerControls {
                selection,
                on_select: move |event: SelectionEvent| {
                    tooltip.set(TooltipState::Hidden);
                    coroutine.send(ExplorerEvent::Select(event));
                },
            }
            {body}
            TooltipOverlay { state: tooltip_state }
        }
    }
}

/// Recomputes the active view and hands the new targets to its stage.
fn render(request: RenderRequest, dataset: &Dataset, config: &ExplorerConfig, scene: Scene) {
    let now = timing::now_ms();
    match request {
        RenderRequest::Overview(query) => render_overview(query, dataset, config, scene, now),
        RenderRequest::Loyalty { season } => {
            render_loyalty(season, dataset, config, scene, now)
        }
    }
    let mut clock = scene.clock;
    clock.set(now);
    start_frames(scene);
}

fn render_overview(
    query: AggregateQuery,
    dataset: &Dataset,
    config: &ExplorerConfig,
    mut scene: Scene,
    now: f64,
) {
    let aggregation = aggregate(dataset.records(), &query);
    let layout = BarLayout::new(&aggregation, &config.chart);
    let placements = layout.placements(&Cascade::from_config(&config.chart));
    let diff = scene.bars.with_mut(|stage| stage.reconcile(placements, now));
    debug!(
        categories = aggregation.series.len(),
        groups = aggregation.group_order.len(),
        entering = diff.entering.len(),
        updating = diff.updating.len(),
        exiting = diff.exiting.len(),
        "overview reconciled"
    );
    scene.bar_layout.set(Some(layout));
}

fn render_loyalty(
    season: SeasonFilter,
    dataset: &Dataset,
    config: &ExplorerConfig,
    mut scene: Scene,
    now: f64,
) {
    let projection = project(dataset.records(), season);
    if projection.is_empty() {
        scene.points.with_mut(|stage| stage.clear());
        scene.loyalty.set(LoyaltyScene::Empty);
        debug!(season = season.label(), "loyalty view has no points");
        return;
    }

    let layout = ScatterLayout::new(&projection, &config.loyalty);
    let placements = layout.placements();
    scene.points.with_mut(|stage| {
        stage.clear();
        stage.reconcile(placements, now);
    });
    debug!(points = layout.points.len(), "loyalty reconciled");
    scene.loyalty.set(LoyaltyScene::Plotted(layout));
}

/// Drives the frame clock until both stages settle. A second call while running is a no-op.
fn start_frames(scene: Scene) {
    let mut animating = scene.animating;
    if *animating.peek() {
        return;
    }
    animating.set(true);

    platform::spawn_future(async move {
        let Scene {
            mut bars,
            mut points,
            mut clock,
            mut animating,
            ..
        } = scene;
        loop {
            timing::sleep_ms(timing::FRAME_MS).await;
            let now = timing::now_ms();
            bars.with_mut(|stage| stage.prune(now));
            points.with_mut(|stage| stage.prune(now));
            clock.set(now);

            let settled = bars.peek().is_settled(now) && points.peek().is_settled(now);
            if settled {
                animating.set(false);
                break;
            }
        }
    });
}
