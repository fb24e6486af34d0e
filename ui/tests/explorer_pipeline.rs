//! End-to-end checks of the explorer pipeline through the public API: CSV text to dataset,
//! dataset to aggregation and projection, selection events to render requests, and bar layouts
//! through the reconciling stage.

use serde_json::json;

use ui::core::config::{ChartConfig, LoyaltyConfig};
use ui::core::dataset::Dataset;
use ui::core::record::{RawRow, Season};
use ui::explore::layout::{BarKey, BarLayout, ScatterLayout};
use ui::explore::reconcile::{Motion, Phase, Stage};
use ui::explore::selection::AggregateQuery;
use ui::explore::stagger::Cascade;
use ui::explore::{
    aggregate, project, Dimension, MetricType, Projection, RenderRequest, SeasonFilter,
    SelectionEvent, SortMode, ViewController, ViewMode,
};

const SAMPLE: &str = include_str!("../assets/data/shopping_behavior_updated.csv");

fn rows(values: serde_json::Value) -> Vec<RawRow> {
    serde_json::from_value(values).expect("fixture rows")
}

fn shoes() -> Dataset {
    Dataset::from_rows(&rows(json!([
        { "Category": "Shoes", "Purchase Amount (USD)": "50", "Season": "Winter" },
        { "Category": "Shoes", "Purchase Amount (USD)": "30", "Season": "Summer" },
    ])))
}

fn query(dimension: Dimension, season: SeasonFilter, metric: MetricType) -> AggregateQuery {
    AggregateQuery {
        dimension,
        season,
        metric,
        sort: SortMode::Alphabetical,
    }
}

#[test]
fn season_groups_keep_only_observed_seasons() {
    let dataset = shoes();
    let result = aggregate(
        dataset.records(),
        &query(Dimension::Season, SeasonFilter::All, MetricType::Average),
    );

    assert_eq!(result.group_order, vec!["Winter", "Summer"]);
    assert_eq!(result.series.len(), 1);
    let shoes = &result.series[0];
    assert_eq!(shoes.category, "Shoes");
    let values: Vec<(&str, f64)> = shoes
        .values
        .iter()
        .map(|v| (v.group.as_str(), v.value))
        .collect();
    assert_eq!(values, vec![("Winter", 50.0), ("Summer", 30.0)]);
}

#[test]
fn single_season_filter_collapses_group_order() {
    let dataset = shoes();
    let result = aggregate(
        dataset.records(),
        &query(
            Dimension::Season,
            SeasonFilter::Only(Season::Winter),
            MetricType::Average,
        ),
    );

    assert_eq!(result.group_order, vec!["Winter"]);
    assert_eq!(result.series[0].values.len(), 1);
    assert_eq!(result.series[0].values[0].value, 50.0);
}

#[test]
fn empty_dataset_renders_an_empty_chart() {
    let dataset = Dataset::from_csv_text(
        "Category,Purchase Amount (USD)\n,10\nShoes,not-a-number\n",
    )
    .expect("headers are valid");
    assert!(dataset.is_empty());
    assert_eq!(dataset.dropped_rows(), 2);

    let result = aggregate(
        dataset.records(),
        &query(Dimension::Gender, SeasonFilter::All, MetricType::Count),
    );
    assert!(result.series.is_empty());
    assert!(result.group_order.is_empty());

    let layout = BarLayout::new(&result, &ChartConfig::default());
    assert!(layout.bars.is_empty());
    assert!(layout.legend.is_empty());
    assert!(layout.placements(&Cascade::default()).is_empty());
}

#[test]
fn loyalty_without_previous_purchases_has_no_points() {
    let dataset = Dataset::from_rows(&rows(json!([
        { "Category": "Shoes", "Purchase Amount (USD)": "50", "Previous Purchases": "" },
        { "Category": "Hats", "Purchase Amount (USD)": "20", "Previous Purchases": "many" },
    ])));
    assert_eq!(dataset.len(), 2);
    assert_eq!(project(dataset.records(), SeasonFilter::All), Projection::Empty);
}

#[test]
fn sample_dataset_satisfies_series_invariants() {
    let dataset = Dataset::from_csv_text(SAMPLE).expect("bundled sample parses");
    assert!(!dataset.is_empty());

    let canonical: Vec<&str> = Season::ALL.iter().map(|s| s.label()).collect();

    for dimension in Dimension::ALL {
        for season in SeasonFilter::ALL {
            for metric in MetricType::ALL {
                let q = query(dimension, season, metric);
                let first = aggregate(dataset.records(), &q);
                let second = aggregate(dataset.records(), &q);
                assert_eq!(first, second, "aggregate is not idempotent for {q:?}");

                for series in &first.series {
                    let groups: Vec<&str> =
                        series.values.iter().map(|v| v.group.as_str()).collect();
                    assert_eq!(groups, first.group_order, "series out of order for {q:?}");
                }

                if dimension == Dimension::Season {
                    let mut cursor = canonical.iter();
                    for label in &first.group_order {
                        assert!(
                            cursor.any(|c| *c == label.as_str()),
                            "{label} breaks the canonical season order"
                        );
                    }
                }

                if metric == MetricType::Count && season == SeasonFilter::All {
                    let total: f64 = first
                        .series
                        .iter()
                        .flat_map(|s| s.values.iter())
                        .map(|v| v.value)
                        .sum();
                    assert_eq!(total as usize, dataset.len(), "counts drift for {q:?}");
                }
            }
        }
    }
}

#[test]
fn every_event_yields_one_request_for_the_active_view() {
    let mut controller = ViewController::default();

    let request = controller.dispatch(SelectionEvent::SetDimension(Dimension::Season));
    assert!(matches!(request, RenderRequest::Overview(q) if q.dimension == Dimension::Season));
    assert_eq!(controller.cycle(), 1);

    let request = controller.dispatch(SelectionEvent::SetView(ViewMode::Loyalty));
    assert_eq!(
        request,
        RenderRequest::Loyalty {
            season: SeasonFilter::All
        }
    );

    let request = controller.dispatch(SelectionEvent::SetSeasonFilter(SeasonFilter::Only(
        Season::Fall,
    )));
    assert_eq!(
        request,
        RenderRequest::Loyalty {
            season: SeasonFilter::Only(Season::Fall)
        }
    );
    assert_eq!(controller.cycle(), 3);
    assert_eq!(controller.selection().dimension, Dimension::Season);
}

#[test]
fn regrouping_swaps_bars_through_the_stage() {
    let dataset = Dataset::from_csv_text(SAMPLE).expect("bundled sample parses");
    let config = ChartConfig::default();
    let cascade = Cascade::from_config(&config);
    let mut stage = Stage::new(Motion::new(
        config.enter_duration_ms,
        config.exit_duration_ms,
    ));

    let by_gender = BarLayout::new(
        &aggregate(
            dataset.records(),
            &query(Dimension::Gender, SeasonFilter::All, MetricType::Average),
        ),
        &config,
    );
    let first = stage.reconcile(by_gender.placements(&cascade), 0.0);
    assert_eq!(first.entering.len(), by_gender.bars.len());
    assert!(first.updating.is_empty() && first.exiting.is_empty());

    let by_discount = BarLayout::new(
        &aggregate(
            dataset.records(),
            &query(
                Dimension::DiscountApplied,
                SeasonFilter::All,
                MetricType::Average,
            ),
        ),
        &config,
    );
    let second = stage.reconcile(by_discount.placements(&cascade), 100.0);
    assert_eq!(second.entering.len(), by_discount.bars.len());
    assert_eq!(second.exiting.len(), by_gender.bars.len());

    let old_key = &by_gender.bars[0].key;
    assert_eq!(stage.phase_of(old_key), Some(Phase::Exiting));

    let after_exit = 100.0 + config.exit_duration_ms + 1.0;
    stage.prune(after_exit);
    assert_eq!(stage.phase_of(old_key), None);
    assert_eq!(stage.len(), by_discount.bars.len());

    assert!(stage.is_settled(10_000.0));
    let frame = stage.frame(10_000.0);
    for sprite in &frame {
        let datum = by_discount.datum(&sprite.key).expect("bar has data");
        assert_eq!(sprite.value, by_discount.target(datum));
    }
}

#[test]
fn retargeting_mid_flight_starts_from_the_current_height() {
    let config = ChartConfig::default();
    let mut stage = Stage::new(Motion::new(
        config.enter_duration_ms,
        config.exit_duration_ms,
    ));
    let cascade = Cascade::default();
    let q = query(Dimension::Gender, SeasonFilter::All, MetricType::Average);

    let low = Dataset::from_rows(&rows(json!([
        { "Category": "Shoes", "Purchase Amount (USD)": "10", "Gender": "Female" },
        { "Category": "Shoes", "Purchase Amount (USD)": "40", "Gender": "Male" },
    ])));
    let high = Dataset::from_rows(&rows(json!([
        { "Category": "Shoes", "Purchase Amount (USD)": "40", "Gender": "Female" },
        { "Category": "Shoes", "Purchase Amount (USD)": "40", "Gender": "Male" },
    ])));

    let key = BarKey {
        category: "Shoes".into(),
        group: "Female".into(),
    };
    let low_layout = BarLayout::new(&aggregate(low.records(), &q), &config);
    stage.reconcile(low_layout.placements(&cascade), 0.0);
    let midway = stage.value_of(&key, 300.0).expect("bar on stage");

    let high_layout = BarLayout::new(&aggregate(high.records(), &q), &config);
    let partition = stage.reconcile(high_layout.placements(&cascade), 300.0);
    assert_eq!(partition.updating.len(), 2);
    assert_eq!(stage.phase_of(&key), Some(Phase::Updating));

    let restarted = stage.value_of(&key, 300.0).expect("bar on stage");
    assert_eq!(restarted, midway);
}

#[test]
fn loyalty_points_enter_from_the_axis() {
    let dataset = Dataset::from_csv_text(SAMPLE).expect("bundled sample parses");
    let config = LoyaltyConfig::default();
    let projection = project(dataset.records(), SeasonFilter::All);
    let layout = ScatterLayout::new(&projection, &config);

    let mut stage = Stage::new(Motion::new(
        config.enter_duration_ms,
        config.exit_duration_ms,
    ));
    let partition = stage.reconcile(layout.placements(), 0.0);
    assert_eq!(partition.entering.len(), projection.points().len());

    let start = stage.value_of(&0, 0.0).expect("first point");
    assert_eq!(start.cy, layout.y.map(0.0));
    assert_eq!(start.opacity, config.start_opacity);

    let end = stage
        .value_of(&0, config.enter_duration_ms)
        .expect("first point");
    assert_eq!(end.opacity, config.end_opacity);
}
