//! Turns aggregated data and projections into keyed visual targets for the reconciler.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::config::{ChartConfig, LoyaltyConfig};

use super::aggregate::Aggregation;
use super::palette::{OrdinalPalette, Rgb};
use super::reconcile::{Placement, Visual};
use super::scale::{BandScale, LinearScale};
use super::scatter::{PlotPoint, Projection, Subscription};
use super::stagger::{Slot, StaggerPolicy};
use super::transition::Interpolate;

/// Identity of a bar across renders.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BarKey {
    pub category: String,
    pub group: String,
}

/// `group|category`, with `\` and `|` inside either label escaped so distinct keys never render
/// to the same string.
impl fmt::Display for BarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", escape_key_part(&self.group), escape_key_part(&self.category))
    }
}

fn escape_key_part(part: &str) -> String {
    part.replace('\\', "\\\\").replace('|', "\\|")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarVisual {
    pub x: f64,
    pub width: f64,
    pub y: f64,
    pub height: f64,
    pub fill: Rgb,
}

impl Interpolate for BarVisual {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x.interpolate(&other.x, t),
            width: self.width.interpolate(&other.width, t),
            y: self.y.interpolate(&other.y, t),
            height: self.height.interpolate(&other.height, t),
            fill: self.fill.interpolate(&other.fill, t),
        }
    }
}

impl Visual for BarVisual {
    /// Flattens onto the bar's bottom edge.
    fn collapsed(&self) -> Self {
        Self {
            y: self.y + self.height,
            height: 0.0,
            ..*self
        }
    }
}

/// One bar's data, kept alongside the layout for tooltips.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub key: BarKey,
    pub slot: Slot,
    pub value: f64,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub row: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
}

/// Two fixed rows: the first half of the labels (rounded up) on top, the rest below.
pub fn legend_layout(
    group_order: &[String],
    palette: &OrdinalPalette,
    column_spacing: f64,
    row_offset: f64,
) -> Vec<LegendItem> {
    let mid = group_order.len().div_ceil(2);
    group_order
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let (row, column) = if i < mid { (0, i) } else { (1, i - mid) };
            LegendItem {
                label: label.clone(),
                row,
                column,
                x: column as f64 * column_spacing,
                y: row as f64 * row_offset,
                color: palette.color(label),
            }
        })
        .collect()
}

/// One tick on a numeric axis. `key` comes from the raw value, since rounded labels can repeat.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
    pub key: String,
}

pub fn axis_ticks(scale: &LinearScale, count: usize, format: impl Fn(f64) -> String) -> Vec<AxisTick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            position: scale.map(value),
            label: format(value),
            key: format!("{value}"),
        })
        .collect()
}

/// Scales, palette, and bar targets for one overview render.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub x: BandScale,
    pub groups: BandScale,
    pub y: LinearScale,
    pub palette: OrdinalPalette,
    pub bars: Vec<BarDatum>,
    pub legend: Vec<LegendItem>,
}

impl BarLayout {
    pub fn new(aggregation: &Aggregation, config: &ChartConfig) -> Self {
        let width = config.inner_width();
        let height = config.inner_height();

        let x = BandScale::new(
            aggregation.categories().into_iter().map(str::to_string).collect(),
            (0.0, width),
            config.category_padding,
        );
        let groups = BandScale::new(
            aggregation.group_order.clone(),
            (0.0, x.bandwidth()),
            config.group_padding,
        );
        let y = LinearScale::new(
            (0.0, aggregation.max_value() * config.y_headroom),
            (height, 0.0),
        );
        let palette = OrdinalPalette::new(&aggregation.group_order);

        let bars = aggregation
            .series
            .iter()
            .enumerate()
            .flat_map(|(category_index, series)| {
                series
                    .values
                    .iter()
                    .enumerate()
                    .map(move |(group_index, value)| BarDatum {
                        key: BarKey {
                            category: series.category.clone(),
                            group: value.group.clone(),
                        },
                        slot: Slot {
                            category_index,
                            group_index,
                        },
                        value: value.value,
                        average: value.average,
                        count: value.count,
                    })
            })
            .collect();

        let legend = legend_layout(
            &aggregation.group_order,
            &palette,
            config.legend_column_spacing,
            config.legend_row_offset,
        );

        Self {
            x,
            groups,
            y,
            palette,
            bars,
            legend,
        }
    }

    /// Pixel row of the zero line.
    pub fn baseline_y(&self) -> f64 {
        self.y.map(0.0)
    }

    pub fn datum(&self, key: &BarKey) -> Option<&BarDatum> {
        self.bars.iter().find(|bar| &bar.key == key)
    }

    pub fn target(&self, datum: &BarDatum) -> BarVisual {
        let category_x = self.x.position(&datum.key.category).unwrap_or(0.0);
        let group_x = self.groups.position(&datum.key.group).unwrap_or(0.0);
        let top = self.y.map(datum.value);
        BarVisual {
            x: category_x + group_x,
            width: self.groups.bandwidth(),
            y: top,
            height: self.baseline_y() - top,
            fill: self.palette.color(&datum.key.group),
        }
    }

    /// Targets for every bar, delayed per `stagger`; new bars rise from the zero line.
    pub fn placements(&self, stagger: &impl StaggerPolicy) -> BTreeMap<BarKey, Placement<BarVisual>> {
        self.bars
            .iter()
            .map(|datum| {
                let target = self.target(datum);
                let baseline = BarVisual {
                    y: self.baseline_y(),
                    height: 0.0,
                    ..target
                };
                (
                    datum.key.clone(),
                    Placement {
                        target,
                        baseline,
                        delay_ms: stagger.delay_ms(datum.slot),
                    },
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointVisual {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub opacity: f64,
    pub fill: Rgb,
}

impl Interpolate for PointVisual {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        Self {
            cx: self.cx.interpolate(&other.cx, t),
            cy: self.cy.interpolate(&other.cy, t),
            r: self.r.interpolate(&other.r, t),
            opacity: self.opacity.interpolate(&other.opacity, t),
            fill: self.fill.interpolate(&other.fill, t),
        }
    }
}

impl Visual for PointVisual {
    fn collapsed(&self) -> Self {
        Self {
            r: 0.0,
            opacity: 0.0,
            ..*self
        }
    }
}

/// Scales and point targets for one loyalty render.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayout {
    pub x: LinearScale,
    pub y: LinearScale,
    pub palette: OrdinalPalette,
    pub points: Vec<PlotPoint>,
    config: LoyaltyConfig,
}

impl ScatterLayout {
    pub fn new(projection: &Projection, config: &LoyaltyConfig) -> Self {
        let max_or_one = |value: f64| if value > 0.0 { value } else { 1.0 };
        let x = LinearScale::new(
            (0.0, max_or_one(projection.max_previous())),
            (0.0, config.inner_width()),
        )
        .nice(10);
        let y = LinearScale::new(
            (0.0, max_or_one(projection.max_amount())),
            (config.inner_height(), 0.0),
        )
        .nice(10);
        let domain: Vec<String> = Subscription::ALL
            .iter()
            .map(|s| s.label().to_string())
            .collect();

        Self {
            x,
            y,
            palette: OrdinalPalette::new(&domain),
            points: projection.points().to_vec(),
            config: config.clone(),
        }
    }

    pub fn subscription_color(&self, subscription: Subscription) -> Rgb {
        self.palette.color(subscription.label())
    }

    pub fn target(&self, point: &PlotPoint) -> PointVisual {
        PointVisual {
            cx: self.x.map(point.previous_purchases),
            cy: self.y.map(point.amount),
            r: self.config.sizes.radius(point.frequency),
            opacity: self.config.end_opacity,
            fill: self.subscription_color(point.subscription),
        }
    }

    /// Targets keyed by index; new points rise from the x axis while fading in.
    pub fn placements(&self) -> BTreeMap<usize, Placement<PointVisual>> {
        self.points
            .iter()
            .map(|point| {
                let target = self.target(point);
                let baseline = PointVisual {
                    cy: self.y.map(0.0),
                    opacity: self.config.start_opacity,
                    ..target
                };
                (
                    point.index,
                    Placement {
                        target,
                        baseline,
                        delay_ms: 0.0,
                    },
                )
            })
            .collect()
    }
}
