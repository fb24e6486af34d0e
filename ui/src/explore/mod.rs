//! The explorer engine: aggregation, selection state, scales, and the keyed render reconciler.
//! Nothing in here touches Dioxus; the chart components in `crate::charts` drive it.

pub mod aggregate;
pub mod layout;
pub mod palette;
pub mod reconcile;
pub mod scale;
pub mod scatter;
pub mod selection;
pub mod stagger;
pub mod tooltip;
pub mod transition;

pub use aggregate::{aggregate, AggregateCell, Aggregation, CategorySeries, SeriesValue};
pub use reconcile::{diff, Diff, Stage};
pub use scatter::{project, PlotPoint, Projection};
pub use selection::{
    Dimension, MetricType, RenderRequest, SeasonFilter, Selection, SelectionEvent, SortMode,
    ViewController, ViewMode,
};
