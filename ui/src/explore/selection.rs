//! Selection state and its reducer.
//!
//! The explorer has exactly one current [`Selection`]. User actions arrive as
//! [`SelectionEvent`] messages; reducing one yields a new selection plus the single
//! [`RenderRequest`] for whichever view is active. Actions are never merged: two events
//! always mean two recompute cycles, even when the second repeats the first.

use std::fmt;

use crate::core::record::{Record, Season};

/// Label used for blank or unsupported dimension values.
pub const OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Gender,
    AgeGroup,
    Season,
    ShippingType,
    SubscriptionStatus,
    DiscountApplied,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Gender,
        Dimension::AgeGroup,
        Dimension::Season,
        Dimension::ShippingType,
        Dimension::SubscriptionStatus,
        Dimension::DiscountApplied,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Gender => "Gender",
            Dimension::AgeGroup => "Age Group",
            Dimension::Season => "Season",
            Dimension::ShippingType => "Shipping Type",
            Dimension::SubscriptionStatus => "Subscription Status",
            Dimension::DiscountApplied => "Discount Applied",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dim| dim.label() == raw)
    }

    /// The record's group label under this dimension; blanks fall into [`OTHER_LABEL`].
    pub fn group_of<'a>(self, record: &'a Record) -> &'a str {
        let value = match self {
            Dimension::Gender => record.gender.as_str(),
            Dimension::AgeGroup => record.age_group.map(|g| g.label()).unwrap_or(""),
            Dimension::Season => record.season.as_str(),
            Dimension::ShippingType => record.shipping.as_str(),
            Dimension::SubscriptionStatus => record.subscription.as_str(),
            Dimension::DiscountApplied => record.discount.as_str(),
        };
        if value.is_empty() {
            OTHER_LABEL
        } else {
            value
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricType {
    Average,
    Count,
}

impl MetricType {
    pub const ALL: [MetricType; 2] = [MetricType::Average, MetricType::Count];

    /// Stable value used by the metric selector.
    pub fn key(self) -> &'static str {
        match self {
            MetricType::Average => "avg",
            MetricType::Count => "count",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|metric| metric.key() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricType::Average => "Average amount",
            MetricType::Count => "Count",
        }
    }

    /// Short label used in tooltips.
    pub fn short_label(self) -> &'static str {
        match self {
            MetricType::Average => "Avg",
            MetricType::Count => "Count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeasonFilter {
    #[default]
    All,
    Only(Season),
}

impl SeasonFilter {
    pub const ALL: [SeasonFilter; 5] = [
        SeasonFilter::All,
        SeasonFilter::Only(Season::Winter),
        SeasonFilter::Only(Season::Spring),
        SeasonFilter::Only(Season::Summer),
        SeasonFilter::Only(Season::Fall),
    ];

    pub fn label(self) -> &'static str {
        match self {
            SeasonFilter::All => "All",
            SeasonFilter::Only(season) => season.label(),
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.label() == raw)
    }

    pub fn matches(self, record: &Record) -> bool {
        match self {
            SeasonFilter::All => true,
            SeasonFilter::Only(season) => record.season == season.label(),
        }
    }

    /// Records that pass this filter, in dataset order.
    pub fn apply<'a>(self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        records.iter().filter(move |record| self.matches(record))
    }

    /// Title suffix such as ` (Winter)`; empty for `All`.
    pub fn suffix(self) -> String {
        match self {
            SeasonFilter::All => String::new(),
            SeasonFilter::Only(season) => format!(" ({season})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    Alphabetical,
    ValueDescending,
}

impl SortMode {
    pub const ALL: [SortMode; 2] = [SortMode::Alphabetical, SortMode::ValueDescending];

    pub fn key(self) -> &'static str {
        match self {
            SortMode::Alphabetical => "alpha",
            SortMode::ValueDescending => "value_desc",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.key() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Alphabetical => "Alphabetical",
            SortMode::ValueDescending => "Highest value first",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Overview,
    Loyalty,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Overview, ViewMode::Loyalty];

    pub fn key(self) -> &'static str {
        match self {
            ViewMode::Overview => "overview",
            ViewMode::Loyalty => "loyalty",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.key() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Overview => "Overview",
            ViewMode::Loyalty => "Loyalty",
        }
    }
}

/// The five-axis selection. Exactly one value per axis is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub dimension: Dimension,
    pub metric: MetricType,
    pub season: SeasonFilter,
    pub sort: SortMode,
    pub view: ViewMode,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            dimension: Dimension::Gender,
            metric: MetricType::Average,
            season: SeasonFilter::All,
            sort: SortMode::Alphabetical,
            view: ViewMode::Overview,
        }
    }
}

/// A typed user action. Each one replaces exactly one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    SetDimension(Dimension),
    SetMetric(MetricType),
    SetSeasonFilter(SeasonFilter),
    SetSortMode(SortMode),
    SetView(ViewMode),
}

/// Parameters for one bar-chart aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateQuery {
    pub dimension: Dimension,
    pub season: SeasonFilter,
    pub metric: MetricType,
    pub sort: SortMode,
}

/// What the active view must recompute after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest {
    Overview(AggregateQuery),
    Loyalty { season: SeasonFilter },
}

/// Result of reducing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub selection: Selection,
    pub request: RenderRequest,
}

impl Selection {
    pub fn reduce(self, event: SelectionEvent) -> Transition {
        let selection = match event {
            SelectionEvent::SetDimension(dimension) => Self { dimension, ..self },
            SelectionEvent::SetMetric(metric) => Self { metric, ..self },
            SelectionEvent::SetSeasonFilter(season) => Self { season, ..self },
            SelectionEvent::SetSortMode(sort) => Self { sort, ..self },
            SelectionEvent::SetView(view) => Self { view, ..self },
        };
        Transition {
            selection,
            request: selection.request(),
        }
    }

    pub fn set_dimension(self, dimension: Dimension) -> Transition {
        self.reduce(SelectionEvent::SetDimension(dimension))
    }

    pub fn set_metric(self, metric: MetricType) -> Transition {
        self.reduce(SelectionEvent::SetMetric(metric))
    }

    pub fn set_season_filter(self, season: SeasonFilter) -> Transition {
        self.reduce(SelectionEvent::SetSeasonFilter(season))
    }

    pub fn set_sort_mode(self, sort: SortMode) -> Transition {
        self.reduce(SelectionEvent::SetSortMode(sort))
    }

    pub fn set_view(self, view: ViewMode) -> Transition {
        self.reduce(SelectionEvent::SetView(view))
    }

    pub fn aggregate_query(&self) -> AggregateQuery {
        AggregateQuery {
            dimension: self.dimension,
            season: self.season,
            metric: self.metric,
            sort: self.sort,
        }
    }

    /// The recompute the active view needs for the current state.
    pub fn request(&self) -> RenderRequest {
        match self.view {
            ViewMode::Overview => RenderRequest::Overview(self.aggregate_query()),
            ViewMode::Loyalty => RenderRequest::Loyalty {
                season: self.season,
            },
        }
    }

    pub fn overview_title(&self) -> String {
        let subject = match self.metric {
            MetricType::Average => "Average Purchase Amount",
            MetricType::Count => "Number of Purchases",
        };
        let sort_suffix = match (self.sort, self.metric) {
            (SortMode::Alphabetical, _) => "",
            (SortMode::ValueDescending, MetricType::Average) => " — sorted by Highest Average Spend",
            (SortMode::ValueDescending, MetricType::Count) => " — sorted by Highest Count",
        };
        format!(
            "{subject} by Category — grouped by {}{}{sort_suffix}",
            self.dimension,
            self.season.suffix()
        )
    }

    pub fn loyalty_title(&self) -> String {
        format!(
            "Loyalty View — Spend vs Previous Purchases{}",
            self.season.suffix()
        )
    }
}

/// Holds the current selection and counts recompute cycles.
///
/// The cycle number lets asynchronous consumers drop work started for a superseded state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewController {
    selection: Selection,
    cycle: u64,
}

impl ViewController {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            cycle: 0,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Applies one event and returns the single request it triggers.
    pub fn dispatch(&mut self, event: SelectionEvent) -> RenderRequest {
        let transition = self.selection.reduce(event);
        self.selection = transition.selection;
        self.cycle += 1;
        transition.request
    }
}
