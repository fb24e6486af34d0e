//! Loyalty view projection: spend against previous purchases.

use crate::core::record::{Frequency, Record};

use super::selection::SeasonFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscription {
    Yes,
    No,
}

impl Subscription {
    /// Legend / color domain order.
    pub const ALL: [Subscription; 2] = [Subscription::Yes, Subscription::No];

    /// Anything other than a literal `Yes` counts as not subscribed.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim() {
            "Yes" => Subscription::Yes,
            _ => Subscription::No,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Subscription::Yes => "Yes",
            Subscription::No => "No",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    /// Position in the filtered sequence; doubles as the animation key.
    pub index: usize,
    pub previous_purchases: f64,
    pub amount: f64,
    pub subscription: Subscription,
    pub frequency: Option<Frequency>,
    /// Raw frequency text for display (may be empty).
    pub frequency_label: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Nothing survived the filters; the view shows a "no data" message.
    Empty,
    Points(Vec<PlotPoint>),
}

impl Projection {
    pub fn points(&self) -> &[PlotPoint] {
        match self {
            Projection::Empty => &[],
            Projection::Points(points) => points,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::Empty)
    }

    pub fn max_previous(&self) -> f64 {
        self.points()
            .iter()
            .map(|p| p.previous_purchases)
            .fold(0.0, f64::max)
    }

    pub fn max_amount(&self) -> f64 {
        self.points().iter().map(|p| p.amount).fold(0.0, f64::max)
    }
}

pub fn project(records: &[Record], season: SeasonFilter) -> Projection {
    let points: Vec<PlotPoint> = season
        .apply(records)
        .filter_map(|record| {
            let previous = f64::from(record.previous_purchases?);
            (previous.is_finite() && record.amount.is_finite()).then_some((previous, record))
        })
        .enumerate()
        .map(|(index, (previous_purchases, record))| PlotPoint {
            index,
            previous_purchases,
            amount: record.amount,
            subscription: Subscription::normalize(&record.subscription),
            frequency: record.frequency_kind(),
            frequency_label: record.frequency.clone(),
            category: record.category.clone(),
        })
        .collect();

    if points.is_empty() {
        Projection::Empty
    } else {
        Projection::Points(points)
    }
}
