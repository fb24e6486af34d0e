//! Tooltip content. Positioning and styling belong to the view; this only decides what to say
//! and when the tooltip is visible.

use crate::core::format::{format_currency, format_metric, format_number};

use super::layout::BarDatum;
use super::scatter::{PlotPoint, Subscription};
use super::selection::Selection;

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub label: String,
    pub value: String,
}

impl TooltipLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipContent {
    pub lines: Vec<TooltipLine>,
}

pub fn bar_tooltip(selection: &Selection, bar: &BarDatum) -> TooltipContent {
    TooltipContent {
        lines: vec![
            TooltipLine::new(selection.dimension.label(), bar.key.group.clone()),
            TooltipLine::new(
                selection.metric.short_label(),
                format_metric(selection.metric, bar.value),
            ),
        ],
    }
}

pub fn point_tooltip(point: &PlotPoint) -> TooltipContent {
    let subscription = match point.subscription {
        Subscription::Yes => "Member ✅",
        Subscription::No => "No ❌",
    };
    let frequency = if point.frequency_label.is_empty() {
        "—".to_string()
    } else {
        point.frequency_label.clone()
    };
    TooltipContent {
        lines: vec![
            TooltipLine::new("🛒 Previous Purchases", format_number(point.previous_purchases)),
            TooltipLine::new("💵 Spend", format_currency(point.amount)),
            TooltipLine::new("⭐ Subscription", subscription),
            TooltipLine::new("⏱️ Frequency", frequency),
            TooltipLine::new("🏷️ Category", point.category.clone()),
        ],
    }
}

/// Show/hide trigger plus the anchor the view positions against.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible {
        content: TooltipContent,
        page_x: f64,
        page_y: f64,
    },
}

impl TooltipState {
    pub fn show(content: TooltipContent, page_x: f64, page_y: f64) -> Self {
        TooltipState::Visible {
            content,
            page_x,
            page_y,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, TooltipState::Visible { .. })
    }
}
