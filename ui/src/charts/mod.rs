//! Dioxus components that draw the explorer's charts and controls.

mod controls;
pub use controls::ExplorerControls;

mod overview;
pub use overview::OverviewChart;

mod loyalty;
pub use loyalty::{LoyaltyChart, LoyaltyScene};

mod tooltip;
pub use tooltip::TooltipOverlay;

use crate::core::dataset::Dataset;

/// Dataset availability for the explorer page.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Dataset),
    Failed(String),
}

impl LoadState {
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            LoadState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }
}

/// SVG `translate(..)` helper.
pub(crate) fn translate(x: f64, y: f64) -> String {
    format!("translate({x:.2},{y:.2})")
}
