//! Platform-agnostic plumbing shared by the explorer: configuration, dataset loading,
//! formatting, timing, and the small amount of platform glue the views need.

pub mod config;
pub mod dataset;
pub mod format;
pub mod platform;
pub mod record;
pub mod timing;
