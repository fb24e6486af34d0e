//! Shared UI crate for Shoplens. The dataset pipeline, the explorer engine, and the Dioxus views
//! live here; the platform crates only launch [`views::Explorer`].

pub mod charts;
pub mod core;
pub mod explore;
pub mod views;
