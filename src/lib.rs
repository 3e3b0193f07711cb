//! Terminal map for manually entered wastewater variant measurements.
//!
//! Plants submit per-variant counts through entry forms; the overview keeps
//! the latest measurement per plant and colors the plant's map marker by its
//! total.

pub mod aggregation;
pub mod app;
pub mod braille;
pub mod config;
pub mod data;
pub mod form;
pub mod journal;
pub mod map;
pub mod model;
pub mod scheduler;
pub mod ui;
