//! Noise Labeler: browse a folder of spectrogram CSVs, label each of the
//! equal-width segments of the current file and save them as JSON.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
