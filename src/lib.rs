//! Browser admin portal for an e-learning platform.
//!
//! - [`app`] - Root component and application context
//! - [`core`] - Gateway, navigation, loading contract and other view-free logic
//! - [`modules`] - Per-page data loading with placeholder fallback
//! - [`components`] - Shell, pages and shared view builders
//! - [`models`] - Backend payloads and their placeholder datasets

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod modules;
pub mod utils;
