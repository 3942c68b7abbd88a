//! Shared UI crate for Marksboard: API client, session/view controller and the
//! Dioxus components both platform shells render.

pub mod app;
pub mod components;
pub mod core;
pub mod i18n;
pub mod views;

pub use app::MarksApp;
