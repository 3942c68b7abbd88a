//! Renderer-independent core: API access, session, caching, transforms and the controller.

pub mod api;
pub mod cache;
pub mod charts;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod model;
pub mod platform;
pub mod session;
pub mod storage;
pub mod table;
pub mod view;
