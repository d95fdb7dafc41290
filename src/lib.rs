//! ShengHang music platform client library
//!
//! This crate wraps the ShengHang backend API: a request dispatcher with
//! typed errors, a TTL response cache, endpoint wrappers per backend area,
//! and the session, notice and formatting helpers used by the `shenghang`
//! command-line tool.

pub mod app;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod debounce;
pub mod endpoints;
pub mod format;
pub mod notice;
pub mod session;

pub use cache::ResponseCache;
pub use client::{ApiError, ClientError, Dispatcher, RequestBody, RequestOptions, ShengHangClient};
pub use config::ClientConfig;
