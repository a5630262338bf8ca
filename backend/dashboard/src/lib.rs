//! # Dashboard
//!
//! Client side of the ads dashboard. Everything the user sees is derived from one
//! fetch of the record gateway.
//!
//! ## Pipeline
//!
//! fetch → normalize → sort → filter → paginate → render
//!
//! - Fetch: one `GET /api/fetchallAds`, once per session
//! - Normalize: missing or falsy fields become `N/A`, tag becomes `other`
//! - Sort: newest `created_at` first, unparseable timestamps last
//! - Filter: CTA equals the selected category (or `ALL`), description contains the search term, case insensitive
//! - Paginate: 20 per page, page resets to 1 on every filter change
//!
//! ## State
//!
//! - source list: immutable after load
//! - filtered list: always a subset of source, in source order
//! - selected CTA: `ALL` by default
//! - search term: empty by default
//! - current page: 1 by default
//! - dropdown open: closed by default
//!
//! ## Failures
//!
//! A failed fetch is logged and the table stays empty. There is no retry, the
//! user restarts the session. Text repair failures are swallowed silently.
//!
//! ## Notes
//!
//! Descriptions are truncated when longer than 50 chars but sliced at 150.
//! Kept as is until product decides otherwise.

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod record;
pub mod render;
pub mod text;

pub use dashboard::{Dashboard, Phase};
pub use error::LoadError;
pub use filter::{ALL_CATEGORIES, PAGE_SIZE};
pub use gateway::GatewayClient;
pub use record::{RawRecord, Record};
