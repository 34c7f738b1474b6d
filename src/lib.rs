//! USD quote extraction from national financial portals.
//!
//! Resolves the published USD buy/sale values for a requested calendar date
//! from per-country portal pages (the BNA quote board for Argentina, the DOF
//! indicator page for Mexico) and normalizes both behind a single dispatch
//! surface returning an [`OperationResult`] envelope.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::QuoteService;
pub use domain::{CountryCode, OperationResult, UsdQuote};
pub use infrastructure::config::AppConfig;
