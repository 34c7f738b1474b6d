//! Per-portal scraping handlers and the document abstraction they share.
//!
//! Each handler owns one portal's URL construction, fetch, and extraction
//! algorithm, and converts every parse or validation outcome into an
//! [`OperationResult`] envelope.

pub mod bna;
pub mod document;
pub mod dof;

pub use bna::BnaHandler;
pub use document::{PortalDocument, PortalElement};
pub use dof::DofHandler;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{OperationResult, UsdQuote};

/// One portal's fetch + parse + validate + extract pipeline.
#[async_trait]
pub trait CurrencyHandler: Send + Sync {
    /// Resolve the USD quote published for `date`. Returns `Err` only when the
    /// outbound fetch itself fails; every parse or validation outcome travels
    /// in the result envelope.
    async fn handle(&self, date: NaiveDate) -> Result<OperationResult<UsdQuote>>;
}

/// Outcome of one sync extraction pass: the envelope to return and, for shape
/// failures, the alert to send before returning.
pub(crate) struct Extraction {
    pub(crate) result: OperationResult<UsdQuote>,
    pub(crate) alert: Option<String>,
}

impl Extraction {
    pub(crate) fn quote(quote: UsdQuote) -> Self {
        Self {
            result: OperationResult::from_entity(quote),
            alert: None,
        }
    }

    pub(crate) fn failure(key: &str, message: &str) -> Self {
        Self {
            result: OperationResult::failure(key, message),
            alert: None,
        }
    }

    pub(crate) fn alerting_failure(key: &str, message: &str, alert: String) -> Self {
        Self {
            result: OperationResult::failure(key, message),
            alert: Some(alert),
        }
    }
}
