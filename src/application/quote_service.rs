//! Country dispatcher: maps a country code to its portal handler.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::{CountryCode, OperationResult, UsdQuote};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::notification::{Notifier, SlackNotifier};
use crate::infrastructure::scraping::{BnaHandler, CurrencyHandler, DofHandler};

const INVALID_COUNTRY_KEY: &str = "Country code invalid";

/// Resolves one USD quote per `(country code, date)` request.
///
/// Holds an immutable handler mapping built once at startup; unknown codes are
/// rejected before any network traffic.
pub struct QuoteService {
    handlers: HashMap<CountryCode, Arc<dyn CurrencyHandler>>,
}

impl QuoteService {
    pub fn new(bna: Arc<dyn CurrencyHandler>, dof: Arc<dyn CurrencyHandler>) -> Self {
        let mut handlers: HashMap<CountryCode, Arc<dyn CurrencyHandler>> = HashMap::new();
        handlers.insert(CountryCode::Arg, bna);
        handlers.insert(CountryCode::Mex, dof);
        Self { handlers }
    }

    /// Wire the full service graph: one pooled HTTP client and one notifier
    /// shared by both handlers.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = Arc::new(HttpClient::new(config.http.clone())?);
        let notifier: Arc<dyn Notifier> = Arc::new(SlackNotifier::new(config.slack.clone()));

        let bna = BnaHandler::new(Arc::clone(&http), config.bna.clone(), Arc::clone(&notifier));
        let dof = DofHandler::new(http, config.dof.clone(), notifier);

        Ok(Self::new(Arc::new(bna), Arc::new(dof)))
    }

    /// Resolve the USD quote for `country_code` on `date`. Handler results
    /// pass through unchanged.
    pub async fn get_usd_quote(
        &self,
        country_code: &str,
        date: NaiveDate,
    ) -> Result<OperationResult<UsdQuote>> {
        let Ok(code) = country_code.parse::<CountryCode>() else {
            warn!("Rejected quote request for unsupported country '{}'", country_code);
            return Ok(OperationResult::failure(
                INVALID_COUNTRY_KEY,
                format!("{country_code} is not a supported country"),
            ));
        };

        match self.handlers.get(&code) {
            Some(handler) => {
                info!("Resolving USD quote for {} on {}", code, date);
                handler.handle(date).await
            }
            None => Ok(OperationResult::failure(
                INVALID_COUNTRY_KEY,
                format!("{country_code} is not a supported country"),
            )),
        }
    }
}
