//! Handler for the Diario Oficial de la Federación indicator page.
//!
//! The portal renders the daily exchange-rate bulletin in a table marked with
//! a dedicated class; values sit at fixed cell offsets. Any deviation from
//! that shape is reported as a single coarse failure.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{error, info};
use url::Url;

use super::document::PortalDocument;
use super::{CurrencyHandler, Extraction};
use crate::domain::{CountryCode, OperationResult, UsdQuote};
use crate::infrastructure::config::SourceSettings;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::notification::Notifier;

const ERROR_KEY: &str = "Html Error Dof";

/// Class carried by the bulletin table.
const QUOTE_TABLE_CLASS: &str = "Tabla_borde";

/// Cell offsets within the bulletin table.
const DATE_CELL: usize = 2;
const SALE_CELL: usize = 3;

pub struct DofHandler {
    http: Arc<HttpClient>,
    settings: SourceSettings,
    notifier: Arc<dyn Notifier>,
}

impl DofHandler {
    pub fn new(http: Arc<HttpClient>, settings: SourceSettings, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            http,
            settings,
            notifier,
        }
    }

    fn request_url(&self, date: NaiveDate) -> Result<Url> {
        let mut url = Url::parse(&self.settings.endpoint_url)
            .with_context(|| format!("Invalid DOF endpoint: {}", self.settings.endpoint_url))?;
        let stamp = date.format("%d/%m/%Y").to_string();
        url.query_pairs_mut()
            .append_pair("dfecha", &stamp)
            .append_pair("hfecha", &stamp);
        Ok(url)
    }

    pub(crate) async fn resolve_from_page(
        &self,
        body: &str,
        date: NaiveDate,
    ) -> OperationResult<UsdQuote> {
        let Extraction { result, alert } = self.read_quote(body, date);
        if let Some(message) = alert {
            self.notifier.notify(&message).await;
        }
        result
    }

    fn read_quote(&self, body: &str, date: NaiveDate) -> Extraction {
        let document = PortalDocument::parse(body);

        match self.quote_from_table(&document) {
            Some(quote) => {
                info!("Extracted DOF quote dated {}", quote.date);
                Extraction::quote(quote)
            }
            None => {
                error!("DOF bulletin table did not match the expected shape");
                Extraction::alerting_failure(
                    ERROR_KEY,
                    "Error getting HTML or date not holiday, please check HTML.",
                    self.alert_message(date),
                )
            }
        }
    }

    fn quote_from_table(&self, document: &PortalDocument) -> Option<UsdQuote> {
        let table = document.first_by_class(QUOTE_TABLE_CLASS)?;
        let date = table.cell(DATE_CELL)?.text();
        let sale = table.cell(SALE_CELL)?.text();

        // The bulletin publishes a single daily rate; the sale cell feeds
        // both values.
        Some(UsdQuote {
            date,
            buy_value: Some(sale.clone()),
            sale_value: sale,
            currency_name: self.settings.currency_label.clone(),
        })
    }

    fn alert_message(&self, date: NaiveDate) -> String {
        format!(
            "Can't get the USD quote for {} country, please check the portal HTML or whether {} is a holiday",
            CountryCode::Mex,
            date.format("%d/%m/%Y"),
        )
    }
}

#[async_trait]
impl CurrencyHandler for DofHandler {
    async fn handle(&self, date: NaiveDate) -> Result<OperationResult<UsdQuote>> {
        let url = self.request_url(date)?;
        info!("Requesting DOF bulletin: {}", url);

        let body = self.http.get_text(&url).await?;
        Ok(self.resolve_from_page(&body, date).await)
    }
}
