//! Handler for the Banco de la Nación Argentina quote board.
//!
//! The portal renders a history table for the requested date. The handler
//! validates the table's heading row, then scans the body rows for the one
//! whose date cell matches the request, and reads buy/sale/date from fixed
//! cell positions of that row.

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

const ERROR_KEY: &str = "Html Error Bna";
const NO_QUOTE_KEY: &str = "No USD for this date";

/// Class the portal renders instead of the table when no quote exists for the
/// requested date.
const NO_RESULTS_CLASS: &str = "sinResultados";

/// Cell offsets within a matched body row.
const BUY_CELL: usize = 1;
const SALE_CELL: usize = 2;
const DATE_CELL: usize = 3;

pub struct BnaHandler {
    http: Arc<HttpClient>,
    settings: SourceSettings,
    notifier: Arc<dyn Notifier>,
}

impl BnaHandler {
    pub fn new(http: Arc<HttpClient>, settings: SourceSettings, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            http,
            settings,
            notifier,
        }
    }

    fn request_url(&self, date: NaiveDate) -> Result<Url> {
        let mut url = Url::parse(&self.settings.endpoint_url)
            .with_context(|| format!("Invalid BNA endpoint: {}", self.settings.endpoint_url))?;
        url.query_pairs_mut()
            .append_pair("fecha", &date.format("%d/%m/%Y").to_string());
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

        if document.contains_class(NO_RESULTS_CLASS) {
            info!("No USD quote published for {}", date);
            return Extraction::failure(NO_QUOTE_KEY, &self.settings.no_quote_message);
        }

        // Row 0 is the table heading; row 1 carries the currency label.
        let rows = document.elements_by_tag("tr");
        let Some(title_row) = rows.get(1) else {
            error!("BNA page has no quote table");
            return Extraction::alerting_failure(
                ERROR_KEY,
                "Error getting HTML, currently does not exist currency USD.",
                self.alert_message(date),
            );
        };

        if let Some(label_cell) = title_row.cell(0) {
            if label_cell.text() != self.settings.validation_label {
                error!(
                    "BNA table heading drifted: expected '{}', found '{}'",
                    self.settings.validation_label,
                    label_cell.text()
                );
                return Extraction::alerting_failure(
                    ERROR_KEY,
                    "Error getting HTML, currently does not exist currency USD.",
                    self.alert_message(date),
                );
            }
        }

        let wanted = date.format("%-d/%-m/%Y").to_string();
        let matched = document
            .elements_by_tag("tbody")
            .first()
            .map(|table_body| table_body.elements_by_tag("tr"))
            .unwrap_or_default()
            .into_iter()
            .find(|row| row.cell(DATE_CELL).is_some_and(|cell| cell.text() == wanted));

        let Some(row) = matched else {
            // An absent row is usually a holiday, not page drift; no alert.
            error!("No BNA quote row for {}", wanted);
            return Extraction::failure(
                ERROR_KEY,
                "Error getting HTML or date is holiday, please check HTML.",
            );
        };

        match (row.cell(BUY_CELL), row.cell(SALE_CELL), row.cell(DATE_CELL)) {
            (Some(buy), Some(sale), Some(quote_date)) => {
                info!("Extracted BNA quote for {}", wanted);
                Extraction::quote(UsdQuote {
                    date: quote_date.text(),
                    sale_value: sale.text(),
                    buy_value: Some(buy.text()),
                    currency_name: self.settings.currency_label.clone(),
                })
            }
            _ => {
                error!("BNA quote row for {} is missing cells", wanted);
                Extraction::alerting_failure(
                    ERROR_KEY,
                    "Error getting HTML, please check HTML.",
                    self.alert_message(date),
                )
            }
        }
    }

    fn alert_message(&self, date: NaiveDate) -> String {
        format!(
            "Can't get the USD quote for {} country, please check the portal HTML or whether {} is a holiday",
            CountryCode::Arg,
            date.format("%d/%m/%Y"),
        )
    }
}

#[async_trait]
impl CurrencyHandler for BnaHandler {
    async fn handle(&self, date: NaiveDate) -> Result<OperationResult<UsdQuote>> {
        let url = self.request_url(date)?;
        info!("Requesting BNA quote board: {}", url);

        let body = self.http.get_text(&url).await?;
        Ok(self.resolve_from_page(&body, date).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::HttpClientConfig;
    use crate::infrastructure::scraping::test_support::RecordingNotifier;

    const QUOTE_BOARD: &str = r#"<div id="cotizacionesCercanas">
        <table class="table table-bordered cotizador">
        <thead>
        <tr><th>Monedas</th><th>Compra</th><th>Venta</th><th>Fecha</th></tr>
        </thead>
        <tbody>
        <tr><td>Dolar U.S.A</td><td class="dest">58,0000</td><td class="dest">63,0000</td><td>4/2/2020</td></tr>
        <tr><td>Dolar U.S.A</td><td class="dest">59,0000</td><td class="dest">64,0000</td><td>5/2/2020</td></tr>
        </tbody>
        </table>
        </div>"#;

    const NO_RESULTS_PAGE: &str = r#"<div id="cotizacionesCercanas">
        <div class="sinResultados">No hay cotizaciones pendientes para esa fecha.</div>
        </div>"#;

    fn settings() -> SourceSettings {
        SourceSettings {
            endpoint_url:
                "https://example.com/Cotizador/HistoricoPrincipales?id=billetes&filtroDolar=1"
                    .to_string(),
            validation_label: "Dolar U.S.A".to_string(),
            no_quote_message: "No hay cotizaciones pendientes para esa fecha.".to_string(),
            currency_label: "Peso Argentino".to_string(),
        }
    }

    fn handler(notifier: Arc<RecordingNotifier>) -> BnaHandler {
        let http = Arc::new(HttpClient::new(HttpClientConfig::default()).unwrap());
        BnaHandler::new(http, settings(), notifier)
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn extracts_the_row_matching_the_requested_date() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = handler(Arc::clone(&notifier));

        let result = handler.resolve_from_page(QUOTE_BOARD, date(2020, 2, 4)).await;

        assert!(result.success());
        let quote = result.entity().unwrap();
        assert_eq!(quote.date, "4/2/2020");
        assert_eq!(quote.buy_value.as_deref(), Some("58,0000"));
        assert_eq!(quote.sale_value, "63,0000");
        assert_eq!(quote.currency_name, "Peso Argentino");
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn reports_a_holiday_when_no_row_matches() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = handler(Arc::clone(&notifier));
        let single_row_board = r#"<table>
            <thead><tr><th>Monedas</th><th>Compra</th><th>Venta</th><th>Fecha</th></tr></thead>
            <tbody>
            <tr><td>Dolar U.S.A</td><td>58,0000</td><td>63,0000</td><td>4/2/2020</td></tr>
            </tbody>
            </table>"#;

        let result = handler.resolve_from_page(single_row_board, date(2020, 2, 5)).await;

        assert!(!result.success());
        assert_eq!(
            result.messages_for("Html Error Bna").unwrap(),
            ["Error getting HTML or date is holiday, please check HTML."]
        );
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn reports_missing_quotes_without_alerting() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = handler(Arc::clone(&notifier));

        let result = handler
            .resolve_from_page(NO_RESULTS_PAGE, date(2021, 2, 14))
            .await;

        assert!(!result.success());
        assert_eq!(
            result.messages_for("No USD for this date").unwrap(),
            ["No hay cotizaciones pendientes para esa fecha."]
        );
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn alerts_when_the_quote_table_is_missing() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = handler(Arc::clone(&notifier));

        let result = handler
            .resolve_from_page(r#"<div id="cotizacionesCercanas"></div>"#, date(2020, 2, 4))
            .await;

        assert!(!result.success());
        assert_eq!(
            result.messages_for("Html Error Bna").unwrap(),
            ["Error getting HTML, currently does not exist currency USD."]
        );
        assert_eq!(notifier.count(), 1);
        let messages = notifier.messages.lock().unwrap();
        assert!(messages[0].contains("ARG"));
        assert!(messages[0].contains("04/02/2020"));
    }

    #[tokio::test]
    async fn alerts_when_the_heading_label_drifts() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = handler(Arc::clone(&notifier));
        let page = QUOTE_BOARD.replace("Dolar U.S.A", "Euro");

        let result = handler.resolve_from_page(&page, date(2020, 2, 4)).await;

        assert!(!result.success());
        assert!(result.messages_for("Html Error Bna").is_some());
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test]
    async fn a_title_row_without_cells_skips_label_validation() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = handler(Arc::clone(&notifier));
        let page = r#"<table>
            <thead><tr><th>Monedas</th></tr></thead>
            <tbody>
            <tr></tr>
            <tr><td>Dolar U.S.A</td><td>58,0000</td><td>63,0000</td><td>4/2/2020</td></tr>
            </tbody>
            </table>"#;

        let result = handler.resolve_from_page(page, date(2020, 2, 4)).await;

        assert!(result.success());
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn builds_the_request_url_with_the_padded_encoded_date() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = handler(notifier);

        let url = handler.request_url(date(2020, 2, 4)).unwrap();

        assert_eq!(
            url.as_str(),
            "https://example.com/Cotizador/HistoricoPrincipales?id=billetes&filtroDolar=1&fecha=04%2F02%2F2020"
        );
    }
}
