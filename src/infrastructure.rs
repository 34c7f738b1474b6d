//! Infrastructure layer: configuration, HTTP, logging, alerting, and the
//! per-portal scraping handlers.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod notification;
pub mod scraping;

pub use config::{AppConfig, SourceSettings};
pub use http_client::{HttpClient, HttpClientConfig};
pub use notification::{Notifier, SlackNotifier};
pub use scraping::{BnaHandler, CurrencyHandler, DofHandler};
