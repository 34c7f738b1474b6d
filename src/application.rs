//! Application services coordinating the domain and infrastructure layers.

pub mod quote_service;

pub use quote_service::QuoteService;
