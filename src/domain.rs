//! Core data model shared by every quote resolution path.

pub mod country;
pub mod quote;
pub mod result;

pub use country::{CountryCode, UnsupportedCountry};
pub use quote::UsdQuote;
pub use result::OperationResult;
