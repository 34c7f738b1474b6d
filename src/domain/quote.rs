//! The normalized quote record extracted from one portal page.

use serde::{Deserialize, Serialize};

/// One day's USD quote as published by a source portal.
///
/// All values are kept verbatim as source-formatted text (`"63,0000"`,
/// `"4/2/2020"`); they are never reparsed into numeric or date types, so the
/// source's precision and locale formatting survive untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdQuote {
    /// Date text from the matched table cell.
    pub date: String,
    /// Sale value text. Always present on a successful result.
    pub sale_value: String,
    /// Buy value text. Some source families publish a single rate and leave
    /// this absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_value: Option<String>,
    /// Configured label for the currency the quote is priced in.
    pub currency_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case() {
        let quote = UsdQuote {
            date: "4/2/2020".to_string(),
            sale_value: "63,0000".to_string(),
            buy_value: Some("58,0000".to_string()),
            currency_name: "Peso Argentino".to_string(),
        };

        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "4/2/2020",
                "saleValue": "63,0000",
                "buyValue": "58,0000",
                "currencyName": "Peso Argentino",
            })
        );
    }

    #[test]
    fn omits_an_absent_buy_value() {
        let quote = UsdQuote {
            date: "04/02/2020".to_string(),
            sale_value: "18.5000".to_string(),
            buy_value: None,
            currency_name: "Peso Mexicano".to_string(),
        };

        let value = serde_json::to_value(&quote).unwrap();
        assert!(value.get("buyValue").is_none());
    }
}
