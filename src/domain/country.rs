//! Country codes with a supported quote source.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Countries whose portal has a scraping handler. Anything outside this set is
/// rejected before any network traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryCode {
    /// Argentina (Banco de la Nación quote board).
    Arg,
    /// Mexico (Diario Oficial de la Federación indicator page).
    Mex,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0} is not a supported country")]
pub struct UnsupportedCountry(pub String);

impl FromStr for CountryCode {
    type Err = UnsupportedCountry;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "arg" => Ok(Self::Arg),
            "mex" => Ok(Self::Mex),
            _ => Err(UnsupportedCountry(raw.to_string())),
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arg => write!(f, "ARG"),
            Self::Mex => write!(f, "MEX"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("arg", CountryCode::Arg)]
    #[case("Arg", CountryCode::Arg)]
    #[case("ARG", CountryCode::Arg)]
    #[case("mex", CountryCode::Mex)]
    #[case("MEX", CountryCode::Mex)]
    fn parses_known_codes_case_insensitively(#[case] raw: &str, #[case] expected: CountryCode) {
        assert_eq!(raw.parse::<CountryCode>().unwrap(), expected);
    }

    #[rstest]
    #[case("TEST")]
    #[case("usa")]
    #[case("")]
    fn rejects_unknown_codes(#[case] raw: &str) {
        let error = raw.parse::<CountryCode>().unwrap_err();
        assert_eq!(error.to_string(), format!("{raw} is not a supported country"));
    }
}
