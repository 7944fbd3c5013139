//! Loads the application configuration from the environment.

use std::env;

use crate::{Error, api::Credential, rates::RateFailurePolicy};

const DEFAULT_RATES_URL: &str = "https://api.frankfurter.dev/v1";
const DEFAULT_REFERENCE_CURRENCY: &str = "CHF";

/// Everything the clients need to talk to their backends.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The base URL of the transaction API deployment.
    pub api_base_url: String,
    /// The credential that authenticates against the transaction API.
    pub credential: Credential,
    /// The base URL of the exchange rate API.
    pub rates_base_url: String,
    /// The currency every `value_chf` is denominated in.
    pub reference_currency: String,
    /// What to do when a rate lookup fails.
    pub rate_failure_policy: RateFailurePolicy,
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// `RAPPEN_API_URL` and one of `RAPPEN_API_KEY` or
    /// `RAPPEN_API_TOKEN` are required; the key takes precedence when
    /// both are set. `RAPPEN_RATES_URL`, `RAPPEN_REFERENCE_CURRENCY`
    /// and `RAPPEN_RATE_FALLBACK` are optional and default to the
    /// Frankfurter API, CHF and failing the save.
    ///
    /// # Errors
    ///
    /// Returns [Error::Config] when a required variable is missing or
    /// `RAPPEN_RATE_FALLBACK` holds an unrecognized value.
    pub fn from_env() -> Result<Self, Error> {
        let api_base_url = env::var("RAPPEN_API_URL")
            .map_err(|_| Error::Config("RAPPEN_API_URL must be set".to_string()))?;

        let credential = if let Ok(key) = env::var("RAPPEN_API_KEY") {
            Credential::ApiKey(key)
        } else if let Ok(token) = env::var("RAPPEN_API_TOKEN") {
            Credential::Bearer(token)
        } else {
            return Err(Error::Config(
                "either RAPPEN_API_KEY or RAPPEN_API_TOKEN must be set".to_string(),
            ));
        };

        let rates_base_url =
            env::var("RAPPEN_RATES_URL").unwrap_or_else(|_| DEFAULT_RATES_URL.to_string());
        let reference_currency = env::var("RAPPEN_REFERENCE_CURRENCY")
            .unwrap_or_else(|_| DEFAULT_REFERENCE_CURRENCY.to_string());

        let rate_failure_policy = match env::var("RAPPEN_RATE_FALLBACK") {
            Err(_) => RateFailurePolicy::default(),
            Ok(value) => match value.as_str() {
                "fail" => RateFailurePolicy::Fail,
                "fallbackToOne" => RateFailurePolicy::FallbackToOne,
                other => {
                    return Err(Error::Config(format!(
                        "RAPPEN_RATE_FALLBACK must be \"fail\" or \"fallbackToOne\", got \"{other}\""
                    )));
                }
            },
        };

        Ok(Self {
            api_base_url,
            credential,
            rates_base_url,
            reference_currency,
            rate_failure_policy,
        })
    }
}

#[cfg(test)]
mod config_tests {
    use crate::{
        api::Credential,
        config::Config,
        rates::RateFailurePolicy,
    };

    // Environment variables are process-wide, so everything runs in one
    // test to avoid interleaving with parallel tests.
    #[test]
    fn reads_configuration_from_environment() {
        unsafe {
            std::env::set_var("RAPPEN_API_URL", "https://example.test/exec");
            std::env::set_var("RAPPEN_API_KEY", "secret");
            std::env::remove_var("RAPPEN_API_TOKEN");
            std::env::remove_var("RAPPEN_RATES_URL");
            std::env::remove_var("RAPPEN_REFERENCE_CURRENCY");
            std::env::set_var("RAPPEN_RATE_FALLBACK", "fallbackToOne");
        }

        let config = Config::from_env().expect("config should load");

        assert_eq!(config.api_base_url, "https://example.test/exec");
        assert_eq!(config.credential, Credential::ApiKey("secret".to_string()));
        assert_eq!(config.rates_base_url, "https://api.frankfurter.dev/v1");
        assert_eq!(config.reference_currency, "CHF");
        assert_eq!(
            config.rate_failure_policy,
            RateFailurePolicy::FallbackToOne
        );

        unsafe {
            std::env::set_var("RAPPEN_RATE_FALLBACK", "sometimes");
        }
        assert!(matches!(
            Config::from_env(),
            Err(crate::Error::Config(_))
        ));

        unsafe {
            std::env::remove_var("RAPPEN_RATE_FALLBACK");
            std::env::remove_var("RAPPEN_API_KEY");
            std::env::set_var("RAPPEN_API_TOKEN", "bearer-token");
        }
        let config = Config::from_env().expect("config should load");
        assert_eq!(
            config.credential,
            Credential::Bearer("bearer-token".to_string())
        );

        unsafe {
            std::env::remove_var("RAPPEN_API_URL");
            std::env::remove_var("RAPPEN_API_TOKEN");
        }
        assert!(matches!(
            Config::from_env(),
            Err(crate::Error::Config(_))
        ));
    }
}
