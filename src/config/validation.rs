//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses, URLs and amounts parse
//! - Validate value ranges (timeouts > 0, attempts >= 1)
//!
//! Returns all validation errors, not just the first.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::Address;

use crate::config::schema::ToolkitConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ToolkitConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "chain.rpc_url", &config.chain.rpc_url);
    for url in &config.chain.failover_urls {
        check_url(&mut errors, "chain.failover_urls", url);
    }
    check_url(&mut errors, "chain.explorer_url", &config.chain.explorer_url);
    check_url(&mut errors, "api.base_url", &config.api.base_url);
    check_url(&mut errors, "api.zenith_faucet_url", &config.api.zenith_faucet_url);

    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chain.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.chain.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "chain.confirmation_timeout_secs",
            "must be greater than 0",
        ));
    }
    if !(config.chain.gas_price_multiplier > 0.0) {
        errors.push(ValidationError::new(
            "chain.gas_price_multiplier",
            "must be greater than 0",
        ));
    }
    if config.api.request_timeout_secs == 0 {
        errors.push(ValidationError::new("api.request_timeout_secs", "must be greater than 0"));
    }
    if config.api.timezone.parse::<chrono_tz::Tz>().is_err() {
        errors.push(ValidationError::new(
            "api.timezone",
            format!("unknown timezone '{}'", config.api.timezone),
        ));
    }

    let contracts = &config.contracts;
    check_address(&mut errors, "contracts.swap_router", &contracts.swap_router);
    check_address(&mut errors, "contracts.position_manager", &contracts.position_manager);
    check_address(&mut errors, "contracts.wrapped_native", &contracts.wrapped_native);
    check_address(&mut errors, "contracts.usdc", &contracts.usdc);
    check_address(&mut errors, "contracts.usdt", &contracts.usdt);
    if !matches!(contracts.pool_fee, 100 | 500 | 3000 | 10_000) {
        errors.push(ValidationError::new(
            "contracts.pool_fee",
            format!("unsupported fee tier {}", contracts.pool_fee),
        ));
    }

    check_amount(&mut errors, "amounts.swap_native", &config.amounts.swap_native);
    check_amount(&mut errors, "amounts.lp_native", &config.amounts.lp_native);
    check_amount(&mut errors, "amounts.lp_token", &config.amounts.lp_token);
    check_amount(&mut errors, "amounts.transfer_native", &config.amounts.transfer_native);

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::new("retries.max_attempts", "must be at least 1"));
    }
    if config.run.max_transactions == 0 {
        errors.push(ValidationError::new("run.max_transactions", "must be at least 1"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if let Err(e) = value.parse::<url::Url>() {
        errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e)));
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.parse::<Address>().is_err() {
        errors.push(ValidationError::new(field, format!("invalid address '{}'", value)));
    }
}

fn check_amount(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    match parse_ether(value) {
        Ok(amount) if amount.is_zero() => {
            errors.push(ValidationError::new(field, "must be greater than 0"));
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(ValidationError::new(field, format!("invalid amount '{}': {}", value, e)));
        }
    }
}
