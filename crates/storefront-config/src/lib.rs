//! Configuration module for the storefront core.
//!
//! This module provides structures and utilities for managing storefront
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required configuration values are
//! properly set before any component is wired up.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::str::FromStr;
use storefront_types::Money;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the storefront core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to the storefront instance.
	pub storefront: StorefrontConfig,
	/// Configuration for pricing.
	pub pricing: PricingConfig,
	/// Configuration for the storage backend.
	#[serde(default)]
	pub storage: StorageConfig,
}

/// Configuration specific to the storefront instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorefrontConfig {
	/// Unique identifier for this storefront instance.
	pub id: String,
	/// ISO 4217 currency code used for display formatting.
	#[serde(default = "default_currency")]
	pub currency: String,
}

/// Returns the default currency code.
fn default_currency() -> String {
	"EUR".to_string()
}

/// Configuration for pricing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
	/// Flat delivery fee applied to every non-empty cart, as a decimal
	/// amount in major units (e.g., "2.50").
	#[serde(deserialize_with = "deserialize_money")]
	pub delivery_fee: Money,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Name of the storage backend implementation to use.
	#[serde(default = "default_storage_backend")]
	pub backend: String,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			backend: default_storage_backend(),
		}
	}
}

/// Returns the default storage backend name.
fn default_storage_backend() -> String {
	"memory".to_string()
}

/// Deserializes a monetary amount from a decimal string like "2.50".
fn deserialize_money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	raw.parse().map_err(serde::de::Error::custom)
}

impl Config {
	/// Loads configuration from a TOML file and validates it.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		contents.parse()
	}

	/// Validates the configuration after deserialization.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.storefront.id.is_empty() {
			return Err(ConfigError::Validation(
				"storefront.id must not be empty".to_string(),
			));
		}
		if self.storefront.currency.len() != 3
			|| !self
				.storefront
				.currency
				.chars()
				.all(|c| c.is_ascii_uppercase())
		{
			return Err(ConfigError::Validation(format!(
				"storefront.currency must be a 3-letter ISO code, got '{}'",
				self.storefront.currency
			)));
		}
		if self.pricing.delivery_fee.is_negative() {
			return Err(ConfigError::Validation(
				"pricing.delivery_fee must not be negative".to_string(),
			));
		}
		if self.storage.backend != "memory" {
			return Err(ConfigError::Validation(format!(
				"unknown storage backend '{}'",
				self.storage.backend
			)));
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}
