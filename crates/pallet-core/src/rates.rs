//! # Rate Table
//!
//! Per-pallet base prices and service surcharges.
//! The built-in defaults can be replaced by a table loaded from `config/rates.toml`.

use crate::error::RateTableError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Token a service field must equal to be billed
pub const AFFIRMATIVE: &str = "是";

/// Export-compliant pallet label
pub const EXPORT_COMPLIANT_PALLET: &str = "符合出入口規格托盤";

/// IPPC-certified pallet label
pub const IPPC_PALLET: &str = "IPPC棧板";

/// A recognized pallet specification and its base price per pallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletTier {
    pub label: String,
    pub price: Money,
}

impl PalletTier {
    pub fn new(label: impl Into<String>, price: Money) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }
}

/// A per-pallet service billed when its request field is affirmative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRate {
    /// Request field that switches the service on
    pub field: String,
    /// Surcharge per pallet
    pub surcharge: Money,
}

impl ServiceRate {
    pub fn new(field: impl Into<String>, surcharge: Money) -> Self {
        Self {
            field: field.into(),
            surcharge,
        }
    }
}

/// Rate table (loaded from config or built in)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    #[serde(default = "default_affirmative")]
    pub affirmative: String,

    #[serde(default)]
    pub pallet_tiers: Vec<PalletTier>,

    #[serde(default)]
    pub services: Vec<ServiceRate>,
}

fn default_affirmative() -> String {
    AFFIRMATIVE.to_string()
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            affirmative: default_affirmative(),
            pallet_tiers: vec![
                PalletTier::new(EXPORT_COMPLIANT_PALLET, Money::from_units(100)),
                PalletTier::new(IPPC_PALLET, Money::from_units(70)),
            ],
            services: vec![
                ServiceRate::new("wrap_plastic", Money::from_units(50)),
                ServiceRate::new("corner_protection", Money::from_units(20)),
                // Not billed yet
                ServiceRate::new("report_pallet_size", Money::ZERO),
                ServiceRate::new("take_photo", Money::ZERO),
                ServiceRate::new("assist_loading", Money::from_units(60)),
            ],
        }
    }
}

impl PriceTable {
    /// Base price for a pallet label; unrecognized labels cost nothing
    pub fn base_price(&self, label: &str) -> Money {
        self.pallet_tiers
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.price)
            .unwrap_or(Money::ZERO)
    }

    /// Find a service by its request field
    pub fn service(&self, field: &str) -> Option<&ServiceRate> {
        self.services.iter().find(|s| s.field == field)
    }

    /// Load and validate a table from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, RateTableError> {
        let table: PriceTable = toml::from_str(toml_str)?;
        table.validate()?;
        Ok(table)
    }

    /// Reject negative amounts and duplicate entries
    pub fn validate(&self) -> Result<(), RateTableError> {
        let mut seen = HashSet::new();
        for tier in &self.pallet_tiers {
            if tier.price.is_negative() {
                return Err(RateTableError::NegativeAmount {
                    name: tier.label.clone(),
                });
            }
            if !seen.insert(tier.label.as_str()) {
                return Err(RateTableError::Duplicate {
                    name: tier.label.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for service in &self.services {
            if service.surcharge.is_negative() {
                return Err(RateTableError::NegativeAmount {
                    name: service.field.clone(),
                });
            }
            if !seen.insert(service.field.as_str()) {
                return Err(RateTableError::Duplicate {
                    name: service.field.clone(),
                });
            }
        }

        Ok(())
    }
}
