//! # pallet-core
//!
//! Pricing rules for the pallet-pricer service.
//!
//! This crate provides:
//! - `PricingRequest`, the raw request as submitted
//! - `PriceTable`, the base prices and service surcharges
//! - `PriceCalculator`, which turns a request into a `Money` total or a `Quote`
//! - `PricingError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use pallet_core::{Money, PriceCalculator, PricingRequest};
//! use serde_json::json;
//!
//! let request = PricingRequest::from_value(json!({
//!     "pallet_spec": "IPPC棧板",
//!     "corner_protection": "是",
//!     "num_pallets": 2
//! }))
//! .unwrap();
//!
//! let total = PriceCalculator::default().compute(&request).unwrap();
//! assert_eq!(total, Money::from_units(180));
//! ```

pub mod error;
pub mod money;
pub mod pricing;
pub mod rates;
pub mod request;

// Re-exports for convenience
pub use error::{PricingError, PricingResult, RateTableError};
pub use money::Money;
pub use pricing::{compute, PriceCalculator};
pub use rates::{PalletTier, PriceTable, ServiceRate, AFFIRMATIVE};
pub use request::{EchoedFields, PricingRequest, Quote};
