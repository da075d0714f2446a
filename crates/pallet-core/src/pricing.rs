//! # Price Calculator
//!
//! ```text
//! total = (base_price(pallet_spec) + Σ surcharge(service)) × num_pallets
//! ```
//!
//! Unrecognized pallet labels and non-affirmative service flags resolve to
//! zero instead of failing. Only `num_pallets` is required.

use crate::error::PricingResult;
use crate::money::Money;
use crate::rates::PriceTable;
use crate::request::{PricingRequest, Quote, PALLET_SPEC};
use tracing::debug;

/// Computes totals from a rate table. Holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct PriceCalculator {
    table: PriceTable,
}

impl PriceCalculator {
    pub fn new(table: PriceTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    /// Base price per pallet for the request's `pallet_spec`
    pub fn base_price(&self, request: &PricingRequest) -> Money {
        request
            .text(PALLET_SPEC)
            .map(|label| self.table.base_price(label))
            .unwrap_or(Money::ZERO)
    }

    /// Sum of the per-pallet surcharges switched on in the request
    pub fn surcharge_per_pallet(&self, request: &PricingRequest) -> PricingResult<Money> {
        self.table
            .services
            .iter()
            .filter(|service| request.flag_is(&service.field, &self.table.affirmative))
            .try_fold(Money::ZERO, |acc, service| {
                acc.checked_add(service.surcharge)
                    .ok_or_else(|| request.unexpected("surcharge total overflowed"))
            })
    }

    /// Compute the total cost for a request
    pub fn compute(&self, request: &PricingRequest) -> PricingResult<Money> {
        let num_pallets = request.num_pallets()?;
        let base = self.base_price(request);
        let surcharges = self.surcharge_per_pallet(request)?;

        let per_pallet = base
            .checked_add(surcharges)
            .ok_or_else(|| request.unexpected("per-pallet price overflowed"))?;

        let total = per_pallet.checked_mul(num_pallets).ok_or_else(|| {
            request.unexpected(format!(
                "total for {} pallets at {} overflowed",
                num_pallets, per_pallet
            ))
        })?;

        debug!(
            base = %base,
            surcharges = %surcharges,
            num_pallets,
            total = %total,
            "price_computed"
        );

        Ok(total)
    }

    /// Compute the total and wrap it in a quote with a fresh identifier
    pub fn quote(&self, request: &PricingRequest) -> PricingResult<Quote> {
        let total = self.compute(request)?;
        Ok(Quote::new(total, request.echoed()))
    }
}

/// Compute a total with the built-in rate table
pub fn compute(request: &PricingRequest) -> PricingResult<Money> {
    PriceCalculator::default().compute(request)
}
