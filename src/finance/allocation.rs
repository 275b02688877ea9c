use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Fractions of income carved out for savings, debt payment and investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AllocationRates {
    pub(crate) savings: Decimal,
    pub(crate) debt: Decimal,
    pub(crate) investment: Decimal,
}

impl Default for AllocationRates {
    /// 10% savings, 5% debt, 10% investment.
    fn default() -> Self {
        Self {
            savings: Decimal::new(10, 2),
            debt: Decimal::new(5, 2),
            investment: Decimal::new(10, 2),
        }
    }
}

impl AllocationRates {
    /// Build rates from whole percentages (`10` means 10%), rejecting
    /// anything outside 0..=100 or summing past 100.
    pub(crate) fn from_percentages(
        savings: Decimal,
        debt: Decimal,
        investment: Decimal,
    ) -> Result<Self, ValidationError> {
        let hundred = Decimal::ONE_HUNDRED;
        for pct in [savings, debt, investment] {
            if pct < Decimal::ZERO || pct > hundred {
                return Err(ValidationError::InvalidRate(format!("{pct}%")));
            }
        }
        if savings + debt + investment > hundred {
            return Err(ValidationError::RatesExceedIncome);
        }
        Ok(Self {
            savings: savings / hundred,
            debt: debt / hundred,
            investment: investment / hundred,
        })
    }

    /// Parse `"10,5,10"` or `"10 5 10"` as percentages.
    pub(crate) fn parse_percentages(s: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 {
            return Err(ValidationError::InvalidRate(s.trim().to_string()));
        }
        let mut values = [Decimal::ZERO; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            let cleaned = part.trim_end_matches('%');
            *slot = cleaned
                .parse::<Decimal>()
                .map_err(|_| ValidationError::InvalidRate((*part).to_string()))?;
        }
        Self::from_percentages(values[0], values[1], values[2])
    }

    pub(crate) fn total(&self) -> Decimal {
        self.savings + self.debt + self.investment
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Allocation {
    pub(crate) savings: Decimal,
    pub(crate) debt: Decimal,
    pub(crate) investment: Decimal,
}

impl Allocation {
    pub(crate) fn total(&self) -> Decimal {
        self.savings + self.debt + self.investment
    }
}

/// Apply each rate to `amount`. Zero and negative amounts pass through
/// unchanged in sign.
pub(crate) fn allocate(amount: Decimal, rates: &AllocationRates) -> Allocation {
    Allocation {
        savings: amount * rates.savings,
        debt: amount * rates.debt,
        investment: amount * rates.investment,
    }
}

/// Format a rate as a whole percentage, e.g. `0.05` → `"5%"`.
pub(crate) fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
