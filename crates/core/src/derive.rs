//! Derived yield and USD figures
//!
//! Pure recomputation of dependent values whenever their inputs change.
//! Absence of an input propagates as absence of the derived value, never as
//! zero or a stale prior value.

use serde::{Deserialize, Serialize};

/// Figures derived from the two feed values and the fixed annual rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// `pool × rate`, XRP units
    pub annual_yield: Option<f64>,
    /// `annual_yield / 12`, XRP units
    pub monthly_yield: Option<f64>,
    /// `pool × price`, USD
    pub pool_usd: Option<f64>,
    /// `annual_yield × price`, USD; suppressed while pool data is absent
    pub annual_yield_usd: Option<f64>,
}

impl DerivedStats {
    /// Recompute every figure from the current feed values.
    pub fn compute(pool_xrp: Option<f64>, unit_price_usd: Option<f64>, annual_rate: f64) -> Self {
        let annual_yield = pool_xrp.map(|pool| pool * annual_rate);
        let monthly_yield = annual_yield.map(|annual| annual / 12.0);

        let pool_usd = match (pool_xrp, unit_price_usd) {
            (Some(pool), Some(price)) => Some(pool * price),
            _ => None,
        };
        let annual_yield_usd = match (annual_yield, unit_price_usd) {
            (Some(annual), Some(price)) => Some(annual * price),
            _ => None,
        };

        Self {
            annual_yield,
            monthly_yield,
            pool_usd,
            annual_yield_usd,
        }
    }

    /// Value backing a given statistic card, `None` when its inputs are absent.
    pub fn statistic_value(&self, stat: crate::Statistic, pool_xrp: Option<f64>, annual_rate: f64) -> Option<f64> {
        match stat {
            crate::Statistic::PoolTotal => pool_xrp,
            crate::Statistic::Apy => Some(annual_rate * 100.0),
            crate::Statistic::AnnualYield => self.annual_yield,
            crate::Statistic::MonthlyYield => self.monthly_yield,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yield_from_pool() {
        let stats = DerivedStats::compute(Some(1_000_000.0), None, 0.04);
        assert_eq!(stats.annual_yield, Some(40_000.0));
        let monthly = stats.monthly_yield.unwrap();
        assert!((monthly - 3_333.33).abs() < 0.01);
    }

    #[test]
    fn test_pool_usd() {
        let stats = DerivedStats::compute(Some(1_000_000.0), Some(0.50), 0.04);
        assert_eq!(stats.pool_usd, Some(500_000.0));
        assert_eq!(stats.annual_yield_usd, Some(20_000.0));
    }

    #[test]
    fn test_absent_price_suppresses_usd() {
        let stats = DerivedStats::compute(Some(1_000_000.0), None, 0.04);
        assert_eq!(stats.pool_usd, None);
        assert_eq!(stats.annual_yield_usd, None);
    }

    #[test]
    fn test_absent_pool_propagates() {
        // No "0.00 yield" before the first successful fetch
        let stats = DerivedStats::compute(None, Some(0.50), 0.04);
        assert_eq!(stats.annual_yield, None);
        assert_eq!(stats.monthly_yield, None);
        assert_eq!(stats.pool_usd, None);
        assert_eq!(stats.annual_yield_usd, None);
    }

    #[test]
    fn test_statistic_values() {
        let pool = Some(1_000_000.0);
        let stats = DerivedStats::compute(pool, Some(0.50), 0.04);
        assert_eq!(stats.statistic_value(crate::Statistic::Apy, pool, 0.04), Some(4.0));
        assert_eq!(
            stats.statistic_value(crate::Statistic::AnnualYield, pool, 0.04),
            Some(40_000.0)
        );
        assert_eq!(
            stats.statistic_value(crate::Statistic::PoolTotal, pool, 0.04),
            Some(1_000_000.0)
        );
    }
}
