//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two externally-sourced values the dashboard polls for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    PoolAmount,
    UnitPrice,
}

impl FeedKind {
    pub fn name(&self) -> &'static str {
        match self {
            FeedKind::PoolAmount => "pool-amount",
            FeedKind::UnitPrice => "unit-price",
        }
    }

    /// Label used in the error banner
    pub fn label(&self) -> &'static str {
        match self {
            FeedKind::PoolAmount => "Pool data",
            FeedKind::UnitPrice => "Price data",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The four statistic cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    PoolTotal,
    Apy,
    AnnualYield,
    MonthlyYield,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::PoolTotal,
        Statistic::Apy,
        Statistic::AnnualYield,
        Statistic::MonthlyYield,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Statistic::PoolTotal => "Total Pool",
            Statistic::Apy => "Fixed APY",
            Statistic::AnnualYield => "Est. Annual Yield",
            Statistic::MonthlyYield => "Est. Monthly Yield",
        }
    }

    /// Decimal places used when rendering the animated value
    pub fn decimals(&self) -> usize {
        match self {
            Statistic::PoolTotal => 0,
            Statistic::Apy => 2,
            Statistic::AnnualYield => 2,
            Statistic::MonthlyYield => 2,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
