//! The aggregation query set: typed result rows for the five fixed
//! views, plus the derived scalar metrics the report consumes.
//!
//! The SQL lives in `store::queries`; this module owns the row shapes
//! and the division-safe derivations so an empty dataset can never leak
//! a NaN or infinity into a displayed percentage.

use serde::{Deserialize, Serialize};

/// Top-products view row cap.
pub const TOP_PRODUCTS_LIMIT: usize = 15;

/// Fixed rating ranges used to group line items for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingBucket {
    High,
    Good,
    Average,
    Low,
}

impl RatingBucket {
    /// Bucket assignment is total: anything below 3.5 (including
    /// out-of-range ratings under 3.0) lands in Low.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::High
        } else if rating >= 4.0 {
            Self::Good
        } else if rating >= 3.5 {
            Self::Average
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High (4.5-5.0)",
            Self::Good => "Good (4.0-4.4)",
            Self::Average => "Average (3.5-3.9)",
            Self::Low => "Low (3.0-3.4)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdownRow {
    pub payment_method: String,
    pub transaction_count: i64,
    pub total_revenue: f64,
    /// Share of grand-total gross income, one decimal.
    pub revenue_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucketRow {
    pub bucket: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub product_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDailyRow {
    /// ISO date (`%Y-%m-%d`), so lexical order is chronological order.
    pub date: String,
    pub city: String,
    pub daily_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub total_revenue: f64,
    pub total_quantity: i64,
    pub avg_rating: f64,
    pub product_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub product: String,
    pub category: String,
    pub total_revenue: f64,
    pub total_quantity: i64,
    pub avg_rating: f64,
}

/// Scalar metrics derived from the views, consumed by the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub total_revenue: f64,
    pub total_transactions: i64,
    pub cash_percentage: f64,
    pub category_count: i64,
    pub high_rating_revenue_pct: f64,
}

/// `part / whole * 100`, one decimal, 0.0 when there is nothing to
/// divide by.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        crate::model::round1(part / whole * 100.0)
    } else {
        0.0
    }
}

/// Cash share of revenue from the payment view; 0 when no Cash row
/// exists.
pub fn cash_percentage(rows: &[PaymentBreakdownRow]) -> f64 {
    rows.iter()
        .find(|r| r.payment_method == "Cash")
        .map(|r| r.revenue_percentage)
        .unwrap_or(0.0)
}

/// Share of bucketed revenue contributed by the High bucket.
pub fn high_rating_share(rows: &[RatingBucketRow]) -> f64 {
    let total: f64 = rows.iter().map(|r| r.total_revenue).sum();
    let high: f64 = rows
        .iter()
        .filter(|r| r.bucket == RatingBucket::High.label())
        .map(|r| r.total_revenue)
        .sum();
    percentage(high, total)
}
