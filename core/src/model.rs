//! Core record types shared by the generator, the CSV layer, and the
//! SQLite store.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// How a transaction was paid. Serialized (CSV and SQLite alike) as the
/// human-readable label, e.g. "Credit Card".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    Digital,
    #[serde(rename = "Gift Card")]
    GiftCard,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Digital => "Digital",
            Self::GiftCard => "Gift Card",
        }
    }
}

/// One purchase event. `subtotal`, `tax` and `gross_income` are rounded
/// to cents; `gross_income = subtotal + tax` with `tax = subtotal * 8.25%`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub city: String,
    pub store: String,
    pub customer_id: String,
    pub payment_method: PaymentMethod,
    pub num_items: u32,
    pub subtotal: f64,
    pub tax: f64,
    pub gross_income: f64,
}

/// One product line inside a transaction's basket. Items never outlive
/// their owning transaction; `transaction_id` is the back-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub transaction_id: String,
    pub product: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub item_total: f64,
    pub rating: f64,
}

/// One-row dataset summary written next to the two record files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_transactions: u64,
    pub total_revenue: f64,
    pub cash_revenue: f64,
    pub cash_percentage: f64,
}

/// Round to cents.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to one decimal (ratings, percentages).
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_labels() {
        assert_eq!(PaymentMethod::Cash.as_str(), "Cash");
        assert_eq!(PaymentMethod::CreditCard.as_str(), "Credit Card");
        assert_eq!(PaymentMethod::GiftCard.as_str(), "Gift Card");
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round1(4.449), 4.4);
        assert_eq!(round1(4.45), 4.5);
    }
}
