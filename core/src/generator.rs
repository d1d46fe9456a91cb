//! Synthetic sales data generator.
//!
//! Every draw comes from the injected SalesRng, in a fixed documented
//! order, so (seed, count, anchor_date) fully determines the dataset.
//!
//! DRAW ORDER per transaction (never reorder — it changes every seeded
//! dataset): day offset, hour, minute, city, store, customer id,
//! payment method, basket size, then per basket slot: category, product,
//! base price, quantity, rating.

use crate::{
    catalog::{PAYMENT_WEIGHTS, PRODUCTS, STORES, TAX_RATE},
    model::{round1, round2, LineItem, PaymentMethod, Transaction},
    rng::SalesRng,
};
use chrono::{Duration, NaiveDate, NaiveTime};

/// Transactions are stamped within this many days before the anchor.
pub const WINDOW_DAYS: i64 = 90;

/// Default dataset size, matching the recorded baseline.
pub const DEFAULT_COUNT: usize = 1200;

/// Default master seed for reproducible reporting.
pub const DEFAULT_SEED: u64 = 42;

/// Quality premium: higher-rated products carry a price markup.
/// Tier lower bounds are inclusive.
fn price_multiplier(rating: f64) -> f64 {
    if rating >= 4.5 {
        1.15
    } else if rating >= 4.0 {
        1.05
    } else {
        1.0
    }
}

fn draw_payment(rng: &mut SalesRng) -> PaymentMethod {
    let weights: Vec<f64> = PAYMENT_WEIGHTS.iter().map(|(_, w)| *w).collect();
    PAYMENT_WEIGHTS[rng.weighted_choice(&weights)].0
}

/// Generate `count` transactions and their line items. Timestamps fall
/// in the trailing `WINDOW_DAYS`-day window ending the day before
/// `anchor_date`, with hours in [6, 22).
pub fn generate(
    count: usize,
    anchor_date: NaiveDate,
    rng: &mut SalesRng,
) -> (Vec<Transaction>, Vec<LineItem>) {
    let mut transactions = Vec::with_capacity(count);
    let mut items = Vec::new();

    let window_start = anchor_date - Duration::days(WINDOW_DAYS);

    for i in 0..count {
        let date = window_start + Duration::days(rng.next_u64_below(WINDOW_DAYS as u64) as i64);
        let hour = rng.int_in(6, 21);
        let minute = rng.int_in(0, 59);
        let time = NaiveTime::from_hms_opt(hour, minute, 0).expect("hour/minute in range");

        let (city, city_stores) = STORES[rng.next_u64_below(STORES.len() as u64) as usize];
        let store = city_stores[rng.next_u64_below(city_stores.len() as u64) as usize];

        let customer_id = format!("C{}", rng.int_in(1000, 9999));
        let payment_method = draw_payment(rng);

        let transaction_id = format!("TXN{}", 10_000 + i);
        let basket_size = rng.int_in(1, 7);
        let mut subtotal = 0.0;

        for _ in 0..basket_size {
            let (category, category_products) =
                PRODUCTS[rng.next_u64_below(PRODUCTS.len() as u64) as usize];
            let product =
                category_products[rng.next_u64_below(category_products.len() as u64) as usize];

            let base_price = round2(rng.float_in(1.99, 29.99));
            let quantity = rng.int_in(1, 3);
            let rating = round1(rng.float_in(3.2, 4.8));

            let unit_price = round2(base_price * price_multiplier(rating));
            let item_total = round2(unit_price * quantity as f64);
            subtotal += item_total;

            items.push(LineItem {
                transaction_id: transaction_id.clone(),
                product: product.to_string(),
                category: category.to_string(),
                quantity,
                unit_price,
                item_total,
                rating,
            });
        }

        let subtotal = round2(subtotal);
        let tax = round2(subtotal * TAX_RATE);
        let gross_income = round2(subtotal + tax);

        transactions.push(Transaction {
            transaction_id,
            date,
            time,
            city: city.to_string(),
            store: store.to_string(),
            customer_id,
            payment_method,
            num_items: basket_size,
            subtotal,
            tax,
            gross_income,
        });
    }

    log::info!(
        "generated {} transactions, {} line items",
        transactions.len(),
        items.len()
    );

    (transactions, items)
}
