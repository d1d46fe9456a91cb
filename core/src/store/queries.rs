use super::SalesStore;
use crate::{
    analytics::{
        cash_percentage, high_rating_share, percentage, CategoryRow, CityDailyRow, KeyMetrics,
        PaymentBreakdownRow, ProductRow, RatingBucketRow,
    },
    error::PipelineResult,
};
use rusqlite::params;

impl SalesStore {
    // ── Aggregation query set ──────────────────────────────────────

    /// Per payment method: transaction count, revenue, and share of
    /// grand-total gross income. Ordered by revenue, highest first.
    pub fn payment_breakdown(&self) -> PipelineResult<Vec<PaymentBreakdownRow>> {
        let grand_total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(gross_income), 0.0) FROM transactions",
            [],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT payment_method, COUNT(*) AS transaction_count,
                    SUM(gross_income) AS total_revenue
             FROM transactions
             GROUP BY payment_method
             ORDER BY total_revenue DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (payment_method, transaction_count, total_revenue) = row?;
            out.push(PaymentBreakdownRow {
                payment_method,
                transaction_count,
                total_revenue,
                revenue_percentage: percentage(total_revenue, grand_total),
            });
        }
        Ok(out)
    }

    /// Line items grouped into the four fixed rating buckets.
    /// Ordered by revenue, highest first.
    pub fn rating_performance(&self) -> PipelineResult<Vec<RatingBucketRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT CASE
                        WHEN rating >= 4.5 THEN 'High (4.5-5.0)'
                        WHEN rating >= 4.0 THEN 'Good (4.0-4.4)'
                        WHEN rating >= 3.5 THEN 'Average (3.5-3.9)'
                        ELSE 'Low (3.0-3.4)'
                    END AS rating_bucket,
                    SUM(quantity) AS total_quantity,
                    SUM(item_total) AS total_revenue,
                    COUNT(DISTINCT product) AS product_count
             FROM transaction_items
             GROUP BY rating_bucket
             ORDER BY total_revenue DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RatingBucketRow {
                bucket: row.get(0)?,
                total_quantity: row.get(1)?,
                total_revenue: row.get(2)?,
                product_count: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Gross income per (date, city), chronological order.
    pub fn city_daily_revenue(&self) -> PipelineResult<Vec<CityDailyRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, city, SUM(gross_income) AS daily_revenue
             FROM transactions
             GROUP BY date, city
             ORDER BY date",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CityDailyRow {
                date: row.get(0)?,
                city: row.get(1)?,
                daily_revenue: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Per-category revenue, volume, mean rating and distinct product
    /// count. Ordered by revenue, highest first.
    pub fn category_performance(&self) -> PipelineResult<Vec<CategoryRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT category,
                    SUM(item_total) AS total_revenue,
                    SUM(quantity) AS total_quantity,
                    AVG(rating) AS avg_rating,
                    COUNT(DISTINCT product) AS product_count
             FROM transaction_items
             GROUP BY category
             ORDER BY total_revenue DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryRow {
                category: row.get(0)?,
                total_revenue: row.get(1)?,
                total_quantity: row.get(2)?,
                avg_rating: row.get(3)?,
                product_count: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// The `limit` highest-revenue (product, category) pairs.
    pub fn top_products(&self, limit: usize) -> PipelineResult<Vec<ProductRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT product, category,
                    SUM(item_total) AS total_revenue,
                    SUM(quantity) AS total_quantity,
                    AVG(rating) AS avg_rating
             FROM transaction_items
             GROUP BY product, category
             ORDER BY total_revenue DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(ProductRow {
                product: row.get(0)?,
                category: row.get(1)?,
                total_revenue: row.get(2)?,
                total_quantity: row.get(3)?,
                avg_rating: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Scalar metrics for the report header. All derivations are
    /// division-safe on an empty dataset.
    pub fn key_metrics(&self) -> PipelineResult<KeyMetrics> {
        let (total_transactions, total_revenue): (i64, f64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(gross_income), 0.0) FROM transactions",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let category_count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT category) FROM transaction_items",
            [],
            |row| row.get(0),
        )?;

        let payments = self.payment_breakdown()?;
        let buckets = self.rating_performance()?;

        Ok(KeyMetrics {
            total_revenue,
            total_transactions,
            cash_percentage: cash_percentage(&payments),
            category_count,
            high_rating_revenue_pct: high_rating_share(&buckets),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analytics::{RatingBucket, TOP_PRODUCTS_LIMIT},
        generator::{self, DEFAULT_COUNT, DEFAULT_SEED},
        model::{LineItem, PaymentMethod, Transaction},
        rng::SalesRng,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn loaded_store(count: usize, seed: u64) -> SalesStore {
        let mut rng = SalesRng::seeded(seed);
        let (txns, items) = generator::generate(count, anchor(), &mut rng);
        let mut store = SalesStore::in_memory().unwrap();
        store.migrate().unwrap();
        store.insert_transactions(&txns).unwrap();
        store.insert_items(&items).unwrap();
        store
    }

    fn one_transaction(id: &str, payment: PaymentMethod, gross: f64) -> Transaction {
        let subtotal = gross / 1.0825;
        Transaction {
            transaction_id: id.to_string(),
            date: anchor(),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            city: "NY".to_string(),
            store: "NY-Downtown".to_string(),
            customer_id: "C1000".to_string(),
            payment_method: payment,
            num_items: 1,
            subtotal,
            tax: gross - subtotal,
            gross_income: gross,
        }
    }

    #[test]
    fn payment_percentages_sum_to_one_hundred() {
        let store = loaded_store(400, 42);
        let rows = store.payment_breakdown().unwrap();
        assert!(!rows.is_empty());
        let pct_sum: f64 = rows.iter().map(|r| r.revenue_percentage).sum();
        assert!(
            (pct_sum - 100.0).abs() <= 0.2,
            "percentages sum to {pct_sum}"
        );
        // Ordered by revenue, highest first.
        for pair in rows.windows(2) {
            assert!(pair[0].total_revenue >= pair[1].total_revenue);
        }
    }

    #[test]
    fn rating_buckets_cover_every_item_exactly_once() {
        let store = loaded_store(400, 42);
        let rows = store.rating_performance().unwrap();
        assert!(rows.len() <= 4);

        let labels: Vec<&str> = rows.iter().map(|r| r.bucket.as_str()).collect();
        for label in &labels {
            assert!(
                [
                    RatingBucket::High.label(),
                    RatingBucket::Good.label(),
                    RatingBucket::Average.label(),
                    RatingBucket::Low.label(),
                ]
                .contains(label),
                "unknown bucket {label}"
            );
        }

        // SUM(quantity) >= item rows since quantity >= 1 per row, and
        // bucketing is total, so no item escapes the view.
        let total_quantity: i64 = rows.iter().map(|r| r.total_quantity).sum();
        assert!(total_quantity >= store.item_count().unwrap());
    }

    #[test]
    fn city_daily_rows_are_in_date_order() {
        let store = loaded_store(300, 42);
        let rows = store.city_daily_revenue().unwrap();
        assert!(!rows.is_empty());
        for pair in rows.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
        for row in &rows {
            assert!(["NY", "LA", "CH"].contains(&row.city.as_str()));
            assert!(row.daily_revenue > 0.0);
        }
    }

    #[test]
    fn category_view_covers_full_catalog_at_scale() {
        let store = loaded_store(DEFAULT_COUNT, DEFAULT_SEED);
        let rows = store.category_performance().unwrap();
        assert_eq!(rows.len(), 8);
        for pair in rows.windows(2) {
            assert!(pair[0].total_revenue >= pair[1].total_revenue);
        }
        for row in &rows {
            assert!(row.product_count >= 1 && row.product_count <= 5);
            assert!(row.avg_rating >= 3.2 && row.avg_rating <= 4.8);
        }
    }

    #[test]
    fn top_products_is_capped_and_sorted() {
        let store = loaded_store(DEFAULT_COUNT, DEFAULT_SEED);
        let rows = store.top_products(TOP_PRODUCTS_LIMIT).unwrap();
        assert!(rows.len() <= TOP_PRODUCTS_LIMIT);
        for pair in rows.windows(2) {
            assert!(pair[0].total_revenue >= pair[1].total_revenue);
        }
    }

    #[test]
    fn empty_store_yields_empty_views_and_zero_metrics() {
        let store = SalesStore::in_memory().unwrap();
        store.migrate().unwrap();

        assert!(store.payment_breakdown().unwrap().is_empty());
        assert!(store.rating_performance().unwrap().is_empty());
        assert!(store.city_daily_revenue().unwrap().is_empty());
        assert!(store.category_performance().unwrap().is_empty());
        assert!(store.top_products(TOP_PRODUCTS_LIMIT).unwrap().is_empty());

        let metrics = store.key_metrics().unwrap();
        assert_eq!(metrics.total_transactions, 0);
        assert_eq!(metrics.total_revenue, 0.0);
        assert_eq!(metrics.cash_percentage, 0.0);
        assert_eq!(metrics.category_count, 0);
        assert_eq!(metrics.high_rating_revenue_pct, 0.0);
    }

    #[test]
    fn cash_percentage_is_zero_when_cash_absent() {
        let mut store = SalesStore::in_memory().unwrap();
        store.migrate().unwrap();
        store
            .insert_transactions(&[one_transaction("TXN1", PaymentMethod::CreditCard, 108.25)])
            .unwrap();

        let metrics = store.key_metrics().unwrap();
        assert_eq!(metrics.cash_percentage, 0.0);
        assert_eq!(metrics.total_transactions, 1);
    }

    #[test]
    fn single_category_average_rating_is_the_mean() {
        let mut store = SalesStore::in_memory().unwrap();
        store.migrate().unwrap();
        store
            .insert_transactions(&[one_transaction("TXN1", PaymentMethod::Cash, 21.65)])
            .unwrap();

        let items = vec![
            LineItem {
                transaction_id: "TXN1".to_string(),
                product: "Bananas".to_string(),
                category: "Produce".to_string(),
                quantity: 1,
                unit_price: 10.0,
                item_total: 10.0,
                rating: 4.0,
            },
            LineItem {
                transaction_id: "TXN1".to_string(),
                product: "Carrots".to_string(),
                category: "Produce".to_string(),
                quantity: 2,
                unit_price: 5.0,
                item_total: 10.0,
                rating: 3.0,
            },
        ];
        store.insert_items(&items).unwrap();

        let rows = store.category_performance().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Produce");
        assert!((rows[0].avg_rating - 3.5).abs() < 1e-9);
        assert_eq!(rows[0].product_count, 2);
        assert_eq!(rows[0].total_quantity, 3);
    }

    #[test]
    fn baseline_run_aggregates_are_reproducible() {
        // Two independent end-to-end runs with the default seed must
        // agree on every aggregate, and the default dataset exercises
        // the full catalog.
        let store_a = loaded_store(DEFAULT_COUNT, DEFAULT_SEED);
        let store_b = loaded_store(DEFAULT_COUNT, DEFAULT_SEED);

        assert_eq!(
            store_a.payment_breakdown().unwrap(),
            store_b.payment_breakdown().unwrap()
        );
        assert_eq!(
            store_a.rating_performance().unwrap(),
            store_b.rating_performance().unwrap()
        );
        assert_eq!(
            store_a.category_performance().unwrap(),
            store_b.category_performance().unwrap()
        );
        assert_eq!(
            store_a.top_products(TOP_PRODUCTS_LIMIT).unwrap(),
            store_b.top_products(TOP_PRODUCTS_LIMIT).unwrap()
        );
        assert_eq!(store_a.key_metrics().unwrap(), store_b.key_metrics().unwrap());

        let metrics = store_a.key_metrics().unwrap();
        assert_eq!(metrics.total_transactions, DEFAULT_COUNT as i64);
        assert!(metrics.total_revenue > 0.0);
        // 55% cash weight leaves a wide but safe corridor at N=1200.
        assert!(metrics.cash_percentage > 30.0 && metrics.cash_percentage < 80.0);
        assert_eq!(metrics.category_count, 8);
        assert_eq!(store_a.payment_breakdown().unwrap().len(), 5);
    }
}
