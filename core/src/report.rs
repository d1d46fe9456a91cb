//! Textual insights report.
//!
//! The chart dashboard is an external consumer; what ships here is the
//! printed analysis block rendered from the aggregation query set,
//! under the same headings the dashboard panels use.

use crate::{error::PipelineResult, store::SalesStore};
use std::fmt::Write;

const RULE: &str = "==================================================";

/// Illustrative reporting thresholds, not contracts: the default
/// generator distribution is expected to land above both, arbitrary
/// datasets need not.
const CASH_SHARE_NOTE: f64 = 50.0;
const HIGH_RATING_NOTE: f64 = 20.0;

/// Render the full insights report from the stored dataset.
pub fn render_report(store: &SalesStore) -> PipelineResult<String> {
    let metrics = store.key_metrics()?;
    let payments = store.payment_breakdown()?;
    let buckets = store.rating_performance()?;
    let categories = store.category_performance()?;
    let top_products = store.top_products(crate::analytics::TOP_PRODUCTS_LIMIT)?;
    let city_daily = store.city_daily_revenue()?;

    let mut out = String::new();
    // writeln! into a String cannot fail
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "SUPERMARKET SALES DASHBOARD INSIGHTS");
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "\nOVERALL PERFORMANCE:");
    let _ = writeln!(out, "   - Total Revenue: ${:.2}", metrics.total_revenue);
    let _ = writeln!(out, "   - Transactions: {}", metrics.total_transactions);
    let _ = writeln!(
        out,
        "   - Cash Revenue: {:.1}% of total",
        metrics.cash_percentage
    );

    let _ = writeln!(out, "\nPAYMENT METHOD ANALYSIS:");
    if payments.is_empty() {
        let _ = writeln!(out, "   (no transactions)");
    }
    for row in &payments {
        let _ = writeln!(
            out,
            "   - {}: ${:.0} ({:.1}%) across {} transactions",
            row.payment_method, row.total_revenue, row.revenue_percentage, row.transaction_count
        );
    }

    let _ = writeln!(out, "\nPRODUCT RATING INSIGHTS:");
    for row in &buckets {
        let _ = writeln!(
            out,
            "   - {}: ${:.0} from {} products",
            row.bucket, row.total_revenue, row.product_count
        );
    }

    let _ = writeln!(out, "\nTOP CATEGORIES:");
    for row in categories.iter().take(3) {
        let _ = writeln!(
            out,
            "   - {}: ${:.0} (Avg Rating: {:.1})",
            row.category, row.total_revenue, row.avg_rating
        );
    }

    let _ = writeln!(out, "\nTOP PRODUCTS:");
    for row in top_products.iter().take(5) {
        let _ = writeln!(
            out,
            "   - {} [{}]: ${:.0}",
            row.product, row.category, row.total_revenue
        );
    }

    if let (Some(first), Some(last)) = (city_daily.first(), city_daily.last()) {
        let _ = writeln!(
            out,
            "\nCITY TRENDS: {} daily data points from {} to {}",
            city_daily.len(),
            first.date,
            last.date
        );
    }

    let _ = writeln!(out, "\nKEY FINDINGS:");
    let _ = writeln!(
        out,
        "   - Cash transactions contribute {:.1}% of gross income",
        metrics.cash_percentage
    );
    if metrics.cash_percentage >= CASH_SHARE_NOTE {
        let _ = writeln!(out, "   - Cash is the primary revenue source as expected");
    }
    let _ = writeln!(
        out,
        "   - High-rated products (4.5+) generate {:.1}% of item revenue",
        metrics.high_rating_revenue_pct
    );
    if metrics.high_rating_revenue_pct >= HIGH_RATING_NOTE {
        let _ = writeln!(
            out,
            "   - Top-rated items achieve higher sales volume as expected"
        );
    }
    let _ = writeln!(out, "   - Product categories in play: {}", metrics.category_count);

    let _ = writeln!(out, "\n{RULE}");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{export, generator, rng::SalesRng, store};
    use chrono::NaiveDate;

    fn loaded_store(count: usize) -> SalesStore {
        let mut rng = SalesRng::seeded(42);
        let anchor = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let (txns, items) = generator::generate(count, anchor, &mut rng);

        let dir = std::env::temp_dir().join(format!(
            "salesdash-report-{count}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        export::write_dataset(&dir, &txns, &items).unwrap();

        let mut s = SalesStore::in_memory().unwrap();
        store::load_csv_data(&mut s, &dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        s
    }

    #[test]
    fn report_renders_all_sections() {
        let store = loaded_store(200);
        let report = render_report(&store).unwrap();

        assert!(report.contains("SUPERMARKET SALES DASHBOARD INSIGHTS"));
        assert!(report.contains("OVERALL PERFORMANCE:"));
        assert!(report.contains("PAYMENT METHOD ANALYSIS:"));
        assert!(report.contains("PRODUCT RATING INSIGHTS:"));
        assert!(report.contains("TOP CATEGORIES:"));
        assert!(report.contains("KEY FINDINGS:"));
        assert!(report.contains("Cash"));
    }

    #[test]
    fn empty_dataset_renders_without_panicking() {
        let store = SalesStore::in_memory().unwrap();
        store.migrate().unwrap();
        let report = render_report(&store).unwrap();

        assert!(report.contains("(no transactions)"));
        assert!(report.contains("Cash Revenue: 0.0% of total"));
        // NaN or inf leaking into the report would show up literally.
        assert!(!report.contains("NaN"));
        assert!(!report.contains("inf"));
    }

    #[test]
    fn report_is_deterministic_for_a_seeded_dataset() {
        let a = render_report(&loaded_store(150)).unwrap();
        let b = render_report(&loaded_store(150)).unwrap();
        assert_eq!(a, b);
    }
}
