//! SQLite persistence layer.
//!
//! RULE: Only the store module talks to the database. The generator,
//! report renderer, and CLI call store methods — they never execute
//! SQL directly.

use crate::{
    error::PipelineResult,
    export,
    model::{LineItem, Transaction},
};
use rusqlite::{params, Connection};
use std::path::Path;

mod queries;

pub struct SalesStore {
    conn: Connection,
}

impl SalesStore {
    pub fn open(path: &str) -> PipelineResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PipelineResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply the schema. Idempotent.
    pub fn migrate(&self) -> PipelineResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_schema.sql"))?;
        Ok(())
    }

    /// Discard all stored rows. A reload always replaces the entire
    /// dataset — there is no incremental upsert path.
    pub fn reset(&self) -> PipelineResult<()> {
        self.conn.execute_batch(
            "DELETE FROM transaction_items;
             DELETE FROM transactions;",
        )?;
        Ok(())
    }

    pub fn insert_transactions(&mut self, transactions: &[Transaction]) -> PipelineResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO transactions (
                    transaction_id, date, time, city, store, customer_id,
                    payment_method, num_items, subtotal, tax, gross_income
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for t in transactions {
                stmt.execute(params![
                    &t.transaction_id,
                    t.date.to_string(),
                    t.time.to_string(),
                    &t.city,
                    &t.store,
                    &t.customer_id,
                    t.payment_method.as_str(),
                    t.num_items as i64,
                    t.subtotal,
                    t.tax,
                    t.gross_income,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn insert_items(&mut self, items: &[LineItem]) -> PipelineResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO transaction_items (
                    transaction_id, product, category, quantity,
                    unit_price, item_total, rating
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for item in items {
                stmt.execute(params![
                    &item.transaction_id,
                    &item.product,
                    &item.category,
                    item.quantity as i64,
                    item.unit_price,
                    item.item_total,
                    item.rating,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn transaction_count(&self) -> PipelineResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn item_count(&self) -> PipelineResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM transaction_items", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

/// Bulk-load the generator's CSV output into the store, replacing any
/// previously loaded dataset.
pub fn load_csv_data(store: &mut SalesStore, data_dir: &Path) -> PipelineResult<(usize, usize)> {
    let transactions = export::read_transactions(data_dir)?;
    let items = export::read_items(data_dir)?;

    store.migrate()?;
    store.reset()?;
    store.insert_transactions(&transactions)?;
    store.insert_items(&items)?;

    log::info!(
        "loaded {} transactions and {} items from {}",
        transactions.len(),
        items.len(),
        data_dir.display()
    );

    Ok((transactions.len(), items.len()))
}
