//! Batched inserts with periodic commits.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Statement};
use tracing::{debug, warn};

use crate::error::{CaregapError, Result};

/// A prepared insert that commits every `commit_interval` rows.
///
/// Rows committed by earlier batches stay committed if a later insert fails.
/// An open batch that is never committed is rolled back on drop.
pub struct BatchWriter<'conn> {
    conn: &'conn Connection,
    statement: Statement<'conn>,
    label: String,
    commit_interval: usize,
    pending: usize,
    written: usize,
    in_transaction: bool,
}

impl<'conn> BatchWriter<'conn> {
    pub(crate) fn new(
        conn: &'conn Connection,
        sql: &str,
        label: impl Into<String>,
        commit_interval: usize,
    ) -> Result<Self> {
        if commit_interval == 0 {
            return Err(CaregapError::Config(
                "commit interval must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            conn,
            statement: conn.prepare(sql)?,
            label: label.into(),
            commit_interval,
            pending: 0,
            written: 0,
            in_transaction: false,
        })
    }

    /// Insert one row, committing if the batch is full.
    pub fn insert(&mut self, values: &[Value]) -> Result<()> {
        if !self.in_transaction {
            self.conn.execute_batch("BEGIN")?;
            self.in_transaction = true;
        }
        self.statement.execute(params_from_iter(values.iter()))?;
        self.pending += 1;
        self.written += 1;
        if self.pending >= self.commit_interval {
            self.commit()?;
        }
        Ok(())
    }

    /// Commit the open batch, if any.
    pub fn commit(&mut self) -> Result<()> {
        if self.in_transaction {
            self.conn.execute_batch("COMMIT")?;
            debug!(table = %self.label, rows = self.pending, total = self.written, "Committed batch");
            self.in_transaction = false;
            self.pending = 0;
        }
        Ok(())
    }

    /// Commit the remainder and return the number of rows written.
    pub fn finish(mut self) -> Result<usize> {
        self.commit()?;
        Ok(self.written)
    }
}

impl Drop for BatchWriter<'_> {
    fn drop(&mut self) {
        if self.in_transaction {
            warn!(table = %self.label, rows = self.pending, "Rolling back uncommitted batch");
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                warn!(table = %self.label, error = %e, "Rollback failed");
            }
        }
    }
}
