//! Missing-value table.

use super::share;
use crate::table::Table;
use crate::types::{MissingEntry, MissingTable};

/// Count missing cells per column, worst offenders first.
///
/// Shares are fractions of the row count (0.0 for an empty table). Ties in
/// `missing_count` keep the original column order.
pub fn missing_table(table: &Table) -> MissingTable {
    let n_rows = table.n_rows();
    let entries = table
        .columns()
        .iter()
        .map(|col| {
            let missing_count = col.missing_count();
            MissingEntry {
                column: col.name().to_string(),
                missing_count,
                missing_share: share(missing_count, n_rows),
            }
        })
        .collect();

    MissingTable::from_input_order(entries)
}
