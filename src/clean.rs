use std::collections::BTreeSet;

use crate::table::Table;

/// Finds the rows to drop from `table`.
///
/// Two rows that agree on every non-target attribute but carry different
/// targets are both dropped. If they carry the same target, the later one is
/// dropped unless `keep_duplicates` is set. Indices refer to `table` as given.
pub fn conflicting_rows(table: &Table, target: usize, keep_duplicates: bool) -> BTreeSet<usize> {
    let rows = table.rows();
    let mut remove = BTreeSet::new();

    for (i, row) in rows.iter().enumerate() {
        for (j, other) in rows.iter().enumerate().skip(i + 1) {
            if !row.same_attributes(other, target) {
                continue;
            }
            if row.get(target) != other.get(target) {
                remove.insert(i);
                remove.insert(j);
            } else if !keep_duplicates {
                remove.insert(j);
            }
        }
    }

    remove
}

/// Removes contradictory (and optionally duplicate) rows in place, returning
/// how many were dropped.
pub fn clean(table: &mut Table, target: usize, keep_duplicates: bool) -> usize {
    let remove = conflicting_rows(table, target, keep_duplicates);
    if !remove.is_empty() {
        tracing::debug!(rows = ?remove, "dropping conflicting training rows");
    }
    table.retain_indexed(|idx| !remove.contains(&idx));
    remove.len()
}
