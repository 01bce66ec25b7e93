//! A forward-only, single-pass cursor over a result set.
//!
//! The cursor owns its result set. Its position lives behind a mutex so a cursor can
//! be shared between callers; concurrent calls to [`RowCursor::next`] are serialized
//! and rows come out in result set order, whatever order the calls arrive in.

use std::sync::{Mutex, MutexGuard, PoisonError};

use query_engine_metadata::metadata::ColumnType;

use crate::error::ScanError;
use crate::result_set::{CellValue, ResultSet, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Open(usize),
    Exhausted,
}

#[derive(Debug)]
struct CursorState {
    rows: Vec<Row>,
    position: Position,
}

/// Typed rows of one query execution.
#[derive(Debug)]
pub struct RowCursor {
    columns: Vec<String>,
    column_types: Option<Vec<ColumnType>>,
    state: Mutex<CursorState>,
}

impl RowCursor {
    pub fn new(result_set: ResultSet) -> RowCursor {
        let (columns, column_types, rows) = result_set.into_parts();
        let position = if rows.is_empty() {
            Position::Exhausted
        } else {
            Position::Open(0)
        };
        RowCursor {
            columns,
            column_types,
            state: Mutex::new(CursorState { rows, position }),
        }
    }

    /// Column names in result order. Available in every state, including after close.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Declared column types, when the response carried them.
    pub fn column_types(&self) -> Option<&[ColumnType]> {
        self.column_types.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.lock().position == Position::Exhausted
    }

    /// Copy the current row into `destination` and advance.
    ///
    /// `destination` must have one slot per column. Cells the parser left unset do not
    /// touch their slot. Once every row has been read this returns
    /// [`ScanError::EndOfData`], on every call.
    pub fn next(&self, destination: &mut [CellValue]) -> Result<(), ScanError> {
        if destination.len() != self.columns.len() {
            return Err(ScanError::ColumnCountMismatch {
                expected: self.columns.len(),
                actual: destination.len(),
            });
        }

        let mut state = self.lock();
        let Position::Open(position) = state.position else {
            return Err(ScanError::EndOfData);
        };
        let row = state.rows.get(position).ok_or(ScanError::EndOfData)?;

        for (slot, cell) in destination.iter_mut().zip(row) {
            if let Some(cell) = cell {
                slot.clone_from(cell);
            }
        }

        let next = position + 1;
        state.position = if next >= state.rows.len() {
            Position::Exhausted
        } else {
            Position::Open(next)
        };

        Ok(())
    }

    /// Read the next row into a fresh vector. `Ok(None)` once the cursor is exhausted.
    pub fn next_row(&self) -> Result<Option<Vec<CellValue>>, ScanError> {
        let mut row = vec![CellValue::Null; self.columns.len()];
        match self.next(&mut row) {
            Ok(()) => Ok(Some(row)),
            Err(ScanError::EndOfData) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Release the result set. Idempotent.
    pub fn close(&self) {
        let mut state = self.lock();
        state.rows = Vec::new();
        state.position = Position::Exhausted;
    }

    fn lock(&self) -> MutexGuard<'_, CursorState> {
        // a poisoned lock still holds a consistent position: it is only written after a row is copied.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::RowCursor;
    use crate::error::ScanError;
    use crate::result_set::{CellValue, ResultSet};

    fn cursor(rows: usize) -> RowCursor {
        let rows = (0..rows)
            .map(|i| {
                vec![
                    Some(CellValue::Int64(i64::try_from(i).unwrap())),
                    Some(CellValue::String(format!("row {i}"))),
                ]
            })
            .collect();
        RowCursor::new(ResultSet::new(
            vec!["id".to_string(), "name".to_string()],
            None,
            rows,
        ))
    }

    #[test]
    fn reads_rows_in_order_then_ends() {
        let cursor = cursor(2);
        let mut row = vec![CellValue::Null; 2];

        cursor.next(&mut row).unwrap();
        assert_eq!(row[0], CellValue::Int64(0));
        assert!(!cursor.is_exhausted());
        cursor.next(&mut row).unwrap();
        assert_eq!(row[1], CellValue::String("row 1".to_string()));
        assert!(cursor.is_exhausted());

        for _ in 0..3 {
            assert_eq!(cursor.next(&mut row), Err(ScanError::EndOfData));
        }
    }

    #[test]
    fn empty_result_is_exhausted_immediately() {
        let cursor = cursor(0);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.next_row(), Ok(None));
        assert_eq!(cursor.columns(), ["id", "name"]);
    }

    #[test]
    fn arity_is_checked_for_every_wrong_size() {
        let cursor = cursor(1);
        for size in [0, 1, 3, 10] {
            let mut row = vec![CellValue::Null; size];
            assert_eq!(
                cursor.next(&mut row),
                Err(ScanError::ColumnCountMismatch {
                    expected: 2,
                    actual: size
                })
            );
        }
        // a failed scan does not advance.
        assert!(cursor.next_row().unwrap().is_some());
    }

    #[test]
    fn arity_is_checked_even_when_exhausted() {
        let cursor = cursor(0);
        let mut row = vec![CellValue::Null; 1];
        assert!(matches!(
            cursor.next(&mut row),
            Err(ScanError::ColumnCountMismatch { .. })
        ));
    }

    #[test]
    fn unset_cells_leave_slots_untouched() {
        let cursor = RowCursor::new(ResultSet::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            None,
            vec![vec![
                Some(CellValue::Bool(true)),
                None,
                Some(CellValue::Float64(1.5)),
            ]],
        ));
        let mut row = vec![
            CellValue::Null,
            CellValue::String("before".to_string()),
            CellValue::Null,
        ];
        cursor.next(&mut row).unwrap();
        assert_eq!(
            row,
            vec![
                CellValue::Bool(true),
                CellValue::String("before".to_string()),
                CellValue::Float64(1.5),
            ]
        );
    }

    #[test]
    fn close_is_idempotent_and_keeps_columns() {
        let cursor = cursor(3);
        cursor.close();
        cursor.close();
        assert_eq!(cursor.columns().len(), 2);
        assert_eq!(cursor.next_row(), Ok(None));
    }

    #[test]
    fn concurrent_readers_see_each_row_exactly_once() {
        let cursor = Arc::new(cursor(200));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cursor = Arc::clone(&cursor);
                std::thread::spawn(move || {
                    let mut seen = vec![];
                    while let Some(row) = cursor.next_row().unwrap() {
                        seen.push(row[0].get::<i64>().unwrap());
                    }
                    seen
                })
            })
            .collect();

        let mut all: Vec<i64> = vec![];
        for handle in handles {
            let seen = handle.join().unwrap();
            let mut sorted = seen.clone();
            sorted.sort_unstable();
            // each reader observes rows in cursor order.
            assert_eq!(seen, sorted);
            all.extend(seen);
        }
        all.sort_unstable();
        assert_eq!(all, (0..200).collect::<Vec<i64>>());
    }
}
