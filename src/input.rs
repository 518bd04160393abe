use std::io::BufRead;

use crate::error::{ReportError, Result};
use crate::mutants::ClassMutationResults;

/// Reads result batches from JSON Lines, one [`ClassMutationResults`] per line.
///
/// Blank lines are skipped. Batches are decoded lazily, so only the current
/// line is ever held in memory.
pub fn read_batches<R: BufRead>(reader: R) -> impl Iterator<Item = Result<ClassMutationResults>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(
                serde_json::from_str(&line).map_err(|source| ReportError::Input {
                    line: i + 1,
                    source,
                }),
            ),
            Err(e) => Some(Err(ReportError::Read(e))),
        })
}
