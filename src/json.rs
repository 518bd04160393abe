//! Streaming JSON report.
//!
//! The report is a single JSON array with one object per mutation, written
//! record by record as batches arrive:
//!
//! ```text
//! [{...},
//! {...},
//! {...}]
//! ```
//!
//! Each record occupies exactly one line. Nothing beyond the batch being
//! written is held in memory.

use std::io::{self, Write};

use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::listener::MutationResultListener;
use crate::mutants::{ClassMutationResults, MutationRecord};

/// Which test attribution each record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// At most one `killingTest` per record.
    Compact,
    /// Full `killingTests` and `succeedingTests` lists, no `killingTest`.
    Matrix,
}

impl ReportMode {
    pub fn from_full_matrix(full_matrix: bool) -> Self {
        if full_matrix {
            ReportMode::Matrix
        } else {
            ReportMode::Compact
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Idle,
    Open,
    Closed,
    Failed,
}

type TestsWriter<W> = fn(&mut W, &MutationRecord) -> io::Result<()>;

/// Writes mutation results to `out` as one JSON array, incrementally.
///
/// Call [`begin_session`](Self::begin_session) once, then
/// [`submit_batch`](Self::submit_batch) any number of times, then
/// [`end_session`](Self::end_session) once. Calling them out of order panics.
/// After any write error the writer is unusable; the stream is released when
/// the writer is dropped.
pub struct JsonReportListener<W: Write> {
    out: Option<W>,
    mode: ReportMode,
    write_tests: TestsWriter<W>,
    session: Session,
    one_done: bool,
}

impl<W: Write> JsonReportListener<W> {
    pub fn new(out: W, mode: ReportMode) -> Self {
        let write_tests: TestsWriter<W> = match mode {
            ReportMode::Compact => write_killing_test::<W>,
            ReportMode::Matrix => write_test_matrix::<W>,
        };
        JsonReportListener {
            out: Some(out),
            mode,
            write_tests,
            session: Session::Idle,
            one_done: false,
        }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// True once the closing bracket has been written and the stream released.
    pub fn is_closed(&self) -> bool {
        self.session == Session::Closed
    }

    pub fn begin_session(&mut self) -> Result<()> {
        self.expect_session(Session::Idle, "begin_session");
        self.push(|out| out.write_all(b"["))?;
        self.session = Session::Open;
        Ok(())
    }

    /// Appends `records` to the array in order. An empty slice writes nothing.
    pub fn submit_batch(&mut self, records: &[MutationRecord]) -> Result<()> {
        self.expect_session(Session::Open, "submit_batch");
        let write_tests = self.write_tests;
        for record in records {
            let separate = self.one_done;
            self.push(|out| {
                if separate {
                    out.write_all(b",\n")?;
                }
                write_record(out, record, write_tests)
            })?;
            self.one_done = true;
        }
        Ok(())
    }

    /// Closes the array, flushes, and releases the stream.
    pub fn end_session(&mut self) -> Result<()> {
        self.expect_session(Session::Open, "end_session");
        self.push(|out| {
            out.write_all(b"]\n")?;
            out.flush()
        })?;
        drop(self.out.take());
        self.session = Session::Closed;
        Ok(())
    }

    fn expect_session(&self, expected: Session, operation: &str) {
        if self.session != expected {
            panic!(
                "{operation} called on a JSON report in state {:?} (expected {:?})",
                self.session, expected
            );
        }
    }

    /// The only place bytes reach the stream; I/O errors become
    /// [`ReportError::Write`] here and poison the session.
    fn push<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        let Some(out) = self.out.as_mut() else {
            panic!("JSON report stream already released");
        };
        write(out).map_err(|e| {
            self.session = Session::Failed;
            ReportError::Write(e)
        })
    }
}

impl<W: Write> MutationResultListener for JsonReportListener<W> {
    fn run_start(&mut self) -> Result<()> {
        self.begin_session()
    }

    fn handle_mutation_result(&mut self, results: &ClassMutationResults) -> Result<()> {
        debug!(
            class = %results.mutated_class,
            mutations = results.len(),
            "writing mutation results"
        );
        self.submit_batch(&results.mutations)
    }

    fn run_end(&mut self) -> Result<()> {
        self.end_session()?;
        info!(mode = ?self.mode, "JSON report complete");
        Ok(())
    }
}

fn write_record<W: Write>(
    out: &mut W,
    record: &MutationRecord,
    write_tests: TestsWriter<W>,
) -> io::Result<()> {
    write!(out, "{{\"detected\":{},", record.detected())?;
    write_field(out, "status", record.status.as_str())?;
    write!(out, "\"numberOfTestsRun\":{},", record.number_of_tests_run)?;
    write_field(out, "sourcefile", &record.source_file)?;
    write_field(out, "mutatedClass", &record.mutated_class)?;
    write_field(out, "mutatedMethod", &record.mutated_method)?;
    write_field(out, "methodDescription", &record.method_description)?;
    write!(out, "\"lineNumber\":{},", record.line_number)?;
    write_field(out, "mutator", &record.mutator)?;
    write!(out, "\"index\":{},\"block\":{},", record.index, record.block)?;
    write_tests(out, record)?;
    out.write_all(b"\"description\":")?;
    write_str(out, &record.description)?;
    out.write_all(b"}")
}

fn write_killing_test<W: Write>(out: &mut W, record: &MutationRecord) -> io::Result<()> {
    match &record.killing_test {
        Some(test) => write_field(out, "killingTest", test),
        None => Ok(()),
    }
}

fn write_test_matrix<W: Write>(out: &mut W, record: &MutationRecord) -> io::Result<()> {
    write_list(out, "killingTests", &record.killing_tests)?;
    write_list(out, "succeedingTests", &record.succeeding_tests)
}

/// `"tag":["a","b"],` or nothing at all for an empty list. The trailing comma
/// is safe because `description` always follows.
fn write_list<W: Write>(out: &mut W, tag: &str, items: &[String]) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    write!(out, "\"{tag}\":[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        write_str(out, item)?;
    }
    out.write_all(b"],")
}

fn write_field<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    write!(out, "\"{key}\":")?;
    write_str(out, value)?;
    out.write_all(b",")
}

fn write_str<W: Write>(out: &mut W, value: &str) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value).map_err(io::Error::from)
}
