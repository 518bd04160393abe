use std::fs::File;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::{ReportError, Result};

/// Opens the streams reports are written to.
pub trait ResultOutputStrategy {
    /// Returns a fresh, exclusively owned writer for the logical file `name`.
    fn create_writer_for_file(&self, name: &str) -> Result<Box<dyn Write + Send>>;
}

/// How the report directory is derived from the base directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportDirNaming {
    /// Write straight into the base directory, replacing the previous report.
    #[default]
    Undated,
    /// Write into a `yyyyMMddHHmm` sub-directory so earlier runs are kept.
    Dated,
}

/// Writes each report file into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryResultOutputStrategy {
    report_dir: Utf8PathBuf,
}

impl DirectoryResultOutputStrategy {
    pub fn new(base_dir: impl Into<Utf8PathBuf>, naming: ReportDirNaming) -> Self {
        let base_dir = base_dir.into();
        let report_dir = match naming {
            ReportDirNaming::Undated => base_dir,
            ReportDirNaming::Dated => base_dir.join(timestamp_dir_name()),
        };
        DirectoryResultOutputStrategy { report_dir }
    }

    pub fn report_dir(&self) -> &Utf8Path {
        &self.report_dir
    }

    pub fn path_for(&self, name: &str) -> Utf8PathBuf {
        self.report_dir.join(name)
    }
}

impl ResultOutputStrategy for DirectoryResultOutputStrategy {
    fn create_writer_for_file(&self, name: &str) -> Result<Box<dyn Write + Send>> {
        std::fs::create_dir_all(&self.report_dir).map_err(|source| ReportError::ReportDir {
            path: self.report_dir.clone(),
            source,
        })?;
        let path = self.path_for(name);
        debug!(%path, "opening report file");
        let file = File::create(&path).map_err(ReportError::Write)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn timestamp_dir_name() -> String {
    chrono::Local::now().format("%Y%m%d%H%M").to_string()
}
