use crate::error::Result;
use crate::json::{JsonReportListener, ReportMode};
use crate::listener::MutationResultListener;
use crate::strategy::ResultOutputStrategy;

/// File name the JSON report is written under.
pub const MUTATIONS_FILE: &str = "mutations.json";

/// Builds JSON report listeners on top of an output strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportFactory;

impl JsonReportFactory {
    pub fn name(&self) -> &'static str {
        "JSON"
    }

    pub fn description(&self) -> &'static str {
        "Streams every mutation result into mutations.json"
    }

    pub fn create_listener(
        &self,
        strategy: &dyn ResultOutputStrategy,
        full_matrix: bool,
    ) -> Result<Box<dyn MutationResultListener + Send>> {
        let out = strategy.create_writer_for_file(MUTATIONS_FILE)?;
        Ok(Box::new(JsonReportListener::new(
            out,
            ReportMode::from_full_matrix(full_matrix),
        )))
    }
}
