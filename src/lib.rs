pub mod error;
pub mod factory;
pub mod input;
pub mod json;
pub mod listener;
pub mod mutants;
pub mod output;
pub mod strategy;
pub mod summary;

pub use error::{ReportError, Result};
pub use json::{JsonReportListener, ReportMode};
pub use listener::MutationResultListener;
