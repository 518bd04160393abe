use crate::error::Result;
use crate::mutants::ClassMutationResults;

/// Receives mutation results as the engine produces them.
///
/// The engine calls [`run_start`](Self::run_start) once, then
/// [`handle_mutation_result`](Self::handle_mutation_result) once per batch it
/// decides to flush (per class, per file, or everything at once), then
/// [`run_end`](Self::run_end) once.
pub trait MutationResultListener {
    fn run_start(&mut self) -> Result<()>;

    /// May be called any number of times with batches of any size.
    fn handle_mutation_result(&mut self, results: &ClassMutationResults) -> Result<()>;

    fn run_end(&mut self) -> Result<()>;
}

impl<L: MutationResultListener + ?Sized> MutationResultListener for Box<L> {
    fn run_start(&mut self) -> Result<()> {
        (**self).run_start()
    }

    fn handle_mutation_result(&mut self, results: &ClassMutationResults) -> Result<()> {
        (**self).handle_mutation_result(results)
    }

    fn run_end(&mut self) -> Result<()> {
        (**self).run_end()
    }
}
