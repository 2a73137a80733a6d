// src/progress.rs
/// Status reporting for the pipelines (extract / merge / plot).
/// The CLI prints these lines; library callers can pass `None`.
pub trait Progress {
    /// Called at the start with the number of steps (if known).
    fn begin(&mut self, _steps: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when an output artifact has been written.
    fn wrote(&mut self, _path: &std::path::Path) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
