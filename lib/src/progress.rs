// A progress reporter receives (completed, total) counts from long running
// graph operations such as index() and reindex().

use log::info;

pub trait ProgressReporter {
    fn report(&mut self, completed: usize, total: usize);
}

impl<F> ProgressReporter for F
where
    F: FnMut(usize, usize),
{
    fn report(&mut self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _completed: usize, _total: usize) {}
}

/// Logs each report at info level under a label.
#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        LogProgress {
            label: label.into(),
        }
    }
}

impl ProgressReporter for LogProgress {
    fn report(&mut self, completed: usize, total: usize) {
        info!("{}: {}/{}", self.label, completed, total);
    }
}
