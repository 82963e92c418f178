//! Batch evaluation of an operation against expected results.

use crate::config::{EvaluatorConfig, LoggerConfig, ReportMode};
use crate::error::{EvalError, LoggerError};
use crate::logger::{LogRecord, Logger};
use crate::style::{self, Category, Message};
use crate::summary::{CaseOutcome, CaseStatus, EvaluationSummary};
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub const HEADER_PRIORITY: u32 = 1;
pub const CASE_PRIORITY: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    Console,
    File,
}

#[derive(Debug, Clone)]
pub struct Evaluator {
    logger: Arc<Logger>,
    mode: ReportMode,
}

impl Evaluator {
    /// Console evaluator; file operations go to `debug.log`.
    pub fn new(level: u32) -> Self {
        Self::with_logger(Arc::new(Logger::new(LoggerConfig::new(level))))
    }

    pub fn with_file(level: u32, path: impl Into<PathBuf>) -> Self {
        let config = LoggerConfig::new(level).with_log_file(path);
        Self::with_logger(Arc::new(Logger::new(config)))
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::with_logger(Arc::new(Logger::new(config.logger.clone())))
            .with_mode(config.report_mode)
    }

    /// Share an existing logger, e.g. between several evaluators writing to
    /// the same destination.
    pub fn with_logger(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            mode: ReportMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ReportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    // --- Listing ---

    /// Print the inputs with their indices. Nothing is evaluated.
    pub fn pretty_print<T: Display>(&self, cases: &[T]) -> Result<(), EvalError> {
        self.list(cases, Sink::Console)
    }

    /// Same listing as [`pretty_print`](Self::pretty_print), appended to the
    /// log file as plain text.
    pub fn log_cases<T: Display>(&self, cases: &[T]) -> Result<(), EvalError> {
        self.list(cases, Sink::File)
    }

    fn list<T: Display>(&self, cases: &[T], sink: Sink) -> Result<(), EvalError> {
        self.emit(
            &LogRecord::new(Category::Debug, "Test Cases:", HEADER_PRIORITY),
            sink,
        )?;
        for (index, case) in cases.iter().enumerate() {
            let line = Message::plain("  ").info(index).debug(" : ").info(case);
            self.emit(&LogRecord::new(Category::Debug, line, CASE_PRIORITY), sink)?;
        }
        Ok(())
    }

    // --- Evaluation ---

    /// Apply `operation` to every case in order and report one record per
    /// case on the console.
    ///
    /// An operation that returns `Err` or panics is reported as a failed
    /// case and the batch continues. Panics are caught with `catch_unwind`,
    /// but the process panic hook still runs first, so the default hook
    /// prints a `thread ... panicked at` line to stderr for each of them.
    pub fn evaluate_cases<T, R, E, F>(
        &self,
        cases: &[T],
        expected: &[R],
        operation: F,
    ) -> Result<EvaluationSummary, EvalError>
    where
        R: PartialEq + Display,
        E: Display,
        F: Fn(&T) -> Result<R, E>,
    {
        self.run(cases, expected, operation, |want: &R, got: &R| want == got, Sink::Console)
    }

    /// Like [`evaluate_cases`](Self::evaluate_cases) with a caller-supplied
    /// equality predicate `(expected, actual)`.
    pub fn evaluate_cases_by<T, R, E, F, C>(
        &self,
        cases: &[T],
        expected: &[R],
        operation: F,
        eq: C,
    ) -> Result<EvaluationSummary, EvalError>
    where
        R: Display,
        E: Display,
        F: Fn(&T) -> Result<R, E>,
        C: Fn(&R, &R) -> bool,
    {
        self.run(cases, expected, operation, eq, Sink::Console)
    }

    pub fn log_evaluations<T, R, E, F>(
        &self,
        cases: &[T],
        expected: &[R],
        operation: F,
    ) -> Result<EvaluationSummary, EvalError>
    where
        R: PartialEq + Display,
        E: Display,
        F: Fn(&T) -> Result<R, E>,
    {
        self.run(cases, expected, operation, |want: &R, got: &R| want == got, Sink::File)
    }

    pub fn log_evaluations_by<T, R, E, F, C>(
        &self,
        cases: &[T],
        expected: &[R],
        operation: F,
        eq: C,
    ) -> Result<EvaluationSummary, EvalError>
    where
        R: Display,
        E: Display,
        F: Fn(&T) -> Result<R, E>,
        C: Fn(&R, &R) -> bool,
    {
        self.run(cases, expected, operation, eq, Sink::File)
    }

    fn run<T, R, E, F, C>(
        &self,
        cases: &[T],
        expected: &[R],
        operation: F,
        eq: C,
        sink: Sink,
    ) -> Result<EvaluationSummary, EvalError>
    where
        R: Display,
        E: Display,
        F: Fn(&T) -> Result<R, E>,
        C: Fn(&R, &R) -> bool,
    {
        if cases.len() != expected.len() {
            return Err(EvalError::LengthMismatch {
                cases: cases.len(),
                expected: expected.len(),
            });
        }
        debug!(cases = cases.len(), sink = ?sink, mode = ?self.mode, "Evaluating batch");

        let mut summary = EvaluationSummary::default();
        for (index, (case, want)) in cases.iter().zip(expected).enumerate() {
            let status = match apply(&operation, case) {
                Ok(got) if eq(want, &got) => CaseStatus::Passed,
                Ok(got) => CaseStatus::Mismatch {
                    expected: want.to_string(),
                    actual: got.to_string(),
                },
                Err(message) => CaseStatus::Errored { message },
            };
            self.emit(&report(&status), sink)?;

            if let (ReportMode::Strict, CaseStatus::Mismatch { expected, actual }) =
                (self.mode, &status)
            {
                return Err(EvalError::AssertionFailed {
                    index,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
            summary.record(CaseOutcome { index, status });
        }

        debug!(
            passed = summary.passed,
            mismatched = summary.mismatched,
            errored = summary.errored,
            "Batch finished"
        );
        Ok(summary)
    }

    fn emit(&self, record: &LogRecord, sink: Sink) -> Result<(), LoggerError> {
        match sink {
            Sink::Console => self.logger.log(record),
            Sink::File => self.logger.log_to_file(record),
        }
    }
}

/// Apply the operation, turning both returned errors and panics into a
/// message.
fn apply<T, R, E, F>(operation: &F, case: &T) -> Result<R, String>
where
    E: Display,
    F: Fn(&T) -> Result<R, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| operation(case))) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "operation panicked".to_string()
    }
}

fn report(status: &CaseStatus) -> LogRecord {
    match status {
        CaseStatus::Passed => LogRecord::new(
            Category::Success,
            style::success("Test case passed."),
            CASE_PRIORITY,
        ),
        CaseStatus::Mismatch { expected, actual } => LogRecord::new(
            Category::Error,
            Message::plain("Test case failed. Expected: ")
                .info(expected)
                .error(", but got: ")
                .info(actual),
            CASE_PRIORITY,
        ),
        CaseStatus::Errored { message } => LogRecord::new(
            Category::Error,
            Message::plain("Test case failed with exception: ").info(message),
            CASE_PRIORITY,
        ),
    }
}
