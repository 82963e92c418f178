//! # Simple Testing - Table-Driven Case Evaluation
//!
//! Applies an operation to a batch of inputs, compares each result with the
//! expected value and reports every case through a leveled logger with
//! colorized console output and plain-text file output.
//!
//! ## Modules
//!
//! - [`config`] - Logger and evaluator configuration
//! - [`error`] - Typed error handling with thiserror
//! - [`evaluator`] - Batch evaluation and case listing
//! - [`logger`] - Leveled console/file line emitter
//! - [`style`] - Category-tagged messages and ANSI rendering
//! - [`summary`] - Per-batch outcome counts
//!
//! ## Example
//!
//! ```no_run
//! use simple_testing::Evaluator;
//!
//! let evaluator = Evaluator::new(2);
//! let summary = evaluator
//!     .evaluate_cases(&[2, 3, -1], &[4, 9, 0], |x: &i32| Ok::<_, String>(x * x))
//!     .unwrap();
//! assert_eq!(summary.mismatched, 1);
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod logger;
pub mod style;
pub mod summary;
pub(crate) mod utils;

pub use config::{ColorChoice, EvaluatorConfig, LoggerConfig, ReportMode, DEFAULT_LOG_FILE};
pub use error::{ConfigError, EvalError, LoggerError};
pub use evaluator::{Evaluator, CASE_PRIORITY, HEADER_PRIORITY};
pub use logger::{LogRecord, Logger};
pub use style::{Category, Message};
pub use summary::{CaseOutcome, CaseStatus, EvaluationSummary};

pub use utils::setup_diagnostics;
