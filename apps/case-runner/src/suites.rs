use clap::ValueEnum;
use simple_testing::{EvalError, EvaluationSummary, Evaluator};
use std::fmt::Display;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    /// Squares, with one deliberately wrong expectation
    Square,
    /// Identity through division, failing on zero
    Division,
    /// Upper-casing, failing on empty input
    Strings,
    All,
}

impl Suite {
    fn members(self) -> Vec<Suite> {
        match self {
            Suite::All => vec![Suite::Square, Suite::Division, Suite::Strings],
            single => vec![single],
        }
    }
}

pub fn run(suite: Suite, evaluator: &Evaluator, to_file: bool) -> Result<EvaluationSummary, EvalError> {
    let mut summary = EvaluationSummary::default();
    for member in suite.members() {
        info!("Running suite {:?}", member);
        let result = match member {
            Suite::Square => run_batch(evaluator, to_file, &[2_i64, 3, -1], &[4, 9, 0], |x| {
                Ok::<_, String>(x * x)
            }),
            Suite::Division => run_batch(evaluator, to_file, &[1_i64, 0, 2], &[1, 0, 2], |x| {
                x.checked_div(*x)
                    .map(|one| one * x)
                    .ok_or_else(|| "attempt to divide by zero".to_string())
            }),
            Suite::Strings => run_batch(
                evaluator,
                to_file,
                &["rust", "cargo", ""],
                &["RUST".to_string(), "CARGO".to_string(), String::new()],
                |s| {
                    if s.is_empty() {
                        Err("empty input".to_string())
                    } else {
                        Ok(s.to_uppercase())
                    }
                },
            ),
            Suite::All => unreachable!("Suite::members expands All"),
        }?;
        summary.merge(result);
    }
    Ok(summary)
}

fn run_batch<T, R, E, F>(
    evaluator: &Evaluator,
    to_file: bool,
    cases: &[T],
    expected: &[R],
    operation: F,
) -> Result<EvaluationSummary, EvalError>
where
    T: Display,
    R: PartialEq + Display,
    E: Display,
    F: Fn(&T) -> Result<R, E>,
{
    if to_file {
        evaluator.log_cases(cases)?;
        evaluator.log_evaluations(cases, expected, operation)
    } else {
        evaluator.pretty_print(cases)?;
        evaluator.evaluate_cases(cases, expected, operation)
    }
}
