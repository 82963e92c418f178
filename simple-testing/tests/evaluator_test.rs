use simple_testing::{
    CaseStatus, ColorChoice, EvalError, Evaluator, EvaluatorConfig, Logger, LoggerConfig,
    ReportMode,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn evaluator(level: u32) -> (Evaluator, SharedBuffer) {
    let buf = SharedBuffer::default();
    let logger = Logger::with_console(LoggerConfig::new(level), buf.clone());
    (Evaluator::with_logger(Arc::new(logger)), buf)
}

fn square(x: &i64) -> Result<i64, String> {
    Ok(x * x)
}

fn identity_by_division(x: &i64) -> Result<i64, String> {
    x.checked_div(*x)
        .map(|one| one * x)
        .ok_or_else(|| "attempt to divide by zero".to_string())
}

#[test]
fn test_square_with_mismatch_at_last_index() {
    let (evaluator, buf) = evaluator(2);

    let summary = evaluator
        .evaluate_cases(&[2, 3, -1], &[4, 9, 0], square)
        .unwrap();

    assert_eq!(
        buf.lines(),
        vec![
            "Test case passed.",
            "Test case passed.",
            "Test case failed. Expected: 0, but got: 1",
        ]
    );
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.mismatched, 1);
    assert_eq!(
        summary.outcomes[2].status,
        CaseStatus::Mismatch {
            expected: "0".to_string(),
            actual: "1".to_string(),
        }
    );
}

#[test]
fn test_operation_error_does_not_stop_batch() {
    let (evaluator, buf) = evaluator(2);

    let summary = evaluator
        .evaluate_cases(&[1, 0, 2], &[1, 0, 2], identity_by_division)
        .unwrap();

    assert_eq!(
        buf.lines(),
        vec![
            "Test case passed.",
            "Test case failed with exception: attempt to divide by zero",
            "Test case passed.",
        ]
    );
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.passed, 2);
    let indices: Vec<usize> = summary.outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_panicking_operation_is_reported() {
    let (evaluator, buf) = evaluator(2);

    let summary = evaluator
        .evaluate_cases(&[4, 0], &[25, 0], |x: &i32| Ok::<_, String>(100 / *x))
        .unwrap();

    let lines = buf.lines();
    assert_eq!(lines[0], "Test case passed.");
    assert!(lines[1].starts_with("Test case failed with exception: "));
    assert!(lines[1].contains("divide by zero"));
    assert_eq!(summary.errored, 1);
}

#[test]
fn test_length_mismatch_fails_before_output() {
    let (evaluator, buf) = evaluator(2);

    let result = evaluator.evaluate_cases(&[1, 2, 3], &[1, 2], square);

    match result {
        Err(EvalError::LengthMismatch { cases, expected }) => {
            assert_eq!(cases, 3);
            assert_eq!(expected, 2);
        }
        other => panic!("Expected LengthMismatch, got {:?}", other),
    }
    assert!(buf.lines().is_empty());
}

#[test]
fn test_pretty_print_never_calls_operation() {
    let (evaluator, buf) = evaluator(2);

    evaluator.pretty_print(&["a", "b"]).unwrap();

    assert_eq!(buf.lines(), vec!["Test Cases:", "  0 : a", "  1 : b"]);
}

#[test]
fn test_level_one_shows_header_only() {
    let (evaluator, buf) = evaluator(1);

    evaluator.pretty_print(&[10, 20]).unwrap();
    let summary = evaluator.evaluate_cases(&[1], &[2], square).unwrap();

    assert_eq!(buf.lines(), vec!["Test Cases:"]);
    // Gating affects output only, never the summary.
    assert_eq!(summary.mismatched, 1);
}

#[test]
fn test_custom_equality_predicate() {
    let (evaluator, buf) = evaluator(2);

    let summary = evaluator
        .evaluate_cases_by(
            &[1.0_f64, 2.0],
            &[0.333, 0.5],
            |x: &f64| Ok::<_, String>(if *x == 1.0 { 1.0 / 3.0 } else { 1.0 / x }),
            |want: &f64, got: &f64| (want - got).abs() < 1e-3,
        )
        .unwrap();

    assert!(summary.all_passed());
    assert_eq!(buf.lines().len(), 2);
}

#[test]
fn test_strict_mode_aborts_on_mismatch() {
    let (evaluator, buf) = evaluator(2);
    let evaluator = evaluator.with_mode(ReportMode::Strict);

    let result = evaluator.evaluate_cases(&[2, 3, 4], &[4, 10, 16], square);

    match result {
        Err(EvalError::AssertionFailed {
            index,
            expected,
            actual,
        }) => {
            assert_eq!(index, 1);
            assert_eq!(expected, "10");
            assert_eq!(actual, "9");
        }
        other => panic!("Expected AssertionFailed, got {:?}", other),
    }
    // The mismatch is still reported before the batch stops.
    assert_eq!(
        buf.lines(),
        vec!["Test case passed.", "Test case failed. Expected: 10, but got: 9"]
    );
}

#[test]
fn test_strict_mode_continues_past_operation_errors() {
    let (evaluator, _buf) = evaluator(2);
    let evaluator = evaluator.with_mode(ReportMode::Strict);

    let summary = evaluator
        .evaluate_cases(&[1, 0, 2], &[1, 0, 2], identity_by_division)
        .unwrap();

    assert_eq!(summary.errored, 1);
    assert_eq!(summary.passed, 2);
}

#[test]
fn test_colored_console_output() {
    let buf = SharedBuffer::default();
    let config = LoggerConfig::new(2).with_color(ColorChoice::Always);
    let evaluator = Evaluator::with_logger(Arc::new(Logger::with_console(config, buf.clone())));

    evaluator.evaluate_cases(&[2], &[4], square).unwrap();

    let lines = buf.lines();
    assert!(lines[0].contains('\u{1b}'));
    assert!(lines[0].contains("Test case passed."));
}

#[test]
fn test_shared_logger_keeps_lines_whole() {
    let buf = SharedBuffer::default();
    let logger = Arc::new(Logger::with_console(LoggerConfig::new(2), buf.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let evaluator = Evaluator::with_logger(Arc::clone(&logger));
            std::thread::spawn(move || {
                let cases: Vec<i64> = (0..50).collect();
                let expected: Vec<i64> = cases.iter().map(|x| x * x).collect();
                evaluator.evaluate_cases(&cases, &expected, square).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().all_passed());
    }
    let lines = buf.lines();
    assert_eq!(lines.len(), 200);
    assert!(lines.iter().all(|line| line == "Test case passed."));
}

#[test]
fn test_from_config_carries_level_file_and_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.log");
    let config = EvaluatorConfig {
        logger: LoggerConfig::new(1).with_log_file(&path),
        report_mode: ReportMode::Strict,
    };

    let evaluator = Evaluator::from_config(&config);

    assert_eq!(evaluator.mode(), ReportMode::Strict);
    assert_eq!(evaluator.logger().level(), 1);
    assert_eq!(evaluator.logger().log_file(), path.as_path());
}
