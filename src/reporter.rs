//! The seam between assertions and the test runner.
//!
//! Assertions hand a rendered failure table to a [`Reporter`]. What happens
//! next belongs to the reporter: [`Tester`] records the failure and fails the
//! test when it goes out of scope, [`FailFast`] panics on the spot, and
//! [`Recorder`] only keeps the reports.

use crate::config::{self, ColorMode, Config};
use std::cell::RefCell;
use std::io::Write;
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Receives formatted failures and marks the current test as failed.
pub trait Reporter {
    /// Name of the running test.
    fn name(&self) -> String;

    /// Records a failure report.
    fn error(&self, report: &str);

    /// Configuration used when building reports.
    fn config(&self) -> &Config {
        config::global()
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn name(&self) -> String {
        (**self).name()
    }

    fn error(&self, report: &str) {
        (**self).error(report)
    }

    fn config(&self) -> &Config {
        (**self).config()
    }
}

/// Name of the test running on this thread. The default test harness runs
/// each test on a thread named after the test path.
pub fn current_test_name() -> String {
    std::thread::current()
        .name()
        .unwrap_or("<unnamed>")
        .to_string()
}

// ============================================================================
// TESTER
// ============================================================================

/// Reporter that lets a test keep going after a failed assertion and fails
/// it once the `Tester` is dropped.
///
/// ```should_panic
/// use tabassert::{assert_equal, Tester};
///
/// let t = Tester::new();
/// assert_equal!(&t, 1, 2);
/// // the report goes to stderr now; dropping `t` fails the test
/// ```
#[derive(Debug)]
pub struct Tester {
    name: String,
    failures: RefCell<Vec<String>>,
}

impl Tester {
    /// A tester named after the current test.
    pub fn new() -> Self {
        Self::named(current_test_name())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failures: RefCell::new(Vec::new()),
        }
    }

    pub fn failed(&self) -> bool {
        !self.failures.borrow().is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.borrow().len()
    }

    /// Takes the recorded failures; the tester no longer fails on drop.
    pub fn take_failures(&self) -> Vec<String> {
        self.failures.take()
    }

    fn print_failure(&self, report: &str) {
        let buffer = failure_output(&self.name, report, self.config().color);
        // eprint! keeps the output inside libtest's capture.
        eprint!("{}", String::from_utf8_lossy(buffer.as_slice()));
    }
}

/// Renders a failure for stderr: a `--- FAIL` header, red and bold when
/// `color` allows it, followed by the report.
fn failure_output(name: &str, report: &str, color: ColorMode) -> Buffer {
    let mut buffer = if color.use_colors() {
        Buffer::ansi()
    } else {
        Buffer::no_color()
    };
    // Writes into an in-memory buffer cannot fail.
    let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(buffer, "--- FAIL: {}", name);
    let _ = buffer.reset();
    let _ = writeln!(buffer, "{}", report);
    buffer
}

impl Default for Tester {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for Tester {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn error(&self, report: &str) {
        self.print_failure(report);
        self.failures.borrow_mut().push(report.to_string());
    }
}

impl Drop for Tester {
    fn drop(&mut self) {
        let failures = self.failures.get_mut();
        if failures.is_empty() || std::thread::panicking() {
            return;
        }
        // The reports themselves were printed as they were recorded.
        panic!("{}: {} assertion(s) failed", self.name, failures.len());
    }
}

// ============================================================================
// FAIL FAST
// ============================================================================

/// Reporter that panics with the report of the first failed assertion.
#[derive(Debug, Clone, Default)]
pub struct FailFast {
    name: Option<String>,
}

impl FailFast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Reporter for FailFast {
    fn name(&self) -> String {
        self.name.clone().unwrap_or_else(current_test_name)
    }

    fn error(&self, report: &str) {
        panic!("{}", report);
    }
}

// ============================================================================
// RECORDER
// ============================================================================

/// Reporter that only stores reports.
#[derive(Debug, Default)]
pub struct Recorder {
    name: String,
    config: Config,
    failures: RefCell<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::named(current_test_name())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: Config::default(),
            failures: RefCell::new(Vec::new()),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn failed(&self) -> bool {
        !self.failures.borrow().is_empty()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.failures.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.failures.borrow_mut().clear();
    }
}

impl Reporter for Recorder {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn error(&self, report: &str) {
        self.failures.borrow_mut().push(report.to_string());
    }

    fn config(&self) -> &Config {
        &self.config
    }
}
