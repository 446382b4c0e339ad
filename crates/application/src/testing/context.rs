//! Test-reporting context.

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use chrono::{DateTime, Utc};
use vantage_domain::{CaseOutcome, RunReport};

/// Aborts the current test case with a message.
///
/// The abort unwinds to the nearest [`TestContext::run`], which records the
/// case as failed and lets sibling cases continue.
#[allow(clippy::panic)]
pub fn abort(message: impl Into<String>) -> ! {
    let message = message.into();
    tracing::error!(%message, "test aborted");
    panic::panic_any(message)
}

/// Reporting context for one test or sub-test.
///
/// A root context is created by the caller, typically inside a `#[test]`
/// function; [`TestContext::run`] creates child contexts named
/// `parent/child`. Outcomes of every descendant are collected in the root.
#[derive(Debug)]
pub struct TestContext {
    name: String,
    started_at: DateTime<Utc>,
    start: Instant,
    outcomes: Vec<CaseOutcome>,
}

impl TestContext {
    /// Create a root context.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started_at: Utc::now(),
            start: Instant::now(),
            outcomes: Vec::new(),
        }
    }

    /// Returns the full name of this context.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aborts the current test with a message.
    ///
    /// The message is recorded as is; the outcome already carries the test name.
    pub fn fatal(&self, message: impl Display) -> ! {
        tracing::debug!(test = %self.name, "fatal");
        abort(message.to_string())
    }

    /// Logs a message attributed to this test.
    pub fn log(&self, message: impl Display) {
        tracing::info!(test = %self.name, "{message}");
    }

    /// Runs `f` as a named sub-test.
    ///
    /// An abort inside `f` ends only this sub-test. The sub-test also fails
    /// when any of its own sub-tests failed. Returns true if it passed.
    pub fn run<F>(&mut self, name: &str, f: F) -> bool
    where
        F: FnOnce(&mut Self),
    {
        let mut child = Self::new(format!("{}/{name}", self.name));
        let span = tracing::info_span!("test", name = %child.name);
        let _entered = span.enter();
        tracing::debug!("running");

        let result = panic::catch_unwind(AssertUnwindSafe(|| f(&mut child)));
        let duration_ms = elapsed_ms(child.start);
        let nested_failed = child.failed();
        self.outcomes.append(&mut child.outcomes);

        let outcome = match result {
            Ok(()) if !nested_failed => CaseOutcome::passed(child.name, duration_ms),
            Ok(()) => {
                CaseOutcome::failed(child.name, "one or more sub-tests failed", duration_ms)
            }
            Err(payload) => {
                CaseOutcome::failed(child.name, panic_message(payload.as_ref()), duration_ms)
            }
        };

        let passed = outcome.status.is_passed();
        if passed {
            tracing::info!(duration_ms, "passed");
        } else {
            tracing::error!(duration_ms, message = outcome.status.message(), "failed");
        }
        self.outcomes.push(outcome);
        passed
    }

    /// Returns the outcomes recorded so far, in completion order.
    #[must_use]
    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.outcomes
    }

    /// Returns true if any recorded case failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.outcomes.iter().any(|o| !o.status.is_passed())
    }

    /// Builds a summary of the recorded outcomes.
    #[must_use]
    pub fn report(&self) -> RunReport {
        RunReport::new(
            self.name.clone(),
            self.started_at,
            self.outcomes.clone(),
            elapsed_ms(self.start),
        )
    }

    /// Consumes the context, aborting with a summary if any case failed.
    ///
    /// Call this at the end of a `#[test]` function so failures recorded by
    /// sub-tests fail the enclosing test.
    pub fn finish(self) -> RunReport {
        let report = self.report();
        if !report.all_passed() {
            let failures: Vec<String> = report
                .failures()
                .map(|o| format!("{}: {}", o.name, o.status.message().unwrap_or_default()))
                .collect();
            abort(format!(
                "{} of {} cases failed\n{}",
                report.failed,
                report.total,
                failures.join("\n")
            ));
        }
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "test panicked".to_string()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
