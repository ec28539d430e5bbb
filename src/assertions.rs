//! The assertions.
//!
//! Every assertion returns `true` when it holds. Otherwise it builds a
//! failure table, hands it to the [`Reporter`] and returns `false`, so a
//! test can react to a failure or keep checking:
//!
//! ```
//! use tabassert::{equal, Recorder};
//!
//! let t = Recorder::named("demo");
//! assert!(equal(&t, &123, &123, ()));
//! assert!(!equal(&t, &"left", &"right", "while comparing sides"));
//! assert!(t.last().unwrap().contains("Not equal"));
//! ```

use crate::format::write_comparison;
use crate::message::Message;
use crate::reporter::Reporter;
use crate::table::Table;
use crate::trace::StackTrace;
use crate::validate::{validate_equal_args, Nullable};
use std::fmt::Debug;
use std::panic::Location;

/// Writes extra rows into a failure table.
pub type Details<'a> = &'a dyn Fn(&mut Table);

// ============================================================================
// EQUALITY
// ============================================================================

/// Asserts that two values are equal.
///
/// Function pointers cannot be compared and always fail.
#[track_caller]
pub fn equal<R, E, A>(t: &R, expected: &E, actual: &A, msg: impl Into<Message>) -> bool
where
    R: Reporter + ?Sized,
    E: PartialEq<A> + Debug + ?Sized,
    A: Debug + ?Sized,
{
    let msg = msg.into();

    if let Err(err) = validate_equal_args(expected, actual) {
        return fail(t, &err.to_string(), None, msg);
    }

    if expected == actual {
        return true;
    }

    let format = msg.format();
    fail(
        t,
        "Not equal",
        Some(&|table: &mut Table| write_comparison(table, format, expected, actual)),
        msg,
    )
}

/// Asserts that two values are not equal.
///
/// Function pointers cannot be compared and always fail.
#[track_caller]
pub fn not_equal<R, E, A>(t: &R, expected: &E, actual: &A, msg: impl Into<Message>) -> bool
where
    R: Reporter + ?Sized,
    E: PartialEq<A> + Debug + ?Sized,
    A: Debug + ?Sized,
{
    let msg = msg.into();

    if let Err(err) = validate_equal_args(expected, actual) {
        return fail(t, &err.to_string(), None, msg);
    }

    if expected != actual {
        return true;
    }

    fail(t, &format!("Should not be: {:?}", actual), None, msg)
}

// ============================================================================
// BOOLEANS
// ============================================================================

#[track_caller]
pub fn is_true<R>(t: &R, value: bool, msg: impl Into<Message>) -> bool
where
    R: Reporter + ?Sized,
{
    if value {
        return true;
    }
    fail(t, "Should be true", None, msg)
}

#[track_caller]
pub fn is_false<R>(t: &R, value: bool, msg: impl Into<Message>) -> bool
where
    R: Reporter + ?Sized,
{
    if !value {
        return true;
    }
    fail(t, "Should be false", None, msg)
}

// ============================================================================
// NIL
// ============================================================================

/// Asserts that `object` is nil (`None` or a null pointer).
#[track_caller]
pub fn nil<R, T>(t: &R, object: &T, msg: impl Into<Message>) -> bool
where
    R: Reporter + ?Sized,
    T: Nullable + Debug + ?Sized,
{
    if object.is_nil() {
        return true;
    }
    fail(t, &format!("Expected nil, but got: {:?}", object), None, msg)
}

#[track_caller]
pub fn not_nil<R, T>(t: &R, object: &T, msg: impl Into<Message>) -> bool
where
    R: Reporter + ?Sized,
    T: Nullable + ?Sized,
{
    if !object.is_nil() {
        return true;
    }
    fail(t, "Expected value not to be nil.", None, msg)
}

// ============================================================================
// TRAITS
// ============================================================================

/// Reports whether a type implements a trait. The check itself happens at
/// compile time in [`assert_implements!`](crate::assert_implements).
#[track_caller]
pub fn implements<R>(
    t: &R,
    implemented: bool,
    type_name: &str,
    trait_name: &str,
    msg: impl Into<Message>,
) -> bool
where
    R: Reporter + ?Sized,
{
    if implemented {
        return true;
    }
    fail(
        t,
        &format!("{} must implement {}", type_name, trait_name),
        None,
        msg,
    )
}

// ============================================================================
// REPORTING
// ============================================================================

/// Reports a failure and returns `false`.
///
/// The table holds, in order: the test name, the stack trace, the failure
/// message (if any), the user message (if any) and whatever `details`
/// writes.
#[track_caller]
pub fn fail<R>(
    t: &R,
    failure_message: &str,
    details: Option<Details<'_>>,
    msg: impl Into<Message>,
) -> bool
where
    R: Reporter + ?Sized,
{
    let msg = msg.into();
    let config = t.config();
    let name = t.name();
    let trace = StackTrace::capture(Location::caller(), &config.trace);

    let mut table = Table::with_config(config.table.clone());
    table.write_row(&[&"Test:", &name]);
    table.writef(format_args!("\nTrace:\t{}", trace.lines().join("\n\t")));

    if !failure_message.is_empty() {
        table.write_row(&[&"Error:", &failure_message]);
    }

    if let Some(text) = msg.text() {
        table.write_row(&[&"Message:", &text]);
    }

    if let Some(details) = details {
        details(&mut table);
    }

    tracing::debug!(test = %name, error = failure_message, "assertion failed");
    t.error(&table.render());

    false
}
