//! Tabassert: assertion helpers for tests with aligned, table-formatted
//! failure reports.
//!
//! ```
//! use tabassert::{assert_equal, Recorder};
//!
//! let t = Recorder::named("readme");
//! assert_equal!(&t, 2 + 2, 5, "arithmetic");
//! let report = t.last().unwrap();
//! assert!(report.contains("Error:"));
//! assert!(report.contains("Expect:"));
//! ```
//!
//! In a real test, use [`Tester`] (keeps going, fails the test at the end of
//! scope) or [`FailFast`] (panics on the first failure) as the reporter.

pub use crate::assertions::{
    equal, fail, implements, is_false, is_true, nil, not_equal, not_nil, Details,
};
pub use crate::config::{ColorMode, Config, TraceConfig};
pub use crate::errors::AssertError;
pub use crate::format::{type_name_of, Format};
pub use crate::message::Message;
pub use crate::reporter::{FailFast, Recorder, Reporter, Tester};
pub use crate::table::{Table, TableConfig};
pub use crate::trace::{Frame, StackTrace};
pub use crate::validate::{is_function, validate_equal_args, Nullable};

pub mod assertions;
pub mod config;
pub mod errors;
pub mod format;
pub mod message;
pub mod reporter;
pub mod table;
pub mod trace;
pub mod validate;

mod macros;

/// Everything a test module needs.
pub mod prelude {
    pub use crate::{
        assert_equal, assert_false, assert_implements, assert_nil, assert_not_equal,
        assert_not_nil, assert_true, message,
    };
    pub use crate::{FailFast, Format, Recorder, Reporter, Tester};
}
