//! Assertion macros.
//!
//! Each macro takes the reporter, the operands, and optional message
//! arguments in [`message!`](crate::message) syntax, and expands to the
//! matching function call at the call site, so the `Trace:` row points at
//! the macro invocation.
//!
//! ```
//! use tabassert::{assert_equal, assert_nil, assert_true, Recorder};
//!
//! let t = Recorder::named("demo");
//! assert_true!(&t, 1 < 2);
//! assert_nil!(&t, None::<u8>, "lookup of {}", "missing-key");
//! assert_equal!(&t, vec![1, 2], vec![1, 3], format = Diff, "rows");
//! assert!(t.last().unwrap().contains("Diff:"));
//! ```

/// Asserts that two values are equal. See [`equal`](crate::equal).
#[macro_export]
macro_rules! assert_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $crate::equal($t, &$expected, &$actual, $crate::Message::none())
    };
    ($t:expr, $expected:expr, $actual:expr, $($arg:tt)+) => {
        $crate::equal($t, &$expected, &$actual, $crate::message!($($arg)+))
    };
}

/// Asserts that two values are not equal. See [`not_equal`](crate::not_equal).
#[macro_export]
macro_rules! assert_not_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $crate::not_equal($t, &$expected, &$actual, $crate::Message::none())
    };
    ($t:expr, $expected:expr, $actual:expr, $($arg:tt)+) => {
        $crate::not_equal($t, &$expected, &$actual, $crate::message!($($arg)+))
    };
}

#[macro_export]
macro_rules! assert_true {
    ($t:expr, $value:expr $(,)?) => {
        $crate::is_true($t, $value, $crate::Message::none())
    };
    ($t:expr, $value:expr, $($arg:tt)+) => {
        $crate::is_true($t, $value, $crate::message!($($arg)+))
    };
}

#[macro_export]
macro_rules! assert_false {
    ($t:expr, $value:expr $(,)?) => {
        $crate::is_false($t, $value, $crate::Message::none())
    };
    ($t:expr, $value:expr, $($arg:tt)+) => {
        $crate::is_false($t, $value, $crate::message!($($arg)+))
    };
}

#[macro_export]
macro_rules! assert_nil {
    ($t:expr, $object:expr $(,)?) => {
        $crate::nil($t, &$object, $crate::Message::none())
    };
    ($t:expr, $object:expr, $($arg:tt)+) => {
        $crate::nil($t, &$object, $crate::message!($($arg)+))
    };
}

#[macro_export]
macro_rules! assert_not_nil {
    ($t:expr, $object:expr $(,)?) => {
        $crate::not_nil($t, &$object, $crate::Message::none())
    };
    ($t:expr, $object:expr, $($arg:tt)+) => {
        $crate::not_nil($t, &$object, $crate::message!($($arg)+))
    };
}

/// Asserts that the type of a value implements a trait.
///
/// The check resolves at compile time for the value's concrete type; a
/// missing implementation is reported like any other failed assertion.
///
/// ```
/// use tabassert::{assert_implements, Recorder};
///
/// struct Opaque;
///
/// let t = Recorder::named("demo");
/// assert!(assert_implements!(&t, String::new(), std::fmt::Display));
/// assert!(!assert_implements!(&t, Opaque, std::fmt::Display));
/// assert!(t.last().unwrap().contains("must implement"));
/// ```
#[macro_export]
macro_rules! assert_implements {
    (@check $t:expr, $object:expr, $trait:path, $msg:expr) => {{
        #[allow(dead_code)]
        struct Probe<T: ?Sized>(::core::marker::PhantomData<T>);

        trait NotImplemented {
            fn implemented(&self) -> bool {
                false
            }
        }

        impl<T: ?Sized> NotImplemented for Probe<T> {}

        #[allow(dead_code)]
        impl<T: ?Sized + $trait> Probe<T> {
            fn implemented(&self) -> bool {
                true
            }
        }

        fn probe<T: ?Sized>(_: &T) -> Probe<T> {
            Probe(::core::marker::PhantomData)
        }

        let object = &$object;
        $crate::implements(
            $t,
            probe(object).implemented(),
            $crate::type_name_of(object),
            stringify!($trait),
            $msg,
        )
    }};
    ($t:expr, $object:expr, $trait:path $(,)?) => {
        $crate::assert_implements!(@check $t, $object, $trait, $crate::Message::none())
    };
    ($t:expr, $object:expr, $trait:path, $($arg:tt)+) => {
        $crate::assert_implements!(@check $t, $object, $trait, $crate::message!($($arg)+))
    };
}
