//! Argument checks shared by the assertions.

use crate::errors::AssertError;
use std::fmt::Debug;
use std::ptr::NonNull;

// ============================================================================
// FUNCTION ARGUMENTS
// ============================================================================

/// Returns true if `T` is a function pointer type.
///
/// Function pointers compare by address, which says nothing about the
/// behaviour of the functions, so equality assertions reject them.
pub fn is_function<T: ?Sized>() -> bool {
    let name = std::any::type_name::<T>();
    let name = name.strip_prefix("for<").map_or(name, |rest| {
        rest.split_once("> ").map_or(rest, |(_, tail)| tail)
    });
    let name = name.strip_prefix("unsafe ").unwrap_or(name);
    let name = match name.strip_prefix("extern \"") {
        Some(rest) => rest.split_once("\" ").map_or(rest, |(_, tail)| tail),
        None => name,
    };
    name.starts_with("fn(")
}

/// Checks that `expected` and `actual` can take part in an equality assertion.
pub fn validate_equal_args<E, A>(expected: &E, actual: &A) -> Result<(), AssertError>
where
    E: Debug + ?Sized,
    A: Debug + ?Sized,
{
    if is_function::<E>() || is_function::<A>() {
        return Err(AssertError::invalid_operation(
            format!("{:?}", expected),
            format!("{:?}", actual),
            "cannot take func type as argument",
        ));
    }
    Ok(())
}

// ============================================================================
// NIL VALUES
// ============================================================================

/// Values that can be nil: absent options and null pointers.
pub trait Nullable {
    fn is_nil(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Nullable for *const T {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> Nullable for NonNull<T> {
    fn is_nil(&self) -> bool {
        false
    }
}

impl<T: Nullable + ?Sized> Nullable for &T {
    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: Nullable + ?Sized> Nullable for Box<T> {
    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}
