//! Rendering of compared values into a failure table.

use crate::table::Table;
use difference::{Changeset, Difference};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// How the expected and actual values of a failed comparison are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// `{:?}` of the value followed by its type name.
    #[default]
    Typed,
    /// `{:?}` of the value only.
    Debug,
    /// `{:#?}` of the value, continuation lines kept in the value column.
    Pretty,
    /// Pretty values plus a line diff between them.
    Diff,
}

/// Returns the type name of a value.
pub fn type_name_of<T: ?Sized>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// Re-indents every continuation line of `text` into the second table column.
pub fn indent_continuation(text: &str) -> String {
    text.replace('\n', "\n\t")
}

/// Line diff of two multi-line strings. Lines only in `expected` start with
/// `-`, lines only in `actual` with `+`, common lines with a space.
pub fn line_diff(expected: &str, actual: &str) -> String {
    let changeset = Changeset::new(expected, actual, "\n");
    let mut lines = Vec::new();
    for diff in &changeset.diffs {
        let (marker, text) = match diff {
            Difference::Same(x) => (' ', x),
            Difference::Rem(x) => ('-', x),
            Difference::Add(x) => ('+', x),
        };
        lines.extend(text.split('\n').map(|line| format!("{}{}", marker, line)));
    }
    lines.join("\n")
}

/// Writes the `Expect:` and `Actual:` rows for a failed comparison.
pub fn write_comparison<E, A>(table: &mut Table, format: Format, expected: &E, actual: &A)
where
    E: Debug + ?Sized,
    A: Debug + ?Sized,
{
    match format {
        Format::Typed => {
            table.writef(format_args!(
                "\nExpect:\t{:?}\t({})",
                expected,
                type_name_of(expected)
            ));
            table.writef(format_args!(
                "\nActual:\t{:?}\t({})",
                actual,
                type_name_of(actual)
            ));
        }
        Format::Debug => {
            table.writef(format_args!("\nExpect:\t{:?}", expected));
            table.writef(format_args!("\nActual:\t{:?}", actual));
        }
        Format::Pretty => {
            write_pretty(table, expected, actual);
        }
        Format::Diff => {
            let (expected, actual) = write_pretty(table, expected, actual);
            let diff = line_diff(&expected, &actual);
            table.writef(format_args!("\nDiff:\t{}", indent_continuation(&diff)));
        }
    }
}

fn write_pretty<E, A>(table: &mut Table, expected: &E, actual: &A) -> (String, String)
where
    E: Debug + ?Sized,
    A: Debug + ?Sized,
{
    let expected = format!("{:#?}", expected);
    let actual = format!("{:#?}", actual);
    table.writef(format_args!("\nExpect:\t{}", indent_continuation(&expected)));
    table.writef(format_args!("\nActual:\t{}", indent_continuation(&actual)));
    (expected, actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn typed_rows_carry_type_names() {
        let mut table = Table::new();
        write_comparison(&mut table, Format::Typed, &1u8, &2u8);
        assert_eq!(table.raw(), "\nExpect:\t1\t(u8)\nActual:\t2\t(u8)");
    }

    #[test]
    fn debug_rows_have_no_type() {
        let mut table = Table::new();
        write_comparison(&mut table, Format::Debug, "a", "b");
        assert_eq!(table.raw(), "\nExpect:\t\"a\"\nActual:\t\"b\"");
    }

    #[test]
    fn pretty_rows_stay_in_value_column() {
        let mut table = Table::new();
        let p = Point { x: 1, y: 2 };
        let q = Point { x: 1, y: 3 };
        write_comparison(&mut table, Format::Pretty, &p, &q);
        assert_eq!(
            table.render(),
            "\nExpect:     Point {\n                x: 1,\n                y: 2,\n            }\
             \nActual:     Point {\n                x: 1,\n                y: 3,\n            }"
        );
    }

    #[test]
    fn line_diff_marks_changed_lines() {
        assert_eq!(line_diff("a\nb\nc", "a\nx\nc"), " a\n-b\n+x\n c");
    }

    #[test]
    fn diff_format_adds_diff_row() {
        let mut table = Table::new();
        write_comparison(&mut table, Format::Diff, &vec![1, 2], &vec![1, 3]);
        let raw = table.raw();
        assert!(raw.contains("\nDiff:\t"));
        assert!(raw.contains("-    2,"));
        assert!(raw.contains("+    3,"));
    }

    #[test]
    fn type_name_of_str_slice() {
        assert_eq!(type_name_of("x"), "str");
        assert_eq!(type_name_of(&5i64), "i64");
    }
}
