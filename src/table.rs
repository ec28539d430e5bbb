//! Aligned table writer for failure reports.
//!
//! Text is written into the table as tab-separated cells and laid out with
//! elastic tabstops: a cell followed by a tab belongs to a column, and every
//! run of consecutive lines sharing that column is padded to a common width.
//! The text after the last tab of a line is never aligned.
//!
//! ```
//! use tabassert::Table;
//!
//! let mut table = Table::new();
//! table.write_row(&[&"Test:", &"demo"]);
//! table.write_row(&[&"Error:", &"Should be true"]);
//! assert_eq!(
//!     table.render(),
//!     "\nTest:      demo               \nError:     Should be true     "
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Write as _};
use unicode_width::UnicodeWidthStr;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Default number of padding characters appended to the widest cell of a column.
pub const DEFAULT_PADDING: usize = 5;

/// Layout parameters for a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TableConfig {
    /// Minimal column width, padding included.
    pub min_width: usize,
    /// Padding added to the widest cell of each column.
    pub padding: usize,
    /// Character used for padding.
    pub pad_char: char,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_width: 0,
            padding: DEFAULT_PADDING,
            pad_char: ' ',
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// A buffer of tab-separated text rendered as an aligned table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    buffer: String,
    config: TableConfig,
}

impl Table {
    /// Creates an empty table with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with an explicit layout.
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            buffer: String::new(),
            config,
        }
    }

    /// Starts a new line and writes each column as a tab-terminated cell.
    pub fn write_row(&mut self, cols: &[&dyn Display]) {
        self.buffer.push('\n');
        for col in cols {
            // Writing into a String cannot fail.
            let _ = write!(self.buffer, "{}\t", col);
        }
    }

    /// Appends raw formatted text. Tabs and newlines keep their layout meaning.
    pub fn writef(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.buffer.write_fmt(args);
    }

    /// Returns true if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The unaligned buffer contents.
    pub fn raw(&self) -> &str {
        &self.buffer
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Lays out the buffered text.
    pub fn render(&self) -> String {
        let lines: Vec<Vec<&str>> = self
            .buffer
            .split('\n')
            .map(|line| line.split('\t').collect())
            .collect();

        let mut layout = Layout {
            lines: &lines,
            config: &self.config,
            widths: Vec::new(),
            out: String::with_capacity(self.buffer.len() * 2),
        };
        layout.format(0, lines.len());
        layout.out
    }
}

impl fmt::Write for Table {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

/// State of one render pass. `widths` holds the widths of the enclosing
/// column blocks, outermost first.
struct Layout<'a> {
    lines: &'a [Vec<&'a str>],
    config: &'a TableConfig,
    widths: Vec<usize>,
    out: String,
}

impl Layout<'_> {
    /// Number of tab-terminated cells on a line.
    fn terminated(&self, line: usize) -> usize {
        self.lines[line].len() - 1
    }

    /// Formats lines `line0..line1`, all of which share the columns in `widths`.
    fn format(&mut self, mut line0: usize, line1: usize) {
        let column = self.widths.len();
        let mut this = line0;

        while this < line1 {
            if column >= self.terminated(this) {
                this += 1;
                continue;
            }

            // A block for this column starts here; flush the lines before it.
            self.write_lines(line0, this);
            line0 = this;

            let mut width = self.config.min_width;
            while this < line1 && column < self.terminated(this) {
                let cell = self.lines[this][column];
                width = width.max(cell.width() + self.config.padding);
                this += 1;
            }

            self.widths.push(width);
            self.format(line0, this);
            self.widths.pop();
            line0 = this;
        }

        self.write_lines(line0, line1);
    }

    fn write_lines(&mut self, line0: usize, line1: usize) {
        let last = self.lines.len() - 1;
        for i in line0..line1 {
            for (j, cell) in self.lines[i].iter().enumerate() {
                self.out.push_str(cell);
                if let Some(&width) = self.widths.get(j) {
                    let fill = width.saturating_sub(cell.width());
                    self.out.extend(std::iter::repeat(self.config.pad_char).take(fill));
                }
            }
            if i != last {
                self.out.push('\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn rows_share_column_width() {
        let mut table = Table::new();
        table.write_row(&[&"Test:", &"demo"]);
        table.write_row(&[&"Error:", &"Not equal"]);
        let expected = format!(
            "\n{:<11}{:<14}\n{:<11}{:<14}",
            "Test:", "demo", "Error:", "Not equal"
        );
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn trailing_cell_is_not_padded() {
        let mut table = Table::new();
        table.writef(format_args!("\nTrace:\ta.rs:1\n\tb.rs:2"));
        assert_eq!(table.render(), "\nTrace:     a.rs:1\n           b.rs:2");
    }

    #[test]
    fn untabbed_line_breaks_the_block() {
        let mut table = Table::new();
        table.writef(format_args!("a\tx\nplain\nlonger\ty"));
        assert_eq!(table.render(), "a     x\nplain\nlonger     y");
    }

    #[test]
    fn nested_columns_only_align_within_their_block() {
        let mut table = Table::new();
        table.write_row(&[&"Test:", &"t"]);
        table.writef(format_args!("\nTrace:\tx.rs:3"));
        table.writef(format_args!("\nExpect:\t1\t(i32)"));
        table.writef(format_args!("\nActual:\t22\t(i32)"));
        let expected = format!(
            "\n{:<12}{:<6}\n{:<12}x.rs:3\n{:<12}{:<7}(i32)\n{:<12}{:<7}(i32)",
            "Test:", "t", "Trace:", "Expect:", "1", "Actual:", "22"
        );
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn wide_characters_use_display_width() {
        let mut table = Table::with_config(TableConfig {
            padding: 1,
            ..TableConfig::default()
        });
        table.writef(format_args!("日本\tx\nab\ty"));
        assert_eq!(table.render(), "日本 x\nab   y");
    }

    #[test]
    fn min_width_and_pad_char() {
        let mut table = Table::with_config(TableConfig {
            min_width: 8,
            padding: 1,
            pad_char: '.',
        });
        table.write_row(&[&"key", &"value"]);
        assert_eq!(table.render(), "\nkey.....value...");
    }

    #[test]
    fn fmt_write_appends_raw_text() {
        let mut table = Table::new();
        write!(table, "a\tb").unwrap();
        assert_eq!(table.raw(), "a\tb");
        assert_eq!(table.to_string(), "a     b");
    }
}
