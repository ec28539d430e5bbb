//! Stack context for failure reports.
//!
//! The call site of an assertion is known through `#[track_caller]`. Frames
//! further up are read from a captured backtrace and kept only when they
//! come from test sources, so the `Trace:` row shows where in the tests the
//! failing assertion was reached.

use crate::config::TraceConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::backtrace::Backtrace;
use std::panic::Location;
use std::path::Path;

/// Location line of a rendered backtrace frame: `at <file>:<line>[:<col>]`.
static FRAME_LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*at (?P<file>.+?):(?P<line>\d+)(?::\d+)?\s*$").expect("frame location regex")
});

/// Symbol line of a rendered backtrace frame: `<index>: <path>`. Inlined
/// symbols of the same frame carry no index.
static FRAME_SYMBOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\d+:\s+)?(?P<symbol>\S.*?)(?:::h[0-9a-f]{16})?\s*$")
        .expect("frame symbol regex")
});

/// Shim through which the test harness calls each test function.
const HARNESS_SHIM: &str = "core::ops::function::FnOnce::call_once";

/// A source position in a stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file: String,
    pub line: u32,
    /// Demangled function path, when read from a backtrace.
    pub symbol: Option<String>,
}

impl Frame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// `<file name>:<line>`, the form shown in the `Trace:` row.
    pub fn short(&self) -> String {
        let name = Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file);
        format!("{}:{}", name, self.line)
    }
}

impl From<&Location<'_>> for Frame {
    fn from(location: &Location<'_>) -> Self {
        Frame::new(location.file(), location.line())
    }
}

/// Frames leading to a failing assertion, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    frames: Vec<Frame>,
}

impl StackTrace {
    /// Captures the trace for an assertion called at `caller`.
    pub fn capture(caller: &Location<'_>, config: &TraceConfig) -> Self {
        if !config.enabled {
            return Self::from_frames(Frame::from(caller), Vec::new(), config);
        }

        let rendered = Backtrace::force_capture().to_string();
        let frames: Vec<Frame> = match config.test_file_filter() {
            Ok(filter) => parse_frames(&rendered)
                .into_iter()
                .filter(|frame| filter.is_match(&frame.file))
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "skipping backtrace frames");
                Vec::new()
            }
        };
        tracing::trace!(frames = frames.len(), "captured stack trace");

        Self::from_frames(Frame::from(caller), frames, config)
    }

    /// Puts `caller` first, then `frames` without consecutive duplicates of
    /// the same short location, up to `config.max_frames` entries.
    pub fn from_frames(caller: Frame, frames: Vec<Frame>, config: &TraceConfig) -> Self {
        let limit = config.max_frames.max(1);
        let mut kept: Vec<Frame> = Vec::with_capacity(frames.len() + 1);
        for frame in std::iter::once(caller).chain(frames) {
            if kept.len() == limit {
                break;
            }
            if kept.last().map(Frame::short) == Some(frame.short()) {
                continue;
            }
            kept.push(frame);
        }
        Self { frames: kept }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Short locations, ready to join into the `Trace:` row.
    pub fn lines(&self) -> Vec<String> {
        self.frames.iter().map(Frame::short).collect()
    }
}

/// Extracts the source locations of a rendered `std::backtrace::Backtrace`,
/// innermost first.
///
/// The closure through which the test harness enters a test function sits
/// in the test file, on the line of the `fn` item, but is not part of the
/// call chain. It is left out.
pub fn parse_frames(rendered: &str) -> Vec<Frame> {
    let mut symbols: Vec<(String, Option<Frame>)> = Vec::new();

    for line in rendered.lines() {
        if let Some(caps) = FRAME_LOCATION.captures(line) {
            let Ok(number) = caps["line"].parse() else {
                continue;
            };
            if let Some((symbol, frame @ None)) = symbols.last_mut() {
                *frame = Some(Frame::new(&caps["file"], number).with_symbol(symbol.as_str()));
            }
        } else if line.trim_start().starts_with("at ") {
            continue;
        } else if let Some(caps) = FRAME_SYMBOL.captures(line) {
            symbols.push((caps["symbol"].to_string(), None));
        }
    }

    let mut frames = Vec::with_capacity(symbols.len());
    for (i, (symbol, frame)) in symbols.iter().enumerate() {
        let entered_by_harness = symbol.ends_with("::{{closure}}")
            && symbols.get(i + 1).map(|(next, _)| next.as_str()) == Some(HARNESS_SHIM);
        if entered_by_harness {
            continue;
        }
        if let Some(frame) = frame {
            frames.push(frame.clone());
        }
    }
    frames
}
