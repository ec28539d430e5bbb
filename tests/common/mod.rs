//! # Shared helpers for the tabassert integration tests.

#![allow(dead_code)]

use tabassert::{Config, Recorder, TraceConfig};

/// A recorder whose reports carry only the call site in the `Trace:` row,
/// so report layouts are stable.
pub fn quiet_recorder(name: &str) -> Recorder {
    Recorder::named(name).with_config(Config {
        trace: TraceConfig {
            enabled: false,
            ..TraceConfig::default()
        },
        ..Config::default()
    })
}

/// A recorder with full stack tracing.
pub fn tracing_recorder(name: &str) -> Recorder {
    Recorder::named(name)
}

/// Interface used to exercise `assert_implements!`.
pub trait AssertionTester {
    fn test_method(&self);
}

#[derive(Debug, Default, PartialEq)]
pub struct ConformingObject;

impl AssertionTester for ConformingObject {
    fn test_method(&self) {}
}

#[derive(Debug, Default, PartialEq)]
pub struct NonConformingObject;
