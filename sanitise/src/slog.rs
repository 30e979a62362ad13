//! Adapters between the sanitiser and `slog`.
//!
//! Two directions:
//! - [`SlogSink`] routes the walker's trace events into a `slog::Logger`.
//! - [`IntoSanitisedJson`] turns a value into a `slog::Value` that logs its
//!   sanitised form as structured JSON via `slog`'s nested-value support.
//!
//! Logging never fails because of sanitisation: when a value cannot be
//! sanitised, or its sanitised form cannot be converted to JSON, a placeholder
//! string is logged instead. The original value is never serialized.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{debug, trace, Key, Logger, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    diagnostics::{DiagnosticSink, TraceEvent},
    engine::{sanitise, Sanitise},
};

/// [`DiagnosticSink`] that forwards events to a `slog::Logger`.
///
/// Node visits are logged at `trace`, masking decisions and hook runs at
/// `debug`, so `slog`'s compile-time level filters apply as usual.
#[derive(Clone, Debug)]
pub struct SlogSink {
    logger: Logger,
}

impl SlogSink {
    /// Wraps `logger`.
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl DiagnosticSink for SlogSink {
    fn trace(&self, event: &TraceEvent<'_>) {
        match event {
            TraceEvent::Node {
                path,
                kind,
                type_name,
            } => trace!(self.logger, "sanitise visit";
                "path" => %path, "kind" => %kind, "type" => *type_name),
            TraceEvent::Mask {
                path,
                field,
                context,
            } => debug!(self.logger, "sanitise mask";
                "path" => %path, "type" => field.type_name, "context" => *context),
            TraceEvent::Hook { path, type_name } => debug!(self.logger, "sanitise hook";
                "path" => %path, "type" => *type_name),
        }
    }
}

/// A `slog::Value` that emits an owned sanitised payload as structured JSON.
#[derive(Clone, Debug)]
pub struct SanitisedJson {
    value: JsonValue,
}

impl SanitisedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// JSON payload that will be logged.
    pub fn value(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for SanitisedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their sanitised form.
///
/// ## Example
/// ```ignore
/// use sanitise::slog::IntoSanitisedJson;
///
/// info!(logger, "login"; "request" => request.into_sanitised_json("logs"));
/// ```
pub trait IntoSanitisedJson: Sanitise + Serialize {
    /// Sanitises `self` for `context` and captures the result as JSON.
    ///
    /// If sanitising fails, the payload is the string
    /// `"Failed to sanitise value"`; if JSON conversion fails, it is
    /// `"Failed to serialize sanitised value"`.
    fn into_sanitised_json(&self, context: &str) -> SanitisedJson {
        let json_value = match sanitise(self, context) {
            Ok(sanitised) => serde_json::to_value(sanitised).unwrap_or_else(|_| {
                JsonValue::String("Failed to serialize sanitised value".to_string())
            }),
            Err(_) => JsonValue::String("Failed to sanitise value".to_string()),
        };
        SanitisedJson::new(json_value)
    }
}

impl<T> IntoSanitisedJson for T where T: Sanitise + Serialize {}
