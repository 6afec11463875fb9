//! XMLMC wire protocol: request parameters and response decoding.
//!
//! A call is a named `service`/`method` pair with a `<params>` block built by
//! [`ParamBuilder`]. Responses are `methodCallResult` documents carrying a
//! status attribute plus an optional count, optional query rows and, on
//! failure, the instance-supplied error text.

pub mod params;
pub mod response;

use quick_xml::escape::escape;

pub use params::ParamBuilder;
pub use response::{decode, ResultParams, RowData, STATUS_OK};

/// Wraps a rendered `<params>` block in a `methodCall` document.
#[must_use]
pub fn method_call(service: &str, method: &str, params: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><methodCall service="{}" method="{}">{params}</methodCall>"#,
        escape(service),
        escape(method),
    )
}
