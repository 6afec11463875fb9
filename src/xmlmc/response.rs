//! Decoding of `methodCallResult` response bodies.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::RpcError;

/// Status value reported by a successful call.
pub const STATUS_OK: &str = "ok";

/// Envelope of every XMLMC response.
#[derive(Debug, Deserialize)]
struct MethodCallResult<R> {
    #[serde(rename = "@status")]
    status: String,
    params: Option<ResultParams<R>>,
    state: Option<CallState>,
}

/// Failure details attached to a non-`ok` response.
#[derive(Debug, Deserialize)]
struct CallState {
    #[serde(default)]
    error: String,
}

/// The `<params>` section of a successful response.
#[derive(Debug, Deserialize)]
pub struct ResultParams<R> {
    /// Record count returned by `getRecordCount`.
    pub count: Option<u64>,
    /// Rows returned by `queryExec`.
    #[serde(rename = "rowData")]
    pub row_data: Option<RowData<R>>,
}

/// The `<rowData>` wrapper around query rows.
#[derive(Debug, Deserialize)]
pub struct RowData<R> {
    /// One entry per `<row>` element.
    #[serde(rename = "row", default = "Vec::new")]
    pub rows: Vec<R>,
}

impl<R> ResultParams<R> {
    fn empty() -> Self {
        Self { count: None, row_data: None }
    }

    /// Returns the count, treating an absent count as zero.
    #[must_use]
    pub fn count_or_zero(&self) -> u64 {
        self.count.unwrap_or(0)
    }

    /// Consumes the params and returns the query rows (possibly none).
    #[must_use]
    pub fn into_rows(self) -> Vec<R> {
        self.row_data.map(|data| data.rows).unwrap_or_default()
    }
}

/// Decodes a response body and checks its status.
///
/// # Errors
///
/// Returns [`RpcError::Decode`] when the body does not parse and
/// [`RpcError::RemoteStatus`] when the status is not `ok`.
pub fn decode<R: DeserializeOwned>(
    operation: &'static str,
    body: &str,
) -> Result<ResultParams<R>, RpcError> {
    let result: MethodCallResult<R> = quick_xml::de::from_str(body)
        .map_err(|e| RpcError::Decode { operation, cause: e.to_string() })?;

    if result.status != STATUS_OK {
        let message = result.state.map(|state| state.error).unwrap_or_default();
        return Err(RpcError::RemoteStatus { operation, message });
    }

    Ok(result.params.unwrap_or_else(ResultParams::empty))
}

#[cfg(test)]
mod tests {
    use serde::de::IgnoredAny;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn decodes_count() {
        let body = r#"<?xml version="1.0" encoding="utf-8" ?>
            <methodCallResult status="ok"><params><count>250</count></params></methodCallResult>"#;
        let params = decode::<IgnoredAny>("count_links", body).unwrap();
        assert_eq!(params.count_or_zero(), 250);
    }

    #[test]
    fn decodes_rows() {
        let body = r#"<methodCallResult status="ok"><params><rowData>
            <row><id>1</id><extra>x</extra></row>
            <row><id>2</id></row>
            </rowData></params></methodCallResult>"#;
        let rows = decode::<Row>("fetch", body).unwrap().into_rows();
        assert_eq!(rows, vec![Row { id: "1".into() }, Row { id: "2".into() }]);
    }

    #[test]
    fn missing_params_means_no_rows_and_zero_count() {
        let body = r#"<methodCallResult status="ok"></methodCallResult>"#;
        let params = decode::<Row>("fetch", body).unwrap();
        assert_eq!(params.count_or_zero(), 0);
        assert!(params.into_rows().is_empty());
    }

    #[test]
    fn failure_status_carries_remote_message() {
        let body = r#"<methodCallResult status="fail"><state><code>0200</code>
            <error>The specified table does not exist</error></state></methodCallResult>"#;
        let err = decode::<IgnoredAny>("count_dependencies", body).unwrap_err();
        assert_eq!(
            err,
            RpcError::RemoteStatus {
                operation: "count_dependencies",
                message: "The specified table does not exist".into(),
            }
        );
    }

    #[test]
    fn garbage_body_is_decode_error() {
        let err = decode::<IgnoredAny>("link_asset", "<html>502 Bad Gateway").unwrap_err();
        assert!(matches!(err, RpcError::Decode { operation: "link_asset", .. }));
    }
}
