//! Shared fakes for unit tests.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::ports::{ProgressReporter, RpcTransport, TransportError};
use crate::relation::asset_urn;

/// One call seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub service: String,
    pub method: String,
    pub params: String,
}

/// Serves queued responses in order and records every call.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, body: impl Into<String>) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.responses.lock().unwrap().push_back(Err(message.into()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.method == method).collect()
    }

    pub fn pending(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl RpcTransport for ScriptedTransport {
    fn invoke(&self, service: &str, method: &str, params: &str) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(Call {
            service: service.into(),
            method: method.into(),
            params: params.into(),
        });
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(message.into()),
            None => panic!("no scripted response for {service}/{method}"),
        }
    }
}

pub(crate) fn ok_response() -> String {
    r#"<methodCallResult status="ok"><params/></methodCallResult>"#.to_string()
}

pub(crate) fn fail_response(message: &str) -> String {
    format!(
        r#"<methodCallResult status="fail"><state><code>0200</code><error>{message}</error></state></methodCallResult>"#
    )
}

pub(crate) fn count_response(count: u64) -> String {
    format!(r#"<methodCallResult status="ok"><params><count>{count}</count></params></methodCallResult>"#)
}

pub(crate) fn rows_response(rows: &[String]) -> String {
    format!(
        r#"<methodCallResult status="ok"><params><rowData>{}</rowData></params></methodCallResult>"#,
        rows.concat()
    )
}

pub(crate) fn dependency_row(id: &str, left: &str, right: &str, dependency: &str) -> String {
    format!(
        "<row><h_pk_confitemdependencyid>{id}</h_pk_confitemdependencyid>\
         <h_entity_l_id>{left}</h_entity_l_id><h_entity_r_id>{right}</h_entity_r_id>\
         <h_dependency>{dependency}</h_dependency></row>"
    )
}

pub(crate) fn link_row_urns(id: &str, left_urn: &str, right_urn: &str) -> String {
    format!("<row><h_pk_id>{id}</h_pk_id><h_fk_id_l>{left_urn}</h_fk_id_l><h_fk_id_r>{right_urn}</h_fk_id_r></row>")
}

pub(crate) fn link_row(id: &str, left: &str, right: &str) -> String {
    link_row_urns(id, &asset_urn(left), &asset_urn(right))
}

/// Progress reporter that remembers every position it was given.
#[derive(Default)]
pub(crate) struct CollectingProgress {
    pub events: Mutex<Vec<String>>,
    pub positions: Mutex<Vec<u64>>,
}

impl ProgressReporter for CollectingProgress {
    fn start(&self, label: &str, total: u64) {
        self.events.lock().unwrap().push(format!("start {label} {total}"));
    }

    fn update(&self, done: u64) {
        self.positions.lock().unwrap().push(done);
    }

    fn finish(&self) {
        self.events.lock().unwrap().push("finish".into());
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a `debug`-level subscriber and returns its output and the
/// captured log text.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).expect("utf8 logs");
    (value, logs)
}
