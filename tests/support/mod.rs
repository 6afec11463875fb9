//! In-process stand-in for an instance, used to produce cassettes.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use relsync::adapters::live::SilentProgress;
use relsync::adapters::recording::RecordingRpcTransport;
use relsync::cassette::recorder::CassetteRecorder;
use relsync::context::ServiceContext;
use relsync::ports::{RpcTransport, TransportError};
use relsync::relation::asset_urn;

/// Answers counts and first pages from fixed data; every mutation succeeds.
pub struct FakeInstance {
    pub dependencies: Vec<(String, String, String, String)>,
    pub links: Vec<(String, String, String)>,
}

impl FakeInstance {
    pub fn sample() -> Self {
        Self {
            dependencies: vec![
                ("11".into(), "1001".into(), "1002".into(), "Hosts".into()),
                ("12".into(), "1003".into(), "1004".into(), "Runs On".into()),
            ],
            links: vec![("21".into(), "1001".into(), "1003".into())],
        }
    }

    fn rows(&self, params: &str) -> String {
        if !params.contains("<rowstart>0</rowstart>") {
            return String::new();
        }
        if params.contains("assetLinks") {
            self.links
                .iter()
                .map(|(id, l, r)| {
                    format!(
                        "<row><h_pk_id>{id}</h_pk_id><h_fk_id_l>{}</h_fk_id_l><h_fk_id_r>{}</h_fk_id_r></row>",
                        asset_urn(l),
                        asset_urn(r)
                    )
                })
                .collect()
        } else {
            self.dependencies
                .iter()
                .map(|(id, l, r, d)| {
                    format!(
                        "<row><h_pk_confitemdependencyid>{id}</h_pk_confitemdependencyid>\
                         <h_entity_l_id>{l}</h_entity_l_id><h_entity_r_id>{r}</h_entity_r_id>\
                         <h_dependency>{d}</h_dependency></row>"
                    )
                })
                .collect()
        }
    }
}

impl RpcTransport for FakeInstance {
    fn invoke(&self, _service: &str, method: &str, params: &str) -> Result<String, TransportError> {
        let inner = match method {
            "getRecordCount" => {
                let count = if params.contains("h_cmdb_links") {
                    self.links.len()
                } else {
                    self.dependencies.len()
                };
                format!("<count>{count}</count>")
            }
            "queryExec" => format!("<rowData>{}</rowData>", self.rows(params)),
            _ => String::new(),
        };
        Ok(format!(r#"<methodCallResult status="ok"><params>{inner}</params></methodCallResult>"#))
    }

    fn endpoint(&self) -> &str {
        "https://fake.example/xmlmc"
    }
}

/// Context whose calls go to `FakeInstance::sample()` and are recorded.
pub fn recording_context(path: &Path) -> (ServiceContext, Arc<Mutex<CassetteRecorder>>) {
    let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
        path,
        "fake-session",
        "https://fake.example/xmlmc",
    )));
    let rpc = RecordingRpcTransport::new(Box::new(FakeInstance::sample()), Arc::clone(&recorder));
    (ServiceContext::from_parts(Box::new(rpc), Box::new(SilentProgress)), recorder)
}

pub const CONFIG: &str = "endpoint: https://fake.example/xmlmc\n";

pub const DESIRED: &str = "\
dependencies:
  - left: \"1001\"
    right: \"1002\"
    dependency: Runs On
  - left: \"1005\"
    right: \"1006\"
    dependency: Hosts
links:
  - left: \"1001\"
    right: \"1003\"
  - left: \"1002\"
    right: \"1004\"
";
