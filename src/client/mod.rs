//! Remote relationship client.
//!
//! The client is the sole gateway to the instance. It owns the parameter
//! builder shared by all calls; every operation takes `&mut self`, builds
//! its parameters from scratch and leaves the builder empty on return, so
//! calls are strictly sequential.

pub mod operation;
pub mod policy;

use serde::de::IgnoredAny;

pub use operation::{Operation, RelationshipSource, APPLICATION};
pub use policy::{Decision, DryRunPolicy};

use crate::error::RpcError;
use crate::ports::RpcTransport;
use crate::relation::{DependencyRecord, RelationshipKind, RemoteRelation};
use crate::xmlmc::{self, ParamBuilder, ResultParams};

/// Number of records requested per page.
pub const PAGE_SIZE: u64 = 100;

/// Issues count, query and mutation calls for asset relationships.
pub struct RelationshipClient<'a> {
    transport: &'a dyn RpcTransport,
    params: ParamBuilder,
    policy: DryRunPolicy,
}

impl<'a> RelationshipClient<'a> {
    /// Creates a client over `transport` governed by `policy`.
    #[must_use]
    pub fn new(transport: &'a dyn RpcTransport, policy: DryRunPolicy) -> Self {
        Self { transport, params: ParamBuilder::new(), policy }
    }

    /// Counts the remote asset-to-asset records of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an [`RpcError`] if the call fails, its response cannot be
    /// decoded, or the instance reports a failure.
    pub fn count(&mut self, kind: RelationshipKind) -> Result<u64, RpcError> {
        let source = RelationshipSource::of(kind);
        self.params
            .set_param("application", APPLICATION)
            .set_param("table", source.table)
            .set_param("where", source.count_filter);
        let params = self.call::<IgnoredAny>(Operation::count(kind))?;
        Ok(params.map_or(0, |p| p.count_or_zero()))
    }

    /// Fetches up to `limit` records of `R` starting at `row_start`.
    ///
    /// An offset past the end yields an empty page.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RelationshipClient::count`].
    pub fn fetch_page<R: RemoteRelation>(
        &mut self,
        row_start: u64,
        limit: u64,
    ) -> Result<Vec<R>, RpcError> {
        let source = RelationshipSource::of(R::KIND);
        self.params
            .set_param("application", APPLICATION)
            .set_param("queryName", source.query_name)
            .open_element("queryParams")
            .set_param("rowstart", &row_start.to_string())
            .set_param("limit", &limit.to_string())
            .close_element();
        let params = self.call::<R>(Operation::fetch(R::KIND))?;
        Ok(params.map(ResultParams::into_rows).unwrap_or_default())
    }

    /// Creates an asset-to-asset dependency. The instance assigns its ID.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RelationshipClient::count`].
    pub fn create_dependency(&mut self, record: &DependencyRecord) -> Result<(), RpcError> {
        self.params
            .set_param("application", APPLICATION)
            .set_param("entity", operation::DEPENDENCY_ENTITY)
            .open_element("primaryEntityData")
            .open_element("record")
            .set_param("h_entity_l_id", &record.left_id)
            .set_param("h_entity_l_name", "asset")
            .set_param("h_entity_r_id", &record.right_id)
            .set_param("h_entity_r_name", "asset")
            .set_param("h_dependency", &record.dependency)
            .close_element()
            .close_element();
        self.mutate(Operation::CreateDependency)
    }

    /// Sets the descriptor of dependency `remote_id`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RelationshipClient::count`].
    pub fn update_dependency(&mut self, remote_id: &str, dependency: &str) -> Result<(), RpcError> {
        self.params
            .set_param("application", APPLICATION)
            .set_param("entity", operation::DEPENDENCY_ENTITY)
            .open_element("primaryEntityData")
            .open_element("record")
            .set_param("h_pk_confitemdependencyid", remote_id)
            .set_param("h_dependency", dependency)
            .close_element()
            .close_element();
        self.mutate(Operation::UpdateDependency)
    }

    /// Deletes dependency `remote_id`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RelationshipClient::count`].
    pub fn delete_dependency(&mut self, remote_id: &str) -> Result<(), RpcError> {
        self.params
            .set_param("application", APPLICATION)
            .set_param("entity", operation::DEPENDENCY_ENTITY)
            .set_param("keyValue", remote_id);
        self.mutate(Operation::DeleteDependency)
    }

    /// Links two assets.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RelationshipClient::count`].
    pub fn link_asset(&mut self, left_id: &str, right_id: &str) -> Result<(), RpcError> {
        self.params
            .set_param("leftEntityId", left_id)
            .set_param("leftEntityType", "Asset")
            .set_param("leftRelType", "1")
            .set_param("rightEntityId", right_id)
            .set_param("rightEntityType", "Asset")
            .set_param("rightRelType", "1")
            .set_param("dependsOn", "0");
        self.mutate(Operation::LinkAsset)
    }

    /// Unlinks two assets; `remove_both_sides` is passed through verbatim.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RelationshipClient::count`].
    pub fn unlink_asset(
        &mut self,
        left_id: &str,
        right_id: &str,
        remove_both_sides: bool,
    ) -> Result<(), RpcError> {
        self.params
            .set_param("leftEntityId", left_id)
            .set_param("leftEntityType", "Asset")
            .set_param("rightEntityId", right_id)
            .set_param("rightEntityType", "Asset")
            .set_param("removeBothSides", if remove_both_sides { "true" } else { "false" });
        self.mutate(Operation::UnlinkAsset)
    }

    fn mutate(&mut self, operation: Operation) -> Result<(), RpcError> {
        self.call::<IgnoredAny>(operation).map(|_| ())
    }

    /// Sends the built parameters, or simulates the call under dry-run.
    ///
    /// Returns `None` for a simulated call. The builder is empty afterwards
    /// whatever the outcome.
    fn call<R: serde::de::DeserializeOwned>(
        &mut self,
        operation: Operation,
    ) -> Result<Option<ResultParams<R>>, RpcError> {
        if self.policy.decide(operation, &mut self.params) == Decision::Simulated {
            return Ok(None);
        }

        let params = self.params.take();
        let body = self
            .transport
            .invoke(operation.service(), operation.method(), &params)
            .map_err(|e| RpcError::Invocation { operation: operation.name(), cause: e.to_string() })?;

        xmlmc::decode(operation.name(), &body).map(Some)
    }
}
