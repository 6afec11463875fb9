//! The fixed set of remote operations the client issues.

use crate::relation::RelationshipKind;

/// Application every data call is scoped to.
pub const APPLICATION: &str = "com.hornbill.servicemanager";

/// Service exposing the asset link/unlink methods.
pub const ASSET_SERVICE: &str = "apps/com.hornbill.servicemanager/Asset";

/// Service exposing generic table and entity methods.
pub const DATA_SERVICE: &str = "data";

/// Entity holding asset dependencies.
pub const DEPENDENCY_ENTITY: &str = "ConfigurationItemsDependency";

/// One remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Count cached-eligible dependency rows.
    CountDependencies,
    /// Fetch one page of dependency rows.
    FetchDependencies,
    /// Create a dependency.
    CreateDependency,
    /// Change a dependency's descriptor.
    UpdateDependency,
    /// Delete a dependency by remote ID.
    DeleteDependency,
    /// Count asset-to-asset link rows.
    CountLinks,
    /// Fetch one page of link rows.
    FetchLinks,
    /// Link two assets.
    LinkAsset,
    /// Unlink two assets.
    UnlinkAsset,
}

impl Operation {
    /// Count operation for a relationship kind.
    #[must_use]
    pub fn count(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Dependency => Self::CountDependencies,
            RelationshipKind::Link => Self::CountLinks,
        }
    }

    /// Page fetch operation for a relationship kind.
    #[must_use]
    pub fn fetch(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Dependency => Self::FetchDependencies,
            RelationshipKind::Link => Self::FetchLinks,
        }
    }

    /// Name used as the prefix of error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CountDependencies => "count_dependencies",
            Self::FetchDependencies => "fetch_dependencies",
            Self::CreateDependency => "create_dependency",
            Self::UpdateDependency => "update_dependency",
            Self::DeleteDependency => "delete_dependency",
            Self::CountLinks => "count_links",
            Self::FetchLinks => "fetch_links",
            Self::LinkAsset => "link_asset",
            Self::UnlinkAsset => "unlink_asset",
        }
    }

    /// XMLMC service the operation is sent to.
    #[must_use]
    pub fn service(self) -> &'static str {
        match self {
            Self::LinkAsset | Self::UnlinkAsset => ASSET_SERVICE,
            _ => DATA_SERVICE,
        }
    }

    /// XMLMC method name.
    #[must_use]
    pub fn method(self) -> &'static str {
        match self {
            Self::CountDependencies | Self::CountLinks => "getRecordCount",
            Self::FetchDependencies | Self::FetchLinks => "queryExec",
            Self::CreateDependency => "entityAddRecord",
            Self::UpdateDependency => "entityUpdateRecord",
            Self::DeleteDependency => "entityDeleteRecord",
            Self::LinkAsset => "linkAsset",
            Self::UnlinkAsset => "unlinkAsset",
        }
    }

    /// Whether the operation changes remote state.
    #[must_use]
    pub fn is_mutating(self) -> bool {
        !matches!(
            self,
            Self::CountDependencies | Self::FetchDependencies | Self::CountLinks | Self::FetchLinks
        )
    }

    /// `[SUBJECT] [VERB]` tags used when logging the call's parameters.
    #[must_use]
    pub fn log_tags(self) -> (&'static str, &'static str) {
        match self {
            Self::CountDependencies => ("DEPENDENCY", "COUNT"),
            Self::FetchDependencies => ("DEPENDENCY", "GET"),
            Self::CreateDependency => ("DEPENDENCY", "CREATE"),
            Self::UpdateDependency => ("DEPENDENCY", "UPDATE"),
            Self::DeleteDependency => ("DEPENDENCY", "DELETE"),
            Self::CountLinks => ("LINK", "COUNT"),
            Self::FetchLinks => ("LINK", "GET"),
            Self::LinkAsset => ("LINK", "CREATE"),
            Self::UnlinkAsset => ("UNLINK", "DELETE"),
        }
    }
}

/// Table, filter and stored query backing one relationship kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipSource {
    /// Table counted by `getRecordCount`.
    pub table: &'static str,
    /// Filter restricting the count to asset-to-asset rows.
    pub count_filter: &'static str,
    /// Stored query paged by `queryExec`.
    pub query_name: &'static str,
}

impl RelationshipSource {
    /// Source for a relationship kind.
    #[must_use]
    pub fn of(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Dependency => Self {
                table: "h_cmdb_config_items_dependency",
                count_filter: "h_entity_l_name = 'asset' AND h_entity_r_name = 'asset'",
                query_name: "getDependencies",
            },
            RelationshipKind::Link => Self {
                table: "h_cmdb_links",
                count_filter: "h_rel_type_l = 1 AND h_rel_type_r = 1",
                query_name: "assetLinks",
            },
        }
    }
}
