//! Acceptance filter for fetched link records.

use std::fmt;

use super::key::RelationshipKey;
use super::records::LinkRecord;

/// URN prefix shared by every asset entity on the instance.
pub const ASSET_URN_PREFIX: &str = "urn:sys:entity:com.hornbill.servicemanager:Asset:";

/// Why a link record was not cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Only the right endpoint is an asset.
    LeftNotAsset,
    /// Only the left endpoint is an asset.
    RightNotAsset,
    /// Neither endpoint is an asset.
    NeitherAsset,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::LeftNotAsset => "left endpoint is not an asset",
            Self::RightNotAsset => "right endpoint is not an asset",
            Self::NeitherAsset => "neither endpoint is an asset",
        };
        f.write_str(text)
    }
}

/// Outcome of classifying one link record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVerdict<'a> {
    /// Both endpoints are assets; carries the stripped asset IDs.
    Accept {
        /// Left asset ID.
        left: &'a str,
        /// Right asset ID.
        right: &'a str,
    },
    /// At least one endpoint is not an asset.
    Reject(RejectReason),
}

impl LinkVerdict<'_> {
    /// Cache key for an accepted record.
    #[must_use]
    pub fn key(&self) -> Option<RelationshipKey> {
        match self {
            Self::Accept { left, right } => Some(RelationshipKey::link(left, right)),
            Self::Reject(_) => None,
        }
    }
}

/// Accepts a link only when both endpoint URNs carry the asset prefix.
#[must_use]
pub fn classify_link(record: &LinkRecord) -> LinkVerdict<'_> {
    let left = record.left_urn.strip_prefix(ASSET_URN_PREFIX);
    let right = record.right_urn.strip_prefix(ASSET_URN_PREFIX);
    match (left, right) {
        (Some(left), Some(right)) => LinkVerdict::Accept { left, right },
        (None, Some(_)) => LinkVerdict::Reject(RejectReason::LeftNotAsset),
        (Some(_), None) => LinkVerdict::Reject(RejectReason::RightNotAsset),
        (None, None) => LinkVerdict::Reject(RejectReason::NeitherAsset),
    }
}

/// Full URN of an asset ID.
#[must_use]
pub fn asset_urn(asset_id: &str) -> String {
    format!("{ASSET_URN_PREFIX}{asset_id}")
}
