//! Closed mapping from item type to the remote operation that publishes it.
//!
//! Adding a supported type is a one-line edit to [`DISPATCH_TABLE`] (plus
//! [`DEFAULT_ITEM_TYPES`] if it should be covered by the `all` scope). No
//! call site branches on type names.

use std::fmt;

/// Item types covered by the `all` scope expression.
pub const DEFAULT_ITEM_TYPES: &[&str] = &[
    "Notebook",
    "DataPipeline",
    "Lakehouse",
    "SemanticModel",
    "Report",
];

/// Names the remote verb/resource shape used to publish or remove an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// HTTP method of the remote call.
    pub method: &'static str,
    /// Resource segment under the workspace, e.g. `items`.
    pub resource: &'static str,
    /// Human-readable operation name for logs and reports.
    pub description: &'static str,
}

/// Delete operation shared by every item type during orphan removal.
pub const DELETE_ITEM: OperationDescriptor = OperationDescriptor {
    method: "DELETE",
    resource: "items",
    description: "delete item",
};

const DISPATCH_TABLE: &[(&str, OperationDescriptor)] = &[
    (
        "Notebook",
        OperationDescriptor {
            method: "POST",
            resource: "items",
            description: "import Notebook",
        },
    ),
    (
        "DataPipeline",
        OperationDescriptor {
            method: "POST",
            resource: "items",
            description: "import DataPipeline",
        },
    ),
    (
        "Lakehouse",
        OperationDescriptor {
            method: "POST",
            resource: "items",
            description: "import Lakehouse",
        },
    ),
    (
        "SemanticModel",
        OperationDescriptor {
            method: "POST",
            resource: "items",
            description: "import SemanticModel",
        },
    ),
    (
        "Report",
        OperationDescriptor {
            method: "POST",
            resource: "items",
            description: "import Report",
        },
    ),
];

/// Raised before any network call when a declared type has no table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedType(pub String);

impl fmt::Display for UnsupportedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported type: {}", self.0)
    }
}

impl std::error::Error for UnsupportedType {}

/// Look up the publish operation for an item type.
pub fn endpoint_for(type_name: &str) -> Result<&'static OperationDescriptor, UnsupportedType> {
    DISPATCH_TABLE
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, op)| op)
        .ok_or_else(|| UnsupportedType(type_name.to_string()))
}
