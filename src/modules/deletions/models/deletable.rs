use serde::{Deserialize, Serialize};

/// The closed set of catalog resources that support soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Product,
    Bundle,
    Inventory,
    ProductType,
    Bill,
    Visit,
}

impl ResourceKind {
    /// Path segment used on the upstream gateway.
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Product => "products",
            ResourceKind::Bundle => "bundles",
            ResourceKind::Inventory => "inventories",
            ResourceKind::ProductType => "producttypes",
            ResourceKind::Bill => "bills",
            ResourceKind::Visit => "visits",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "products" => Ok(ResourceKind::Product),
            "bundles" => Ok(ResourceKind::Bundle),
            "inventories" => Ok(ResourceKind::Inventory),
            "producttypes" => Ok(ResourceKind::ProductType),
            "bills" => Ok(ResourceKind::Bill),
            "visits" => Ok(ResourceKind::Visit),
            _ => Err(format!("Unknown resource kind: {}", s)),
        }
    }
}

/// A list entry eligible for soft delete.
///
/// The entity is created upstream and fetched into the list; the delete
/// machine only ever flips `is_temporarily_deleted` locally until a remote
/// delete is confirmed, at which point the entry is removed from the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletableEntity {
    pub id: String,
    pub resource: ResourceKind,
    pub display_name: String,
    #[serde(default)]
    pub is_temporarily_deleted: bool,
    /// Dependent record ids reported by a conflict response, e.g. bundles
    /// containing a product being deleted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cascade_candidate_ids: Vec<String>,
}

impl DeletableEntity {
    pub fn new(id: impl Into<String>, resource: ResourceKind, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource,
            display_name: display_name.into(),
            is_temporarily_deleted: false,
            cascade_candidate_ids: Vec::new(),
        }
    }
}

/// Lifecycle of one entity's delete session.
///
/// `Deleting` and `CascadeDeleting` are the in-flight refinements of the
/// pending states: once either is entered the remote call runs to completion
/// and undo no longer has any effect. A confirmed delete is terminal and
/// removes the entity together with its session, so it has no stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteState {
    Active,
    PendingDelete,
    Deleting,
    CascadeDecision,
    CascadeDeleting,
}
