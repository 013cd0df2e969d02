//! Asset registry vocabulary: statuses, tire positions and the polymorphic
//! asset reference used by maintenance records.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

define_text_enum! {
    /// Truck availability.
    TruckStatus ("truck status") {
        Available = "available",
        InUse = "in_use",
        Maintenance = "maintenance",
    }
}

define_text_enum! {
    /// Trailer availability.
    TrailerStatus ("trailer status") {
        Available = "available",
        InUse = "in_use",
        Maintenance = "maintenance",
        Retired = "retired",
    }
}

define_text_enum! {
    /// Tire condition.
    TireStatus ("tire status") {
        New = "new",
        InUse = "in_use",
        Worn = "worn",
        Damaged = "damaged",
        Retired = "retired",
    }
}

define_text_enum! {
    /// Mounting position of a tire on a truck.
    TirePosition ("tire position") {
        FrontLeft = "front_left",
        FrontRight = "front_right",
        RearLeft = "rear_left",
        RearRight = "rear_right",
        Spare = "spare",
    }
}

define_text_enum! {
    /// The class of an asset. Maintenance rules target a kind, not an instance.
    AssetKind ("asset type") {
        Truck = "truck",
        Trailer = "trailer",
        Tire = "tire",
    }
}

impl AssetKind {
    /// Entity name used in `NotFound` errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Truck => "Truck",
            Self::Trailer => "Trailer",
            Self::Tire => "Tire",
        }
    }
}

/// A reference to exactly one asset instance.
///
/// Persisted as a `(target_type, target_id)` column pair; this is the typed
/// form every caller works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target_type", content = "target_id", rename_all = "snake_case")]
pub enum AssetRef {
    Truck(DbId),
    Trailer(DbId),
    Tire(DbId),
}

impl AssetRef {
    /// Rebuild a reference from its stored column pair.
    pub fn new(kind: AssetKind, id: DbId) -> Self {
        match kind {
            AssetKind::Truck => Self::Truck(id),
            AssetKind::Trailer => Self::Trailer(id),
            AssetKind::Tire => Self::Tire(id),
        }
    }

    pub fn kind(self) -> AssetKind {
        match self {
            Self::Truck(_) => AssetKind::Truck,
            Self::Trailer(_) => AssetKind::Trailer,
            Self::Tire(_) => AssetKind::Tire,
        }
    }

    pub fn id(self) -> DbId {
        match self {
            Self::Truck(id) | Self::Trailer(id) | Self::Tire(id) => id,
        }
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.kind().entity_name(), self.id())
    }
}
