//! Closed status vocabularies for the supported resource kinds.
//!
//! Each resource kind gets its own enum so a stage's expected, acceptable,
//! and error sets are assembled from the correct vocabulary instead of bare
//! strings scattered across behavior code. The engine itself stays
//! wire-string typed; conversion happens on entry.

use std::fmt;

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
        pub enum $name {
            $(
                #[doc = concat!("Wire status `", $wire, "`.")]
                $variant,
            )+
        }

        impl $name {
            /// Returns the wire-format status string.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum!(
    /// Lifecycle statuses reported for block-storage volumes.
    VolumeStatus {
        Creating => "creating",
        Available => "available",
        Attaching => "attaching",
        InUse => "in-use",
        Deleting => "deleting",
        Deleted => "deleted",
        Error => "error",
        ErrorDeleting => "error_deleting",
    }
);

status_enum!(
    /// Lifecycle statuses reported for volume snapshots.
    SnapshotStatus {
        Creating => "creating",
        Available => "available",
        Deleting => "deleting",
        Deleted => "deleted",
        Error => "error",
        ErrorDeleting => "error_deleting",
    }
);

status_enum!(
    /// Lifecycle statuses reported for compute servers.
    ServerStatus {
        Build => "BUILD",
        Active => "ACTIVE",
        Reboot => "REBOOT",
        HardReboot => "HARD_REBOOT",
        Deleted => "DELETED",
        Error => "ERROR",
    }
);

status_enum!(
    /// Provisioning statuses reported for load balancers and their children.
    LoadBalancerStatus {
        PendingCreate => "pending_create",
        PendingUpdate => "pending_update",
        PendingDelete => "pending_delete",
        Active => "active",
        Deleted => "deleted",
        Error => "error",
    }
);
