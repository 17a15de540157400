//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding lookup table, and its label matches the `name`
//! column of that table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant, in seed order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Resolve a database status ID, or `None` for an unknown ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// The lookup table `name` for this status.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            /// Parse a lookup table `name` (case-insensitive, surrounding
            /// whitespace ignored).
            pub fn parse(name: &str) -> Option<Self> {
                let name = name.trim().to_lowercase();
                match name.as_str() {
                    $( $label => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status. See [`crate::lifecycle`] for the transitions.
    ProjectStatus {
        Posted = 1 => "posted",
        Active = 2 => "active",
        Completed = 3 => "completed",
        Archived = 4 => "archived",
    }
}

define_status_enum! {
    /// Status of a fulfiller's claim on a project.
    RequestStatus {
        Pending = 1 => "pending",
        Approved = 2 => "approved",
        Declined = 3 => "declined",
    }
}

define_status_enum! {
    /// Local access-control flag mirroring the billing provider.
    SubscriptionStatus {
        Inactive = 1 => "inactive",
        Active = 2 => "active",
    }
}

define_status_enum! {
    /// Profile role, fixed at first selection.
    ProfileRole {
        Requester = 1 => "requester",
        Fulfiller = 2 => "fulfiller",
    }
}
