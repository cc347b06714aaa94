//! Status and priority enums.
//!
//! The store keeps these as free text. In the application they are closed
//! enums with an `Unknown` variant that carries whatever label was stored,
//! so an unexpected value never fails a read and is written back unchanged.

use serde::{Deserialize, Serialize};

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unknown(String),
        }

        impl $name {
            /// Label as stored in the database
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unknown(label) => label.as_str(),
                }
            }

            pub fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                match label {
                    $($label => $name::$variant,)+
                    other => $name::Unknown(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                match label.as_str() {
                    $($label => $name::$variant,)+
                    _ => $name::Unknown(label),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(label) => label,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(label: &str) -> Result<Self, Self::Err> {
                Ok(label.into())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// CopyStatus
// ---------------------------------------------------------------------------

text_enum! {
    /// Availability of a physical copy. Only the checkout lifecycle writes
    /// `Available`/`CheckedOut`; anything else comes from a manual edit.
    CopyStatus {
        Available => "Available",
        CheckedOut => "Checked Out",
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        CopyStatus::Available
    }
}

// ---------------------------------------------------------------------------
// CheckoutStatus
// ---------------------------------------------------------------------------

text_enum! {
    CheckoutStatus {
        CheckedOut => "Checked Out",
        Returned => "Returned",
    }
}

// ---------------------------------------------------------------------------
// FollowUpStatus
// ---------------------------------------------------------------------------

text_enum! {
    FollowUpStatus {
        Pending => "Pending",
        Contacted => "Contacted",
        Resolved => "Resolved",
        Escalated => "Escalated",
    }
}

// ---------------------------------------------------------------------------
// Wishlist
// ---------------------------------------------------------------------------

text_enum! {
    WishlistPriority {
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

impl WishlistPriority {
    /// Sort rank, most urgent first. Unknown labels sort last.
    pub fn rank(&self) -> u8 {
        match self {
            WishlistPriority::High => 1,
            WishlistPriority::Medium => 2,
            WishlistPriority::Low => 3,
            WishlistPriority::Unknown(_) => 4,
        }
    }
}

text_enum! {
    WishlistStatus {
        Requested => "Requested",
        Ordered => "Ordered",
        Received => "Received",
        Cancelled => "Cancelled",
    }
}
