//! Identifier newtypes.
//!
//! Sellers, clients and packages are identified by opaque strings owned by
//! the surrounding system (auth, catalog). Booking ids are generated by the
//! core in the `BK_<base36 millis>_<SUFFIX>` display format.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier. Surrounding whitespace is trimmed.
            pub fn new(raw: impl Into<String>) -> Self {
                let raw: String = raw.into();
                Self(raw.trim().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = Self::new(s);
                if id.is_blank() {
                    Err(format!("{} id cannot be empty", $what))
                } else {
                    Ok(id)
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Identity link to a seller account.
    SellerId,
    "seller"
);

string_id!(
    /// Identity link to a client account.
    ClientId,
    "client"
);

string_id!(
    /// Identifier of a service package inside a seller profile.
    PackageId,
    "package"
);

string_id!(
    /// Human-readable booking identifier, e.g. `BK_LZ4K2M1Q_X7P0QA`.
    BookingId,
    "booking"
);
