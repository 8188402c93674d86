//! Type-safe identifiers.
//!
//! Users and products are owned by other services, so their ids are opaque strings
//! (`"U1"`, `"product_3"`). Cart lines and orders are numbered by their own stores.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Identifier of a user in the user directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Identifier of a product in the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

macro_rules! string_id {
    ($name:ident, $prefix:literal) => {
        impl From<u32> for $name {
            fn from(n: u32) -> Self {
                Self(format!(concat!($prefix, "_{}"), n))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(UserId, "user");
string_id!(ProductId, "product");

/// Store-assigned identifier of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CartItemId(pub u32);

impl From<u32> for CartItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cart_item_{}", self.0)
    }
}

/// Store-assigned identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid order id: {0}")]
pub struct InvalidOrderId(pub String);

/// Accepts both the display form (`order_7`) and the bare number (`7`).
impl FromStr for OrderId {
    type Err = InvalidOrderId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("order_")
            .unwrap_or(s)
            .parse::<u32>()
            .map(Self)
            .map_err(|_| InvalidOrderId(s.to_string()))
    }
}
