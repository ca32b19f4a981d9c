//! Node and edge identifiers
//!
//! Provides the [`NodeId`] and [`EdgeId`] newtypes and the collision-safe
//! [`allocate_id`] routine used whenever a command asks for an identifier.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::hash::{BuildHasher, Hash};

/// Identifier as it may appear in untrusted input.
///
/// Generative models emit ids as strings most of the time and as bare
/// integers some of the time; both resolve to the same textual id.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl LooseId {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Signed(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
        }
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create identifier from any string-like value
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow as string slice
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume into the owned string
            #[inline]
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                LooseId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }
    };
}

define_id!(
    /// Identifier of a node, unique among the graph's nodes
    NodeId
);

define_id!(
    /// Identifier of an edge, unique among the graph's edges
    EdgeId
);

/// Set of occupied identifiers, queried by string slice
pub trait IdSet {
    /// Whether `id` is already taken
    fn contains_id(&self, id: &str) -> bool;
}

impl<T, S> IdSet for HashSet<T, S>
where
    T: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn contains_id(&self, id: &str) -> bool {
        self.contains(id)
    }
}

/// Allocate a collision-free identifier
///
/// Returns `desired` unchanged when it is free, otherwise the first of
/// `desired-1`, `desired-2`, ... that is not taken. The caller must record
/// the returned id as taken before allocating again.
#[must_use]
pub fn allocate_id<T: IdSet>(desired: &str, taken: &T) -> String {
    if !taken.contains_id(desired) {
        return desired.to_string();
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{desired}-{suffix}");
        if !taken.contains_id(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
