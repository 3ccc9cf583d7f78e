//! Storage key namespace.
//!
//! Every per-user collection lives under `{prefix}{user_id}`, e.g.
//! `plans:u1`. Keys are discoverable by prefix, so maintenance code can find
//! "users with data" without a separate index.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The fixed set of per-user entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Workout programs
    Plans,

    /// Logged training sessions
    Workouts,
}

impl Collection {
    /// Every known collection, in scan order.
    pub const ALL: [Collection; 2] = [Collection::Plans, Collection::Workouts];

    /// Collection name as used in keys and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Plans => "plans",
            Collection::Workouts => "workouts",
        }
    }

    /// Key prefix shared by all users' copies of this collection.
    pub fn prefix(&self) -> &'static str {
        match self {
            Collection::Plans => "plans:",
            Collection::Workouts => "workouts:",
        }
    }

    /// Namespaced storage key for `user_id`'s copy of this collection.
    pub fn key_for(&self, user_id: &str) -> String {
        format!("{}{user_id}", self.prefix())
    }

    /// Split a storage key into its collection and user id.
    ///
    /// Returns `None` for keys outside the collection namespace or with an
    /// empty user id.
    ///
    /// ```rust
    /// use liftlog_core::store::Collection;
    ///
    /// assert_eq!(
    ///     Collection::parse_key("plans:u1"),
    ///     Some((Collection::Plans, "u1"))
    /// );
    /// assert_eq!(Collection::parse_key("settings"), None);
    /// ```
    pub fn parse_key(key: &str) -> Option<(Collection, &str)> {
        Self::ALL.into_iter().find_map(|collection| {
            key.strip_prefix(collection.prefix())
                .filter(|user_id| !user_id.is_empty())
                .map(|user_id| (collection, user_id))
        })
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plans" => Ok(Collection::Plans),
            "workouts" => Ok(Collection::Workouts),
            _ => Err(format!("Invalid collection: {s}")),
        }
    }
}
