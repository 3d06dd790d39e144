// src/models/ids.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares a string-backed identifier that is transparent to serde and sqlx,
/// so a `UserId` can never be passed where a `TeamId` is expected.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id!(
    /// Identifier of a platform user.
    UserId
);
string_id!(
    /// Identifier of a competing team.
    TeamId
);
string_id!(
    /// Identifier of a gradable problem.
    ProblemId
);
string_id!(
    /// Identifier of a challenge grouping several problems.
    ChallengeId
);
string_id!(WorkspaceId);
