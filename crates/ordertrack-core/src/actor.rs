//! Actor identity models.

use ordertrack_db::queries::actors::ActorRow;
use serde::{Deserialize, Serialize};

/// Role attached to an actor, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    TeamMember,
}

impl Role {
    /// Parse from the stored string form.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "team" | "team_member" => Self::TeamMember,
            _ => Self::Customer,
        }
    }

    /// Convert to the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::TeamMember => "team",
        }
    }
}

/// An authenticated actor. Owned by the identity layer; the workflow
/// engine only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Actor {
    /// Create an Actor from a database row.
    pub fn from_row(row: ActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: Role::from_str(&row.role),
        }
    }

    /// Whether this actor is a fulfillment-team operator.
    pub fn is_team(&self) -> bool {
        self.role == Role::TeamMember
    }
}
