//! Contract collaborators and their role-derived permissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Commenter,
    Editor,
}

impl Role {
    pub fn permissions(&self) -> Permissions {
        Permissions {
            can_view: true,
            can_comment: *self != Role::Viewer,
            can_edit: *self == Role::Editor,
            can_download: *self == Role::Editor,
        }
    }
}

/// What a collaborator may do with a shared contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_view: bool,
    pub can_comment: bool,
    pub can_edit: bool,
    pub can_download: bool,
}

/// Someone a contract has been shared with.
///
/// Permissions are never stored: they are recomputed from the role on every
/// read, so a role change can't leave them stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: String,
    pub email: String,
    role: Role,
    pub invited_at: DateTime<Utc>,
}

impl Collaborator {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            role,
            invited_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn permissions(&self) -> Permissions {
        self.role.permissions()
    }
}
