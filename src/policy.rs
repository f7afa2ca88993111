//! Authorization policy: maps (role, action) to allow/deny.
//!
//! This is the single source of truth for every route guard. The match is
//! exhaustive over the closed [`Role`] enum, so adding a role forces every
//! rule to be revisited.

use crate::types::db::user::Role;

/// Actions gated by the policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Submit a new idea
    CreateIdea,
    /// See ideas owned by other users; denied roles see only their own
    ViewAllIdeas,
    /// Apply a status transition to any idea
    TransitionStatus,
    /// Permanently delete an idea and its children
    DeleteIdea,
    /// List users and modify roles
    ManageUsers,
}

/// Pure lookup: no side effects, no I/O. Callers translate a deny into
/// 403 (or an ownership filter for `ViewAllIdeas`), never a silent no-op.
pub fn allows(role: Role, action: Action) -> bool {
    match action {
        Action::CreateIdea => true,
        Action::ViewAllIdeas => match role {
            Role::Employee => false,
            Role::Reviewer
            | Role::Pm
            | Role::Admin
            | Role::SuperAdmin
            | Role::Management => true,
        },
        Action::TransitionStatus => match role {
            Role::Admin | Role::Pm | Role::Reviewer | Role::SuperAdmin => true,
            Role::Employee | Role::Management => false,
        },
        Action::DeleteIdea => match role {
            Role::Admin | Role::SuperAdmin => true,
            Role::Employee | Role::Reviewer | Role::Pm | Role::Management => false,
        },
        Action::ManageUsers => match role {
            Role::SuperAdmin => true,
            Role::Employee | Role::Reviewer | Role::Pm | Role::Admin | Role::Management => false,
        },
    }
}
