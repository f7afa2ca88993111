use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::idea::{IdeaStatus, Priority};

/// Request model for submitting a new idea
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub problem_statement: String,
    pub current_workaround: Option<String>,
    pub proposed_solution: String,
    pub example_scenario: String,
    /// Ordered list of beneficiary tags
    pub beneficiaries: Vec<String>,
    /// Ordered list of expected-impact tags
    pub expected_impact: Vec<String>,
}

/// Request model for a status transition
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status; not validated against the current status
    pub status: IdeaStatus,

    /// Optional comment recorded in the history ledger
    pub comment: Option<String>,
}

/// Request model for appending a comment to an idea
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Full idea projection
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct IdeaDto {
    pub id: String,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub problem_statement: String,
    pub current_workaround: Option<String>,
    pub proposed_solution: String,
    pub example_scenario: String,
    pub beneficiaries: Vec<String>,
    pub expected_impact: Vec<String>,
    pub status: IdeaStatus,
    pub owner_id: String,
    pub created_at: i64,
}

impl From<crate::types::db::idea::Model> for IdeaDto {
    fn from(m: crate::types::db::idea::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            category: m.category,
            priority: m.priority,
            problem_statement: m.problem_statement,
            current_workaround: m.current_workaround,
            proposed_solution: m.proposed_solution,
            example_scenario: m.example_scenario,
            beneficiaries: m.beneficiaries.0,
            expected_impact: m.expected_impact.0,
            status: m.status,
            owner_id: m.owner_id,
            created_at: m.created_at,
        }
    }
}

/// Owner attribution attached to listings and detail views
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
}

/// Listing entry: idea headline plus owner attribution and comment count
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct IdeaSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub status: IdeaStatus,
    pub owner: OwnerSummary,
    pub comment_count: i64,
    pub created_at: i64,
}

/// A single discussion entry
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: i32,
    pub content: String,
    pub author_name: String,
    pub created_at: i64,
}

/// A single ledger entry in an idea's status history
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryDto {
    pub id: i32,
    pub status: IdeaStatus,
    pub comment: Option<String>,
    pub changed_by_name: String,
    pub created_at: i64,
}

/// Detail view: the idea, its owner, its discussion and its full history
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct IdeaDetail {
    #[oai(flatten)]
    #[serde(flatten)]
    pub idea: IdeaDto,
    pub owner: OwnerSummary,
    /// Oldest first
    pub comments: Vec<CommentDto>,
    /// Oldest first; the last entry reflects the current status
    pub history: Vec<StatusHistoryDto>,
}

/// 201 response for idea submission
#[derive(ApiResponse)]
pub enum IdeaCreatedResponse {
    #[oai(status = 201)]
    Created(Json<IdeaDto>),
}

/// 201 response for comment creation
#[derive(ApiResponse)]
pub enum CommentCreatedResponse {
    #[oai(status = 201)]
    Created(Json<CommentDto>),
}
