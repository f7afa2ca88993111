use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::errors::PortalError;
use crate::policy::{self, Action};
use crate::services::TokenService;
use crate::stores::IdeaStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::idea::{
    CommentCreatedResponse, CreateCommentRequest, CreateIdeaRequest, IdeaCreatedResponse,
    IdeaDetail, IdeaDto, IdeaSummary, UpdateStatusRequest,
};

/// Idea workflow API endpoints
pub struct IdeaApi {
    ideas: Arc<IdeaStore>,
    tokens: Arc<TokenService>,
}

impl IdeaApi {
    pub fn new(ideas: Arc<IdeaStore>, tokens: Arc<TokenService>) -> Self {
        Self { ideas, tokens }
    }
}

#[derive(Tags)]
enum IdeaTags {
    /// Idea submission and review workflow
    Ideas,
}

#[OpenApi(prefix_path = "/ideas")]
impl IdeaApi {
    /// Submit a new idea (status SUBMITTED, first history entry written)
    #[oai(path = "/", method = "post", tag = "IdeaTags::Ideas")]
    async fn create_idea(
        &self,
        auth: BearerAuth,
        body: Json<CreateIdeaRequest>,
    ) -> Result<IdeaCreatedResponse, PortalError> {
        let claims = self.tokens.authenticate(&auth.0.token)?;
        if !policy::allows(claims.role, Action::CreateIdea) {
            return Err(PortalError::forbidden());
        }

        let idea = self.ideas.create(&claims.sub, body.0).await?;
        Ok(IdeaCreatedResponse::Created(Json(idea)))
    }

    /// List ideas, newest first. EMPLOYEE callers see only their own.
    #[oai(path = "/", method = "get", tag = "IdeaTags::Ideas")]
    async fn list_ideas(&self, auth: BearerAuth) -> Result<Json<Vec<IdeaSummary>>, PortalError> {
        let claims = self.tokens.authenticate(&auth.0.token)?;
        let owner_filter = if policy::allows(claims.role, Action::ViewAllIdeas) {
            None
        } else {
            Some(claims.sub.as_str())
        };

        let ideas = self.ideas.list(owner_filter).await?;
        Ok(Json(ideas))
    }

    /// List the caller's own ideas, newest first
    #[oai(path = "/my", method = "get", tag = "IdeaTags::Ideas")]
    async fn my_ideas(&self, auth: BearerAuth) -> Result<Json<Vec<IdeaSummary>>, PortalError> {
        let claims = self.tokens.authenticate(&auth.0.token)?;
        let ideas = self.ideas.list(Some(&claims.sub)).await?;
        Ok(Json(ideas))
    }

    /// Fetch one idea with owner, discussion and status history
    #[oai(path = "/:id", method = "get", tag = "IdeaTags::Ideas")]
    async fn get_idea(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<IdeaDetail>, PortalError> {
        self.tokens.authenticate(&auth.0.token)?;
        let detail = self.ideas.detail(&id.0).await?;
        Ok(Json(detail))
    }

    /// Append a comment to an idea's discussion
    #[oai(path = "/:id/comments", method = "post", tag = "IdeaTags::Ideas")]
    async fn add_comment(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<CreateCommentRequest>,
    ) -> Result<CommentCreatedResponse, PortalError> {
        let claims = self.tokens.authenticate(&auth.0.token)?;
        let comment = self
            .ideas
            .add_comment(&id.0, &claims.sub, body.0.content)
            .await?;
        Ok(CommentCreatedResponse::Created(Json(comment)))
    }

    /// Apply a status transition and record it in the history ledger
    #[oai(path = "/:id/status", method = "patch", tag = "IdeaTags::Ideas")]
    async fn update_status(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateStatusRequest>,
    ) -> Result<Json<IdeaDto>, PortalError> {
        let claims = self.tokens.authenticate(&auth.0.token)?;
        if !policy::allows(claims.role, Action::TransitionStatus) {
            return Err(PortalError::forbidden());
        }

        let idea = self
            .ideas
            .transition_status(&id.0, body.0.status, &claims.sub, body.0.comment)
            .await?;
        Ok(Json(idea))
    }

    /// Delete an idea and cascade to its history and comments
    #[oai(path = "/:id", method = "delete", tag = "IdeaTags::Ideas")]
    async fn delete_idea(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, PortalError> {
        let claims = self.tokens.authenticate(&auth.0.token)?;
        if !policy::allows(claims.role, Action::DeleteIdea) {
            return Err(PortalError::forbidden());
        }

        self.ideas.delete(&id.0).await?;
        Ok(Json(MessageResponse {
            message: "Idea deleted successfully".to_string(),
        }))
    }
}
