use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::PortalError;
use crate::types::db::idea::{self, IdeaStatus, TagList};
use crate::types::db::{comment, status_history, user};
use crate::types::dto::idea::{
    CommentDto, CreateIdeaRequest, IdeaDetail, IdeaDto, IdeaSummary, OwnerSummary,
    StatusHistoryDto,
};

/// IdeaStore manages idea records, their status-history ledger and their
/// comment log.
///
/// Every operation that touches both an idea and its ledger runs in a single
/// transaction, so `idea.status` always matches the most recent history row.
pub struct IdeaStore {
    db: DatabaseConnection,
}

#[derive(FromQueryResult)]
struct CommentTally {
    idea_id: String,
    count: i64,
}

impl IdeaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submit a new idea. Sets status to SUBMITTED and appends the first
    /// ledger entry in the same transaction.
    pub async fn create(
        &self,
        owner_id: &str,
        req: CreateIdeaRequest,
    ) -> Result<IdeaDto, PortalError> {
        let now = Utc::now().timestamp();

        let txn = self.db.begin().await?;

        let model = idea::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(req.title),
            category: Set(req.category),
            priority: Set(req.priority),
            problem_statement: Set(req.problem_statement),
            current_workaround: Set(req.current_workaround),
            proposed_solution: Set(req.proposed_solution),
            example_scenario: Set(req.example_scenario),
            beneficiaries: Set(TagList(req.beneficiaries)),
            expected_impact: Set(TagList(req.expected_impact)),
            status: Set(IdeaStatus::Submitted),
            owner_id: Set(owner_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        status_history::ActiveModel {
            idea_id: Set(model.id.clone()),
            status: Set(IdeaStatus::Submitted),
            changed_by: Set(owner_id.to_string()),
            comment: Set(Some("Idea submitted".to_string())),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(IdeaDto::from(model))
    }

    /// List ideas newest-first, annotated with owner attribution and comment
    /// counts. `owner_filter` restricts the result to a single owner; the
    /// caller derives it from the authorization policy.
    pub async fn list(&self, owner_filter: Option<&str>) -> Result<Vec<IdeaSummary>, PortalError> {
        let mut query = idea::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(idea::Column::CreatedAt);
        if let Some(owner_id) = owner_filter {
            query = query.filter(idea::Column::OwnerId.eq(owner_id));
        }
        let rows = query.all(&self.db).await?;

        let counts: HashMap<String, i64> = comment::Entity::find()
            .select_only()
            .column(comment::Column::IdeaId)
            .column_as(comment::Column::Id.count(), "count")
            .group_by(comment::Column::IdeaId)
            .into_model::<CommentTally>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| (t.idea_id, t.count))
            .collect();

        rows.into_iter()
            .map(|(idea, owner)| {
                let owner = owner.ok_or_else(|| {
                    tracing::error!(idea_id = %idea.id, "idea references missing owner");
                    PortalError::storage()
                })?;
                Ok(IdeaSummary {
                    comment_count: counts.get(&idea.id).copied().unwrap_or(0),
                    owner: OwnerSummary {
                        name: owner.name,
                        email: owner.email,
                        department: owner.department,
                    },
                    id: idea.id,
                    title: idea.title,
                    category: idea.category,
                    priority: idea.priority,
                    status: idea.status,
                    created_at: idea.created_at,
                })
            })
            .collect()
    }

    /// Fetch one idea with its owner, discussion (oldest first) and full
    /// status history (oldest first).
    pub async fn detail(&self, idea_id: &str) -> Result<IdeaDetail, PortalError> {
        let (idea, owner) = idea::Entity::find_by_id(idea_id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?
            .ok_or_else(|| PortalError::not_found("Idea"))?;
        let owner = owner.ok_or_else(|| {
            tracing::error!(idea_id = %idea.id, "idea references missing owner");
            PortalError::storage()
        })?;

        let comments = comment::Entity::find()
            .filter(comment::Column::IdeaId.eq(idea_id))
            .find_also_related(user::Entity)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(c, author)| CommentDto {
                id: c.id,
                content: c.content,
                author_name: author.map(|a| a.name).unwrap_or_default(),
                created_at: c.created_at,
            })
            .collect();

        let history = status_history::Entity::find()
            .filter(status_history::Column::IdeaId.eq(idea_id))
            .find_also_related(user::Entity)
            .order_by_asc(status_history::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(h, actor)| StatusHistoryDto {
                id: h.id,
                status: h.status,
                comment: h.comment,
                changed_by_name: actor.map(|a| a.name).unwrap_or_default(),
                created_at: h.created_at,
            })
            .collect();

        Ok(IdeaDetail {
            owner: OwnerSummary {
                name: owner.name,
                email: owner.email,
                department: owner.department,
            },
            idea: IdeaDto::from(idea),
            comments,
            history,
        })
    }

    /// Apply a status transition and append the matching ledger entry as one
    /// atomic unit. The target status is intentionally not validated against
    /// the current one; the authorization policy is the only gate.
    pub async fn transition_status(
        &self,
        idea_id: &str,
        status: IdeaStatus,
        actor_id: &str,
        comment: Option<String>,
    ) -> Result<IdeaDto, PortalError> {
        let idea = idea::Entity::find_by_id(idea_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| PortalError::not_found("Idea"))?;

        let now = Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let mut active: idea::ActiveModel = idea.into();
        active.status = Set(status);
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        status_history::ActiveModel {
            idea_id: Set(idea_id.to_string()),
            status: Set(status),
            changed_by: Set(actor_id.to_string()),
            comment: Set(comment),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(IdeaDto::from(updated))
    }

    /// Delete an idea together with its history and comments, leaving no
    /// orphaned children.
    pub async fn delete(&self, idea_id: &str) -> Result<(), PortalError> {
        let idea = idea::Entity::find_by_id(idea_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| PortalError::not_found("Idea"))?;

        let txn = self.db.begin().await?;

        status_history::Entity::delete_many()
            .filter(status_history::Column::IdeaId.eq(idea_id))
            .exec(&txn)
            .await?;
        comment::Entity::delete_many()
            .filter(comment::Column::IdeaId.eq(idea_id))
            .exec(&txn)
            .await?;
        idea::Entity::delete_by_id(idea.id).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Append a comment to an idea's discussion.
    pub async fn add_comment(
        &self,
        idea_id: &str,
        author_id: &str,
        content: String,
    ) -> Result<CommentDto, PortalError> {
        idea::Entity::find_by_id(idea_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| PortalError::not_found("Idea"))?;
        let author = user::Entity::find_by_id(author_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| PortalError::not_found("User"))?;

        let model = comment::ActiveModel {
            idea_id: Set(idea_id.to_string()),
            author_id: Set(author_id.to_string()),
            content: Set(content),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(CommentDto {
            id: model.id,
            content: model.content,
            author_name: author.name,
            created_at: model.created_at,
        })
    }
}
