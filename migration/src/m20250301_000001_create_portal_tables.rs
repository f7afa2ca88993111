use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Department).string())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create ideas table
        manager
            .create_table(
                Table::create()
                    .table(Ideas::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ideas::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Ideas::Title).string().not_null())
                    .col(ColumnDef::new(Ideas::Category).string().not_null())
                    .col(ColumnDef::new(Ideas::Priority).string().not_null())
                    .col(ColumnDef::new(Ideas::ProblemStatement).text().not_null())
                    .col(ColumnDef::new(Ideas::CurrentWorkaround).text())
                    .col(ColumnDef::new(Ideas::ProposedSolution).text().not_null())
                    .col(ColumnDef::new(Ideas::ExampleScenario).text().not_null())
                    .col(ColumnDef::new(Ideas::Beneficiaries).json().not_null())
                    .col(ColumnDef::new(Ideas::ExpectedImpact).json().not_null())
                    .col(ColumnDef::new(Ideas::Status).string().not_null())
                    .col(ColumnDef::new(Ideas::OwnerId).string().not_null())
                    .col(ColumnDef::new(Ideas::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Ideas::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ideas_owner_id")
                            .from(Ideas::Table, Ideas::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ideas_owner_id")
                    .table(Ideas::Table)
                    .col(Ideas::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Create idea_status_history table (append-only ledger)
        manager
            .create_table(
                Table::create()
                    .table(IdeaStatusHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IdeaStatusHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IdeaStatusHistory::IdeaId).string().not_null())
                    .col(ColumnDef::new(IdeaStatusHistory::Status).string().not_null())
                    .col(ColumnDef::new(IdeaStatusHistory::ChangedBy).string().not_null())
                    .col(ColumnDef::new(IdeaStatusHistory::Comment).text())
                    .col(ColumnDef::new(IdeaStatusHistory::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_idea_status_history_idea_id")
                            .from(IdeaStatusHistory::Table, IdeaStatusHistory::IdeaId)
                            .to(Ideas::Table, Ideas::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_idea_status_history_changed_by")
                            .from(IdeaStatusHistory::Table, IdeaStatusHistory::ChangedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_idea_status_history_idea_id")
                    .table(IdeaStatusHistory::Table)
                    .col(IdeaStatusHistory::IdeaId)
                    .to_owned(),
            )
            .await?;

        // Create comments table
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comments::IdeaId).string().not_null())
                    .col(ColumnDef::new(Comments::AuthorId).string().not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(ColumnDef::new(Comments::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_idea_id")
                            .from(Comments::Table, Comments::IdeaId)
                            .to(Ideas::Table, Ideas::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_author_id")
                            .from(Comments::Table, Comments::AuthorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_idea_id")
                    .table(Comments::Table)
                    .col(Comments::IdeaId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IdeaStatusHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ideas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    Role,
    Department,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Ideas {
    Table,
    Id,
    Title,
    Category,
    Priority,
    ProblemStatement,
    CurrentWorkaround,
    ProposedSolution,
    ExampleScenario,
    Beneficiaries,
    ExpectedImpact,
    Status,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum IdeaStatusHistory {
    Table,
    Id,
    IdeaId,
    Status,
    ChangedBy,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    IdeaId,
    AuthorId,
    Content,
    CreatedAt,
}
