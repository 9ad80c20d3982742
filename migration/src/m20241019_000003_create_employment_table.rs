use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

// `actor_id` and `performance_id` are deliberately left without foreign keys:
// cascades are carried out by the service layer.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employment::Table)
                    .if_not_exists()
                    .col(uuid(Employment::Id).primary_key())
                    .col(uuid(Employment::ActorId))
                    .col(uuid(Employment::PerformanceId))
                    .col(string(Employment::Role))
                    .col(double(Employment::AnnualContractValue))
                    .col(
                        ColumnDef::new(Employment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employment::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-employment-actor_id")
                    .table(Employment::Table)
                    .col(Employment::ActorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-employment-performance_id")
                    .table(Employment::Table)
                    .col(Employment::PerformanceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Employment {
    Table,
    Id,
    ActorId,
    PerformanceId,
    Role,
    AnnualContractValue,
    CreatedAt,
    UpdatedAt,
}
