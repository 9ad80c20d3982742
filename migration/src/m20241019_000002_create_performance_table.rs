use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Performance::Table)
                    .if_not_exists()
                    .col(uuid(Performance::Id).primary_key())
                    .col(string(Performance::Name))
                    .col(integer(Performance::Year))
                    .col(double(Performance::Budget))
                    .col(
                        ColumnDef::new(Performance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Performance::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-performance-year")
                    .table(Performance::Table)
                    .col(Performance::Year)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Performance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Performance {
    Table,
    Id,
    Name,
    Year,
    Budget,
    CreatedAt,
    UpdatedAt,
}
