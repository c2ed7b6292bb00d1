use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupMemberships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupMemberships::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GroupMemberships::AccountId).uuid().not_null())
                    .col(
                        ColumnDef::new(GroupMemberships::GroupName)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupMemberships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (account, group)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_group_memberships_account_group")
                    .table(GroupMemberships::Table)
                    .col(GroupMemberships::AccountId)
                    .col(GroupMemberships::GroupName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupMemberships::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GroupMemberships {
    Table,
    Id,
    AccountId,
    GroupName,
    CreatedAt,
}
