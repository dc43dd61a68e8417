use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 四类条目共享的列：id / owner_id / title / created_at / updated_at
fn item_table<T: IntoIden + Clone + 'static>(
    table: T,
    payload: ColumnDef,
    owner_fk: &str,
) -> TableCreateStatement {
    Table::create()
        .table(table.clone())
        .if_not_exists()
        .col(
            ColumnDef::new(Item::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Item::OwnerId).big_integer().not_null())
        .col(ColumnDef::new(Item::Title).string_len(250).not_null())
        .col(payload)
        .col(ColumnDef::new(Item::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Item::UpdatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name(owner_fk)
                .from(table, Item::OwnerId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(item_table(
                ItemTexts::Table,
                ColumnDef::new(Item::Content).text().not_null().to_owned(),
                "fk_item_texts_owner",
            ))
            .await?;

        manager
            .create_table(item_table(
                ItemFiles::Table,
                ColumnDef::new(Item::File).string().not_null().to_owned(),
                "fk_item_files_owner",
            ))
            .await?;

        manager
            .create_table(item_table(
                ItemImages::Table,
                ColumnDef::new(Item::File).string().not_null().to_owned(),
                "fk_item_images_owner",
            ))
            .await?;

        manager
            .create_table(item_table(
                ItemVideos::Table,
                ColumnDef::new(Item::Url).string().not_null().to_owned(),
                "fk_item_videos_owner",
            ))
            .await?;

        // 上传文件表
        manager
            .create_table(
                Table::create()
                    .table(Uploads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Uploads::Token)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Uploads::OriginalName).string().not_null())
                    .col(ColumnDef::new(Uploads::StoredName).string().not_null())
                    .col(ColumnDef::new(Uploads::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Uploads::FileType).string().not_null())
                    .col(ColumnDef::new(Uploads::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(Uploads::UploadedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Uploads::Table, Uploads::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_uploads_owner_id")
                    .table(Uploads::Table)
                    .col(Uploads::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Uploads::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemVideos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemFiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemTexts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Item {
    Id,
    OwnerId,
    Title,
    Content,
    File,
    Url,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone)]
enum ItemTexts {
    #[sea_orm(iden = "item_texts")]
    Table,
}

#[derive(DeriveIden, Clone)]
enum ItemFiles {
    #[sea_orm(iden = "item_files")]
    Table,
}

#[derive(DeriveIden, Clone)]
enum ItemImages {
    #[sea_orm(iden = "item_images")]
    Table,
}

#[derive(DeriveIden, Clone)]
enum ItemVideos {
    #[sea_orm(iden = "item_videos")]
    Table,
}

#[derive(DeriveIden)]
enum Uploads {
    #[sea_orm(iden = "uploads")]
    Table,
    Token,
    OriginalName,
    StoredName,
    FileSize,
    FileType,
    OwnerId,
    UploadedAt,
}
