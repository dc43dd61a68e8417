//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod contents;
mod courses;
mod items;
mod modules;
pub mod ordering;
mod subjects;
mod uploads;
mod users;

use crate::config::AppConfig;
use crate::errors::{EducaError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 基于已有连接创建存储，并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| EducaError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EducaError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EducaError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EducaError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EducaError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    ReorderOutcome,
    contents::{
        entities::{Content, ContentDetail, Item, ItemKind},
        requests::ItemInput,
    },
    courses::{
        entities::Course,
        requests::{CourseForm, CourseListQuery},
        responses::CourseListResponse,
    },
    modules::{entities::Module, requests::ModuleFormsetPlan},
    subjects::{entities::Subject, requests::CreateSubjectRequest, responses::SubjectSummary},
    uploads::entities::Upload,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学科模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_slug(&self, slug: &str) -> Result<Option<Subject>> {
        self.get_subject_by_slug_impl(slug).await
    }

    async fn list_subjects_with_course_count(&self) -> Result<Vec<SubjectSummary>> {
        self.list_subjects_with_course_count_impl().await
    }

    // 课程模块
    async fn create_course(&self, owner_id: i64, form: CourseForm) -> Result<Course> {
        self.create_course_impl(owner_id, form).await
    }

    async fn course_slug_taken(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.course_slug_taken_impl(slug, exclude_id).await
    }

    async fn get_course_for_owner(
        &self,
        course_id: i64,
        owner_id: i64,
    ) -> Result<Option<Course>> {
        self.get_course_for_owner_impl(course_id, owner_id).await
    }

    async fn list_courses_for_owner(&self, query: CourseListQuery) -> Result<CourseListResponse> {
        self.list_courses_for_owner_impl(query).await
    }

    async fn update_course_for_owner(
        &self,
        course_id: i64,
        owner_id: i64,
        form: CourseForm,
    ) -> Result<Option<Course>> {
        self.update_course_for_owner_impl(course_id, owner_id, form)
            .await
    }

    async fn delete_course_for_owner(&self, course_id: i64, owner_id: i64) -> Result<bool> {
        self.delete_course_for_owner_impl(course_id, owner_id).await
    }

    // 模块
    async fn create_module(
        &self,
        course_id: i64,
        title: String,
        description: String,
        order: Option<i32>,
    ) -> Result<Module> {
        self.create_module_impl(course_id, title, description, order)
            .await
    }

    async fn list_modules_for_owner(
        &self,
        course_id: i64,
        owner_id: i64,
    ) -> Result<Option<Vec<Module>>> {
        self.list_modules_for_owner_impl(course_id, owner_id).await
    }

    async fn get_module_for_owner(
        &self,
        module_id: i64,
        owner_id: i64,
    ) -> Result<Option<Module>> {
        self.get_module_for_owner_impl(module_id, owner_id).await
    }

    async fn apply_module_formset(
        &self,
        course_id: i64,
        owner_id: i64,
        plan: ModuleFormsetPlan,
    ) -> Result<Option<Vec<Module>>> {
        self.apply_module_formset_impl(course_id, owner_id, plan)
            .await
    }

    async fn reorder_modules_for_owner(
        &self,
        owner_id: i64,
        pairs: Vec<(i64, i32)>,
    ) -> Result<Vec<ReorderOutcome>> {
        self.reorder_modules_for_owner_impl(owner_id, pairs).await
    }

    // 内容
    async fn list_contents_for_owner(
        &self,
        module_id: i64,
        owner_id: i64,
    ) -> Result<Option<(Module, Vec<ContentDetail>)>> {
        self.list_contents_for_owner_impl(module_id, owner_id).await
    }

    async fn create_content_for_owner(
        &self,
        module_id: i64,
        owner_id: i64,
        input: ItemInput,
    ) -> Result<Option<(Content, Item)>> {
        self.create_content_for_owner_impl(module_id, owner_id, input)
            .await
    }

    async fn get_item_for_owner(
        &self,
        kind: ItemKind,
        item_id: i64,
        owner_id: i64,
    ) -> Result<Option<Item>> {
        self.get_item_for_owner_impl(kind, item_id, owner_id).await
    }

    async fn update_item_for_owner(
        &self,
        item_id: i64,
        owner_id: i64,
        input: ItemInput,
    ) -> Result<Option<Item>> {
        self.update_item_for_owner_impl(item_id, owner_id, input)
            .await
    }

    async fn delete_content_for_owner(&self, content_id: i64, owner_id: i64) -> Result<bool> {
        self.delete_content_for_owner_impl(content_id, owner_id)
            .await
    }

    async fn reorder_contents_for_owner(
        &self,
        owner_id: i64,
        pairs: Vec<(i64, i32)>,
    ) -> Result<Vec<ReorderOutcome>> {
        self.reorder_contents_for_owner_impl(owner_id, pairs).await
    }

    // 上传文件
    async fn create_upload(&self, upload: Upload) -> Result<Upload> {
        self.create_upload_impl(upload).await
    }

    async fn get_upload_for_owner(&self, token: &str, owner_id: i64) -> Result<Option<Upload>> {
        self.get_upload_for_owner_impl(token, owner_id).await
    }
}

#[cfg(test)]
mod tests;
