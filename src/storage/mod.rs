use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储抽象
///
/// 名称带 `_for_owner` 的方法只作用于 `owner_id` 拥有的数据（课程 → 模块 → 内容逐级传递）。
/// 不存在与不属于当前用户返回相同的结果（`None` / `false`），调用方统一按 404 处理。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 学科管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_slug(&self, slug: &str) -> Result<Option<Subject>>;
    // 按标题排序，附带课程数
    async fn list_subjects_with_course_count(&self) -> Result<Vec<SubjectSummary>>;

    /// 课程管理方法
    async fn create_course(&self, owner_id: i64, form: CourseForm) -> Result<Course>;
    // slug 是否已被其他课程占用
    async fn course_slug_taken(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn get_course_for_owner(&self, course_id: i64, owner_id: i64)
    -> Result<Option<Course>>;
    async fn list_courses_for_owner(&self, query: CourseListQuery) -> Result<CourseListResponse>;
    async fn update_course_for_owner(
        &self,
        course_id: i64,
        owner_id: i64,
        form: CourseForm,
    ) -> Result<Option<Course>>;
    // 删除课程及其内容引用的条目
    async fn delete_course_for_owner(&self, course_id: i64, owner_id: i64) -> Result<bool>;

    /// 模块管理方法
    // 新建模块，`order` 为 None 时自动追加到课程末尾
    async fn create_module(
        &self,
        course_id: i64,
        title: String,
        description: String,
        order: Option<i32>,
    ) -> Result<Module>;
    // 课程不属于 owner 时返回 None
    async fn list_modules_for_owner(
        &self,
        course_id: i64,
        owner_id: i64,
    ) -> Result<Option<Vec<Module>>>;
    async fn get_module_for_owner(&self, module_id: i64, owner_id: i64)
    -> Result<Option<Module>>;
    // 在一个事务中执行表单集，返回执行后的模块列表
    async fn apply_module_formset(
        &self,
        course_id: i64,
        owner_id: i64,
        plan: ModuleFormsetPlan,
    ) -> Result<Option<Vec<Module>>>;
    async fn reorder_modules_for_owner(
        &self,
        owner_id: i64,
        pairs: Vec<(i64, i32)>,
    ) -> Result<Vec<ReorderOutcome>>;

    /// 内容管理方法
    async fn list_contents_for_owner(
        &self,
        module_id: i64,
        owner_id: i64,
    ) -> Result<Option<(Module, Vec<ContentDetail>)>>;
    // 同一事务内创建条目与内容行
    async fn create_content_for_owner(
        &self,
        module_id: i64,
        owner_id: i64,
        input: ItemInput,
    ) -> Result<Option<(Content, Item)>>;
    async fn get_item_for_owner(
        &self,
        kind: ItemKind,
        item_id: i64,
        owner_id: i64,
    ) -> Result<Option<Item>>;
    // 只修改条目，内容行不变
    async fn update_item_for_owner(
        &self,
        item_id: i64,
        owner_id: i64,
        input: ItemInput,
    ) -> Result<Option<Item>>;
    // 删除内容行及其条目
    async fn delete_content_for_owner(&self, content_id: i64, owner_id: i64) -> Result<bool>;
    async fn reorder_contents_for_owner(
        &self,
        owner_id: i64,
        pairs: Vec<(i64, i32)>,
    ) -> Result<Vec<ReorderOutcome>>;

    /// 上传文件管理方法
    async fn create_upload(&self, upload: Upload) -> Result<Upload>;
    async fn get_upload_for_owner(&self, token: &str, owner_id: i64) -> Result<Option<Upload>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
