pub mod delete;
pub mod editor;
pub mod list;
pub mod reorder;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ReorderRequest;
use crate::models::contents::{entities::ItemKind, requests::ItemForm};

pub struct ContentService;

impl ContentService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn list_module_contents(
        &self,
        request: &HttpRequest,
        module_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_module_contents(request, module_id).await
    }

    pub async fn create_item(
        &self,
        request: &HttpRequest,
        module_id: i64,
        kind: ItemKind,
        form: ItemForm,
    ) -> ActixResult<HttpResponse> {
        editor::create_item(request, module_id, kind, form).await
    }

    pub async fn update_item(
        &self,
        request: &HttpRequest,
        module_id: i64,
        kind: ItemKind,
        item_id: i64,
        form: ItemForm,
    ) -> ActixResult<HttpResponse> {
        editor::update_item(request, module_id, kind, item_id, form).await
    }

    pub async fn delete_content(
        &self,
        request: &HttpRequest,
        content_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_content(request, content_id).await
    }

    pub async fn reorder_contents(
        &self,
        request: &HttpRequest,
        order: ReorderRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_contents(request, order).await
    }
}
