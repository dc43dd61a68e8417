pub mod formset;
pub mod list;
pub mod reorder;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ReorderRequest;
use crate::models::modules::requests::ModuleFormsetRequest;

pub struct ModuleService;

impl ModuleService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn list_modules(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_modules(request, course_id).await
    }

    pub async fn save_formset(
        &self,
        request: &HttpRequest,
        course_id: i64,
        formset: ModuleFormsetRequest,
    ) -> ActixResult<HttpResponse> {
        formset::save_formset(request, course_id, formset).await
    }

    pub async fn reorder_modules(
        &self,
        request: &HttpRequest,
        order: ReorderRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_modules(request, order).await
    }
}
