use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::ReorderRequest;
use crate::models::contents::requests::ItemForm;
use crate::services::{ContentService, ModuleService};
use crate::utils::{SafeItemId, SafeItemKind, SafeModuleId};

static MODULE_SERVICE: Lazy<ModuleService> = Lazy::new(ModuleService::new_lazy);
static CONTENT_SERVICE: Lazy<ContentService> = Lazy::new(ContentService::new_lazy);

pub async fn reorder_modules(
    req: HttpRequest,
    order: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.reorder_modules(&req, order.into_inner()).await
}

pub async fn list_contents(req: HttpRequest, module_id: SafeModuleId) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.list_module_contents(&req, module_id.0).await
}

// model_name 先于模块查询校验
pub async fn create_item(
    req: HttpRequest,
    kind: SafeItemKind,
    module_id: SafeModuleId,
    form: web::Json<ItemForm>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .create_item(&req, module_id.0, kind.0, form.into_inner())
        .await
}

pub async fn update_item(
    req: HttpRequest,
    kind: SafeItemKind,
    module_id: SafeModuleId,
    item_id: SafeItemId,
    form: web::Json<ItemForm>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .update_item(&req, module_id.0, kind.0, item_id.0, form.into_inner())
        .await
}

// 配置路由
pub fn configure_modules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/modules")
            .wrap(middlewares::RequireJWT)
            .route("/order", web::post().to(reorder_modules))
            .route("/{module_id}/contents", web::get().to(list_contents))
            .route(
                "/{module_id}/content/{model_name}",
                web::post().to(create_item),
            )
            .route(
                "/{module_id}/content/{model_name}/{item_id}",
                web::put().to(update_item),
            ),
    );
}
