use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::ReorderRequest;
use crate::services::ContentService;
use crate::utils::SafeContentId;

static CONTENT_SERVICE: Lazy<ContentService> = Lazy::new(ContentService::new_lazy);

pub async fn delete_content(req: HttpRequest, content_id: SafeContentId) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.delete_content(&req, content_id.0).await
}

pub async fn reorder_contents(
    req: HttpRequest,
    order: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.reorder_contents(&req, order.into_inner()).await
}

pub fn configure_contents_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/contents")
            .wrap(middlewares::RequireJWT)
            .route("/order", web::post().to(reorder_contents))
            .route("/{content_id}", web::delete().to(delete_content)),
    );
}
