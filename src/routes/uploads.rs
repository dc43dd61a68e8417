use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::services::UploadService;
use crate::utils::SafeUploadToken;

static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

pub async fn upload_file(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.handle_upload(&req, payload).await
}

pub async fn download_file(req: HttpRequest, token: SafeUploadToken) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.handle_download(&req, token.0).await
}

pub fn configure_uploads_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/uploads")
            .service(
                web::resource("")
                    // 限流按用户计数，需先经过 RequireJWT
                    .wrap(RateLimit::file_upload())
                    .wrap(middlewares::RequireJWT)
                    .route(web::post().to(upload_file)),
            )
            .service(
                web::resource("/{token}")
                    .wrap(middlewares::RequireJWT)
                    .route(web::get().to(download_file)),
            ),
    );
}
