use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, ReorderRequest, ReorderResponse};
use crate::services::{server_error, storage_and_user, validation_failed};

pub async fn reorder_contents(
    request: &HttpRequest,
    order: ReorderRequest,
) -> ActixResult<HttpResponse> {
    let (storage, user) = storage_and_user!(request);

    let pairs = match order.into_pairs() {
        Ok(pairs) => pairs,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    match storage.reorder_contents_for_owner(user.id, pairs).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ReorderResponse::ok(results),
            "OK",
        ))),
        Err(e) => Ok(server_error(ErrorCode::ReorderFailed, "Failed to reorder contents", e)),
    }
}
