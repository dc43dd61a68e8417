pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct UploadService;

impl UploadService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(request, payload).await
    }

    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        token: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(request, token).await
    }
}
