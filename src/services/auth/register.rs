use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::RegisterRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::services::{server_error, storage_from};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub async fn handle_register(
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match storage_from(request) {
        Ok(storage) => storage,
        Err(response) => return Ok(response),
    };

    let username = register_request.username.trim().to_string();
    let email = register_request.email.trim().to_string();

    if let Err(msg) = validate_username(&username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    // 管理员只能由启动时的种子账号产生
    let role = register_request.role.unwrap_or(UserRole::Student);
    if role == UserRole::Admin {
        return Ok(bad_request(
            ErrorCode::RegisterFailed,
            "Role must be student or instructor",
        ));
    }

    if let Err(response) = ensure_unique(&storage, &username, &email).await {
        return Ok(response);
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(server_error(ErrorCode::RegisterFailed, "Register failed", e)),
    };

    let create = CreateUserRequest {
        username,
        email,
        password: password_hash,
        role,
        display_name: register_request.display_name,
        avatar_url: None,
    };

    match storage.create_user(create).await {
        Ok(user) => {
            tracing::info!("Registered user {} as {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Register successful")))
        }
        Err(e) => Ok(server_error(ErrorCode::RegisterFailed, "Register failed", e)),
    }
}

async fn ensure_unique(
    storage: &Arc<dyn Storage>,
    username: &str,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => {
            return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Err(server_error(ErrorCode::RegisterFailed, "Register failed", e)),
    }

    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(server_error(ErrorCode::RegisterFailed, "Register failed", e)),
    }
}
