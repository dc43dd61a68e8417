/*!
 * 基于权限的访问控制中间件
 *
 * 必须挂在 RequireJWT 之后。角色与权限的对应关系见 [`UserRole::has_permission`]。
 *
 * ```rust,ignore
 * web::resource("")
 *     .route(web::post().to(create_course).wrap(RequirePermission::new(Permission::AddCourse)))
 * ```
 *
 * 只校验权限，不校验所有权；所有权由存储层的 `*_for_owner` 查询保证。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{Permission, User},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequirePermission {
    permission: Permission,
}

impl RequirePermission {
    pub fn new(permission: Permission) -> Self {
        Self { permission }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            permission: self.permission,
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    permission: Permission,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let permission = self.permission;

        Box::pin(async move {
            let granted = req
                .extensions()
                .get::<User>()
                .map(|user| (user.id, user.has_permission(permission)));

            match granted {
                Some((_, true)) => Ok(srv.call(req).await?.map_into_left_body()),
                Some((user_id, false)) => {
                    info!(
                        "Access denied for user {}: missing permission {}",
                        user_id,
                        permission.codename()
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Permission check failed: no user in request. Make sure RequireJWT is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserRole, UserStatus};
    use actix_web::{App, HttpResponse, test as actix_test, web};

    fn user_with(role: UserRole) -> User {
        User {
            id: 7,
            username: "bob".into(),
            email: "bob@example.com".into(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            avatar_url: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    async fn call_with(user: Option<User>) -> StatusCode {
        let app = actix_test::init_service(
            App::new().service(
                web::resource("/courses")
                    .wrap(RequirePermission::new(Permission::AddCourse))
                    .wrap_fn(move |req, srv| {
                        if let Some(user) = user.clone() {
                            req.extensions_mut().insert(user);
                        }
                        srv.call(req)
                    })
                    .route(web::post().to(HttpResponse::Ok)),
            ),
        )
        .await;
        let req = actix_test::TestRequest::post().uri("/courses").to_request();
        actix_test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_instructor_may_add_course() {
        assert_eq!(call_with(Some(user_with(UserRole::Instructor))).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_student_is_forbidden() {
        assert_eq!(
            call_with(Some(user_with(UserRole::Student))).await,
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        assert_eq!(call_with(None).await, StatusCode::UNAUTHORIZED);
    }
}
