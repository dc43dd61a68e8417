use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission};
use crate::models::courses::requests::{CourseForm, CourseQueryParams};
use crate::models::modules::requests::ModuleFormsetRequest;
use crate::models::users::entities::Permission;
use crate::services::{CourseService, ModuleService};
use crate::utils::SafeCourseId;

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static MODULE_SERVICE: Lazy<ModuleService> = Lazy::new(ModuleService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    form: web::Json<CourseForm>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, form.into_inner()).await
}

pub async fn get_course(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.0).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseId,
    form: web::Json<CourseForm>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.0, form.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

pub async fn list_modules(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.list_modules(&req, course_id.0).await
}

pub async fn save_modules(
    req: HttpRequest,
    course_id: SafeCourseId,
    formset: web::Json<ModuleFormsetRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE
        .save_formset(&req, course_id.0, formset.into_inner())
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(RequirePermission::new(Permission::AddCourse)),
                    ),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(
                        web::put()
                            .to(update_course)
                            .wrap(RequirePermission::new(Permission::ChangeCourse)),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(RequirePermission::new(Permission::DeleteCourse)),
                    ),
            )
            .service(
                web::resource("/{course_id}/modules")
                    .route(web::get().to(list_modules))
                    // 编辑模块即编辑课程
                    .route(
                        web::put()
                            .to(save_modules)
                            .wrap(RequirePermission::new(Permission::ChangeCourse)),
                    ),
            ),
    );
}
