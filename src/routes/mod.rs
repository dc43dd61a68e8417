pub mod auth;

pub mod subjects;

pub mod courses;

pub mod modules;

pub mod contents;

pub mod uploads;

pub use auth::configure_auth_routes;
pub use contents::configure_contents_routes;
pub use courses::configure_courses_routes;
pub use modules::configure_modules_routes;
pub use subjects::configure_subjects_routes;
pub use uploads::configure_uploads_routes;
