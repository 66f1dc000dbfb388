pub mod auth_service;
pub mod course_service;
pub mod dashboard_service;
pub mod enrollment_service;
pub mod grade_service;
pub mod student_service;
pub mod teacher_service;

mod mapping;
