use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        courses::{CourseList, CreateCourseRequest},
        enrollments::{CreateEnrollmentRequest, EnrollmentList},
        grades::{CreateGradeRequest, GradeList},
        students::{RegisterStudentRequest, StudentList},
        teachers::{RegisterTeacherRequest, TeacherList},
    },
    models::{
        Course, DashboardStats, Enrollment, EnrollmentStatus, Grade, RecentActivity, Role,
        Student, Teacher, User,
    },
    response::{ApiResponse, Meta},
    routes::{auth, courses, dashboard, enrollments, grades, health, params, students, teachers},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Management System API",
        description = "Students, teachers, courses, enrollments and grades"
    ),
    paths(
        health::root,
        health::health_check,
        auth::register_student,
        auth::register_teacher,
        auth::login,
        students::list_students,
        students::get_my_student,
        students::get_student,
        teachers::list_teachers,
        teachers::get_my_teacher,
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        enrollments::create_enrollment,
        enrollments::list_enrollments,
        enrollments::list_my_enrollments,
        grades::create_grade,
        grades::list_grades,
        grades::list_my_grades,
        dashboard::get_stats
    ),
    components(
        schemas(
            Role,
            EnrollmentStatus,
            User,
            Student,
            Teacher,
            Course,
            Enrollment,
            Grade,
            RecentActivity,
            DashboardStats,
            LoginRequest,
            LoginResponse,
            RegisterStudentRequest,
            RegisterTeacherRequest,
            CreateCourseRequest,
            CreateEnrollmentRequest,
            CreateGradeRequest,
            StudentList,
            TeacherList,
            CourseList,
            EnrollmentList,
            GradeList,
            params::Pagination,
            params::CourseListQuery,
            params::RecordListQuery,
            Meta,
            ApiResponse<Student>,
            ApiResponse<Course>,
            ApiResponse<StudentList>,
            ApiResponse<DashboardStats>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Auth", description = "Registration and login"),
        (name = "Students", description = "Student profiles"),
        (name = "Teachers", description = "Teacher profiles"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Enrollments", description = "Course enrollments"),
        (name = "Grades", description = "Grades"),
        (name = "Dashboard", description = "Admin statistics"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
