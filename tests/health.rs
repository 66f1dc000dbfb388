use student_management_api::routes::health::{health_check, root};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn root_reports_service_is_running() {
    let response = root().await;
    assert_eq!(response.0.message, "Student Management System API is running!");

    let data = response.0.data.expect("root data");
    assert_eq!(data.name, "student-management-api");
}
