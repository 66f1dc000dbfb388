pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod students;
pub mod teachers;
pub mod users;

pub use courses::Entity as Courses;
pub use enrollments::Entity as Enrollments;
pub use grades::Entity as Grades;
pub use students::Entity as Students;
pub use teachers::Entity as Teachers;
pub use users::Entity as Users;
