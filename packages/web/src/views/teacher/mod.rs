//! Teacher pages: the attendance dashboard, the class list and the profile.

mod dashboard;
pub use dashboard::Dashboard;

mod class_students;
pub use class_students::ClassStudents;

mod profile;
pub use profile::TeacherProfile;

use api::{ApiError, Student};
use ui::make_client;

/// The signed-in teacher's class id and students.
pub(crate) async fn load_class(teacher_id: i64) -> Result<(Option<i64>, Vec<Student>), ApiError> {
    let client = make_client();
    let teacher = client.get_teacher(teacher_id).await?;
    let students = client.list_class_students(teacher_id).await?;
    Ok((teacher.class_id, students))
}
