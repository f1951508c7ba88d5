//! Administrator pages: teachers, students, classes and the account.

mod account;
pub use account::AccountSettings;

mod teachers;
pub use teachers::Teachers;

mod teacher_form;
pub use teacher_form::{EditTeacher, NewTeacherPage};

mod students;
pub use students::Students;

mod student_form;
pub use student_form::{EditStudent, NewStudentPage};

mod classes;
pub use classes::Classes;

mod class_form;
pub use class_form::{EditClass, NewClassPage};
