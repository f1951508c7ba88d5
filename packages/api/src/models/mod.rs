//! Records mirrored from the school backend.
//!
//! Rust field names are English; `#[serde(rename)]` maps them onto the
//! backend's JSON keys. The client holds no authoritative state: every type
//! here is a snapshot of whatever the server last returned.

mod account;
mod attendance;
mod class;
mod image;
mod parent;
mod student;
mod teacher;

pub use account::{Account, PasswordChange, Role, Token};
pub use attendance::{
    AttendanceDetail, AttendanceList, AttendanceRecord, BestMatch, ConfirmedAttendance, FramePayload,
    NewAttendance, RecognitionRequest, RecognitionResult,
};
pub use class::{AcademicYear, Class, ClassUpdate, NewClass};
pub use image::{GalleryImage, ImageOwner, PortraitImage};
pub use parent::{Parent, ParentInfo, ParentUpdate};
pub use student::{NewStudent, Student, StudentUpdate};
pub use teacher::{NewTeacher, Teacher, TeacherUpdate};

/// Backend dates travel as `YYYY-MM-DD`; lists show them as `DD-MM-YYYY`.
pub fn display_date(date: &chrono::NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
