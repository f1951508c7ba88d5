use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{NewStudent, Student, StudentUpdate};

impl ApiClient {
    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        self.send(self.request(Method::GET, "/admin/students")).await
    }

    /// Students of the class taught by `teacher_id`.
    pub async fn list_class_students(&self, teacher_id: i64) -> Result<Vec<Student>, ApiError> {
        self.send(self.request(Method::GET, &format!("/admin/students_gv/{teacher_id}")))
            .await
    }

    /// Ids of the students taught by `teacher_id`; the recognition roster.
    pub async fn class_roster(&self, teacher_id: i64) -> Result<Vec<i64>, ApiError> {
        let students = self.list_class_students(teacher_id).await?;
        Ok(students.into_iter().map(|s| s.id).collect())
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, ApiError> {
        self.send(self.request(Method::GET, &format!("/admin/students/{id}")))
            .await
    }

    pub async fn create_student(&self, student: &NewStudent) -> Result<Student, ApiError> {
        let builder = self.request(Method::POST, "/admin/students").json(student);
        self.send(builder).await
    }

    pub async fn update_student(&self, id: i64, update: &StudentUpdate) -> Result<Student, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/admin/students/{id}"))
            .json(update);
        self.send(builder).await
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/admin/students/{id}")))
            .await
    }
}
