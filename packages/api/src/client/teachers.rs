use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{NewTeacher, Teacher, TeacherUpdate};

impl ApiClient {
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>, ApiError> {
        self.send(self.request(Method::GET, "/admin/teachers")).await
    }

    pub async fn get_teacher(&self, id: i64) -> Result<Teacher, ApiError> {
        self.send(self.request(Method::GET, &format!("/admin/teachers/{id}")))
            .await
    }

    pub async fn create_teacher(&self, teacher: &NewTeacher) -> Result<Teacher, ApiError> {
        let builder = self.request(Method::POST, "/admin/teachers").json(teacher);
        self.send(builder).await
    }

    pub async fn update_teacher(&self, update: &TeacherUpdate) -> Result<Teacher, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/admin/teachers/{}", update.id))
            .json(update);
        self.send(builder).await
    }

    pub async fn delete_teacher(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/admin/teachers/{id}")))
            .await
    }
}
