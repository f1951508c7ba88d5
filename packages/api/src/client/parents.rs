use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Parent, ParentUpdate};

impl ApiClient {
    pub async fn list_student_parents(&self, student_id: i64) -> Result<Vec<Parent>, ApiError> {
        self.send(self.request(Method::GET, &format!("/admin/students/{student_id}/parents")))
            .await
    }

    pub async fn get_parent(&self, id: i64) -> Result<Parent, ApiError> {
        self.send(self.request(Method::GET, &format!("/admin/parents/{id}")))
            .await
    }

    pub async fn update_parent(&self, id: i64, update: &ParentUpdate) -> Result<Parent, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/admin/parents/{id}"))
            .json(update);
        self.send(builder).await
    }

    pub async fn delete_parent(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/admin/parents/{id}")))
            .await
    }
}
