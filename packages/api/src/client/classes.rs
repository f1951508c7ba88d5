use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{AcademicYear, Class, ClassUpdate, NewClass};

impl ApiClient {
    pub async fn list_classes(&self) -> Result<Vec<Class>, ApiError> {
        self.send(self.request(Method::GET, "/admin/classes")).await
    }

    pub async fn get_class(&self, id: i64) -> Result<Class, ApiError> {
        self.send(self.request(Method::GET, &format!("/admin/classes/{id}")))
            .await
    }

    pub async fn create_class(&self, class: &NewClass) -> Result<Class, ApiError> {
        // The backend registers this route with a trailing slash.
        let builder = self.request(Method::POST, "/admin/classes/").json(class);
        self.send(builder).await
    }

    pub async fn update_class(&self, update: &ClassUpdate) -> Result<Class, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/admin/classes/{}", update.id))
            .json(update);
        self.send(builder).await
    }

    pub async fn delete_class(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/admin/classes/{id}")))
            .await
    }

    pub async fn list_years(&self) -> Result<Vec<AcademicYear>, ApiError> {
        self.send(self.request(Method::GET, "/admin/years")).await
    }
}
