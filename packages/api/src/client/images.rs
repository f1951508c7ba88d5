use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{GalleryImage, ImageOwner, PortraitImage};

/// File name the gallery upload is sent under.
pub const CROPPED_FILE_NAME: &str = "cropped_image.jpg";

fn image_part(file_name: &str, bytes: Vec<u8>) -> Result<Part, ApiError> {
    let mime = if file_name.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    };
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .map_err(ApiError::from)
}

impl ApiClient {
    /// Current portrait of a teacher or student; `None` when none is stored.
    pub async fn get_portrait(
        &self,
        owner: ImageOwner,
        id: i64,
    ) -> Result<Option<PortraitImage>, ApiError> {
        let path = format!("/admin/images/{}/{id}/", owner.segment());
        match self.send(self.request(Method::GET, &path)).await {
            Ok(image) => Ok(Some(image)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replace the portrait of a teacher or student.
    pub async fn upload_portrait(
        &self,
        owner: ImageOwner,
        id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let (path, id_field) = match owner {
            // Teacher portraits are addressed by the form field only.
            ImageOwner::Teacher => ("/admin/images/giao-vien/".to_string(), "id_gv"),
            ImageOwner::Student => (format!("/admin/images/hoc-sinh/{id}/"), "id_hs"),
            ImageOwner::Parent => (format!("/admin/images/phu-huynh/{id}/"), "id_ph"),
        };
        let form = Form::new()
            .part("file", image_part(file_name, bytes)?)
            .text(id_field, id.to_string());
        let builder = self.request(Method::PUT, &path).multipart(form);
        self.send_empty(builder).await
    }

    /// Face images enrolled for a parent. A 404 means the gallery is empty.
    pub async fn list_gallery(&self, parent_id: i64) -> Result<Vec<GalleryImage>, ApiError> {
        let path = format!("/admin/images/phu-huynh/{parent_id}/");
        match self.send(self.request(Method::GET, &path)).await {
            Ok(images) => Ok(images),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Add an already-cropped JPEG to a parent's gallery.
    pub async fn upload_gallery_image(&self, parent_id: i64, jpeg: Vec<u8>) -> Result<(), ApiError> {
        let form = Form::new().part("file", image_part(CROPPED_FILE_NAME, jpeg)?);
        let builder = self
            .request(Method::POST, &format!("/admin/images/phu-huynh/{parent_id}/"))
            .multipart(form);
        self.send_empty(builder).await
    }

    pub async fn delete_gallery_image(&self, image_id: i64) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/admin/images/phu-huynh/{image_id}/"));
        self.send_empty(builder).await
    }
}
