use serde::{Deserialize, Serialize};

/// Whose picture an image endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOwner {
    Teacher,
    Student,
    Parent,
}

impl ImageOwner {
    /// Path segment under `/admin/images/`.
    pub fn segment(self) -> &'static str {
        match self {
            ImageOwner::Teacher => "giao-vien",
            ImageOwner::Student => "hoc-sinh",
            ImageOwner::Parent => "phu-huynh",
        }
    }
}

/// Single portrait of a teacher or student. The owner id key differs per
/// owner, so only the path is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortraitImage {
    pub image_path: String,
}

/// One face image in a parent's gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    #[serde(rename = "id_image")]
    pub id: i64,
    #[serde(rename = "id_ph")]
    pub parent_id: i64,
    pub image_path: String,
}
