use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parent record as returned by `/admin/parents/{id}` and the per-student list.
/// The backend leaves every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Parent {
    #[serde(rename = "id_ph", default)]
    pub id: Option<i64>,
    #[serde(rename = "ten_ph", default)]
    pub name: Option<String>,
    #[serde(rename = "gioitinh_ph", default)]
    pub gender: Option<String>,
    #[serde(rename = "ngaysinh_ph", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "sdt_ph", default)]
    pub phone: Option<String>,
    #[serde(rename = "diachi_ph", default)]
    pub address: Option<String>,
    #[serde(rename = "quanhe", default)]
    pub relationship: Option<String>,
}

/// Parent summary embedded in a student record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParentInfo {
    #[serde(rename = "id_ph", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "ten_ph")]
    pub name: String,
    #[serde(rename = "quanhe")]
    pub relationship: String,
    #[serde(rename = "gioitinh_ph")]
    pub gender: String,
}

impl ParentInfo {
    pub fn new(name: &str, relationship: &str, gender: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            relationship: relationship.to_string(),
            gender: gender.to_string(),
        }
    }
}

/// Partial parent update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ParentUpdate {
    #[serde(rename = "id_ph", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "ten_ph", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "gioitinh_ph", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "ngaysinh_ph", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "sdt_ph", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "diachi_ph", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "quanhe", skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl ParentUpdate {
    /// Turn an edited form into an update, dropping blank fields.
    pub fn from_parent(parent: &Parent) -> Self {
        fn present(v: &Option<String>) -> Option<String> {
            v.as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }
        Self {
            id: parent.id,
            name: present(&parent.name),
            gender: present(&parent.gender),
            birth_date: parent.birth_date,
            phone: present(&parent.phone),
            address: present(&parent.address),
            relationship: present(&parent.relationship),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_parent_parses() {
        let parent: Parent = serde_json::from_str(r#"{"id_ph":4,"ten_ph":"Nguyen Van A"}"#).unwrap();
        assert_eq!(parent.id, Some(4));
        assert!(parent.phone.is_none());
        assert!(parent.birth_date.is_none());
    }

    #[test]
    fn test_update_drops_blank_fields() {
        let parent = Parent {
            id: Some(4),
            name: Some("  Nguyen Van A ".into()),
            phone: Some("".into()),
            address: Some("   ".into()),
            ..Parent::default()
        };
        let update = ParentUpdate::from_parent(&parent);
        assert_eq!(update.name.as_deref(), Some("Nguyen Van A"));
        assert!(update.phone.is_none());
        assert!(update.address.is_none());

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"id_ph": 4, "ten_ph": "Nguyen Van A"}));
    }
}
