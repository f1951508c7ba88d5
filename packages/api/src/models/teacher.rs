use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Teacher record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    #[serde(rename = "id_gv")]
    pub id: i64,
    #[serde(rename = "ten_gv")]
    pub name: String,
    #[serde(rename = "gioitinh_gv")]
    pub gender: String,
    #[serde(rename = "ngaysinh_gv")]
    pub birth_date: NaiveDate,
    #[serde(rename = "diachi_gv")]
    pub address: String,
    #[serde(rename = "sdt_gv")]
    pub phone: String,
    #[serde(rename = "email_gv")]
    pub email: String,
    #[serde(rename = "tai_khoan_quyen", default)]
    pub role_code: Option<i64>,
    #[serde(rename = "id_taikhoan", default)]
    pub account_id: Option<i64>,
    #[serde(rename = "id_lh", default)]
    pub class_id: Option<i64>,
    #[serde(rename = "lop_hoc_ten", default)]
    pub class_name: Option<String>,
}

/// Create-teacher body; also creates the login account.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTeacher {
    #[serde(rename = "ten_gv")]
    pub name: String,
    #[serde(rename = "gioitinh_gv")]
    pub gender: String,
    #[serde(rename = "ngaysinh_gv")]
    pub birth_date: NaiveDate,
    #[serde(rename = "sdt_gv")]
    pub phone: String,
    #[serde(rename = "diachi_gv")]
    pub address: String,
    #[serde(rename = "email_gv")]
    pub email: String,
    #[serde(rename = "taikhoan")]
    pub username: String,
    #[serde(rename = "matkhau")]
    pub password: String,
    #[serde(rename = "quyen")]
    pub role_code: i64,
}

/// Update-teacher body. `class_id` is always sent so a class can be unassigned.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeacherUpdate {
    #[serde(rename = "id_gv")]
    pub id: i64,
    #[serde(rename = "ten_gv", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "gioitinh_gv", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "ngaysinh_gv", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "diachi_gv", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "sdt_gv", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "email_gv", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "quyen", skip_serializing_if = "Option::is_none")]
    pub role_code: Option<i64>,
    #[serde(rename = "id_lh")]
    pub class_id: Option<i64>,
}

impl TeacherUpdate {
    /// Full update carrying every editable field of `teacher`.
    pub fn from_teacher(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            name: Some(teacher.name.clone()),
            gender: Some(teacher.gender.clone()),
            birth_date: Some(teacher.birth_date),
            address: Some(teacher.address.clone()),
            phone: Some(teacher.phone.clone()),
            email: Some(teacher.email.clone()),
            role_code: teacher.role_code,
            class_id: teacher.class_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_without_class() {
        let teacher: Teacher = serde_json::from_str(
            r#"{"id_gv":3,"ten_gv":"Tran Thi B","gioitinh_gv":"Nu","ngaysinh_gv":"1990-04-12",
                "diachi_gv":"Hue","sdt_gv":"0912345678","email_gv":"b@school.vn","id_lh":null}"#,
        )
        .unwrap();
        assert_eq!(teacher.id, 3);
        assert_eq!(teacher.birth_date, NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());
        assert!(teacher.class_id.is_none());
        assert!(teacher.class_name.is_none());
    }

    #[test]
    fn test_update_always_sends_class_key() {
        let update = TeacherUpdate {
            id: 3,
            name: None,
            gender: None,
            birth_date: None,
            address: None,
            phone: Some("0912345678".into()),
            email: None,
            role_code: None,
            class_id: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["id_lh"], serde_json::Value::Null);
        assert_eq!(json["sdt_gv"], "0912345678");
        assert!(json.get("ten_gv").is_none());
    }
}
