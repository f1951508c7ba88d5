use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parent::{ParentInfo, ParentUpdate};

/// Student record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    #[serde(rename = "id_hs")]
    pub id: i64,
    #[serde(rename = "ten_hs")]
    pub name: String,
    #[serde(rename = "gioitinh_hs")]
    pub gender: String,
    #[serde(rename = "ngaysinh_hs")]
    pub birth_date: NaiveDate,
    #[serde(rename = "lop_hoc_ten", default)]
    pub class_name: Option<String>,
    #[serde(rename = "nam_hoc", default)]
    pub school_year: Option<String>,
    #[serde(rename = "phu_huynh", default)]
    pub parents: Option<Vec<ParentInfo>>,
    #[serde(rename = "id_taikhoan", default)]
    pub account_id: Option<i64>,
}

impl Student {
    /// Parent names joined for a table cell.
    pub fn parent_names(&self) -> String {
        let names: Vec<&str> = self
            .parents
            .iter()
            .flatten()
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            "No parents".to_string()
        } else {
            names.join(", ")
        }
    }

    pub fn class_label(&self) -> &str {
        self.class_name
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("No class")
    }
}

/// Create-student body; also creates the login account.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewStudent {
    #[serde(rename = "ten_hs")]
    pub name: String,
    #[serde(rename = "gioitinh_hs")]
    pub gender: String,
    #[serde(rename = "ngaysinh_hs")]
    pub birth_date: NaiveDate,
    #[serde(rename = "taikhoan")]
    pub username: String,
    #[serde(rename = "matkhau")]
    pub password: String,
    #[serde(rename = "quyen")]
    pub role_code: i64,
    #[serde(rename = "phu_huynh", skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<ParentInfo>,
}

/// Update-student body.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StudentUpdate {
    #[serde(rename = "ten_hs", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "gioitinh_hs", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "ngaysinh_hs", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "lop_hoc_ten", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(rename = "phu_huynh")]
    pub parents: Vec<ParentUpdate>,
}

impl StudentUpdate {
    /// Full update carrying the record's current values, parents included, so
    /// the backend keeps the parent links.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: Some(student.name.clone()),
            gender: Some(student.gender.clone()),
            birth_date: Some(student.birth_date),
            class_name: student.class_name.clone(),
            parents: student
                .parents
                .iter()
                .flatten()
                .map(|p| ParentUpdate {
                    id: p.id,
                    name: Some(p.name.clone()),
                    gender: Some(p.gender.clone()),
                    relationship: Some(p.relationship.clone()),
                    ..ParentUpdate::default()
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(parents: Option<Vec<ParentInfo>>, class_name: Option<&str>) -> Student {
        Student {
            id: 1,
            name: "Le Van C".into(),
            gender: "Nam".into(),
            birth_date: NaiveDate::from_ymd_opt(2018, 9, 1).unwrap(),
            class_name: class_name.map(str::to_string),
            school_year: None,
            parents,
            account_id: None,
        }
    }

    #[test]
    fn test_parent_names_joined() {
        let s = student(
            Some(vec![
                ParentInfo::new("Le Van A", "Cha", "Nam"),
                ParentInfo::new("Pham Thi D", "Mẹ", "Nu"),
            ]),
            Some("1A"),
        );
        assert_eq!(s.parent_names(), "Le Van A, Pham Thi D");
        assert_eq!(s.class_label(), "1A");
    }

    #[test]
    fn test_placeholders_when_missing() {
        let s = student(None, None);
        assert_eq!(s.parent_names(), "No parents");
        assert_eq!(s.class_label(), "No class");

        let s = student(Some(vec![]), Some(""));
        assert_eq!(s.parent_names(), "No parents");
        assert_eq!(s.class_label(), "No class");
    }

    #[test]
    fn test_new_student_omits_empty_parents() {
        let body = NewStudent {
            name: "Le Van C".into(),
            gender: "Nam".into(),
            birth_date: NaiveDate::from_ymd_opt(2018, 9, 1).unwrap(),
            username: "hs01".into(),
            password: "secret".into(),
            role_code: 2,
            parents: vec![],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("phu_huynh").is_none());
        assert_eq!(json["ngaysinh_hs"], "2018-09-01");
        assert_eq!(json["quyen"], 2);
    }

    #[test]
    fn test_update_keeps_parent_links() {
        let mut parent = ParentInfo::new("Le Van A", "Cha", "Nam");
        parent.id = Some(4);
        let s = student(Some(vec![parent]), Some("1A"));
        let update = StudentUpdate::from_student(&s);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["lop_hoc_ten"], "1A");
        assert_eq!(
            json["phu_huynh"],
            serde_json::json!([{"id_ph": 4, "ten_ph": "Le Van A", "gioitinh_ph": "Nam", "quanhe": "Cha"}])
        );
    }
}
