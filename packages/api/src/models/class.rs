use serde::{Deserialize, Serialize};

use super::teacher::Teacher;

/// Academic year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcademicYear {
    #[serde(rename = "id_nh")]
    pub id: i64,
    #[serde(rename = "namhoc")]
    pub label: String,
}

/// Class record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    #[serde(rename = "id_lh")]
    pub id: i64,
    #[serde(rename = "lophoc")]
    pub name: String,
    #[serde(rename = "giao_vien", default)]
    pub teachers: Option<Vec<Teacher>>,
    #[serde(rename = "nam_hoc", default)]
    pub year: Option<AcademicYear>,
    #[serde(rename = "tong_so_hoc_sinh", default)]
    pub student_count: Option<i64>,
}

impl Class {
    pub fn teacher_names(&self) -> String {
        let names: Vec<&str> = self
            .teachers
            .iter()
            .flatten()
            .map(|t| t.name.as_str())
            .collect();
        if names.is_empty() {
            "No teacher".to_string()
        } else {
            names.join(", ")
        }
    }

    pub fn teacher_ids(&self) -> Vec<i64> {
        self.teachers.iter().flatten().map(|t| t.id).collect()
    }

    pub fn year_label(&self) -> &str {
        self.year.as_ref().map(|y| y.label.as_str()).unwrap_or("-")
    }
}

/// Create-class body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewClass {
    #[serde(rename = "lophoc")]
    pub name: String,
    #[serde(rename = "id_nh")]
    pub year_id: i64,
    #[serde(rename = "id_gv")]
    pub teacher_ids: Vec<i64>,
}

/// Update-class body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassUpdate {
    #[serde(rename = "id_lh")]
    pub id: i64,
    #[serde(rename = "lophoc", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "id_nh", skip_serializing_if = "Option::is_none")]
    pub year_id: Option<i64>,
    #[serde(rename = "id_gv", skip_serializing_if = "Option::is_none")]
    pub teacher_ids: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_with_nested_year() {
        let class: Class = serde_json::from_str(
            r#"{"id_lh":2,"lophoc":"2B","giao_vien":[],"nam_hoc":{"id_nh":1,"namhoc":"2024-2025"},
                "tong_so_hoc_sinh":31}"#,
        )
        .unwrap();
        assert_eq!(class.year_label(), "2024-2025");
        assert_eq!(class.student_count, Some(31));
        assert_eq!(class.teacher_names(), "No teacher");
        assert!(class.teacher_ids().is_empty());
    }

    #[test]
    fn test_class_with_null_teachers() {
        let class: Class =
            serde_json::from_str(r#"{"id_lh":5,"lophoc":"5C","giao_vien":null}"#).unwrap();
        assert_eq!(class.year_label(), "-");
        assert_eq!(class.teacher_names(), "No teacher");
    }
}
