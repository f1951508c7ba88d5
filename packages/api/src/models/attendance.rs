//! # Attendance and face-recognition payloads
//!
//! Three request/response families live here:
//!
//! | Type | Endpoint |
//! |------|----------|
//! | [`NewAttendance`] → [`ConfirmedAttendance`] | `POST /admin/create` (manual "present" click) |
//! | [`AttendanceList`] of [`AttendanceDetail`] | `GET /admin/diem-danh?id_lh=&ngay=` |
//! | [`RecognitionRequest`] → [`RecognitionResult`] | `POST /admin/recognize?euclid_threshold=` |
//!
//! [`AttendanceDetail::cells`] renders one row of the "present today" table.
//! It is a pure function of the record, so rendering the same snapshot twice
//! always yields the same table.

use base64::Engine;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Manual check-in body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewAttendance {
    #[serde(rename = "id_hs")]
    pub student_id: i64,
    #[serde(rename = "id_lh")]
    pub class_id: i64,
    #[serde(rename = "ngay")]
    pub date: NaiveDate,
    #[serde(rename = "gio_vao")]
    pub check_in: NaiveTime,
}

/// Stored attendance row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    #[serde(rename = "id_hs")]
    pub student_id: i64,
    #[serde(rename = "id_lh")]
    pub class_id: i64,
    #[serde(rename = "ngay")]
    pub date: NaiveDate,
    #[serde(rename = "gio_vao")]
    pub check_in: NaiveTime,
    #[serde(rename = "gio_ra", default)]
    pub check_out: Option<NaiveTime>,
    #[serde(rename = "id_ph_don", default)]
    pub picked_up_by: Option<i64>,
}

/// Response of the manual check-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfirmedAttendance {
    pub message: String,
    pub data: AttendanceRecord,
}

/// One row of the by-date listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttendanceDetail {
    #[serde(rename = "ho_ten_hoc_sinh", default)]
    pub student_name: Option<String>,
    #[serde(rename = "gio_vao", default)]
    pub check_in: Option<String>,
    #[serde(rename = "gio_ra", default)]
    pub check_out: Option<String>,
    #[serde(rename = "ten_phu_huynh", default)]
    pub parent_name: Option<String>,
    #[serde(rename = "quan_he", default)]
    pub relationship: Option<String>,
}

impl AttendanceDetail {
    /// Table cells: name, check-in, check-out, parent, relationship.
    pub fn cells(&self) -> [String; 5] {
        fn or(v: &Option<String>, fallback: &str) -> String {
            v.as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
                .to_string()
        }
        [
            or(&self.student_name, "Unknown"),
            or(&self.check_in, "Unknown"),
            or(&self.check_out, "Unknown"),
            or(&self.parent_name, "None"),
            or(&self.relationship, "Unknown"),
        ]
    }
}

/// Envelope of the by-date listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttendanceList {
    #[serde(default)]
    pub data: Option<Vec<AttendanceDetail>>,
}

impl AttendanceList {
    pub fn into_rows(self) -> Vec<AttendanceDetail> {
        self.data.unwrap_or_default()
    }
}

/// Captured frame, wrapped the way the recognizer expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FramePayload {
    /// `data:image/jpeg;base64,...`
    pub frame: String,
}

impl FramePayload {
    /// Wrap raw JPEG bytes as a data URL.
    pub fn from_jpeg(bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            frame: format!("data:image/jpeg;base64,{encoded}"),
        }
    }

    /// Accept a canvas `toDataURL` string as is, or a bare base64 body.
    pub fn from_data_url(data_url: &str) -> Self {
        if data_url.starts_with("data:") {
            Self {
                frame: data_url.to_string(),
            }
        } else {
            Self {
                frame: format!("data:image/jpeg;base64,{data_url}"),
            }
        }
    }
}

/// Body of a recognition request. The match threshold travels as a query
/// parameter, not in the body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecognitionRequest {
    pub frame: FramePayload,
    #[serde(rename = "id_hs_list")]
    pub roster: Vec<i64>,
}

/// Closest enrolled face.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestMatch {
    #[serde(rename = "id_ph")]
    pub parent_id: i64,
    pub image_path: String,
    pub distance: f64,
}

/// Recognizer verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecognitionResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<BestMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_use_placeholders() {
        let row = AttendanceDetail {
            student_name: Some("Le Van C".into()),
            check_in: Some("07:15:02".into()),
            ..AttendanceDetail::default()
        };
        assert_eq!(
            row.cells(),
            [
                "Le Van C".to_string(),
                "07:15:02".to_string(),
                "Unknown".to_string(),
                "None".to_string(),
                "Unknown".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_data_is_empty_list() {
        let list: AttendanceList = serde_json::from_str("{}").unwrap();
        assert!(list.into_rows().is_empty());

        let list: AttendanceList = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(list.into_rows().is_empty());
    }

    #[test]
    fn test_new_attendance_wire_format() {
        let body = NewAttendance {
            student_id: 9,
            class_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 10, 3).unwrap(),
            check_in: NaiveTime::from_hms_opt(7, 5, 9).unwrap(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id_hs": 9, "id_lh": 2, "ngay": "2024-10-03", "gio_vao": "07:05:09"})
        );
    }

    #[test]
    fn test_frame_payload_data_url() {
        let payload = FramePayload::from_jpeg(&[0xff, 0xd8, 0xff]);
        assert_eq!(payload.frame, "data:image/jpeg;base64,/9j/");

        let bare = FramePayload::from_data_url("/9j/");
        assert_eq!(bare, payload);
        let full = FramePayload::from_data_url("data:image/jpeg;base64,/9j/");
        assert_eq!(full, payload);
    }

    #[test]
    fn test_recognition_request_shape() {
        let req = RecognitionRequest {
            frame: FramePayload::from_data_url("AAAA"),
            roster: vec![1, 2, 3],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["frame"]["frame"], "data:image/jpeg;base64,AAAA");
        assert_eq!(json["id_hs_list"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_recognition_result_without_match() {
        let res: RecognitionResult =
            serde_json::from_str(r#"{"success":false,"message":"No match","data":null}"#).unwrap();
        assert!(!res.success);
        assert!(res.data.is_none());
    }
}
