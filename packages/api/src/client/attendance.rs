use chrono::NaiveDate;
use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AttendanceDetail, AttendanceList, ConfirmedAttendance, NewAttendance, RecognitionRequest,
    RecognitionResult,
};

impl ApiClient {
    /// Who was present in `class_id` on `date`.
    pub async fn attendance_by_date(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceDetail>, ApiError> {
        let builder = self.request(Method::GET, "/admin/diem-danh").query(&[
            ("id_lh", class_id.to_string()),
            ("ngay", date.format("%Y-%m-%d").to_string()),
        ]);
        let list: AttendanceList = self.send(builder).await?;
        Ok(list.into_rows())
    }

    /// Mark a student present by hand.
    pub async fn confirm_attendance(
        &self,
        entry: &NewAttendance,
    ) -> Result<ConfirmedAttendance, ApiError> {
        let builder = self.request(Method::POST, "/admin/create").json(entry);
        self.send(builder).await
    }

    /// Ask the recognizer who is in `request.frame`, among `request.roster`.
    pub async fn recognize(
        &self,
        request: &RecognitionRequest,
        match_threshold: f32,
    ) -> Result<RecognitionResult, ApiError> {
        let builder = self
            .request(Method::POST, "/admin/recognize")
            .query(&[("euclid_threshold", match_threshold.to_string())])
            .json(request);
        self.send(builder).await
    }
}
