//! Bulk student import from an `.xlsx` sheet.
//!
//! The first sheet is read, its header row skipped. Each remaining row holds
//! family name, given name, gender, birth date, parent name, relationship and
//! parent gender, in that order. Rows that stop before the seventh column are
//! skipped. Accounts get a generated username and the default password.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{DateTime, NaiveDate};
use rand::Rng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::models::{NewStudent, ParentInfo, Role};

/// Password given to every imported account.
pub const DEFAULT_PASSWORD: &str = "123";

/// Columns a row must reach to be imported.
const REQUIRED_COLUMNS: usize = 7;

/// Days between the spreadsheet epoch (1899-12-30) and 1970-01-01.
const UNIX_EPOCH_SERIAL: f64 = 25569.0;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not read the spreadsheet: {0}")]
    Unreadable(String),

    #[error("The spreadsheet has no sheets.")]
    NoSheet,
}

/// A data row that was not turned into a student.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based sheet row, header included.
    pub line: usize,
    pub reason: String,
}

/// Students ready to submit, plus the rows left behind.
#[derive(Debug, Default, PartialEq)]
pub struct ImportPlan {
    pub students: Vec<NewStudent>,
    pub skipped: Vec<SkippedRow>,
}

/// Outcome of submitting an [`ImportPlan`].
#[derive(Debug, Default, PartialEq)]
pub struct ImportReport {
    pub added: usize,
    pub failures: Vec<String>,
}

impl ImportReport {
    pub fn record(&mut self, student: &NewStudent, result: Result<(), String>) {
        match result {
            Ok(()) => self.added += 1,
            Err(message) => self
                .failures
                .push(format!("Could not add \"{}\": {}", student.name, message)),
        }
    }

    pub fn summary(&self) -> String {
        let total = self.added + self.failures.len();
        if self.failures.is_empty() {
            format!("Imported {} students", self.added)
        } else {
            format!(
                "Imported {} of {} students, {} failed",
                self.added,
                total,
                self.failures.len()
            )
        }
    }
}

/// Read the first sheet of an `.xlsx` file into students.
pub fn plan_from_xlsx(bytes: Vec<u8>) -> Result<ImportPlan, ImportError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: calamine::XlsxError| ImportError::Unreadable(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoSheet)?
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
    tracing::info!("Spreadsheet has {} rows", rows.len());
    Ok(plan_rows(&rows, &mut rand::thread_rng()))
}

/// Turn sheet rows (header first) into students.
pub fn plan_rows(rows: &[Vec<Data>], rng: &mut impl Rng) -> ImportPlan {
    let mut plan = ImportPlan::default();

    for (index, row) in rows.iter().enumerate().skip(1) {
        let line = index + 1;
        if filled_len(row) < REQUIRED_COLUMNS {
            tracing::warn!("Row {} is missing columns", line);
            plan.skipped.push(SkippedRow {
                line,
                reason: "missing columns".to_string(),
            });
            continue;
        }

        let Some(birth_date) = cell_date(&row[3]) else {
            tracing::warn!("Row {} has an unreadable birth date", line);
            plan.skipped.push(SkippedRow {
                line,
                reason: "unreadable birth date".to_string(),
            });
            continue;
        };

        let given = cell_text(&row[1]);
        let name = format!("{} {}", cell_text(&row[0]), given)
            .trim()
            .to_string();
        let parent_name = cell_text(&row[4]);
        let parents = if parent_name.is_empty() {
            Vec::new()
        } else {
            vec![ParentInfo::new(
                &parent_name,
                &cell_text(&row[5]),
                &cell_text(&row[6]),
            )]
        };

        plan.students.push(NewStudent {
            name,
            gender: cell_text(&row[2]),
            birth_date,
            username: username_for(&given, rng),
            password: DEFAULT_PASSWORD.to_string(),
            role_code: Role::Student.code(),
            parents,
        });
    }

    plan
}

/// Calendar date of a spreadsheet serial day number, read in UTC.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = ((serial - UNIX_EPOCH_SERIAL) * 86400.0).round() as i64;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

/// Login name: the given name folded to lower-case ASCII letters, plus four
/// random digits.
pub fn username_for(given_name: &str, rng: &mut impl Rng) -> String {
    let digits: u16 = rng.gen_range(1000..10000);
    let base = strip_diacritics(given_name)
        .to_lowercase()
        .split_whitespace()
        .collect::<String>();
    if base.is_empty() {
        format!("user{digits}")
    } else {
        format!("{base}{digits}")
    }
}

/// Drop combining accents; `đ` becomes `d`.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{300}'..='\u{36f}').contains(c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .collect()
}

/// Row length up to its last non-empty cell.
fn filled_len(row: &[Data]) -> usize {
    row.iter()
        .rposition(|cell| !matches!(cell, Data::Empty))
        .map_or(0, |last| last + 1)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::Float(serial) => excel_serial_to_date(*serial),
        Data::Int(serial) => excel_serial_to_date(*serial as f64),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::String(text) | Data::DateTimeIso(text) => {
            let text = text.trim();
            let day = text.get(..10).unwrap_or(text);
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
                .ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn header() -> Vec<Data> {
        ["Ho", "Ten", "Gioi tinh", "Ngay sinh", "Phu huynh", "Quan he", "GT PH"]
            .into_iter()
            .map(text)
            .collect()
    }

    fn digits_suffix(username: &str, prefix: &str) -> bool {
        username
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.len() == 4 && rest.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn test_serial_dates() {
        assert_eq!(
            excel_serial_to_date(25569.0),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
        // 2018-09-01
        assert_eq!(
            excel_serial_to_date(43344.0),
            NaiveDate::from_ymd_opt(2018, 9, 1)
        );
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("Nguyễn Thị Ánh"), "Nguyen Thi Anh");
        assert_eq!(strip_diacritics("Đặng Đức"), "Dang Duc");
    }

    #[test]
    fn test_username_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let name = username_for("Minh Châu", &mut rng);
        assert!(digits_suffix(&name, "minhchau"), "{name}");

        let blank = username_for("  ", &mut rng);
        assert!(digits_suffix(&blank, "user"), "{blank}");
    }

    #[test]
    fn test_rows_become_students() {
        let rows = vec![
            header(),
            vec![
                text("Nguyễn Văn"),
                text("An"),
                text("Nam"),
                Data::Float(43344.0),
                text(" Nguyễn Văn Bình "),
                text("Cha"),
                text("Nam"),
            ],
        ];
        let plan = plan_rows(&rows, &mut StdRng::seed_from_u64(1));

        assert!(plan.skipped.is_empty());
        let student = &plan.students[0];
        assert_eq!(student.name, "Nguyễn Văn An");
        assert_eq!(student.gender, "Nam");
        assert_eq!(student.birth_date, NaiveDate::from_ymd_opt(2018, 9, 1).unwrap());
        assert!(digits_suffix(&student.username, "an"));
        assert_eq!(student.password, DEFAULT_PASSWORD);
        assert_eq!(student.role_code, 2);
        assert_eq!(
            student.parents,
            vec![ParentInfo::new("Nguyễn Văn Bình", "Cha", "Nam")]
        );
    }

    #[test]
    fn test_short_and_undated_rows_are_skipped() {
        let rows = vec![
            header(),
            // Trailing empty cells do not count towards the seven columns.
            vec![
                text("Le"),
                text("Binh"),
                text("Nam"),
                Data::Float(43000.0),
                text("Le Van C"),
                text("Cha"),
                Data::Empty,
            ],
            vec![
                text("Tran"),
                text("Chi"),
                text("Nữ"),
                text("not a date"),
                text("Tran Thi D"),
                text("Mẹ"),
                text("Nữ"),
            ],
            vec![
                text("Pham"),
                text("Dung"),
                text("Nữ"),
                text("2017-05-20"),
                Data::Empty,
                text("Mẹ"),
                text("Nữ"),
            ],
        ];
        let plan = plan_rows(&rows, &mut StdRng::seed_from_u64(2));

        assert_eq!(
            plan.skipped,
            vec![
                SkippedRow { line: 2, reason: "missing columns".into() },
                SkippedRow { line: 3, reason: "unreadable birth date".into() },
            ]
        );
        assert_eq!(plan.students.len(), 1);
        assert_eq!(plan.students[0].name, "Pham Dung");
        assert_eq!(
            plan.students[0].birth_date,
            NaiveDate::from_ymd_opt(2017, 5, 20).unwrap()
        );
        assert!(plan.students[0].parents.is_empty());
    }

    #[test]
    fn test_header_only_sheet() {
        let plan = plan_rows(&[header()], &mut StdRng::seed_from_u64(3));
        assert_eq!(plan, ImportPlan::default());
    }

    #[test]
    fn test_unreadable_file() {
        let err = plan_from_xlsx(b"not a zip".to_vec()).unwrap_err();
        assert!(matches!(err, ImportError::Unreadable(_)));
    }

    #[test]
    fn test_report_summary() {
        let student = NewStudent {
            name: "Le Binh".into(),
            gender: "Nam".into(),
            birth_date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            username: "binh1234".into(),
            password: DEFAULT_PASSWORD.into(),
            role_code: 2,
            parents: Vec::new(),
        };
        let mut report = ImportReport::default();
        report.record(&student, Ok(()));
        assert_eq!(report.summary(), "Imported 1 students");

        report.record(&student, Err("Username already exists".into()));
        assert_eq!(report.summary(), "Imported 1 of 2 students, 1 failed");
        assert_eq!(
            report.failures,
            vec!["Could not add \"Le Binh\": Username already exists".to_string()]
        );
    }
}
