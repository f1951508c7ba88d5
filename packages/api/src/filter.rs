//! Client-side list search.
//!
//! Every list page filters its rows in memory: a row is kept when any of its
//! search keys contains the query, ignoring case. An empty query keeps all
//! rows. The result says whether anything matched so the page can show its
//! "nothing found" row.

use crate::models::{AttendanceDetail, Class, Student, Teacher};

/// A row that can be searched.
pub trait Searchable {
    fn search_keys(&self) -> Vec<String>;
}

/// Rows that survived a search.
#[derive(Debug, PartialEq)]
pub struct Filtered<'a, T> {
    pub rows: Vec<&'a T>,
    pub any_match: bool,
}

impl<T> Filtered<'_, T> {
    pub fn is_empty(&self) -> bool {
        !self.any_match
    }
}

pub fn matches_query<T: Searchable>(row: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    row.search_keys()
        .iter()
        .any(|key| key.to_lowercase().contains(&query))
}

pub fn filter_rows<'a, T: Searchable>(rows: &'a [T], query: &str) -> Filtered<'a, T> {
    let rows: Vec<&T> = rows.iter().filter(|r| matches_query(*r, query)).collect();
    Filtered {
        any_match: !rows.is_empty(),
        rows,
    }
}

impl Searchable for Teacher {
    fn search_keys(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl Searchable for Student {
    fn search_keys(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl Searchable for Class {
    fn search_keys(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl Searchable for AttendanceDetail {
    fn search_keys(&self) -> Vec<String> {
        self.student_name.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl Searchable for Row {
        fn search_keys(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row("12", "Nguyen Van An"),
            Row("7", "Tran Thi Binh"),
            Row("31", "Le Van Cuong"),
        ]
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let rows = rows();
        let result = filter_rows(&rows, "   ");
        assert_eq!(result.rows.len(), 3);
        assert!(result.any_match);
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let rows = rows();
        let result = filter_rows(&rows, "VAN");
        let names: Vec<&str> = result.rows.iter().map(|r| r.1).collect();
        assert_eq!(names, vec!["Nguyen Van An", "Le Van Cuong"]);
    }

    #[test]
    fn test_id_substring_match() {
        let rows = rows();
        let result = filter_rows(&rows, "1");
        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn test_nothing_found() {
        let rows = rows();
        let result = filter_rows(&rows, "xyz");
        assert!(result.rows.is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let rows = rows();
        let first: Vec<&str> = filter_rows(&rows, "an").rows.iter().map(|r| r.1).collect();
        let second: Vec<&str> = filter_rows(&rows, "an").rows.iter().map(|r| r.1).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_attendance_rows_without_name_never_match() {
        let rows = vec![AttendanceDetail::default()];
        assert!(filter_rows(&rows, "a").is_empty());
        assert!(!filter_rows(&rows, "").is_empty());
    }
}
