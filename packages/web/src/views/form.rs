//! Small helpers shared by the record forms.

use chrono::NaiveDate;

/// `(value, label)` pairs for gender selects. Values are what the backend stores.
pub fn gender_options() -> Vec<(String, String)> {
    vec![
        ("Nam".to_string(), "Male".to_string()),
        ("Nữ".to_string(), "Female".to_string()),
    ]
}

/// `(value, label)` pairs for a parent's relationship, stored as `quanhe`.
pub fn relationship_options() -> Vec<(String, String)> {
    vec![
        ("Cha".to_string(), "Father".to_string()),
        ("Mẹ".to_string(), "Mother".to_string()),
        ("Người Giám Hộ".to_string(), "Guardian".to_string()),
    ]
}

/// Parse the value of an `<input type="date">`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{field} is required"));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| format!("{field} is not a valid date"))
}

/// Format a date for an `<input type="date">`.
pub fn date_value(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `Some(trimmed)` unless blank.
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_input() {
        assert_eq!(
            parse_date("Birth date", "2018-09-01"),
            Ok(NaiveDate::from_ymd_opt(2018, 9, 1).unwrap())
        );
        assert_eq!(
            parse_date("Birth date", " "),
            Err("Birth date is required".to_string())
        );
        assert!(parse_date("Birth date", "01-09-2018").is_err());
    }

    #[test]
    fn test_date_value_round_trips_through_input() {
        let date = NaiveDate::from_ymd_opt(1990, 4, 12).unwrap();
        assert_eq!(date_value(&date), "1990-04-12");
        assert_eq!(parse_date("d", &date_value(&date)), Ok(date));
    }

    #[test]
    fn test_relationship_values_are_backend_codes() {
        let values: Vec<String> = relationship_options().into_iter().map(|(v, _)| v).collect();
        assert_eq!(values, ["Cha", "Mẹ", "Người Giám Hộ"]);

        let labels: Vec<String> = relationship_options().into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, ["Father", "Mother", "Guardian"]);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  An "), Some("An".to_string()));
        assert_eq!(non_blank("   "), None);
    }
}
