use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default report filename with format: aq-report-{parameter}-{YYMMDD}.json
pub fn generate_default_report_filename(parameter: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year

    let filename = format!(
        "aq-report-{}-{:02}{:02}{:02}.json",
        parameter,
        year,
        now.month(),
        now.day()
    );
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_report_filename() {
        let filename = generate_default_report_filename("pm25");
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output"));
        assert!(filename_str.ends_with(".json"));

        let file_part = filename.file_name().unwrap().to_string_lossy();
        assert!(file_part.starts_with("aq-report-pm25-"));
        // aq-report-pm25- + YYMMDD + .json
        assert_eq!(file_part.len(), "aq-report-pm25-".len() + 6 + ".json".len());
    }
}
