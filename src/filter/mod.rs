//! Student list filtering. A filter is a conjunction over the provided
//! fields: every present, non-empty field must match (strict AND). Absent
//! or empty fields impose no constraint, which lets the admin UI submit its
//! search form verbatim as query parameters.

use serde::Deserialize;

use crate::store::models::Student;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct StudentFilter {
    /// Substring match on the student number / login handle.
    pub username: Option<String>,
    pub course: Option<String>,
    pub year: Option<String>,
    pub major: Option<String>,
    pub section: Option<String>,
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        if let Some(username) = provided(&self.username) {
            if !student.username.contains(username) {
                return false;
            }
        }
        if let Some(course) = provided(&self.course) {
            if student.course != course {
                return false;
            }
        }
        if let Some(year) = provided(&self.year) {
            // Year arrives as a query-string value; a non-numeric year
            // matches nothing rather than everything
            match year.parse::<i32>() {
                Ok(year) if student.year == year => {}
                _ => return false,
            }
        }
        if let Some(major) = provided(&self.major) {
            if student.major.as_deref() != Some(major) {
                return false;
            }
        }
        if let Some(section) = provided(&self.section) {
            if student.section != section {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student {
            id: uuid::Uuid::new_v4(),
            username: "0221-1001".into(),
            name: "John Doe".into(),
            course: "IT".into(),
            year: 3,
            major: Some("WMAD".into()),
            section: "A".into(),
            clearance_submitted: false,
            submitted_date: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(StudentFilter::default().matches(&student()));
    }

    #[test]
    fn empty_strings_impose_no_constraint() {
        let filter = StudentFilter {
            username: Some("".into()),
            course: Some("  ".into()),
            ..Default::default()
        };
        assert!(filter.matches(&student()));
    }

    #[test]
    fn username_is_substring_match() {
        let filter = StudentFilter {
            username: Some("1001".into()),
            ..Default::default()
        };
        assert!(filter.matches(&student()));

        let filter = StudentFilter {
            username: Some("9999".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&student()));
    }

    #[test]
    fn combined_fields_are_strict_and() {
        let filter = StudentFilter {
            course: Some("IT".into()),
            year: Some("3".into()),
            major: Some("WMAD".into()),
            section: Some("A".into()),
            ..Default::default()
        };
        assert!(filter.matches(&student()));

        // One mismatching field fails the whole conjunction
        let filter = StudentFilter {
            course: Some("IT".into()),
            year: Some("2".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&student()));
    }

    #[test]
    fn major_filter_misses_students_without_major() {
        let mut s = student();
        s.major = None;
        let filter = StudentFilter {
            major: Some("WMAD".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&s));
    }
}
