//! Fixed column schema of the results table

/// Columns of the results table that are carried into a [`Record`](super::Record)
///
/// Any other header is dropped together with its cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultField {
    Semester,
    CourseCode,
    CourseTitle,
    Credits,
    Grade,
    Result,
}

/// Result fields compared by the change detector; everything else is carried
/// but never diffed.
pub const RESULT_TRACKED_FIELDS: [ResultField; 2] = [ResultField::Grade, ResultField::Result];

impl ResultField {
    /// Recognise a cleaned header label (case-insensitive, exact match)
    pub fn from_header(label: &str) -> Option<ResultField> {
        match label.to_lowercase().as_str() {
            "semester" => Some(ResultField::Semester),
            "course code" => Some(ResultField::CourseCode),
            "course title" => Some(ResultField::CourseTitle),
            "credits" => Some(ResultField::Credits),
            "grade" | "grade / remark" | "grade/remark" => Some(ResultField::Grade),
            "result" => Some(ResultField::Result),
            _ => None,
        }
    }

    /// Normalized field name stored in the record
    pub fn field_name(&self) -> &'static str {
        match self {
            ResultField::Semester => "semester",
            ResultField::CourseCode => "course_code",
            ResultField::CourseTitle => "course_title",
            ResultField::Credits => "credits",
            ResultField::Grade => "grade",
            ResultField::Result => "result",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_spelling_variants() {
        for label in ["Grade", "GRADE / REMARK", "grade/remark"] {
            assert_eq!(ResultField::from_header(label), Some(ResultField::Grade));
        }
    }

    #[test]
    fn test_unrecognised_headers_are_dropped() {
        assert_eq!(ResultField::from_header("S.No"), None);
        assert_eq!(ResultField::from_header("course  code"), None);
        assert_eq!(ResultField::from_header(""), None);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(
            ResultField::from_header("Course Code").map(|f| f.field_name()),
            Some("course_code")
        );
        assert_eq!(ResultField::Credits.field_name(), "credits");
    }
}
