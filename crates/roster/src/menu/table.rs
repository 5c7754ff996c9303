//! Fixed-width table used by View.

use crate::student::Student;

/// Column widths: ID, first name, last name, age.
const WIDTHS: [usize; 4] = [12, 16, 16, 4];

/// Render the header, a rule and one row per student.
///
/// Columns are left-justified and padded; wider values overflow, nothing is
/// truncated.
#[must_use]
pub fn render(students: &[Student]) -> String {
    let rule_width: usize = WIDTHS.iter().sum();
    let mut out = String::new();

    push_row(&mut out, ["ID", "First Name", "Last Name", "Age"]);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    for s in students {
        let age = s.age.to_string();
        push_row(&mut out, [&s.id, &s.first, &s.last, &age]);
    }
    out
}

fn push_row(out: &mut String, cells: [&str; 4]) {
    for (cell, width) in cells.iter().zip(WIDTHS) {
        out.push_str(&format!("{cell:<width$}"));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rule() {
        let table = render(&[]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!("{:<12}{:<16}{:<16}{:<4}", "ID", "First Name", "Last Name", "Age")
        );
        assert_eq!(lines[1], "-".repeat(48));
    }

    #[test]
    fn test_row_padding() {
        let table = render(&[Student::new("S1", "Ada", "Lovelace", 28)]);
        let row = table.lines().nth(2).unwrap();

        assert_eq!(row, format!("{:<12}{:<16}{:<16}{:<4}", "S1", "Ada", "Lovelace", 28));
        assert_eq!(row.len(), 48);
    }

    #[test]
    fn test_hand_edited_age_is_shown_as_is() {
        let mut student = Student::new("S2", "Alan", "Turing", 41);
        student.age = crate::student::Age::Raw(serde_json::json!("41"));
        let table = render(&[student]);
        let row = table.lines().nth(2).unwrap();

        assert_eq!(row, format!("{:<12}{:<16}{:<16}{:<4}", "S2", "Alan", "Turing", "41"));
    }

    #[test]
    fn test_wide_values_overflow() {
        let long_id = "STUDENT-000000001";
        let table = render(&[Student::new(long_id, "Ada", "Lovelace", 28)]);
        let row = table.lines().nth(2).unwrap();

        assert!(row.starts_with(&format!("{long_id}Ada")));
    }
}
