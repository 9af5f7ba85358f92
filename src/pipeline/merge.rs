// src/pipeline/merge.rs

//! Cross-department merge of faculty records.
//!
//! Records are grouped by exact name string. `Biology` and `biology`, or
//! `Jane Doe` and `Jane Q. Doe`, stay separate rows.

use std::collections::HashMap;

use crate::models::{DirectoryRow, FacultyRecord};

/// Merge records sharing an exact name into single rows, sorted by name.
///
/// Fields keep the first non-empty value in input order; departments are
/// appended in input order without repeats.
pub fn merge_by_name(records: impl IntoIterator<Item = FacultyRecord>) -> Vec<DirectoryRow> {
    let mut rows: Vec<DirectoryRow> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for record in records {
        match by_name.get(&record.name) {
            Some(&idx) => absorb(&mut rows[idx], record),
            None => {
                by_name.insert(record.name.clone(), rows.len());
                rows.push(DirectoryRow::from(record));
            }
        }
    }

    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

fn absorb(row: &mut DirectoryRow, record: FacultyRecord) {
    if row.biography.is_empty() {
        row.biography = record.biography;
    }
    if row.emails.is_empty() {
        row.emails = record.emails;
    }
    if row.profile_url.is_empty() {
        row.profile_url = record.profile_url;
    }
    if row.research_interests.is_empty() {
        row.research_interests = record.research_interests;
    }
    if !row.departments.contains(&record.department) {
        row.departments.push(record.department);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, department: &str, email: Option<&str>) -> FacultyRecord {
        FacultyRecord {
            name: name.to_string(),
            emails: email.into_iter().map(str::to_string).collect(),
            biography: String::new(),
            research_interests: Vec::new(),
            profile_url: format!("https://example.edu/{}", name.to_lowercase().replace(' ', "-")),
            department: department.to_string(),
        }
    }

    #[test]
    fn shared_faculty_merge_into_one_row() {
        let rows = merge_by_name(vec![
            record("Jane Doe", "Chemical Engineering", None),
            record("Ann Lee", "Chemical Engineering", None),
            record("Jane Doe", "Materials Science", Some("jd@example.edu")),
        ]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ann Lee");
        let jane = &rows[1];
        assert_eq!(jane.departments, vec!["Chemical Engineering", "Materials Science"]);
        assert_eq!(jane.department_cell("; "), "Chemical Engineering; Materials Science");
        assert_eq!(jane.email_cell(), "jd@example.edu");
    }

    #[test]
    fn case_mismatch_does_not_merge() {
        let rows = merge_by_name(vec![
            record("Biology", "Dept A", None),
            record("biology", "Dept B", None),
        ]);

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.departments.len() == 1));
    }

    #[test]
    fn first_non_empty_values_win() {
        let mut first = record("Jane Doe", "A", Some("first@example.edu"));
        first.biography = "First bio".to_string();
        let mut second = record("Jane Doe", "B", Some("second@example.edu"));
        second.biography = "Second bio".to_string();
        second.research_interests = vec!["Catalysis".to_string()];

        let rows = merge_by_name(vec![first, second]);
        assert_eq!(rows[0].biography, "First bio");
        assert_eq!(rows[0].email_cell(), "first@example.edu");
        assert_eq!(rows[0].research_interests, vec!["Catalysis"]);
        assert_eq!(rows[0].profile_url, "https://example.edu/jane-doe");
    }

    #[test]
    fn repeated_department_is_not_duplicated() {
        let rows = merge_by_name(vec![
            record("Jane Doe", "A", None),
            record("Jane Doe", "A", None),
        ]);
        assert_eq!(rows[0].departments, vec!["A"]);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(merge_by_name(Vec::new()).is_empty());
    }
}
