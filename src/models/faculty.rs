//! Faculty record and directory row data structures.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One faculty member as extracted from a single profile page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacultyRecord {
    /// Display name
    pub name: String,

    /// Distinct email addresses found on the page
    pub emails: BTreeSet<String>,

    /// Biography text, one paragraph per line
    pub biography: String,

    /// Research-interest tags in page order
    pub research_interests: Vec<String>,

    /// Absolute URL of the profile page
    pub profile_url: String,

    /// Department whose listing linked to this profile
    pub department: String,
}

/// A merged output row: one per distinct faculty name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryRow {
    pub name: String,
    pub biography: String,
    pub emails: BTreeSet<String>,
    pub profile_url: String,
    pub research_interests: Vec<String>,

    /// Department affiliations in department-map order
    pub departments: Vec<String>,
}

impl DirectoryRow {
    /// Emails joined for a single output cell.
    pub fn email_cell(&self) -> String {
        self.emails.iter().cloned().collect::<Vec<_>>().join("; ")
    }

    /// Departments joined with the given separator.
    pub fn department_cell(&self, separator: &str) -> String {
        self.departments.join(separator)
    }
}

impl From<FacultyRecord> for DirectoryRow {
    fn from(record: FacultyRecord) -> Self {
        Self {
            name: record.name,
            biography: record.biography,
            emails: record.emails,
            profile_url: record.profile_url,
            research_interests: record.research_interests,
            departments: vec![record.department],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_from_record_carries_department() {
        let record = FacultyRecord {
            name: "Jane Q Doe".to_string(),
            emails: ["jqd@example.edu".to_string()].into_iter().collect(),
            biography: "Works on things.".to_string(),
            research_interests: vec!["Robotics".to_string()],
            profile_url: "https://example.edu/faculty/jane-q-doe".to_string(),
            department: "Mechanical Engineering".to_string(),
        };

        let row = DirectoryRow::from(record);
        assert_eq!(row.departments, vec!["Mechanical Engineering"]);
        assert_eq!(row.email_cell(), "jqd@example.edu");
    }

    #[test]
    fn cells_join_multiple_values() {
        let row = DirectoryRow {
            name: "A".to_string(),
            biography: String::new(),
            emails: ["b@x.edu".to_string(), "a@x.edu".to_string()]
                .into_iter()
                .collect(),
            profile_url: String::new(),
            research_interests: Vec::new(),
            departments: vec!["Physics".to_string(), "Chemistry".to_string()],
        };

        assert_eq!(row.email_cell(), "a@x.edu; b@x.edu");
        assert_eq!(row.department_cell(" | "), "Physics | Chemistry");
    }
}
