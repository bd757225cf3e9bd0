use tabled::{Table, Tabled, settings::Style};

use crate::thread::ThreadSummary;
use crate::ui::output::time_since;

/// One row of the `ls` listing.
#[derive(Tabled)]
pub struct ThreadRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Question")]
    pub question: String,
    #[tabled(rename = "Tags")]
    pub tags: String,
    #[tabled(rename = "Resources")]
    pub resources: i64,
    #[tabled(rename = "Last Active")]
    pub last_active: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl ThreadRow {
    pub fn new(summary: &ThreadSummary, tags: &[String], now: f64) -> Self {
        Self {
            id: summary.id,
            question: summary.question.clone(),
            tags: tags.join(", "),
            resources: summary.resource_count,
            last_active: format!("{} ago", time_since(now, summary.last_active)),
            status: if summary.is_archived { "Archived" } else { "Active" }.to_string(),
        }
    }
}

pub fn thread_table(rows: &[ThreadRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, archived: bool) -> ThreadSummary {
        ThreadSummary {
            id,
            question: format!("question {}", id),
            resource_count: id,
            last_active: 900.0,
            is_archived: archived,
        }
    }

    #[test]
    fn test_row_formats_fields() {
        let row = ThreadRow::new(&summary(2, false), &["deep".to_string()], 1_020.0);
        assert_eq!(row.id, 2);
        assert_eq!(row.tags, "deep");
        assert_eq!(row.last_active, "2m ago");
        assert_eq!(row.status, "Active");
    }

    #[test]
    fn test_row_marks_archived() {
        let row = ThreadRow::new(&summary(1, true), &[], 1_000.0);
        assert_eq!(row.status, "Archived");
    }

    #[test]
    fn test_table_contains_headers_and_rows() {
        let rows = vec![ThreadRow::new(&summary(1, false), &[], 1_000.0)];
        let rendered = thread_table(&rows);
        assert!(rendered.contains("Question"));
        assert!(rendered.contains("question 1"));
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert_eq!(thread_table(&[]), "");
    }
}
