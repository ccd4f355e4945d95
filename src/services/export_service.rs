//! CSV rendering of the submitted-clearances report.

use crate::store::models::ExportRow;

const HEADER: &str = "Name,Student Number,Course,Year,Major,Section,Completed Requirements,Submitted Date";

/// Render export rows as CSV. Completed requirement names sit in one quoted
/// cell joined with "; "; fields containing commas, quotes or newlines are
/// quoted per RFC 4180.
pub fn render_csv(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\r\n");

    for row in rows {
        let fields = [
            row.name.clone(),
            row.username.clone(),
            row.course.clone(),
            row.year.to_string(),
            row.major.clone().unwrap_or_default(),
            row.section.clone(),
            row.completed_requirements.join("; "),
            row.submitted_date.to_rfc3339(),
        ];
        let line: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }

    out
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
