use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::aggregate;
use crate::model::{CategoryMap, Department, Regulation, RegulationCategorySnapshot, SemesterMap};
use crate::taxonomy::labels;

/// Display rounding lives here, not in the aggregation engine.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.3}%")
}

/// One text panel per regulation with course data, in configured order.
/// Zero-percentage categories are left off a panel, matching the chart's
/// label formatter; the currently selected regulation is marked.
pub fn chart_view(
    snapshot: &RegulationCategorySnapshot,
    order: &[Regulation],
    selected: &Regulation,
) -> String {
    let charted = aggregate::non_empty_regulations(snapshot, order);
    let mut output = String::new();

    if charted.is_empty() {
        let _ = writeln!(output, "No regulation has course data for this department.");
        return output;
    }

    for (regulation, categories) in charted {
        let marker = if regulation == selected { " (selected)" } else { "" };
        let _ = writeln!(output, "### {regulation}{marker}");

        let percentages = aggregate::percentages_of(categories);
        for ((code, label), percentage) in labels().into_iter().zip(percentages) {
            if percentage > 0.0 {
                let _ = writeln!(
                    output,
                    "- {}: {} ({} courses)",
                    label,
                    format_percentage(percentage),
                    categories.count(code)
                );
            }
        }
        let _ = writeln!(output);
    }

    output
}

/// Semester and category breakdowns for the selected
/// (department, regulation). Unlike the chart, the table shows every
/// taxonomy category, zero counts included.
pub fn table_view(semesters: &SemesterMap, categories: &CategoryMap) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Semester breakdown:");
    if semesters.is_empty() {
        let _ = writeln!(output, "No semester data.");
    } else {
        for (semester, courses) in &semesters.0 {
            let _ = writeln!(output, "- Semester {semester}: {} courses", courses.len());
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Category breakdown:");
    let percentages = aggregate::percentages_of(categories);
    for ((code, label), percentage) in labels().into_iter().zip(percentages) {
        let _ = writeln!(
            output,
            "- {}: {} courses ({})",
            label,
            categories.count(code),
            format_percentage(percentage)
        );
    }

    output
}

/// Markdown report covering both views for one department.
pub fn build_report(
    department: &Department,
    regulation: &Regulation,
    regulation_order: &[Regulation],
    snapshot: &RegulationCategorySnapshot,
    semesters: &SemesterMap,
    categories: &CategoryMap,
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Department Courses Overview");
    let _ = writeln!(
        output,
        "Generated for {} on {}",
        department.name,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Category Distribution by Regulation");
    let _ = writeln!(output);
    let _ = write!(
        output,
        "{}",
        chart_view(snapshot, regulation_order, regulation)
    );
    let _ = writeln!(output, "## Semester & Category Table ({regulation})");
    let _ = writeln!(output);
    let _ = write!(output, "{}", table_view(semesters, categories));

    output
}

/// Write the table view's category breakdown as CSV.
pub fn write_table_csv<W: std::io::Write>(
    writer: W,
    categories: &CategoryMap,
) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["category", "label", "courses", "percentage"])?;

    let percentages = aggregate::percentages_of(categories);
    for ((code, label), percentage) in labels().into_iter().zip(percentages) {
        let count = categories.count(code).to_string();
        let percent = format!("{percentage:.3}");
        csv_writer.write_record([code.as_str(), label, count.as_str(), percent.as_str()])?;
    }

    csv_writer.flush()?;
    Ok(())
}
