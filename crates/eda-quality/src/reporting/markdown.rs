//! Markdown rendering of an [`EdaReport`].

use super::generator::EdaReport;

pub(crate) fn render(report: &EdaReport) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push(format!("# {}", report.settings.title));
    out.push(String::new());
    out.push(format!("Source file: `{}`", report.input_file));
    out.push(format!("Generated at: {}", report.generated_at));
    out.push(String::new());

    overview(report, &mut out);
    quality(report, &mut out);
    columns(report, &mut out);
    missing(report, &mut out);
    correlation(report, &mut out);
    categories(report, &mut out);

    out.join("\n")
}

fn overview(report: &EdaReport, out: &mut Vec<String>) {
    out.push("## Overview".to_string());
    out.push(String::new());
    out.push(format!("- Rows: **{}**", report.summary.n_rows));
    out.push(format!("- Columns: **{}**", report.summary.n_cols));
    out.push(String::new());
}

fn quality(report: &EdaReport, out: &mut Vec<String>) {
    let flags = &report.flags;

    out.push("## Data quality".to_string());
    out.push(String::new());
    out.push(format!("- Quality score: **{:.2}**", flags.quality_score));
    out.push(format!(
        "- Max missing share: **{:.3}**",
        flags.max_missing_share()
    ));
    if !flags.is_complete() {
        out.push("- Row-level checks were skipped".to_string());
    }
    out.push(String::new());

    out.push("| flag | value |".to_string());
    out.push("|---|---|".to_string());
    for (name, value) in flags.entries() {
        out.push(format!("| {} | {} |", name, value));
    }
    out.push(String::new());

    if report.readiness.ok_for_model {
        out.push("Ready for modelling: **yes**".to_string());
    } else {
        out.push("Ready for modelling: **no**".to_string());
        for reason in &report.readiness.reasons {
            out.push(format!("- {}", reason));
        }
    }
    out.push(String::new());
}

fn columns(report: &EdaReport, out: &mut Vec<String>) {
    out.push("## Columns".to_string());
    out.push(String::new());
    if report.summary.columns.is_empty() {
        out.push("The dataset has no columns.".to_string());
        out.push(String::new());
        return;
    }

    out.push(
        "| column | dtype | non_null | missing | missing_share | unique | min | max | mean | std |"
            .to_string(),
    );
    out.push("|---|---|---|---|---|---|---|---|---|---|".to_string());
    for col in &report.summary.columns {
        out.push(format!(
            "| {} | {} | {} | {} | {:.3} | {} | {} | {} | {} | {} |",
            cell(&col.name),
            col.dtype,
            col.non_null,
            col.missing,
            col.missing_share,
            col.unique,
            number(col.min),
            number(col.max),
            number(col.mean),
            number(col.std),
        ));
    }
    out.push(String::new());
}

fn missing(report: &EdaReport, out: &mut Vec<String>) {
    let min_missing_share = report.settings.min_missing_share;
    out.push("## Missing values".to_string());
    out.push(String::new());

    let problems = report.missing.problem_columns(min_missing_share);
    if problems.is_empty() {
        out.push(format!(
            "No columns with a missing share of at least {:.2}.",
            min_missing_share
        ));
        out.push(String::new());
        return;
    }

    out.push(format!(
        "Columns with a missing share of at least {:.2}:",
        min_missing_share
    ));
    out.push(String::new());
    out.push("| column | missing_count | missing_share |".to_string());
    out.push("|---|---|---|".to_string());
    for entry in problems {
        out.push(format!(
            "| {} | {} | {:.3} |",
            cell(&entry.column),
            entry.missing_count,
            entry.missing_share
        ));
    }
    out.push(String::new());
}

fn correlation(report: &EdaReport, out: &mut Vec<String>) {
    let matrix = &report.correlation;

    out.push("## Correlation".to_string());
    out.push(String::new());
    if matrix.is_empty() {
        out.push("Fewer than two numeric columns, no correlation computed.".to_string());
        out.push(String::new());
        return;
    }

    let header: Vec<String> = matrix.columns.iter().map(|c| cell(c)).collect();
    out.push(format!("| | {} |", header.join(" | ")));
    out.push(format!("|---|{}", "---|".repeat(matrix.len())));
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let values: Vec<String> = row.iter().map(|r| coefficient(*r)).collect();
        out.push(format!("| {} | {} |", cell(name), values.join(" | ")));
    }
    out.push(String::new());
}

fn categories(report: &EdaReport, out: &mut Vec<String>) {
    out.push("## Top categories".to_string());
    out.push(String::new());
    if report.top_categories.is_empty() {
        out.push("No categorical columns.".to_string());
        out.push(String::new());
        return;
    }

    for ranked in report.top_categories.iter() {
        out.push(format!("### {}", ranked.column));
        out.push(String::new());
        if ranked.values.is_empty() {
            out.push("No values.".to_string());
        }
        for entry in &ranked.values {
            out.push(format!("- `{}`: {}", entry.value, entry.count));
        }
        out.push(String::new());
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

fn coefficient(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_escapes_pipes() {
        assert_eq!(cell("a|b"), "a\\|b");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(None), "-");
        assert_eq!(number(Some(1.5)), "1.500");
        assert_eq!(coefficient(f64::NAN), "n/a");
        assert_eq!(coefficient(-0.123), "-0.12");
    }
}
