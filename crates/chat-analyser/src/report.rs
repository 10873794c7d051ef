//! Plain-text rendering of an [`AnalysisReport`].
//!
//! Each tabular output becomes a titled, column-aligned table whose headers
//! are the shared column names.

use std::fmt::Write as _;

use analyser_core::formatting::{format_count, format_percentage};
use analyser_core::models::{columns, ActivityHeatmap};
use analyser_data::analysis::AnalysisReport;
use comfy_table::{CellAlignment, ContentArrangement, Table};

/// Render `report` as text.  Word and emoji rankings are cut to `top` rows.
pub fn render_report(report: &AnalysisReport, top: usize) -> String {
    let mut out = String::new();
    let meta = &report.metadata;

    let _ = writeln!(out, "Chat analysis: {}", meta.scope);
    let _ = writeln!(
        out,
        "{} messages parsed, {} in scope, {} participants",
        format_count(meta.records_parsed),
        format_count(meta.records_in_scope),
        format_count(meta.participants)
    );
    for warning in &meta.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }

    let summary = &report.summary;
    out.push_str(&render_table(
        "Top Statistics",
        &["Statistic", "Count"],
        vec![
            vec!["Total Messages".to_string(), format_count(summary.messages)],
            vec!["Total Words".to_string(), format_count(summary.words)],
            vec!["Media Shared".to_string(), format_count(summary.media)],
            vec!["Links Shared".to_string(), format_count(summary.links)],
        ],
    ));

    if meta.scope.is_overall() {
        out.push_str(&render_table(
            "Most Busy Users",
            &[columns::USER_NAME, columns::NUMBER_OF_CHATS],
            report
                .most_active_users
                .iter()
                .map(|u| vec![u.user.clone(), format_count(u.messages)])
                .collect(),
        ));
        out.push_str(&render_table(
            "Share of Messages",
            &[columns::USER_NAME, columns::PERCENTAGE],
            report
                .user_shares
                .iter()
                .map(|u| vec![u.user.clone(), format_percentage(u.percentage)])
                .collect(),
        ));
    }

    out.push_str(&render_table(
        "Monthly Timeline",
        &[columns::TIME, columns::NUMBER_OF_MESSAGES],
        report
            .timeline
            .iter()
            .map(|p| vec![p.label.clone(), format_count(p.messages)])
            .collect(),
    ));
    out.push_str(&render_table(
        "Daily Timeline",
        &[columns::TIME_DATE, columns::NUMBER_OF_MESSAGES],
        report
            .daily_timeline
            .iter()
            .map(|p| vec![p.date.to_string(), format_count(p.messages)])
            .collect(),
    ));
    out.push_str(&render_table(
        "Most Busy Day",
        &[columns::DAY_OF_THE_WEEK, columns::NUMBER_OF_MESSAGES],
        report
            .busiest_days
            .iter()
            .map(|d| vec![d.weekday.clone(), format_count(d.messages)])
            .collect(),
    ));
    out.push_str(&render_table(
        "Most Busy Month",
        &[columns::MONTH, columns::NUMBER_OF_MESSAGES],
        report
            .busiest_months
            .iter()
            .map(|m| vec![m.month.clone(), format_count(m.messages)])
            .collect(),
    ));
    out.push_str(&render_heatmap(&report.heatmap));

    out.push_str(&render_table(
        "Most Common Words",
        &[columns::WORDS, columns::FREQUENCY],
        report
            .most_common_words
            .iter()
            .take(top)
            .map(|w| vec![w.word.clone(), format_count(w.frequency)])
            .collect(),
    ));
    out.push_str(&render_table(
        "Emoji Analysis",
        &[columns::EMOJIS, columns::FREQUENCY],
        report
            .most_used_emojis
            .iter()
            .take(top)
            .map(|e| vec![e.emoji.clone(), format_count(e.frequency)])
            .collect(),
    ));

    out
}

fn render_heatmap(heatmap: &ActivityHeatmap) -> String {
    let mut headers = vec![columns::DAY_OF_THE_WEEK];
    headers.extend(heatmap.hour_buckets.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = heatmap
        .weekdays
        .iter()
        .zip(&heatmap.counts)
        .map(|(day, counts)| {
            std::iter::once(day.clone())
                .chain(counts.iter().map(|c| c.to_string()))
                .collect::<Vec<String>>()
        })
        .collect();

    render_table("Weekly Activity Map", &headers, rows)
}

/// Render one titled table.  The first column is left-aligned, the rest
/// right-aligned.  An empty table renders as `(no data)`.
fn render_table(title: &str, headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return format!("\n{}\n  (no data)\n", title);
    }

    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    for column in table.column_iter_mut().skip(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    format!("\n{}\n{}\n", title, table)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use analyser_core::models::Scope;
    use analyser_core::Loaded;
    use analyser_data::analysis::analyze_transcript;
    use analyser_data::stopwords::StopwordSet;

    const CHAT: &str = "\
01/01/23, 10:00 am - Alice: Hello there
01/01/23, 10:01 am - Alice: hello 😂
01/01/23, 10:02 am - Bob: <Media omitted>
01/01/23, 10:03 am - Alice added Carol";

    fn report(scope: Scope) -> AnalysisReport {
        analyze_transcript(CHAT, scope, Loaded::Complete(StopwordSet::default()))
            .expect("analysis")
    }

    // ── render_report ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_report_overall_sections() {
        let text = render_report(&report(Scope::Overall), 20);

        assert!(text.starts_with("Chat analysis: Overall\n"));
        assert!(text.contains("Top Statistics"));
        assert!(text.contains("Most Busy Users"));
        assert!(text.contains("Share of Messages"));
        assert!(text.contains("50.00%"));
        assert!(text.contains("January-2023"));
        assert!(text.contains("2023-01-01"));
        assert!(text.contains("10-11"));
        assert!(text.contains(columns::NUMBER_OF_CHATS));
    }

    #[test]
    fn test_render_report_user_scope_omits_group_tables() {
        let text = render_report(&report(Scope::User("Alice".to_string())), 20);

        assert!(text.starts_with("Chat analysis: Alice\n"));
        assert!(!text.contains("Most Busy Users"));
        assert!(!text.contains("Share of Messages"));
    }

    #[test]
    fn test_render_report_top_limits_rankings() {
        let text = render_report(&report(Scope::Overall), 1);
        let words = text
            .split("Most Common Words\n")
            .nth(1)
            .and_then(|s| s.split("\nEmoji Analysis").next())
            .unwrap();

        // "hello" (2) outranks "there" (1); only the first row is kept.
        assert!(words.contains("hello"));
        assert!(!words.contains("there"));
    }

    #[test]
    fn test_render_report_lists_warnings() {
        let analysis = analyze_transcript(
            CHAT,
            Scope::Overall,
            Loaded::Degraded {
                value: StopwordSet::default(),
                warning: "Stopword list stop.txt not found".to_string(),
            },
        )
        .unwrap();
        let text = render_report(&analysis, 20);
        assert!(text.contains("warning: Stopword list stop.txt not found"));
    }

    // ── render_table ──────────────────────────────────────────────────────────

    #[test]
    fn test_render_table_aligns_columns() {
        let text = render_table(
            "T",
            &["Name", "Count"],
            vec![
                vec!["a".to_string(), "1".to_string()],
                vec!["long name".to_string(), "1,000".to_string()],
            ],
        );

        assert!(text.starts_with("\nT\n"));
        // Name column is 9 wide and left-aligned, Count is 5 wide and
        // right-aligned; each cell has one space of padding.
        assert!(text.contains(" a         "));
        assert!(text.contains("     1 "));
        assert!(text.contains(" long name "));
        assert!(text.contains(" 1,000 "));
    }

    #[test]
    fn test_render_table_measures_wide_characters() {
        let text = render_table(
            "T",
            &[columns::EMOJIS, columns::FREQUENCY],
            vec![
                vec!["😂".to_string(), "2".to_string()],
                vec!["ok".to_string(), "1".to_string()],
            ],
        );
        let emoji_row = text.lines().find(|l| l.contains('😂')).unwrap();
        let plain_row = text.lines().find(|l| l.contains("ok")).unwrap();

        // The emoji is one char but two terminal cells, so its row is one
        // char shorter than an all-narrow row of the same width.
        assert_eq!(
            emoji_row.chars().count() + 1,
            plain_row.chars().count()
        );
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table("Empty", &["A"], vec![]), "\nEmpty\n  (no data)\n");
    }
}
