//! services/client/src/render.rs
//!
//! Plain-text rendering of schemes, comparisons, forum posts and chat replies.

use chrono::{DateTime, Utc};
use schemes_connect_core::community::{format_relative, Post};
use schemes_connect_core::recommendation::Notice;
use schemes_connect_core::{ChatMessage, ComparisonTable, ProfileDraft, Scheme};

pub fn notice(notice: &Notice) -> String {
    let marker = if notice.is_error() { "!" } else { "*" };
    format!("{} {}: {}", marker, notice.title(), notice.description())
}

pub fn scheme(scheme: &Scheme) -> String {
    let mut lines = vec![format!(
        "[{}] {}  ({}, match {})",
        scheme.id, scheme.title, scheme.category, scheme.confidence
    )];
    let details = [
        ("", scheme.description.clone()),
        ("Eligibility: ", scheme.eligibility.clone()),
        ("Documents: ", scheme.documents.join(", ")),
        ("Why: ", scheme.why_recommended.clone()),
        ("Source: ", scheme.source.clone()),
        ("Apply: ", scheme.apply_link.clone()),
    ];
    lines.extend(
        details
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| format!("    {label}{value}")),
    );
    finish(lines)
}

pub fn profile(draft: &ProfileDraft) -> String {
    let show = |value: &str| {
        if value.trim().is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    let mut lines = Vec::new();
    if let Some(name) = draft.full_name.as_deref() {
        lines.push(format!("Name:          {}", show(name)));
    }
    lines.extend([
        format!("Age:           {}", show(&draft.age)),
        format!("Gender:        {}", show(&draft.gender)),
        format!("Income:        {}", show(&draft.income)),
        format!("Occupation:    {}", show(&draft.occupation)),
        format!("Location:      {}", show(&draft.location)),
        format!("Caste:         {}", show(&draft.caste_category)),
        format!("Disability:    {}", show(&draft.disability)),
    ]);
    finish(lines)
}

/// One block per attribute row, one line per compared scheme.
pub fn comparison(table: &ComparisonTable) -> String {
    let titles: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} ({})", c.title, c.category))
        .collect();
    let mut lines = vec![format!("Comparing: {}", titles.join(" | "))];
    for row in &table.rows {
        lines.push(format!("\n{}", row.label));
        lines.extend(
            table
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(column, cell)| format!("  {:<40} {}", column.title, cell)),
        );
    }
    finish(lines)
}

pub fn post(post: &Post, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("{}  [{}]", post.title, post.category),
        format!(
            "  by {} · {} · {} likes · {} comments",
            post.author,
            format_relative(now, post.timestamp),
            post.likes,
            post.comments.len()
        ),
        format!("  {}", post.content),
    ];
    lines.extend(post.comments.iter().map(|comment| {
        format!(
            "    > {} ({}): {}",
            comment.author,
            format_relative(now, comment.timestamp),
            comment.content
        )
    }));
    finish(lines)
}

pub fn reply(message: &ChatMessage) -> String {
    if message.sources.is_empty() {
        message.content.clone()
    } else {
        format!("{}\n  Sources: {}", message.content, message.sources.join(", "))
    }
}

/// Joins rendered lines, each terminated by a newline.
fn finish(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemes_connect_core::{catalog, Comparison};

    #[test]
    fn comparison_lists_every_row_label() {
        let mut selection = Comparison::new();
        selection.toggle(&catalog::find(101).unwrap()).unwrap();
        selection.toggle(&catalog::find(102).unwrap()).unwrap();

        let text = comparison(&selection.table().unwrap());
        for label in ["Match Score", "Eligibility", "Required Documents", "Apply Link"] {
            assert!(text.contains(label), "missing {label}");
        }
    }

    #[test]
    fn blank_profile_fields_render_as_dash() {
        let text = profile(&ProfileDraft {
            age: "30".to_string(),
            ..Default::default()
        });
        assert!(text.contains("Age:           30"));
        assert!(text.contains("Gender:        -"));
    }

    #[test]
    fn scheme_shows_source_and_skips_blank_fields() {
        let mut record = catalog::find(101).unwrap();
        record.source = "National Health Authority".to_string();
        record.why_recommended.clear();

        let text = scheme(&record);
        assert!(text.starts_with("[101] "));
        assert!(text.contains("    Source: National Health Authority\n"));
        assert!(!text.contains("Why:"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn reply_lists_sources() {
        let message = ChatMessage::assistant("Apply online.", vec!["pmay.pdf".to_string()]);
        assert_eq!(reply(&message), "Apply online.\n  Sources: pmay.pdf");
    }
}
