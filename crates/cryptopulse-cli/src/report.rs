//! Markdown rendering of a batch [`Summary`].

use std::fmt::Write;

use chrono::Utc;
use cryptopulse_sentiment::summary::{AuthorStats, Highlight, Summary};

/// Render every summary section as markdown.
///
/// # Errors
///
/// Returns [`std::fmt::Error`] if formatting a section fails.
pub(crate) fn render_markdown(summary: &Summary) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_markdown(summary, &mut out)?;
    Ok(out)
}

fn write_markdown(summary: &Summary, out: &mut String) -> std::fmt::Result {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");

    writeln!(out, "# Crypto Sentiment Report")?;
    writeln!(out)?;
    writeln!(out, "**Generated**: {now}")?;
    writeln!(out, "**Posts analyzed**: {}", summary.total)?;
    writeln!(out, "**Authors**: {}", summary.authors.len())?;
    match &summary.date_range {
        Some(range) => writeln!(
            out,
            "**Date range**: {} to {}",
            range.earliest.format("%Y-%m-%d %H:%M"),
            range.latest.format("%Y-%m-%d %H:%M")
        )?,
        None => writeln!(out, "**Date range**: \u{2014}")?,
    }
    writeln!(out, "**Average compound**: {}", fmt_opt(summary.mean_compound))?;
    writeln!(out, "**Standard deviation**: {}", fmt_opt(summary.std_dev_compound))?;

    if summary.total == 0 {
        writeln!(out)?;
        writeln!(out, "No posts survived filtering.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "## Category distribution")?;
    writeln!(out)?;
    writeln!(out, "| Category | Posts | Share |")?;
    writeln!(out, "|----------|-------|-------|")?;
    for c in &summary.categories {
        writeln!(out, "| {} | {} | {:.1}% |", c.category, c.count, c.percentage)?;
    }

    writeln!(out)?;
    writeln!(out, "## Sentiment by author")?;
    writeln!(out)?;
    write_author_table(out, &summary.authors)?;

    writeln!(out)?;
    writeln!(out, "## Compound distribution")?;
    writeln!(out)?;
    writeln!(out, "| Range | Posts | |")?;
    writeln!(out, "|-------|-------|-|")?;
    for bin in summary.histogram.iter().filter(|b| b.count > 0) {
        writeln!(
            out,
            "| {:+.1} to {:+.1} | {} | {} |",
            bin.lower,
            bin.upper,
            bin.count,
            "#".repeat(bin.count)
        )?;
    }

    if !summary.timeline.is_empty() {
        writeln!(out)?;
        writeln!(out, "## Timeline")?;
        writeln!(out)?;
        writeln!(out, "| Created At | Author | Compound |")?;
        writeln!(out, "|------------|--------|----------|")?;
        for point in &summary.timeline {
            writeln!(
                out,
                "| {} | {} | {:.3} |",
                point.created_at.format("%Y-%m-%d %H:%M UTC"),
                point.author,
                point.compound
            )?;
        }
    }

    let relevant = &summary.relevant;
    writeln!(out)?;
    writeln!(out, "## Crypto-related posts")?;
    writeln!(out)?;
    writeln!(out, "**Count**: {}", relevant.count)?;
    writeln!(out, "**Average compound**: {}", fmt_opt(relevant.mean_compound))?;
    if relevant.count == 0 {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "### By author")?;
    writeln!(out)?;
    write_author_table(out, &relevant.authors)?;

    writeln!(out)?;
    writeln!(out, "### Most positive")?;
    writeln!(out)?;
    write_highlights(out, &relevant.most_positive)?;

    writeln!(out)?;
    writeln!(out, "### Most negative")?;
    writeln!(out)?;
    write_highlights(out, &relevant.most_negative)?;

    Ok(())
}

fn write_author_table(out: &mut String, authors: &[AuthorStats]) -> std::fmt::Result {
    writeln!(out, "| Author | Posts | Mean Compound | Positive | Negative | Neutral |")?;
    writeln!(out, "|--------|-------|---------------|----------|----------|---------|")?;
    for a in authors {
        writeln!(
            out,
            "| {} | {} | {:.3} | {} | {} | {} |",
            a.author, a.count, a.mean_compound, a.positive, a.negative, a.neutral
        )?;
    }
    Ok(())
}

fn write_highlights(out: &mut String, highlights: &[Highlight]) -> std::fmt::Result {
    for (i, h) in highlights.iter().enumerate() {
        let ellipsis = if h.truncated { "..." } else { "" };
        writeln!(
            out,
            "{}. **{}** ({:.3}): {}{ellipsis}",
            i + 1,
            h.author,
            h.compound,
            h.text
        )?;
    }
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "\u{2014}".to_string(), |v| format!("{v:.3}"))
}
