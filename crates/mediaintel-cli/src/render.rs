//! Text renderings of a [`Report`] for the terminal or an external renderer.

use clap::ValueEnum;
use mediaintel_core::Field;
use mediaintel_llm::SummaryState;
use mediaintel_report::{
    emphasis_to_html, CategoryEntry, CleaningReport, Facet, FacetInsights, FilterOptions,
    FilterSpec, Report,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Markdown with `**bold**` emphasis
    Markdown,
    /// Markdown with `<strong>` emphasis, for HTML-capable viewers
    Html,
    /// Facets and insights as JSON, for an external chart renderer
    Json,
}

/// What is being rendered, beyond the report itself.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderContext<'a> {
    pub filter: &'a FilterSpec,
    pub cleaning: Option<CleaningReport>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    filters: &'a FilterSpec,
    cleaning: Option<CleaningReport>,
    report: &'a Report,
}

/// Render `report` in `format`.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub(crate) fn render_report(
    report: &Report,
    ctx: RenderContext<'_>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(report, ctx, false)),
        OutputFormat::Html => Ok(render_markdown(report, ctx, true)),
        OutputFormat::Json => serde_json::to_string_pretty(&JsonReport {
            filters: ctx.filter,
            cleaning: ctx.cleaning,
            report,
        }),
    }
}

/// Human-readable description of the active constraints.
pub(crate) fn describe_filters(filter: &FilterSpec) -> String {
    let mut parts: Vec<String> = Field::TEXT
        .into_iter()
        .filter_map(|field| {
            filter
                .constraint(field)
                .map(|value| format!("{field} = {value}"))
        })
        .collect();
    if let Some(from) = filter.date_from {
        parts.push(format!("Date >= {}", from.format("%Y-%m-%d")));
    }
    if let Some(to) = filter.date_to {
        parts.push(format!("Date <= {}", to.format("%Y-%m-%d")));
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join("; ")
    }
}

fn table(out: &mut Vec<String>, headers: [&str; 2], rows: &[(String, u64)]) {
    out.push(format!("| {} | {} |", headers[0], headers[1]));
    out.push("|---|---:|".to_string());
    for (key, value) in rows {
        out.push(format!("| {key} | {value} |"));
    }
    out.push(String::new());
}

fn pairs(entries: &[CategoryEntry]) -> Vec<(String, u64)> {
    entries.iter().map(|e| (e.key.clone(), e.value)).collect()
}

/// Chart data for one facet, in display order. Platforms and locations are
/// listed smallest first, as on a horizontal bar chart.
fn facet_rows(report: &Report, facet: Facet) -> ([&'static str; 2], Vec<(String, u64)>) {
    let agg = &report.aggregates;
    match facet {
        Facet::Sentiment => (["Sentiment", "Entries"], pairs(agg.sentiment.entries())),
        Facet::Trend => (
            ["Date", "Engagements"],
            agg.trend
                .daily_series()
                .into_iter()
                .map(|p| (p.date.format("%Y-%m-%d").to_string(), p.engagements))
                .collect(),
        ),
        Facet::Platform => (["Platform", "Engagements"], pairs(&agg.platform.ascending())),
        Facet::MediaType => (["Media Type", "Entries"], pairs(agg.media_type.entries())),
        Facet::Locations => (["Location", "Engagements"], pairs(&agg.locations.ascending())),
    }
}

fn insight_lines(out: &mut Vec<String>, insights: &FacetInsights, html: bool) {
    for sentence in &insights.sentences {
        let text = if html {
            emphasis_to_html(sentence)
        } else {
            sentence.clone()
        };
        out.push(format!("- {text}"));
    }
}

fn render_markdown(report: &Report, ctx: RenderContext<'_>, html: bool) -> String {
    let mut out = vec!["# Media Intelligence Report".to_string(), String::new()];
    out.push(format!("**Filters**: {}  ", describe_filters(ctx.filter)));
    out.push(format!("**Rows**: {}", report.row_count));
    out.push(String::new());

    if let Some(cleaning) = ctx.cleaning {
        if cleaning.rows_removed > 0 {
            out.push(format!(
                "> Cleaning removed {} of {} rows.",
                cleaning.rows_removed, cleaning.initial_count
            ));
            out.push(String::new());
        }
    }
    if report.is_empty() {
        out.push("> No rows match the current filters.".to_string());
        out.push(String::new());
    }

    for insights in &report.insights {
        let facet = insights.facet;
        out.push(format!("## {}", facet.title()));
        out.push(String::new());

        let (headers, rows) = facet_rows(report, facet);
        if rows.is_empty() {
            out.push(facet.no_data_message().to_string());
            out.push(String::new());
            continue;
        }
        table(&mut out, headers, &rows);
        insight_lines(&mut out, insights, html);
        out.push(String::new());
    }

    out.join("\n")
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

pub(crate) fn render_options(options: &FilterOptions) -> String {
    let dates = options.date_range.map_or_else(
        || "(none)".to_string(),
        |(lo, hi)| format!("{} to {}", lo.format("%Y-%m-%d"), hi.format("%Y-%m-%d")),
    );
    [
        format!("Platforms:   {}", list_or_none(&options.platforms)),
        format!("Sentiments:  {}", list_or_none(&options.sentiments)),
        format!("Media types: {}", list_or_none(&options.media_types)),
        format!("Locations:   {}", list_or_none(&options.locations)),
        format!("Dates:       {dates}"),
    ]
    .join("\n")
}

pub(crate) fn render_summary(state: &SummaryState) -> String {
    match state {
        SummaryState::Idle => "No summary requested.".to_string(),
        SummaryState::Requesting => "Generating summary...".to_string(),
        SummaryState::Success(text) => format!("## AI Campaign Summary\n\n{text}"),
        SummaryState::Failed(message) => format!("Summary unavailable: {message}"),
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
