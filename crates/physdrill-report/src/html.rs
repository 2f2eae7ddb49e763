//! HTML worksheet generator.
//!
//! Produces a self-contained printable HTML file with all CSS inlined and
//! graphs drawn as inline SVG.

use anyhow::{Context, Result};
use std::path::Path;

use physdrill_core::grading::answer_key;
use physdrill_core::model::{Chart, ExpectedAnswer, Problem};
use physdrill_core::worksheet::Worksheet;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML worksheet. With `include_answers` each problem is
/// followed by its answer and worked solution, and an answer key closes
/// the page.
pub fn generate_html(worksheet: &Worksheet, include_answers: bool) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>physdrill: {}</title>\n",
        html_escape(&worksheet.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&worksheet.title)));
    let seed = worksheet
        .seed
        .map(|s| format!(" | seed {s}"))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">{} problems | {}{} | {}</p>\n",
        worksheet.problems.len(),
        worksheet.created_at.format("%Y-%m-%d %H:%M UTC"),
        seed,
        worksheet.id
    ));
    html.push_str("</header>\n");

    html.push_str("<ol class=\"problems\">\n");
    for problem in &worksheet.problems {
        html.push_str(&problem_html(problem, include_answers));
    }
    html.push_str("</ol>\n");

    if include_answers {
        html.push_str("<section class=\"answer-key\">\n");
        html.push_str("<h2>Answer Key</h2>\n");
        html.push_str("<table>\n");
        html.push_str("<thead><tr><th>#</th><th>Kind</th><th>Difficulty</th><th>Answer</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for (i, problem) in worksheet.problems.iter().enumerate() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                i + 1,
                html_escape(&problem.kind),
                problem.difficulty,
                html_escape(&answer_key(&problem.answers))
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

fn problem_html(problem: &Problem, include_answers: bool) -> String {
    let mut html = String::from("<li class=\"problem\">\n");
    html.push_str(&format!(
        "<p class=\"question\">{}</p>\n",
        html_escape(&problem.question)
    ));
    if let Some(latex) = &problem.latex {
        html.push_str(&format!(
            "<pre class=\"latex\"><code>{}</code></pre>\n",
            html_escape(latex)
        ));
    }
    if !problem.charts.is_empty() {
        html.push_str("<div class=\"charts\">\n");
        for chart in &problem.charts {
            html.push_str(&chart_svg(chart));
        }
        html.push_str("</div>\n");
    }

    html.push_str("<ul class=\"answers\">\n");
    for answer in &problem.answers {
        match answer {
            ExpectedAnswer::Choice { label, options, .. } => {
                html.push_str(&format!("<li>{}:<ol type=\"A\">", html_escape(label)));
                for option in options {
                    html.push_str(&format!("<li>{}</li>", html_escape(option)));
                }
                html.push_str("</ol></li>\n");
            }
            other => {
                html.push_str(&format!(
                    "<li><span class=\"blank\"></span> {}</li>\n",
                    html_escape(other.label())
                ));
            }
        }
    }
    html.push_str("</ul>\n");

    if include_answers {
        html.push_str(&format!(
            "<p class=\"answer pass\">Answer: {}</p>\n",
            html_escape(&answer_key(&problem.answers))
        ));
        if let Some(solution) = &problem.solution {
            html.push_str(&format!(
                "<details><summary>Solution</summary><p>{}</p></details>\n",
                html_escape(solution)
            ));
        }
    }
    html.push_str("</li>\n");
    html
}

/// Render a chart as an inline SVG line plot with labelled axes.
pub fn chart_svg(chart: &Chart) -> String {
    let width = 320.0;
    let height = 200.0;
    let margin = 36.0;
    let plot_w = width - 2.0 * margin;
    let plot_h = height - 2.0 * margin;

    let (x_min, x_max) = bounds(chart.points.iter().map(|p| p.0));
    let (mut y_min, mut y_max) = bounds(chart.points.iter().map(|p| p.1));
    if chart.points.is_empty() {
        (y_min, y_max) = (0.0, 1.0);
    } else if (y_max - y_min).abs() < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }
    let sx = |x: f64| margin + (x - x_min) / (x_max - x_min).max(f64::EPSILON) * plot_w;
    let sy = |y: f64| margin + (1.0 - (y - y_min) / (y_max - y_min)) * plot_h;

    let mut svg = format!(
        "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\" class=\"chart\">\n"
    );
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"16\" font-size=\"13\" text-anchor=\"middle\" fill=\"currentColor\">{}</text>\n",
        width / 2.0,
        html_escape(&chart.title)
    ));

    // Axes; the time axis sits at zero when zero is in range.
    let axis_y = if y_min < 0.0 && y_max > 0.0 {
        sy(0.0)
    } else {
        margin + plot_h
    };
    svg.push_str(&format!(
        "  <line x1=\"{margin}\" y1=\"{axis_y:.1}\" x2=\"{:.1}\" y2=\"{axis_y:.1}\" stroke=\"currentColor\"/>\n",
        margin + plot_w
    ));
    svg.push_str(&format!(
        "  <line x1=\"{margin}\" y1=\"{margin}\" x2=\"{margin}\" y2=\"{:.1}\" stroke=\"currentColor\"/>\n",
        margin + plot_h
    ));

    let points: Vec<String> = chart
        .points
        .iter()
        .map(|&(x, y)| format!("{:.1},{:.1}", sx(x), sy(y)))
        .collect();
    svg.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"#2563eb\" stroke-width=\"2\"/>\n",
        points.join(" ")
    ));

    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"11\" text-anchor=\"middle\" fill=\"currentColor\">{}</text>\n",
        width / 2.0,
        height - 8.0,
        html_escape(&chart.x_label)
    ));
    svg.push_str(&format!(
        "  <text x=\"12\" y=\"{}\" font-size=\"11\" text-anchor=\"middle\" fill=\"currentColor\" transform=\"rotate(-90 12 {})\">{}</text>\n",
        height / 2.0,
        height / 2.0,
        html_escape(&chart.y_label)
    ));
    svg.push_str("</svg>\n");
    svg
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Write an HTML worksheet to a file.
pub fn write_html_worksheet(worksheet: &Worksheet, path: &Path, include_answers: bool) -> Result<()> {
    let html = generate_html(worksheet, include_answers);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write worksheet to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; }
}
@media print { :root { --bg: #fff; --fg: #000; } details { display: none; } }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.problem { margin: 1.5rem 0; page-break-inside: avoid; }
.answers { list-style: none; padding-left: 0; }
.blank { display: inline-block; width: 8rem; border-bottom: 1px solid var(--fg); }
.pass { background: var(--pass); padding: 0.25rem 0.5rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
pre { overflow-x: auto; padding: 0.5rem 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 0.5rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 0.5rem; }
"#;
