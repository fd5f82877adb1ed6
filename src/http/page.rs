//! Server-rendered dashboard page with inline SVG charts.

use std::f64::consts::PI;
use std::fmt::Write as _;

use crate::color::{generate_palette, to_hex, ColorMap};
use crate::data::filter::{AggregateTable, ScatterPoint};
use crate::data::model::{site_label, PayloadRange, SiteSelector};

const PIE_WIDTH: f64 = 520.0;
const PIE_HEIGHT: f64 = 340.0;
const PIE_RADIUS: f64 = 130.0;

const SCATTER_WIDTH: f64 = 820.0;
const SCATTER_HEIGHT: f64 = 340.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 160.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// Everything the dashboard page shows for one request.
pub struct DashboardView<'a> {
    pub title: &'a str,
    pub sites: &'a [String],
    pub selector: &'a SiteSelector,
    pub range: PayloadRange,
    pub bounds: PayloadRange,
    pub pie: &'a AggregateTable,
    pub pie_title: &'a str,
    pub points: &'a [ScatterPoint],
    pub scatter_title: &'a str,
    pub colors: &'a ColorMap,
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full HTML page.
pub fn dashboard_page(view: &DashboardView<'_>) -> String {
    let mut options = String::new();
    let all_selected = if *view.selector == SiteSelector::All { " selected" } else { "" };
    let _ = write!(
        options,
        r#"<option value="{}"{all_selected}>All Sites</option>"#,
        SiteSelector::ALL
    );
    for site in view.sites {
        let selected = if view.selector.as_str() == site { " selected" } else { "" };
        let label = site_label(site).unwrap_or(site.as_str());
        let _ = write!(
            options,
            r#"<option value="{}"{selected}>{}</option>"#,
            escape_html(site),
            escape_html(label)
        );
    }

    let pie = pie_svg(view.pie, view.pie_title);
    let scatter = scatter_svg(view.points, view.range, view.bounds, view.scatter_title, view.colors);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; margin: 24px; }}
        h1 {{ text-align: center; color: #503D36; font-size: 40px; }}
        form {{ display: flex; gap: 16px; align-items: end; flex-wrap: wrap; margin-bottom: 16px; }}
        label {{ display: flex; flex-direction: column; font-size: 14px; color: #444; }}
        select, input {{ padding: 4px; font-size: 14px; }}
        .chart {{ margin: 12px 0; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <form method="get" action="/">
        <label>Launch site
            <select name="site" onchange="this.form.submit()">{options}</select>
        </label>
        <label>Payload range (kg) from
            <input type="number" name="low" step="any" min="{min}" max="{max}" value="{low}">
        </label>
        <label>to
            <input type="number" name="high" step="any" min="{min}" max="{max}" value="{high}">
        </label>
        <button type="submit">Update</button>
    </form>
    <div class="chart">{pie}</div>
    <div class="chart">{scatter}</div>
</body>
</html>
"#,
        title = escape_html(view.title),
        min = view.bounds.low,
        max = view.bounds.high,
        low = view.range.low,
        high = view.range.high,
    )
}

fn svg_open(width: f64, height: f64, title: &str) -> String {
    format!(
        r##"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg" style="background:white">
  <text x="{}" y="24" text-anchor="middle" font-size="16" fill="#333">{}</text>
"##,
        width / 2.0,
        escape_html(title)
    )
}

fn no_data(x: f64, y: f64) -> String {
    format!(r##"  <text x="{x}" y="{y}" text-anchor="middle" font-size="14" fill="#999">No data</text>
"##)
}

/// Pie chart. Zero-count categories stay in the legend but draw no wedge.
pub fn pie_svg(table: &AggregateTable, title: &str) -> String {
    let mut svg = svg_open(PIE_WIDTH, PIE_HEIGHT, title);
    let (cx, cy) = (PIE_RADIUS + 40.0, PIE_HEIGHT / 2.0 + 10.0);
    let total = table.total();
    let colors = generate_palette(table.len());

    if total == 0 {
        svg.push_str(&no_data(cx, cy));
    } else {
        let mut angle = -PI / 2.0;
        for (slice, color) in table.slices().iter().zip(&colors) {
            if slice.count == 0 {
                continue;
            }
            let fill = to_hex(*color);
            if slice.count == total {
                let _ = writeln!(
                    svg,
                    r##"  <circle cx="{cx}" cy="{cy}" r="{PIE_RADIUS}" fill="{fill}" stroke="#fff" stroke-width="1"/>"##
                );
                break;
            }
            let sweep = slice.count as f64 / total as f64 * 2.0 * PI;
            let (x1, y1) = (cx + PIE_RADIUS * angle.cos(), cy + PIE_RADIUS * angle.sin());
            angle += sweep;
            let (x2, y2) = (cx + PIE_RADIUS * angle.cos(), cy + PIE_RADIUS * angle.sin());
            let large_arc = u8::from(sweep > PI);
            let _ = writeln!(
                svg,
                r##"  <path d="M{cx:.1},{cy:.1} L{x1:.1},{y1:.1} A{PIE_RADIUS},{PIE_RADIUS} 0 {large_arc},1 {x2:.1},{y2:.1} Z" fill="{fill}" stroke="#fff" stroke-width="1"><title>{}: {}</title></path>"##,
                escape_html(&slice.label),
                slice.count
            );
        }
    }

    let legend_x = cx + PIE_RADIUS + 40.0;
    for (i, (slice, color)) in table.slices().iter().zip(&colors).enumerate() {
        let y = 70.0 + i as f64 * 22.0;
        let pct = if total == 0 {
            0.0
        } else {
            slice.count as f64 / total as f64 * 100.0
        };
        let _ = writeln!(
            svg,
            r##"  <rect x="{legend_x}" y="{}" width="12" height="12" fill="{}"/><text x="{}" y="{y}" font-size="13" fill="#333">{} ({}, {pct:.1}%)</text>"##,
            y - 11.0,
            to_hex(*color),
            legend_x + 18.0,
            escape_html(&slice.label),
            slice.count
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Scatter chart of payload (x) against the outcome flag (y), coloured by
/// booster category. The x axis spans the selected range, or the dataset
/// bounds when the range is malformed.
pub fn scatter_svg(
    points: &[ScatterPoint],
    range: PayloadRange,
    bounds: PayloadRange,
    title: &str,
    colors: &ColorMap,
) -> String {
    let mut svg = svg_open(SCATTER_WIDTH, SCATTER_HEIGHT, title);

    let domain = if range.is_valid() { range } else { bounds };
    let (x_min, x_max) = if domain.span() > 0.0 {
        (domain.low, domain.high)
    } else {
        (domain.low - 1.0, domain.high + 1.0)
    };
    let plot_w = SCATTER_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = SCATTER_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let sx = |v: f64| MARGIN_LEFT + (v - x_min) / (x_max - x_min) * plot_w;
    // y spans -0.25..=1.25 so both outcome rows sit inside the frame.
    let sy = |v: f64| MARGIN_TOP + (1.25 - v) / 1.5 * plot_h;

    // Frame and axes
    let _ = writeln!(
        svg,
        r##"  <rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{plot_w}" height="{plot_h}" fill="#f8f9fb" stroke="#ccc"/>"##
    );
    for (flag, label) in [(0.0, "0 (Failure)"), (1.0, "1 (Success)")] {
        let y = sy(flag);
        let _ = writeln!(
            svg,
            r##"  <line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e5e7eb"/><text x="{:.1}" y="{:.1}" text-anchor="end" font-size="12" fill="#555">{label}</text>"##,
            MARGIN_LEFT + plot_w,
            MARGIN_LEFT - 6.0,
            y + 4.0
        );
    }
    for i in 0..=4 {
        let v = x_min + (x_max - x_min) * i as f64 / 4.0;
        let x = sx(v);
        let _ = writeln!(
            svg,
            r##"  <text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="12" fill="#555">{v:.0}</text>"##,
            MARGIN_TOP + plot_h + 18.0
        );
    }
    let _ = writeln!(
        svg,
        r##"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13" fill="#333">Payload Mass (kg)</text>"##,
        MARGIN_LEFT + plot_w / 2.0,
        SCATTER_HEIGHT - 8.0
    );

    if points.is_empty() {
        svg.push_str(&no_data(MARGIN_LEFT + plot_w / 2.0, MARGIN_TOP + plot_h / 2.0));
    }
    for p in points {
        let flag = p.outcome.flag();
        let _ = writeln!(
            svg,
            r##"  <circle cx="{:.1}" cy="{:.1}" r="5" fill="{}" fill-opacity="0.8" stroke="#333" stroke-width="0.5"><title>{} kg, class {flag}, {} @ {}</title></circle>"##,
            sx(p.payload_mass_kg),
            sy(f64::from(flag)),
            to_hex(colors.color_for(&p.booster_version_category)),
            p.payload_mass_kg,
            escape_html(&p.booster_version_category),
            escape_html(&p.launch_site)
        );
    }

    // Legend
    let legend_x = MARGIN_LEFT + plot_w + 20.0;
    let _ = writeln!(
        svg,
        r##"  <text x="{legend_x}" y="{}" font-size="13" fill="#333">Booster Version Category</text>"##,
        MARGIN_TOP + 4.0
    );
    for (i, (label, color)) in colors.legend_entries().into_iter().enumerate() {
        let y = MARGIN_TOP + 26.0 + i as f64 * 20.0;
        let _ = writeln!(
            svg,
            r##"  <circle cx="{}" cy="{}" r="5" fill="{}"/><text x="{}" y="{}" font-size="12" fill="#333">{}</text>"##,
            legend_x + 6.0,
            y - 4.0,
            to_hex(color),
            legend_x + 16.0,
            y,
            escape_html(&label)
        );
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::{compute_pie_data, compute_scatter_data};
    use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("A", 1500.0, Outcome::Failure, "FT"),
            LaunchRecord::new("B<1>", 800.0, Outcome::Success, "FT"),
        ])
        .unwrap()
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn pie_draws_one_wedge_per_nonzero_slice() {
        let pie = compute_pie_data(&dataset(), &SiteSelector::Site("A".into()));
        let svg = pie_svg(&pie, "t");
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("Success (1, 50.0%)"));
    }

    #[test]
    fn single_category_pie_is_a_full_circle() {
        let pie = compute_pie_data(&dataset(), &SiteSelector::Site("B<1>".into()));
        let svg = pie_svg(&pie, "t");
        assert!(!svg.contains("<path"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn empty_pie_says_no_data() {
        let pie = compute_pie_data(&dataset(), &SiteSelector::Site("nowhere".into()));
        assert!(pie_svg(&pie, "t").contains("No data"));
    }

    #[test]
    fn scatter_draws_a_marker_per_point() {
        let ds = dataset();
        let colors = ColorMap::new(&ds.booster_categories());
        let range = PayloadRange::new(0.0, 1000.0);
        let points = compute_scatter_data(&ds, &SiteSelector::All, range);
        let svg = scatter_svg(&points, range, ds.payload_bounds(), "t", &colors);
        assert_eq!(svg.matches("<title>").count(), 2);
        assert!(svg.contains("B&lt;1&gt;"));
        assert!(!svg.contains("No data"));
    }

    #[test]
    fn unbounded_range_draws_over_dataset_bounds() {
        let ds = dataset();
        let colors = ColorMap::new(&ds.booster_categories());
        let range = PayloadRange::new(f64::NEG_INFINITY, 1000.0);
        let points = compute_scatter_data(&ds, &SiteSelector::All, range);
        assert!(points.is_empty());

        let svg = scatter_svg(&points, range, ds.payload_bounds(), "t", &colors);
        assert!(svg.contains("No data"));
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
        assert!(svg.contains(">500</text>"));
        assert!(svg.contains(">1500</text>"));
    }

    #[test]
    fn page_marks_selected_site() {
        let ds = dataset();
        let colors = ColorMap::new(&BTreeSet::new());
        let selector = SiteSelector::Site("A".into());
        let pie = compute_pie_data(&ds, &selector);
        let view = DashboardView {
            title: "Launches",
            sites: ds.sites(),
            selector: &selector,
            range: ds.payload_bounds(),
            bounds: ds.payload_bounds(),
            pie: &pie,
            pie_title: "pie",
            points: &[],
            scatter_title: "scatter",
            colors: &colors,
        };
        let html = dashboard_page(&view);
        assert!(html.contains(r#"<option value="A" selected>A</option>"#));
        assert!(html.contains(r#"<option value="ALL">All Sites</option>"#));
        assert!(html.contains(r#"value="1500""#));
    }
}
