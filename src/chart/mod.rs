use std::io;
use std::path::Path;

use chrono::NaiveDate;

use crate::core::MonthResult;

// Matplotlib-like 2:1 canvas.
const WIDTH: i32 = 960;
const HEIGHT: i32 = 480;
const PADDING: f64 = 56.0;

const VALUE_COLOR: &str = "#1f77b4";
const INVESTMENT_COLOR: &str = "#2ca02c";
const PROFIT_COLOR: &str = "#d62728";
const MONTHLY_PROFIT_COLOR: &str = "#ff7f0e";

const MAX_DATE_TICKS: usize = 16;

struct LineSeries {
    label: &'static str,
    color: &'static str,
    values: Vec<f64>,
}

/// Renders the simulation as a standalone SVG figure: three line series over
/// the running totals, a translucent bar series for the month's profit, a
/// dated x-axis with rotated labels, and an upper-left legend. Empty input
/// produces an empty string and nothing is drawn.
pub fn render_svg(results: &[MonthResult], ticker: &str) -> String {
    if results.is_empty() {
        return String::new();
    }

    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let dates: Vec<NaiveDate> = results.iter().map(|r| r.date).collect();
    let xs = x_positions(results.len(), width);

    let lines = [
        LineSeries {
            label: "Total Value ($)",
            color: VALUE_COLOR,
            values: results.iter().map(|r| r.total_value).collect(),
        },
        LineSeries {
            label: "Total Investment ($)",
            color: INVESTMENT_COLOR,
            values: results.iter().map(|r| r.total_investment).collect(),
        },
        LineSeries {
            label: "Total Profit ($)",
            color: PROFIT_COLOR,
            values: results.iter().map(|r| r.total_profit).collect(),
        },
    ];
    let bars: Vec<f64> = results.iter().map(|r| r.monthly_profit).collect();

    let (min_v, max_v) = extent(&lines, &bars);

    let mut svg = String::new();
    svg.push_str(&svg_header(WIDTH, HEIGHT));

    draw_title(&mut svg, ticker, width);
    draw_amount_axis(&mut svg, min_v, max_v, width, height);
    draw_zero_guide(&mut svg, min_v, max_v, width, height);
    draw_bars(&mut svg, &bars, &xs, min_v, max_v, height);

    for series in &lines {
        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(&series.values)
            .map(|(x, v)| (*x, scale_value(*v, min_v, max_v, height)))
            .collect();
        svg.push_str(&polyline(&points, series.color));
    }

    draw_date_axis(&mut svg, &dates, &xs, width, height);
    draw_legend(&mut svg, &lines);

    svg.push_str("</svg>");
    svg
}

/// Renders the figure and writes it to `path`.
pub fn save_svg(results: &[MonthResult], ticker: &str, path: &Path) -> io::Result<()> {
    std::fs::write(path, render_svg(results, ticker))
}

fn svg_header(width: i32, height: i32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#
    )
}

fn draw_title(svg: &mut String, ticker: &str, width: f64) {
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="24" text-anchor="middle" font-size="16" fill="#333">Investment, Value, and Profit Over Time ({ticker})</text>"##,
        x = width / 2.0,
    ));
}

fn extent(lines: &[LineSeries], bars: &[f64]) -> (f64, f64) {
    // Bars hang from zero, so zero is always in range.
    let mut min_v = 0.0f64;
    let mut max_v = 0.0f64;

    for value in lines.iter().flat_map(|s| &s.values).chain(bars) {
        if !value.is_finite() {
            continue;
        }
        min_v = min_v.min(*value);
        max_v = max_v.max(*value);
    }

    if min_v == max_v {
        // Widen flat ranges so scaling stays defined.
        min_v -= 1.0;
        max_v += 1.0;
    }

    (min_v, max_v)
}

fn scale_value(value: f64, min_v: f64, max_v: f64, height: f64) -> f64 {
    if (max_v - min_v).abs() < f64::EPSILON {
        return height / 2.0;
    }

    let inner_height = height - 2.0 * PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + (1.0 - norm) * inner_height
}

fn x_positions(len: usize, width: f64) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![width / 2.0];
    }

    let inner_width = width - 2.0 * PADDING;
    (0..len)
        .map(|i| PADDING + inner_width * (i as f64 / (len - 1) as f64))
        .collect()
}

fn polyline(points: &[(f64, f64)], stroke: &str) -> String {
    if points.is_empty() {
        return String::new();
    }

    let coords: String = points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<polyline fill="none" stroke="{stroke}" stroke-width="1.5" points="{coords}" />"#
    )
}

fn draw_bars(svg: &mut String, values: &[f64], xs: &[f64], min_v: f64, max_v: f64, height: f64) {
    let slot = if xs.len() > 1 {
        (xs[1] - xs[0]) * 0.6
    } else {
        10.0
    };
    let bar_width = slot.max(1.0);
    let zero_y = scale_value(0.0, min_v, max_v, height);

    for (x, value) in xs.iter().zip(values) {
        let value_y = scale_value(*value, min_v, max_v, height);
        let top = value_y.min(zero_y);
        let bar_height = (value_y - zero_y).abs();
        svg.push_str(&format!(
            r#"<rect x="{x:.2}" y="{top:.2}" width="{w:.2}" height="{h:.2}" fill="{color}" fill-opacity="0.5" />"#,
            x = x - bar_width / 2.0,
            w = bar_width,
            h = bar_height,
            color = MONTHLY_PROFIT_COLOR,
        ));
    }
}

fn draw_amount_axis(svg: &mut String, min_v: f64, max_v: f64, width: f64, height: f64) {
    for step in 0..=4 {
        let value = min_v + (max_v - min_v) * step as f64 / 4.0;
        let y = scale_value(value, min_v, max_v, height);

        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#dddddd" stroke-width="0.5" />"##,
            x1 = PADDING,
            x2 = width - PADDING,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
            x = PADDING - 6.0,
            y = y + 3.0,
            label = format_amount(value),
        ));
    }
}

fn draw_zero_guide(svg: &mut String, min_v: f64, max_v: f64, width: f64, height: f64) {
    let y = scale_value(0.0, min_v, max_v, height);
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#bbbbbb" stroke-width="1" stroke-dasharray="4 3" />"##,
        x1 = PADDING,
        x2 = width - PADDING,
    ));
}

fn draw_date_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64], width: f64, height: f64) {
    let axis_y = height - PADDING;

    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = PADDING,
        x2 = width - PADDING,
        y = axis_y,
    ));

    let step = dates.len().div_ceil(MAX_DATE_TICKS).max(1);
    for (idx, date) in dates.iter().enumerate().step_by(step) {
        let x = xs[idx];
        let label = date.format("%m/%Y").to_string();

        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="#ccc" stroke-width="1" />"##,
            y1 = axis_y,
            y2 = axis_y + 4.0,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end" transform="rotate(-45 {x:.2} {y:.2})">{label}</text>"#,
            y = axis_y + 16.0,
        ));
    }
}

fn draw_legend(svg: &mut String, lines: &[LineSeries]) {
    let x = PADDING + 10.0;
    let mut y = PADDING + 14.0;

    for series in lines {
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{sy:.2}" x2="{x2:.2}" y2="{sy:.2}" stroke="{color}" stroke-width="1.5" />"#,
            x1 = x,
            x2 = x + 20.0,
            sy = y - 4.0,
            color = series.color,
        ));
        svg.push_str(&format!(
            r##"<text x="{tx:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            tx = x + 26.0,
            label = series.label,
        ));
        y += 16.0;
    }

    svg.push_str(&format!(
        r#"<rect x="{rx:.2}" y="{ry:.2}" width="20" height="8" fill="{color}" fill-opacity="0.5" />"#,
        rx = x,
        ry = y - 11.0,
        color = MONTHLY_PROFIT_COLOR,
    ));
    svg.push_str(&format!(
        r##"<text x="{tx:.2}" y="{y:.2}" text-anchor="start" fill="#333">Monthly Profit ($)</text>"##,
        tx = x + 26.0,
    ));
}

fn format_amount(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 10_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}
