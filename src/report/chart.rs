use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::model::bands::PercentileBand;
use crate::model::result::ScoredResult;
use crate::report::{ReportError, by_category, format_trimmed};
use crate::tasks::Category;
use crate::tasks::mapping::short_label;

pub const CHART_TITLE: &str = "Résultats Batterie Comprendre";

const WIDTH: u32 = 1400;
const ROW_HEIGHT: u32 = 110;
const MIN_HEIGHT: u32 = 1000;
const TITLE_HEIGHT: i32 = 80;
const LABEL_AREA_WIDTH: i32 = 420;
const LINE_HEIGHT: i32 = 17;

// Past 100 the x axis holds the score column.
const X_MAX: f64 = 120.0;
const X_TICKS: [f64; 7] = [0.0, 3.0, 15.0, 50.0, 85.0, 97.0, 100.0];
const SCORE_BOX: (f64, f64) = (105.0, 113.0);

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

fn chart_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

fn chart_height(n: usize) -> u32 {
    (n as u32 * ROW_HEIGHT + TITLE_HEIGHT as u32).max(MIN_HEIGHT)
}

/// Percentile profile as SVG: one row per task, first task at the bottom.
pub fn render_chart_svg(results: &[&ScoredResult], title: &str) -> Result<String, ReportError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, chart_height(results.len())))
            .into_drawing_area();
        draw_profile(&root, results, title)?;
    }
    Ok(svg)
}

/// Same profile rasterized to PNG. Needs a system sans-serif font.
pub fn render_chart_png(
    results: &[&ScoredResult],
    title: &str,
    path: &Path,
) -> Result<(), ReportError> {
    let root = BitMapBackend::new(path, (WIDTH, chart_height(results.len()))).into_drawing_area();
    draw_profile(&root, results, title)
}

fn draw_profile<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    results: &[&ScoredResult],
    title: &str,
) -> Result<(), ReportError> {
    let n = results.len();
    let y_top = n as f64;
    root.fill(&WHITE).map_err(chart_err)?;

    let title_style = ("sans-serif", 32)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        title.to_string(),
        ((WIDTH / 2) as i32, TITLE_HEIGHT / 2),
        title_style,
    ))
    .map_err(chart_err)?;

    let (_, body) = root.split_vertically(TITLE_HEIGHT);
    let (_, plot_area) = body.split_horizontally(LABEL_AREA_WIDTH);
    let mut chart = ChartBuilder::on(&plot_area)
        .margin_top(10)
        .margin_right(30)
        .margin_bottom(70)
        .build_cartesian_2d(0f64..X_MAX, -1f64..y_top)
        .map_err(chart_err)?;

    chart
        .draw_series(PercentileBand::ALL.into_iter().map(|band| {
            Rectangle::new(
                [(band.lower_bound(), -1.0), (band.upper_bound(), y_top)],
                rgb(band.rgb()).mix(0.2).filled(),
            )
        }))
        .map_err(chart_err)?;

    chart
        .draw_series(
            dashed_segments(50.0, -1.0, y_top, 0.25)
                .into_iter()
                .map(|seg| PathElement::new(seg, BLACK.stroke_width(1))),
        )
        .map_err(chart_err)?;

    for category in Category::ALL {
        let points: Vec<(f64, f64)> = results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.category == category)
            .map(|(i, r)| (r.percentile, i as f64))
            .collect();
        if points.is_empty() {
            continue;
        }
        let color = rgb(category.rgb());
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(chart_err)?;
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 7, color.filled())))
            .map_err(chart_err)?;
    }

    let score_style = ("sans-serif", 18)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for (i, r) in results.iter().enumerate() {
        let y = i as f64;
        let corners = [(SCORE_BOX.0, y - 0.3), (SCORE_BOX.1, y + 0.3)];
        chart
            .draw_series([
                Rectangle::new(corners, WHITE.filled()),
                Rectangle::new(corners, rgb(r.category.rgb()).stroke_width(2)),
            ])
            .map_err(chart_err)?;
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{:.0}", r.score),
                ((SCORE_BOX.0 + SCORE_BOX.1) / 2.0, y),
                score_style.clone(),
            )))
            .map_err(chart_err)?;
    }

    let tick_style = ("sans-serif", 16)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for tick in X_TICKS {
        let (px, py) = chart.backend_coord(&(tick, -1.0));
        root.draw(&PathElement::new(
            vec![(px, py), (px, py + 6)],
            BLACK.stroke_width(1),
        ))
        .map_err(chart_err)?;
        root.draw(&Text::new(
            format_trimmed(tick),
            (px, py + 10),
            tick_style.clone(),
        ))
        .map_err(chart_err)?;
    }
    let (axis_x, axis_y) = chart.backend_coord(&(50.0, -1.0));
    root.draw(&Text::new(
        "Percentiles (%)".to_string(),
        (axis_x, axis_y + 40),
        ("sans-serif", 18)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
    ))
    .map_err(chart_err)?;

    for (i, r) in results.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(0.0, i as f64));
        let label = short_label(&r.task);
        let lines: Vec<&str> = label.lines().collect();
        let style = ("sans-serif", 15)
            .into_font()
            .style(FontStyle::Bold)
            .color(&rgb(r.category.rgb()))
            .pos(Pos::new(HPos::Right, VPos::Center));
        let offset = (lines.len() as i32 - 1) * LINE_HEIGHT / 2;
        for (k, line) in lines.iter().enumerate() {
            root.draw(&Text::new(
                line.to_string(),
                (px - 12, py - offset + k as i32 * LINE_HEIGHT),
                style.clone(),
            ))
            .map_err(chart_err)?;
        }
    }

    for (category, _) in by_category(results) {
        let Some(first) = results.iter().position(|r| r.category == category) else {
            continue;
        };
        let last = results
            .iter()
            .rposition(|r| r.category == category)
            .unwrap_or(first);
        let (_, y_low) = chart.backend_coord(&(0.0, first as f64 - 0.4));
        let (_, y_high) = chart.backend_coord(&(0.0, last as f64 + 0.4));
        let color = rgb(category.rgb());
        root.draw(&Rectangle::new([(16, y_high), (30, y_low)], color.filled()))
            .map_err(chart_err)?;
        root.draw(&Text::new(
            category.label().to_uppercase(),
            (38, (y_high + y_low) / 2),
            ("sans-serif", 16)
                .into_font()
                .style(FontStyle::Bold)
                .color(&color)
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(chart_err)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

fn dashed_segments(x: f64, from: f64, to: f64, step: f64) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut y = from;
    while y < to {
        out.push(vec![(x, y), (x, (y + step * 0.6).min(to))]);
        y += step;
    }
    out
}
