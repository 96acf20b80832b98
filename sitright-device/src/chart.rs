//! Score history chart
//!
//! Renders the history snapshot as a small self-contained SVG line chart.
//! Kept dependency-free on purpose: the chart is a pure consumer of the
//! snapshot, and an SVG polyline is all the `graph` reply needs.

use sitright_core::{HistorySummary, ScorePoint};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 240.0;
const MARGIN: f64 = 30.0;

/// Render a score-over-time line chart with a summary footer
///
/// Callers must not pass an empty snapshot; the `graph` command answers
/// empty history with a text reply instead of a render.
pub fn render(points: &[ScorePoint], summary: &HistorySummary) -> String {
    debug_assert!(!points.is_empty());

    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;
    let step = if points.len() > 1 {
        plot_w / (points.len() - 1) as f64
    } else {
        0.0
    };

    let mut polyline = String::new();
    for (i, point) in points.iter().enumerate() {
        let x = MARGIN + step * i as f64;
        // Score 100 at the top, 0 at the bottom
        let y = MARGIN + plot_h * (1.0 - point.score / 100.0);
        if i > 0 {
            polyline.push(' ');
        }
        polyline.push_str(&format!("{x:.1},{y:.1}"));
    }

    let footer = format!(
        "{} ticks · latest {:.2} · mean {:.2} · min {:.2} · max {:.2}",
        summary.count, summary.latest, summary.mean, summary.min, summary.max
    );

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<rect width="{w}" height="{h}" fill="white"/>"#,
            r#"<text x="{tx}" y="18" font-family="sans-serif" font-size="13">Posture Score Over Time</text>"#,
            r#"<line x1="{m}" y1="{m}" x2="{m}" y2="{by}" stroke="black"/>"#,
            r#"<line x1="{m}" y1="{by}" x2="{rx}" y2="{by}" stroke="black"/>"#,
            r#"<text x="4" y="{m}" font-family="sans-serif" font-size="10">100</text>"#,
            r#"<text x="4" y="{by}" font-family="sans-serif" font-size="10">0</text>"#,
            r#"<polyline points="{points}" fill="none" stroke="blue" stroke-width="1.5"/>"#,
            r#"<text x="{m}" y="{fy}" font-family="sans-serif" font-size="10">{footer}</text>"#,
            "</svg>"
        ),
        w = WIDTH,
        h = HEIGHT,
        m = MARGIN,
        by = HEIGHT - MARGIN,
        rx = WIDTH - MARGIN,
        tx = WIDTH / 2.0 - 80.0,
        fy = HEIGHT - 8.0,
        points = polyline,
        footer = footer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitright_core::ScoreHistory;

    fn history_of(scores: &[f64]) -> ScoreHistory {
        let mut history = ScoreHistory::new();
        for (i, score) in scores.iter().enumerate() {
            history.append(i as u64 * 1_000, *score);
        }
        history
    }

    fn render_history(history: &ScoreHistory) -> String {
        render(&history.snapshot(), &history.summary().unwrap())
    }

    fn polyline_of(svg: &str) -> &str {
        svg.split("points=\"")
            .nth(1)
            .and_then(|s| s.split('"').next())
            .unwrap()
    }

    #[test]
    fn renders_one_vertex_per_point() {
        let history = history_of(&[100.0, 99.0, 98.0, 97.0, 96.0]);

        let svg = render_history(&history);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(polyline_of(&svg).split(' ').count(), 5);
    }

    #[test]
    fn higher_scores_plot_higher() {
        let svg = render_history(&history_of(&[100.0, 0.0]));
        let ys: Vec<f64> = polyline_of(&svg)
            .split(' ')
            .map(|pair| pair.split(',').nth(1).unwrap().parse().unwrap())
            .collect();

        // SVG y grows downward
        assert!(ys[0] < ys[1]);
    }

    #[test]
    fn footer_carries_summary_statistics() {
        let svg = render_history(&history_of(&[100.0, 90.0, 95.0]));

        assert!(svg.contains("3 ticks"), "{svg}");
        assert!(svg.contains("latest 95.00"), "{svg}");
        assert!(svg.contains("min 90.00"), "{svg}");
        assert!(svg.contains("max 100.00"), "{svg}");
    }

    #[test]
    fn single_point_still_renders() {
        let svg = render_history(&history_of(&[50.0]));
        assert!(svg.contains("polyline"));
    }
}
