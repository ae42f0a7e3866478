//! Revenue Chart
//!
//! Plain SVG line chart of achieved revenue. Points are spread evenly along
//! the x axis in date order; the y axis runs from 0 to the larger of the
//! reference line and the highest point.

use dashboard_domain::analytics::RevenuePoint;
use leptos::prelude::*;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 240.0;
const PADDING: f64 = 24.0;

/// Upper bound of the y axis
pub fn y_max(series: &[&[RevenuePoint]], reference: Option<f64>) -> f64 {
    let highest = series
        .iter()
        .flat_map(|s| s.iter())
        .map(|p| p.value)
        .fold(reference.unwrap_or(0.0), f64::max);
    if highest > 0.0 {
        highest
    } else {
        1.0
    }
}

fn y_for(value: f64, max: f64) -> f64 {
    HEIGHT - PADDING - (value / max) * (HEIGHT - 2.0 * PADDING)
}

/// SVG path `d` attribute; empty for an empty series
pub fn line_path(points: &[RevenuePoint], max: f64) -> String {
    let step = match points.len() {
        0 => return String::new(),
        1 => 0.0,
        n => (WIDTH - 2.0 * PADDING) / (n - 1) as f64,
    };
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let command = if i == 0 { 'M' } else { 'L' };
            format!("{command}{:.1},{:.1}", PADDING + step * i as f64, y_for(p.value, max))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn RevenueChart(
    #[prop(into)] series: Signal<Vec<RevenuePoint>>,
    /// Second series drawn for comparison
    #[prop(into, optional)]
    compare: Option<Signal<Vec<RevenuePoint>>>,
    /// Horizontal reference line, e.g. the total target
    #[prop(into, optional)]
    reference: Option<Signal<f64>>,
) -> impl IntoView {
    let geometry = move || {
        let first = series.get();
        let second = compare.map(|c| c.get()).unwrap_or_default();
        let reference = reference.map(|r| r.get());
        let max = y_max(&[first.as_slice(), second.as_slice()], reference);
        (line_path(&first, max), line_path(&second, max), reference.map(|r| y_for(r, max)), max)
    };

    view! {
        <svg class="revenue-chart" viewBox=format!("0 0 {WIDTH} {HEIGHT}")>
            {move || {
                let (primary, secondary, reference_y, max) = geometry();
                let baseline = format!("{:.1}", HEIGHT - PADDING);
                let left = format!("{PADDING:.1}");
                let right = format!("{:.1}", WIDTH - PADDING);
                view! {
                    <line class="chart-axis" x1=left.clone() y1=baseline.clone() x2=right.clone() y2=baseline />
                    <text class="chart-label" x=left.clone() y=format!("{:.1}", PADDING - 8.0)>{format!("{max:.0}")}</text>
                    {reference_y.map(|y| {
                        let y = format!("{y:.1}");
                        view! { <line class="chart-reference" x1=left x2=right y1=y.clone() y2=y /> }
                    })}
                    <path class="chart-line" d=primary fill="none" />
                    <path class="chart-line chart-line-compare" d=secondary fill="none" />
                }
            }}
        </svg>
        <Show when=move || series.with(Vec::is_empty)>
            <p class="empty-state">"No progress reported in this period."</p>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, value: f64) -> RevenuePoint {
        RevenuePoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            value,
        }
    }

    #[test]
    fn test_path_spans_the_plot_area() {
        let points = [point(1, 0.0), point(2, 50.0), point(3, 100.0)];
        assert_eq!(line_path(&points, 100.0), "M24.0,216.0 L300.0,120.0 L576.0,24.0");
        assert_eq!(line_path(&[], 100.0), "");
        assert_eq!(line_path(&[point(1, 100.0)], 100.0), "M24.0,24.0");
    }

    #[test]
    fn test_y_axis_covers_reference_and_points() {
        let points = vec![point(1, 40.0), point(2, 90.0)];
        let peak = vec![point(3, 700.0)];
        assert_eq!(y_max(&[points.as_slice()], Some(500.0)), 500.0);
        assert_eq!(y_max(&[points.as_slice(), peak.as_slice()], Some(500.0)), 700.0);
        assert_eq!(y_max(&[], None), 1.0);
    }
}
