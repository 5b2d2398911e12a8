//! SVG doughnut charts for the dashboard. Slices are drawn as stroked circles
//! whose circumference is 100, so dash lengths are percentages.

use crate::dashboard::{percent, ItemTally};
use crate::locale;
use leptos::*;

const RADIUS: &str = "15.9155";
const PALETTE: &[&str] = &[
    "#4f46e5", "#10b981", "#f59e0b", "#ef4444", "#3b82f6", "#8b5cf6", "#ec4899", "#64748b",
    "#06b6d4", "#84cc16",
];
pub const SATISFIED_COLOR: &str = "#10b981";
pub const UNSATISFIED_COLOR: &str = "#ef4444";

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// Offset from twelve o'clock, in percent of the ring.
    pub start: f64,
    pub share: f64,
    pub color: &'static str,
}

/// Empty slices are skipped but still consume their color.
pub fn donut_slices(values: &[u32], colors: &[&'static str]) -> Vec<Slice> {
    let total: u32 = values.iter().sum();
    if total == 0 || colors.is_empty() {
        return Vec::new();
    }
    let mut start = 0.0;
    let mut slices = Vec::new();
    for (i, value) in values.iter().enumerate() {
        if *value == 0 {
            continue;
        }
        let share = *value as f64 * 100.0 / total as f64;
        slices.push(Slice {
            start,
            share,
            color: colors[i % colors.len()],
        });
        start += share;
    }
    slices
}

#[component]
fn Donut(slices: Vec<Slice>, total: u32) -> impl IntoView {
    view! {
        <svg viewBox="0 0 42 42" class="donut" role="img">
            <circle cx="21" cy="21" r=RADIUS fill="transparent" stroke="#e5e7eb" stroke-width="6"/>
            {slices
                .into_iter()
                .map(|slice| view! {
                    <circle
                        cx="21"
                        cy="21"
                        r=RADIUS
                        fill="transparent"
                        stroke=slice.color
                        stroke-width="6"
                        stroke-dasharray=format!("{:.2} {:.2}", slice.share, 100.0 - slice.share)
                        stroke-dashoffset=format!("{:.2}", 25.0 - slice.start)
                    />
                })
                .collect_view()}
            <text x="21" y="23" text-anchor="middle" class="donut-total">{total}</text>
        </svg>
    }
}

/// One doughnut for a class: how many ratings each item received.
#[component]
pub fn ClassSummaryChart(class_name: String, tallies: Vec<(String, ItemTally)>) -> impl IntoView {
    let totals: Vec<u32> = tallies.iter().map(|(_, t)| t.total()).collect();
    let slices = donut_slices(&totals, PALETTE);
    let total = totals.iter().sum::<u32>();

    let legend = tallies
        .into_iter()
        .enumerate()
        .map(|(i, (item, t))| {
            let color = PALETTE[i % PALETTE.len()];
            view! {
                <li>
                    <span class="swatch" style=format!("background:{}", color)></span>
                    {item}
                    <span class="legend-counts">
                        {format!(" {} / {}", t.satisfied, t.unsatisfied)}
                    </span>
                </li>
            }
        })
        .collect_view();

    view! {
        <figure class="chart summary-chart">
            <figcaption>{format!("{} {}", locale::CLASS_PREFIX, class_name)}</figcaption>
            <Donut slices=slices total=total/>
            <ul class="legend">{legend}</ul>
        </figure>
    }
}

/// One doughnut per rating item, satisfied against unsatisfied.
#[component]
pub fn ItemDetailCharts(tallies: Vec<(String, ItemTally)>) -> impl IntoView {
    let colors = [SATISFIED_COLOR, UNSATISFIED_COLOR];
    tallies
        .into_iter()
        .map(|(item, t)| {
            let slices = donut_slices(&[t.satisfied, t.unsatisfied], &colors);
            let total = t.total();
            view! {
                <figure class="chart detail-chart">
                    <figcaption>{item}</figcaption>
                    <Donut slices=slices total=total/>
                    <ul class="legend">
                        <li>
                            <span class="swatch" style=format!("background:{}", SATISFIED_COLOR)></span>
                            {format!("{}: {} ({}%)", locale::SATISFIED, t.satisfied, percent(t.satisfied, total))}
                        </li>
                        <li>
                            <span class="swatch" style=format!("background:{}", UNSATISFIED_COLOR)></span>
                            {format!("{}: {} ({}%)", locale::UNSATISFIED, t.unsatisfied, percent(t.unsatisfied, total))}
                        </li>
                    </ul>
                </figure>
            }
        })
        .collect_view()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_whole_ring() {
        let slices = donut_slices(&[1, 3], &[SATISFIED_COLOR, UNSATISFIED_COLOR]);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].share, 25.0);
        assert_eq!(slices[1].start, 25.0);
        assert_eq!(slices[1].share, 75.0);
        assert_eq!(slices[1].color, UNSATISFIED_COLOR);
    }

    #[test]
    fn empty_values_keep_their_color_slot() {
        let slices = donut_slices(&[0, 2], &[SATISFIED_COLOR, UNSATISFIED_COLOR]);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].color, UNSATISFIED_COLOR);
        assert_eq!(slices[0].share, 100.0);
    }

    #[test]
    fn nothing_to_draw_without_ratings() {
        assert!(donut_slices(&[0, 0], PALETTE).is_empty());
        assert!(donut_slices(&[], PALETTE).is_empty());
    }

    #[test]
    fn palette_wraps_around() {
        let values = vec![1; PALETTE.len() + 1];
        let slices = donut_slices(&values, PALETTE);
        assert_eq!(slices.last().map(|s| s.color), Some(PALETTE[0]));
    }
}
