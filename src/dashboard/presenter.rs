//! Text rendering of a [`View`].
//!
//! The output is organised in the same blocks as the dashboard: key metrics, the table of
//! regions, the Top-N bar chart, the ranking and a short description of the data.

use crate::dashboard::io_common::format_thousands;
use crate::dashboard::*;

const BAR_WIDTH: usize = 40;
const RULE_WIDTH: usize = 56;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Style {
    /// Use ANSI colours for the bar chart.
    pub color: bool,
}

impl Style {
    pub const PLAIN: Style = Style { color: false };
}

/// ANSI 256-colour codes sampled along each colour scale, from low to high values.
fn palette(theme: Theme) -> [u8; 5] {
    match theme {
        Theme::Plotly => [20, 57, 93, 165, 218],
        Theme::Viridis => [53, 61, 30, 71, 226],
        Theme::Cividis => [17, 60, 245, 143, 220],
        Theme::Blues => [189, 153, 111, 68, 25],
        Theme::Turbo => [54, 33, 48, 226, 196],
    }
}

/// Terminal columns taken by the string. Hangul and other wide characters take two.
pub fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| match c as u32 {
            0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6 => 2,
            _ => 1,
        })
        .sum()
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn pad_right(s: &str, width: usize) -> String {
    let w = display_width(s);
    let mut res = s.to_string();
    for _ in w..width {
        res.push(' ');
    }
    res
}

fn format_ratio(x: f64) -> String {
    format!("{:0.1} %", x)
}

fn section(out: &mut String, title: &str) {
    out.push('\n');
    let rule = "-".repeat(RULE_WIDTH.saturating_sub(display_width(title) + 4));
    line(out, &format!("-- {} {}", title, rule));
}

pub fn render_view(view: &View, style: Style) -> String {
    match view {
        View::FileNotFound { path } => format!(
            "File not found: {}\nEnter the exact path of the spreadsheet (--input, or `path <file>` in a session) to enable the dashboard.\n",
            path
        ),
        View::Dashboard(dv) => render_dashboard(dv, style),
    }
}

pub fn render_dashboard(view: &DashboardView, style: Style) -> String {
    let mut out = String::new();
    render_header(&mut out, view);
    render_metrics(&mut out, &view.summary);
    render_region_table(&mut out, &view.summary);
    render_bar_chart(&mut out, &view.summary, view.theme, style);
    render_ranking(&mut out, &view.summary);
    render_about(&mut out);
    out.push('\n');
    line(&mut out, &format!("(c) {} Regional Festival Dashboard", view.year));
    out
}

fn render_header(out: &mut String, view: &DashboardView) {
    let title = format!("{} Regional Festival Dashboard", view.year);
    line(out, &"=".repeat(RULE_WIDTH));
    line(out, &format!("  {}", title));
    line(out, &"=".repeat(RULE_WIDTH));
    line(
        out,
        &format!(
            "Source: {} [{}]  |  Year: {}  |  Theme: {}",
            view.source,
            view.sheet,
            view.year,
            view.theme.name()
        ),
    );
    line(
        out,
        &format!(
            "Selected regions: {}/{}",
            view.summary.selected_regions, view.summary.available_regions
        ),
    );
}

fn metric(out: &mut String, label: &str, value: &str) {
    line(out, &format!("{}{}", pad_right(label, 24), value));
}

fn render_metrics(out: &mut String, s: &DashboardSummary) {
    section(out, "Key metrics");
    let total = if s.total > 0 {
        format!("{} festivals", format_thousands(s.total))
    } else {
        "—".to_string()
    };
    metric(out, "Total festivals", &total);
    if let Some(r) = &s.max_region {
        metric(
            out,
            "Most festivals",
            &format!("{} ({})", r.region, format_thousands(r.festival_count)),
        );
    }
    if let Some(r) = &s.min_region {
        metric(
            out,
            "Fewest festivals",
            &format!("{} ({})", r.region, format_thousands(r.festival_count)),
        );
    }
    metric(out, "Capital area", &format_ratio(s.capital.capital_ratio));
    metric(out, "Outside capital area", &format_ratio(s.capital.non_capital_ratio));
}

fn region_column_width(names: &[&str]) -> usize {
    names
        .iter()
        .map(|n| display_width(n))
        .max()
        .unwrap_or(0)
        .max(display_width("Region"))
        + 2
}

fn render_region_table(out: &mut String, s: &DashboardSummary) {
    section(out, "Regions");
    if s.shares.is_empty() {
        line(out, "No region selected.");
        return;
    }
    let names: Vec<&str> = s.shares.iter().map(|r| r.region.as_str()).collect();
    let w = region_column_width(&names);
    line(
        out,
        &format!("{}{:>10}{:>10}", pad_right("Region", w), "Festivals", "Share(%)"),
    );
    for r in s.shares.iter() {
        line(
            out,
            &format!(
                "{}{:>10}{:>10.1}",
                pad_right(&r.region, w),
                format_thousands(r.festival_count),
                r.share
            ),
        );
    }
}

/// The bar length is proportional to the count, relative to the first (largest) entry.
fn bar_length(count: u64, max: u64) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    (((count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize).max(1)
}

fn bar_colour(count: u64, max: u64, theme: Theme) -> u8 {
    let colours = palette(theme);
    if max == 0 {
        return colours[0];
    }
    let idx = ((count as f64 / max as f64) * (colours.len() - 1) as f64).round() as usize;
    colours[idx.min(colours.len() - 1)]
}

fn render_bar_chart(out: &mut String, s: &DashboardSummary, theme: Theme, style: Style) {
    section(out, &format!("Top {} regions by festivals", s.top_n));
    let top = s.top();
    if top.is_empty() {
        line(out, "Nothing to display. Check the region filter.");
        return;
    }
    let max = top.iter().map(|r| r.festival_count).max().unwrap_or(0);
    let names: Vec<&str> = top.iter().map(|r| r.region.as_str()).collect();
    let w = region_column_width(&names);
    for r in top {
        let bar = "█".repeat(bar_length(r.festival_count, max));
        let bar = if style.color && !bar.is_empty() {
            format!(
                "\x1b[38;5;{}m{}\x1b[0m",
                bar_colour(r.festival_count, max, theme),
                bar
            )
        } else {
            bar
        };
        line(
            out,
            &format!(
                "{}{} {}",
                pad_right(&r.region, w),
                bar,
                format_thousands(r.festival_count)
            ),
        );
    }
}

fn render_ranking(out: &mut String, s: &DashboardSummary) {
    section(out, "Ranking");
    let top = s.top();
    if top.is_empty() {
        line(out, "No region selected.");
        return;
    }
    let names: Vec<&str> = top.iter().map(|r| r.region.as_str()).collect();
    let w = region_column_width(&names);
    line(
        out,
        &format!("{:>3}  {}{:>10}", "#", pad_right("Region", w), "Festivals"),
    );
    for r in top {
        line(
            out,
            &format!(
                "{:>3}  {}{:>10}",
                r.rank,
                pad_right(&r.region, w),
                format_thousands(r.festival_count)
            ),
        );
    }
}

fn render_about(out: &mut String) {
    section(out, "About");
    line(out, "Data: regional festival plans reported by the local governments (as of 03-21).");
    line(out, "  Total festivals: sum over the selected regions.");
    line(out, "  Most / fewest festivals: by number of festivals per region.");
    line(out, "  Capital area: Seoul (서울) + Gyeonggi (경기) + Incheon (인천) over the total.");
    line(out, "Map: no GeoJSON of the provinces is loaded, the Top-N bar chart stands in for a choropleth.");
    line(out, "  A choropleth needs the region names matched to the province property of the GeoJSON.");
    line(out, "Trends will be shown here once plans for several years are available.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use festival_stats::builder::table_from_pairs;

    fn view(selection: Option<&[String]>) -> DashboardView {
        let table = table_from_pairs(&[
            ("서울", 97),
            ("부산", 53),
            ("경기", 154),
            ("인천", 38),
            ("세종", 6),
            ("제주", 31),
        ])
        .unwrap();
        DashboardView {
            source: "plan.xlsx".to_string(),
            sheet: "총괄".to_string(),
            year: 2025,
            theme: Theme::Turbo,
            summary: summarize(&table, selection, 5),
        }
    }

    #[test]
    fn widths() {
        assert_eq!(display_width("Seoul"), 5);
        assert_eq!(display_width("서울"), 4);
        assert_eq!(pad_right("서울", 6), "서울  ");
    }

    #[test]
    fn bars() {
        assert_eq!(bar_length(154, 154), BAR_WIDTH);
        assert_eq!(bar_length(0, 154), 0);
        assert_eq!(bar_length(1, 1000), 1);
        assert_eq!(bar_colour(154, 154, Theme::Turbo), 196);
        assert_eq!(bar_colour(0, 154, Theme::Turbo), 54);
    }

    #[test]
    fn full_dashboard() {
        let text = render_view(&View::Dashboard(Box::new(view(None))), Style::PLAIN);
        assert!(text.contains("2025 Regional Festival Dashboard"));
        assert!(text.contains("Selected regions: 6/6"));
        assert!(text.contains("379 festivals"));
        assert!(text.contains("경기 (154)"));
        assert!(text.contains("세종 (6)"));
        // (97 + 154 + 38) / 379
        assert!(text.contains("76.3 %"));
        assert!(text.contains("23.7 %"));
        assert!(text.contains("Top 5 regions by festivals"));
        assert!(text.contains("stands in for a choropleth"));
        assert!(!text.contains("\x1b["));
        let ranking: Vec<&str> = text
            .split("-- Ranking")
            .nth(1)
            .unwrap()
            .lines()
            .filter(|l| l.trim_start().starts_with(char::is_numeric))
            .collect();
        assert_eq!(ranking.len(), 5);
        assert!(ranking[0].contains("경기"));
        assert!(ranking[4].contains("제주"));
    }

    #[test]
    fn coloured_bars() {
        let text = render_view(
            &View::Dashboard(Box::new(view(None))),
            Style { color: true },
        );
        assert!(text.contains("\x1b[38;5;196m"));
    }

    #[test]
    fn empty_selection() {
        let text = render_view(&View::Dashboard(Box::new(view(Some(&[])))), Style::PLAIN);
        assert!(text.contains("Selected regions: 0/6"));
        assert!(text.contains("Total festivals         —"));
        assert!(text.contains("Nothing to display"));
        assert!(text.contains("0.0 %"));
        assert!(!text.contains("Most festivals"));
    }

    #[test]
    fn file_not_found() {
        let text = render_view(
            &View::FileNotFound {
                path: "plan.xlsx".to_string(),
            },
            Style::PLAIN,
        );
        assert!(text.starts_with("File not found: plan.xlsx"));
    }
}
