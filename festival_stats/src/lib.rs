mod config;
use log::{debug, info, warn};

use std::collections::HashSet;

pub use crate::config::*;

pub mod builder;
pub mod manual;

/// Keeps the records whose region is part of the selection, in table order.
///
/// A missing selection means that all the regions are selected. Names that are
/// not in the table are ignored.
pub fn select(table: &FestivalTable, selection: Option<&[String]>) -> Vec<RegionRecord> {
    match selection {
        None => table.records.clone(),
        Some(names) => {
            let picked: HashSet<&str> = names.iter().map(|s| s.trim()).collect();
            let known: HashSet<&str> = table.records.iter().map(|r| r.region.as_str()).collect();
            let ignored: Vec<&str> = names
                .iter()
                .map(|s| s.trim())
                .filter(|s| !known.contains(s))
                .collect();
            if !ignored.is_empty() {
                warn!("select: unknown regions ignored: {:?}", ignored);
            }
            let res: Vec<RegionRecord> = table
                .records
                .iter()
                .filter(|r| picked.contains(r.region.as_str()))
                .cloned()
                .collect();
            debug!(
                "select: {} of {} regions selected ({} names requested)",
                res.len(),
                table.len(),
                names.len()
            );
            res
        }
    }
}

/// Saturates at `u64::MAX` instead of overflowing.
pub fn total(records: &[RegionRecord]) -> u64 {
    records
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.festival_count))
}

/// The region with the most festivals. The first one wins on ties.
pub fn max_region(records: &[RegionRecord]) -> Option<RegionRecord> {
    let mut best: Option<&RegionRecord> = None;
    for r in records {
        match best {
            Some(b) if r.festival_count <= b.festival_count => {}
            _ => best = Some(r),
        }
    }
    best.cloned()
}

/// The region with the fewest festivals. The first one wins on ties.
pub fn min_region(records: &[RegionRecord]) -> Option<RegionRecord> {
    let mut best: Option<&RegionRecord> = None;
    for r in records {
        match best {
            Some(b) if r.festival_count >= b.festival_count => {}
            _ => best = Some(r),
        }
    }
    best.cloned()
}

/// Splits the total between the capital area and the rest of the country.
pub fn capital_split(records: &[RegionRecord]) -> CapitalSplit {
    let all = total(records);
    if all == 0 {
        return CapitalSplit::EMPTY;
    }
    let capital_total = records
        .iter()
        .filter(|r| is_capital_region(&r.region))
        .fold(0u64, |acc, r| acc.saturating_add(r.festival_count));
    let capital_ratio = capital_total as f64 / all as f64 * 100.0;
    CapitalSplit {
        capital_total,
        non_capital_total: all.saturating_sub(capital_total),
        capital_ratio,
        non_capital_ratio: 100.0 - capital_ratio,
    }
}

/// Sorts by decreasing number of festivals. Regions with the same count keep
/// their table order.
pub fn ranking(records: &[RegionRecord]) -> Vec<RankedRegion> {
    let mut sorted: Vec<&RegionRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.festival_count.cmp(&a.festival_count));
    sorted
        .iter()
        .enumerate()
        .map(|(idx, r)| RankedRegion {
            rank: idx + 1,
            region: r.region.clone(),
            festival_count: r.festival_count,
        })
        .collect()
}

/// Share of each region in the selected total, in ranking order.
pub fn percentage_shares(records: &[RegionRecord]) -> Vec<RegionShare> {
    let all = total(records);
    ranking(records)
        .into_iter()
        .map(|r| RegionShare {
            share: if all == 0 {
                0.0
            } else {
                round1(r.festival_count as f64 / all as f64 * 100.0)
            },
            region: r.region,
            festival_count: r.festival_count,
        })
        .collect()
}

/// The requested Top-N, kept within the selector bounds and never larger than
/// the number of selected regions.
pub fn clamp_top_n(requested: usize, num_selected: usize) -> usize {
    requested.clamp(TOP_N_MIN, TOP_N_MAX).min(num_selected)
}

pub fn top_n(records: &[RegionRecord], requested: usize) -> Vec<RankedRegion> {
    let n = clamp_top_n(requested, records.len());
    let mut res = ranking(records);
    res.truncate(n);
    res
}

/// Computes all the statistics of the dashboard for the given selection.
///
/// Arguments:
/// * `table` the full table, as read from the worksheet
/// * `selection` the regions picked by the user, or all of them if not provided
/// * `requested_top_n` the size of the Top-N ranking before clamping
pub fn summarize(
    table: &FestivalTable,
    selection: Option<&[String]>,
    requested_top_n: usize,
) -> DashboardSummary {
    let selected = select(table, selection);
    info!(
        "Summarizing {} selected regions out of {}",
        selected.len(),
        table.len()
    );
    let summary = DashboardSummary {
        available_regions: table.len(),
        selected_regions: selected.len(),
        total: total(&selected),
        max_region: max_region(&selected),
        min_region: min_region(&selected),
        capital: capital_split(&selected),
        shares: percentage_shares(&selected),
        ranking: ranking(&selected),
        top_n: clamp_top_n(requested_top_n, selected.len()),
    };
    debug!("summarize: {:?}", summary);
    summary
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::builder::table_from_pairs;
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sample() -> FestivalTable {
        table_from_pairs(&[("Seoul", 5), ("Busan", 3), ("Gyeonggi", 2), ("Incheon", 1)]).unwrap()
    }

    fn names(ranked: &[RankedRegion]) -> Vec<&str> {
        ranked.iter().map(|r| r.region.as_str()).collect()
    }

    #[test]
    fn example_summary() {
        init();
        let s = summarize(&sample(), None, 10);
        assert_eq!(s.total, 11);
        assert_eq!(s.capital.capital_total, 8);
        assert_eq!(s.capital.non_capital_total, 3);
        assert!((s.capital.capital_ratio - 72.727).abs() < 0.01);
        assert_eq!(
            names(&s.ranking),
            vec!["Seoul", "Busan", "Gyeonggi", "Incheon"]
        );
        assert_eq!(s.max_region, Some(RegionRecord::new("Seoul", 5)));
        assert_eq!(s.min_region, Some(RegionRecord::new("Incheon", 1)));
        assert_eq!(s.top_n, 4);
        assert_eq!(s.top().len(), 4);
    }

    #[test]
    fn korean_capital_labels() {
        let table = table_from_pairs(&[("서울", 10), ("부산", 10), ("경기", 5), ("인천", 5)]).unwrap();
        let split = capital_split(table.records());
        assert_eq!(split.capital_total, 20);
        assert!((split.capital_ratio - 66.666).abs() < 0.01);
    }

    #[test]
    fn empty_selection() {
        init();
        let s = summarize(&sample(), Some(&[]), 7);
        assert_eq!(s.total, 0);
        assert_eq!(s.capital, CapitalSplit::EMPTY);
        assert!(s.ranking.is_empty());
        assert!(s.shares.is_empty());
        assert_eq!(s.max_region, None);
        assert_eq!(s.min_region, None);
        assert_eq!(s.top_n, 0);
        assert!(s.top().is_empty());
    }

    #[test]
    fn zero_counts() {
        let table = table_from_pairs(&[("Seoul", 0), ("Busan", 0)]).unwrap();
        let s = summarize(&table, None, 5);
        assert_eq!(s.capital.capital_ratio, 0.0);
        assert_eq!(s.capital.non_capital_ratio, 0.0);
        assert!(s.shares.iter().all(|r| r.share == 0.0));
    }

    #[test]
    fn selection_keeps_table_order_and_ignores_unknown() {
        let sel = vec![
            "Incheon".to_string(),
            " Seoul ".to_string(),
            "Jeju".to_string(),
        ];
        let picked = select(&sample(), Some(&sel));
        assert_eq!(
            picked,
            vec![RegionRecord::new("Seoul", 5), RegionRecord::new("Incheon", 1)]
        );
    }

    #[test]
    fn shares_sum_to_hundred() {
        let table = table_from_pairs(&[
            ("서울", 97),
            ("부산", 53),
            ("대구", 41),
            ("인천", 38),
            ("광주", 29),
            ("대전", 17),
            ("울산", 23),
            ("세종", 6),
            ("경기", 154),
            ("강원", 112),
            ("충북", 61),
        ])
        .unwrap();
        let shares = percentage_shares(table.records());
        let sum: f64 = shares.iter().map(|r| r.share).sum();
        assert!((sum - 100.0).abs() <= 0.05 * shares.len() as f64);
        // One decimal only.
        for r in shares.iter() {
            assert!(((r.share * 10.0).round() - r.share * 10.0).abs() < 1e-9);
        }
        let split = capital_split(table.records());
        assert!((split.capital_ratio + split.non_capital_ratio - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let table = table_from_pairs(&[("A", 2), ("B", 7), ("C", 2), ("D", 7), ("E", 1)]).unwrap();
        let r = ranking(table.records());
        assert_eq!(names(&r), vec!["B", "D", "A", "C", "E"]);
        assert_eq!(
            r.iter().map(|x| x.rank).collect::<Vec<usize>>(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn extremes_first_occurrence_on_ties() {
        let table = table_from_pairs(&[("A", 2), ("B", 7), ("C", 2), ("D", 7)]).unwrap();
        assert_eq!(max_region(table.records()).unwrap().region, "B");
        assert_eq!(min_region(table.records()).unwrap().region, "A");
    }

    #[test]
    fn top_n_is_clamped() {
        let pairs: Vec<(String, u64)> = (0..12).map(|i| (format!("R{}", i), i)).collect();
        let refs: Vec<(&str, u64)> = pairs.iter().map(|(s, c)| (s.as_str(), *c)).collect();
        let table = table_from_pairs(&refs).unwrap();
        assert_eq!(top_n(table.records(), 3).len(), 5);
        assert_eq!(top_n(table.records(), 7).len(), 7);
        assert_eq!(top_n(table.records(), 42).len(), 10);
        assert_eq!(top_n(&table.records()[..4], 10).len(), 4);
        assert_eq!(top_n(table.records(), 7)[0].region, "R11");
    }

    #[test]
    fn huge_counts_saturate() {
        let table = table_from_pairs(&[("서울", u64::MAX), ("부산", 1), ("경기", u64::MAX)]).unwrap();
        let s = summarize(&table, None, 10);
        assert_eq!(s.total, u64::MAX);
        assert_eq!(s.capital.capital_total, u64::MAX);
        assert_eq!(s.capital.non_capital_total, 0);
        assert!(s.capital.capital_ratio.is_finite());
        assert!((s.capital.capital_ratio + s.capital.non_capital_ratio - 100.0).abs() < 1e-9);
        assert_eq!(s.ranking[2].region, "부산");
    }

    #[test]
    fn unknown_selection_is_empty() {
        init();
        let sel = vec!["Jeju".to_string(), "Daegu".to_string()];
        let s = summarize(&sample(), Some(&sel), 10);
        assert_eq!(s.selected_regions, 0);
        assert_eq!(s.total, 0);
    }

    #[test]
    fn duplicate_regions_are_refused() {
        let res = table_from_pairs(&[("서울", 1), (" 서울", 2)]);
        assert_eq!(res, Err(TableErrors::DuplicateRegion("서울".to_string())));
        assert_eq!(table_from_pairs(&[("  ", 1)]), Err(TableErrors::EmptyRegion));
    }
}
