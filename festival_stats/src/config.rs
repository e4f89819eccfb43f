// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One column of the festival worksheet: a region and the number of festivals
/// planned there.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct RegionRecord {
    pub region: String,
    pub festival_count: u64,
}

impl RegionRecord {
    pub fn new(region: &str, festival_count: u64) -> RegionRecord {
        RegionRecord {
            region: region.to_string(),
            festival_count,
        }
    }
}

/// The working table, in worksheet order.
///
/// Invariant: the region labels are trimmed and unique. Use the
/// [`crate::builder::TableBuilder`] to construct one from raw labels.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FestivalTable {
    pub(crate) records: Vec<RegionRecord>,
}

impl FestivalTable {
    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    pub fn region_names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.region.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Errors that prevent a table from being built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TableErrors {
    /// The same label appears twice once surrounding whitespace is removed.
    DuplicateRegion(String),
    /// The label is empty once surrounding whitespace is removed.
    EmptyRegion,
}

impl Error for TableErrors {}

impl Display for TableErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableErrors::DuplicateRegion(name) => {
                write!(f, "region {:?} appears more than once", name)
            }
            TableErrors::EmptyRegion => write!(f, "region label is empty"),
        }
    }
}

// ********* Capital area **********

/// The capital area: Seoul, Gyeonggi and Incheon.
/// Each region is known by its Korean label and its English name.
pub const CAPITAL_AREA: [(&str, &str); 3] = [
    ("서울", "Seoul"),
    ("경기", "Gyeonggi"),
    ("인천", "Incheon"),
];

pub fn is_capital_region(region: &str) -> bool {
    let region = region.trim();
    CAPITAL_AREA
        .iter()
        .any(|(ko, en)| region == *ko || region.eq_ignore_ascii_case(en))
}

// ******** Output data structures *********

/// Bounds of the Top-N selector.
pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 10;

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct CapitalSplit {
    pub capital_total: u64,
    pub non_capital_total: u64,
    /// Percentage in 0..=100, 0 when nothing was counted.
    pub capital_ratio: f64,
    pub non_capital_ratio: f64,
}

impl CapitalSplit {
    pub const EMPTY: CapitalSplit = CapitalSplit {
        capital_total: 0,
        non_capital_total: 0,
        capital_ratio: 0.0,
        non_capital_ratio: 0.0,
    };
}

/// A region with its share of the selected total, rounded to one decimal.
#[derive(PartialEq, Debug, Clone)]
pub struct RegionShare {
    pub region: String,
    pub festival_count: u64,
    pub share: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankedRegion {
    /// Starts at 1.
    pub rank: usize,
    pub region: String,
    pub festival_count: u64,
}

/// Everything the dashboard shows for one selection.
#[derive(PartialEq, Debug, Clone)]
pub struct DashboardSummary {
    pub available_regions: usize,
    pub selected_regions: usize,
    pub total: u64,
    pub max_region: Option<RegionRecord>,
    pub min_region: Option<RegionRecord>,
    pub capital: CapitalSplit,
    pub shares: Vec<RegionShare>,
    pub ranking: Vec<RankedRegion>,
    /// The Top-N actually applied after clamping.
    pub top_n: usize,
}

impl DashboardSummary {
    pub fn top(&self) -> &[RankedRegion] {
        &self.ranking[..self.top_n.min(self.ranking.len())]
    }
}
