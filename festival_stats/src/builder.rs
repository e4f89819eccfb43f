pub use crate::config::*;

use log::debug;
use std::collections::HashSet;

/// A builder for festival tables.
///
/// Labels are trimmed when added; the builder refuses duplicates so that the
/// resulting table always has unique region names.
///
/// ```
/// use festival_stats::builder::TableBuilder;
/// # use festival_stats::TableErrors;
///
/// let mut builder = TableBuilder::new();
/// builder.add_region(" 서울 ", 5)?;
/// builder.add_region("부산", 3)?;
/// let table = builder.build();
///
/// assert_eq!(table.region_names(), vec!["서울".to_string(), "부산".to_string()]);
/// # Ok::<(), TableErrors>(())
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    _records: Vec<RegionRecord>,
    _seen: HashSet<String>,
}

impl TableBuilder {
    pub fn new() -> TableBuilder {
        TableBuilder::default()
    }

    /// Adds a region at the end of the table.
    pub fn add_region(&mut self, region: &str, festival_count: u64) -> Result<(), TableErrors> {
        let name = region.trim();
        if name.is_empty() {
            return Err(TableErrors::EmptyRegion);
        }
        if !self._seen.insert(name.to_string()) {
            return Err(TableErrors::DuplicateRegion(name.to_string()));
        }
        debug!("add_region: {:?} -> {}", name, festival_count);
        self._records.push(RegionRecord::new(name, festival_count));
        Ok(())
    }

    pub fn build(self) -> FestivalTable {
        FestivalTable {
            records: self._records,
        }
    }
}

/// Builds a table in one go from (label, count) pairs.
pub fn table_from_pairs(pairs: &[(&str, u64)]) -> Result<FestivalTable, TableErrors> {
    let mut builder = TableBuilder::new();
    for (region, count) in pairs {
        builder.add_region(region, *count)?;
    }
    Ok(builder.build())
}
