// Reading the festival table out of the plan spreadsheet.

use calamine::{open_workbook_auto, DataType, Range, Reader};
use festival_stats::builder::TableBuilder;

use crate::dashboard::{
    io_common::{has_supported_extension, SUPPORTED_EXTENSIONS},
    *,
};

// Positions are 0-based. The first three rows hold the title and notes.
pub const LABEL_ROW: u32 = 3;
pub const COUNT_ROW: u32 = 4;
// The first column holds the row labels.
pub const FIRST_REGION_COL: u32 = 1;
// Larger counts are treated as garbage in the cell.
pub const MAX_COUNT: u64 = u32::MAX as u64;

pub fn read_festival_table(path: &str, sheet: &str) -> DashboardResult<FestivalTable> {
    let wrange = get_range(path, sheet)?;
    extract_table(&wrange, sheet)
}

fn get_range(path: &str, sheet: &str) -> DashboardResult<Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, sheet);
    ensure!(
        has_supported_extension(path),
        UnsupportedFormatSnafu {
            path,
            supported: SUPPORTED_EXTENSIONS.join(", "),
        }
    );

    let mut workbook = open_workbook_auto(path).context(OpeningWorkbookSnafu { path })?;
    match workbook.worksheet_range(sheet) {
        Some(wrange) => wrange.context(ReadingSheetSnafu { sheet }),
        None => MissingSheetSnafu {
            sheet,
            path,
            available: workbook.sheet_names().join(", "),
        }
        .fail(),
    }
}

/// Reads the region labels (row 4) and the counts (row 5) of a worksheet.
///
/// The last used column is the total over all the regions and is not read.
/// Columns without a label are skipped.
pub fn extract_table(wrange: &Range<DataType>, sheet: &str) -> DashboardResult<FestivalTable> {
    let (end_row, end_col) = wrange.end().context(SheetLayoutSnafu {
        sheet,
        reason: "the worksheet is empty",
    })?;
    debug!(
        "extract_table: start: {:?} end: {:?}",
        wrange.start(),
        (end_row, end_col)
    );
    ensure!(
        end_row >= COUNT_ROW,
        SheetLayoutSnafu {
            sheet,
            reason: format!(
                "expected at least {} rows, found {}",
                COUNT_ROW + 1,
                end_row + 1
            ),
        }
    );
    ensure!(
        end_col > FIRST_REGION_COL,
        SheetLayoutSnafu {
            sheet,
            reason: "no region columns",
        }
    );

    let mut builder = TableBuilder::new();
    for col in FIRST_REGION_COL..end_col {
        let label = match wrange.get_value((LABEL_ROW, col)).and_then(read_label) {
            Some(label) => label,
            None => {
                debug!("extract_table: col {}: no region label, skipping", col);
                continue;
            }
        };
        let count = wrange
            .get_value((COUNT_ROW, col))
            .map(read_count)
            .unwrap_or(0);
        builder
            .add_region(&label, count)
            .context(InvalidTableSnafu { sheet })?;
    }
    let table = builder.build();
    ensure!(
        !table.is_empty(),
        SheetLayoutSnafu {
            sheet,
            reason: format!("no region label in row {}", LABEL_ROW + 1),
        }
    );
    Ok(table)
}

fn read_label(cell: &DataType) -> Option<String> {
    let s = match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Anything that is not a number between 0 and `MAX_COUNT` counts as zero.
fn read_count(cell: &DataType) -> u64 {
    let count = match cell {
        DataType::Int(i) => u64::try_from(*i).ok().filter(|c| *c <= MAX_COUNT),
        DataType::Float(f) => float_count(*f),
        // Thousands separators are not numbers: "1,204" counts as zero.
        DataType::String(s) => s.trim().parse::<f64>().ok().and_then(float_count),
        _ => None,
    };
    if count.is_none() {
        debug!("read_count: cell {:?} is not a count, using 0", cell);
    }
    count.unwrap_or(0)
}

fn float_count(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 && f <= MAX_COUNT as f64 {
        Some(f.trunc() as u64)
    } else {
        None
    }
}
