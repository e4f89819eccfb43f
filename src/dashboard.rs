use log::{debug, info, warn};

use festival_stats::*;
use snafu::{prelude::*, ErrorCompat, Snafu};

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::dashboard::config_reader::*;
use crate::dashboard::presenter::Style;

pub mod config_reader;
pub mod io_common;
pub mod io_excel;
pub mod presenter;
pub mod session;

#[derive(Debug, Snafu)]
pub enum DashboardError {
    #[snafu(display(
        "Cannot decode {path}: unsupported spreadsheet format (supported: {supported})"
    ))]
    UnsupportedFormat { path: String, supported: String },
    #[snafu(display("Error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {sheet:?} not found in {path} (available: {available})"))]
    MissingSheet {
        sheet: String,
        path: String,
        available: String,
    },
    #[snafu(display("Error reading worksheet {sheet:?}"))]
    ReadingSheet {
        source: calamine::Error,
        sheet: String,
    },
    #[snafu(display("Unexpected layout in worksheet {sheet:?}: {reason}"))]
    SheetLayout { sheet: String, reason: String },
    #[snafu(display("Invalid region table in worksheet {sheet:?}"))]
    InvalidTable {
        source: festival_stats::TableErrors,
        sheet: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson { source: io::Error, path: String },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary { source: io::Error, path: String },
    #[snafu(display("Error reading the session input"))]
    ReadingInput { source: io::Error },
    #[snafu(display("Error writing to the terminal"))]
    WritingOutput { source: io::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// The outcome of one run of the pipeline.
#[derive(PartialEq, Debug, Clone)]
pub enum View {
    /// The spreadsheet does not exist. Nothing was read.
    FileNotFound { path: String },
    Dashboard(Box<DashboardView>),
}

#[derive(PartialEq, Debug, Clone)]
pub struct DashboardView {
    pub source: String,
    pub sheet: String,
    pub year: u32,
    pub theme: Theme,
    pub summary: DashboardSummary,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub source: String,
    pub sheet: String,
    pub year: u32,
    pub theme: String,
    pub colorscale: String,
    #[serde(rename = "topN")]
    pub top_n: usize,
    #[serde(rename = "selectedRegions")]
    pub selected_regions: usize,
    #[serde(rename = "availableRegions")]
    pub available_regions: usize,
}

/// Runs the whole pipeline for the given settings: checks the file, reads the table and
/// computes the statistics.
///
/// The function holds no state: it is called again after every change of the settings.
pub fn render(config: &DashboardConfig) -> DashboardResult<View> {
    validate_year(config.year)?;

    if !Path::new(&config.data_path).exists() {
        info!("render: file not found: {:?}", config.data_path);
        return Ok(View::FileNotFound {
            path: config.data_path.clone(),
        });
    }

    let table = io_excel::read_festival_table(&config.data_path, &config.sheet_name)?;
    info!(
        "render: read {} regions from {:?} [{}]",
        table.len(),
        config.data_path,
        config.sheet_name
    );

    let summary = summarize(&table, config.regions.as_deref(), config.top_n);
    Ok(View::Dashboard(Box::new(DashboardView {
        source: io_common::simplify_file_name(&config.data_path),
        sheet: config.sheet_name.clone(),
        year: config.year,
        theme: config.theme,
        summary,
    })))
}

fn region_js(r: &Option<RegionRecord>) -> JSValue {
    match r {
        Some(r) => json!({"region": r.region, "count": r.festival_count}),
        None => JSValue::Null,
    }
}

pub fn build_summary_js(view: &DashboardView) -> JSValue {
    let s = &view.summary;
    let c = OutputConfig {
        source: view.source.clone(),
        sheet: view.sheet.clone(),
        year: view.year,
        theme: view.theme.name().to_string(),
        colorscale: view.theme.colorscale().to_string(),
        top_n: s.top_n,
        selected_regions: s.selected_regions,
        available_regions: s.available_regions,
    };
    let regions: Vec<JSValue> = s
        .shares
        .iter()
        .map(|r| json!({"region": r.region, "count": r.festival_count, "share": r.share}))
        .collect();
    let ranking: Vec<JSValue> = s
        .top()
        .iter()
        .map(|r| json!({"rank": r.rank, "region": r.region, "count": r.festival_count}))
        .collect();
    json!({
        "config": c,
        "results": {
            "total": s.total,
            "maxRegion": region_js(&s.max_region),
            "minRegion": region_js(&s.min_region),
            "capitalTotal": s.capital.capital_total,
            "nonCapitalTotal": s.capital.non_capital_total,
            "capitalRatio": round1(s.capital.capital_ratio),
            "nonCapitalRatio": round1(s.capital.non_capital_ratio),
            "regions": regions,
            "ranking": ranking,
        }
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// The error and all its causes, on one line.
pub fn describe_error(e: &DashboardError) -> String {
    let msgs: Vec<String> = ErrorCompat::iter_chain(e)
        .map(|x| x.to_string())
        .filter(|s| !s.is_empty())
        .collect();
    msgs.join(": ")
}

fn write_summary(view: &DashboardView, args: &Args) -> DashboardResult<()> {
    let result_js = build_summary_js(view);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match args.out.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(out_path) if !out_path.is_empty() => {
            info!("Writing summary to {:?}", out_path);
            fs::write(out_path, &pretty_js_stats).context(WritingSummarySnafu { path: out_path })?;
        }
        _ => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = args.reference.clone() {
        let summary_ref = read_summary(summary_p)?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
        info!("The summary matches the reference");
    }
    Ok(())
}

/// Entry point of the command line: renders once, or starts a session.
pub fn run_dashboard(args: &Args) -> DashboardResult<()> {
    let config = load_config(args)?;
    info!("config: {:?}", config);
    let style = if args.plain {
        Style::PLAIN
    } else {
        Style { color: true }
    };

    if args.interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        return session::run_session(config, stdin.lock(), &mut stdout, style);
    }

    let view = render(&config)?;
    let mut stdout = io::stdout();
    write!(stdout, "{}", presenter::render_view(&view, style)).context(WritingOutputSnafu {})?;

    match &view {
        View::Dashboard(dv) => write_summary(dv, args),
        View::FileNotFound { .. } => {
            if args.out.is_some() || args.reference.is_some() {
                warn!("No data was read, no summary is written");
            }
            Ok(())
        }
    }
}
