use crate::args::Args;
use crate::dashboard::*;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "2025년 지역축제 개최계획 현황(0321).xlsx";
pub const DEFAULT_SHEET_NAME: &str = "총괄";
// Only one edition of the plan has been published.
pub const AVAILABLE_YEARS: [u32; 1] = [2025];
pub const DEFAULT_TOP_N: usize = TOP_N_MAX;

/// The colour themes of the bar chart, with the colour scale they map to.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Theme {
    Plotly,
    Viridis,
    Cividis,
    Blues,
    Turbo,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Plotly,
        Theme::Viridis,
        Theme::Cividis,
        Theme::Blues,
        Theme::Turbo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Plotly => "Plotly",
            Theme::Viridis => "Viridis",
            Theme::Cividis => "Cividis",
            Theme::Blues => "Blues",
            Theme::Turbo => "Turbo",
        }
    }

    pub fn colorscale(&self) -> &'static str {
        match self {
            // 'plotly' is not a valid scale, the default one is 'plotly3'
            Theme::Plotly => "plotly3",
            Theme::Viridis => "viridis",
            Theme::Cividis => "cividis",
            Theme::Blues => "blues",
            Theme::Turbo => "turbo",
        }
    }

    /// Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Theme {
        match Theme::ALL
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
        {
            Some(t) => *t,
            None => {
                warn!("Unknown theme {:?}, using {:?}", name, Theme::Plotly.name());
                Theme::Plotly
            }
        }
    }
}

/// The content of the JSON configuration file. All the fields are optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfigFile {
    #[serde(rename = "dataPath")]
    pub data_path: Option<String>,
    #[serde(rename = "sheetName")]
    pub sheet_name: Option<String>,
    pub year: Option<u32>,
    pub theme: Option<String>,
    pub regions: Option<Vec<String>>,
    #[serde(rename = "topN")]
    pub top_n: Option<usize>,
}

/// All the inputs of one render.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: String,
    pub sheet_name: String,
    pub year: u32,
    pub theme: Theme,
    /// None selects all the regions.
    pub regions: Option<Vec<String>>,
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: DEFAULT_DATA_PATH.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            year: AVAILABLE_YEARS[0],
            theme: Theme::Plotly,
            regions: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

pub fn read_config_file(path: &str) -> DashboardResult<DashboardConfigFile> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config_file: {:?}", contents);
    let config: DashboardConfigFile =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Merges the configuration file (if any) with the command line. The command line wins.
///
/// A relative data path in the configuration file is resolved against the directory of
/// that file.
pub fn build_config(
    file: Option<(String, DashboardConfigFile)>,
    args: &Args,
) -> DashboardResult<DashboardConfig> {
    let mut config = DashboardConfig::default();

    if let Some((file_path, cf)) = file {
        if let Some(p) = cf.data_path {
            let root_p = Path::new(&file_path).parent().unwrap_or_else(|| Path::new(""));
            let full_p: PathBuf = root_p.join(&p);
            config.data_path = full_p.as_path().display().to_string();
        }
        if let Some(s) = cf.sheet_name {
            config.sheet_name = s;
        }
        if let Some(y) = cf.year {
            config.year = y;
        }
        if let Some(t) = cf.theme {
            config.theme = Theme::from_name(&t);
        }
        if cf.regions.is_some() {
            config.regions = cf.regions;
        }
        if let Some(n) = cf.top_n {
            config.top_n = n;
        }
    }

    if let Some(p) = args.input.clone() {
        config.data_path = p;
    }
    if let Some(s) = args.sheet.clone() {
        config.sheet_name = s;
    }
    if let Some(y) = args.year {
        config.year = y;
    }
    if let Some(t) = args.theme.as_deref() {
        config.theme = Theme::from_name(t);
    }
    if args.regions.is_some() {
        config.regions = args.regions.clone();
    }
    if let Some(n) = args.top {
        config.top_n = n;
    }

    validate_year(config.year)?;
    Ok(config)
}

pub fn load_config(args: &Args) -> DashboardResult<DashboardConfig> {
    let file = match args.config.clone() {
        Some(path) => {
            info!("Reading configuration {:?}", path);
            let cf = read_config_file(&path)?;
            Some((path, cf))
        }
        None => None,
    };
    build_config(file, args)
}

pub fn validate_year(year: u32) -> DashboardResult<u32> {
    if !AVAILABLE_YEARS.contains(&year) {
        whatever!(
            "Year {} is not available (available: {:?})",
            year,
            AVAILABLE_YEARS
        )
    }
    Ok(year)
}

pub fn read_summary(path: String) -> DashboardResult<JSValue> {
    let contents = fs::read_to_string(&path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
