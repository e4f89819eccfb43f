use clap::Parser;

/// Terminal dashboard for the regional festival plan spreadsheet.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the dashboard settings (dataPath, sheetName, year,
    /// theme, regions, topN). Every other option overrides the value found in this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The spreadsheet with the festival counts (xlsx, xlsm, xlsb, xls or ods).
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default 총괄) The name of the worksheet to read.
    #[clap(short, long, value_parser)]
    pub sheet: Option<String>,

    /// (default 2025) The year of the plan. Only 2025 is currently available.
    #[clap(long, value_parser)]
    pub year: Option<u32>,

    /// (default Plotly) The colour theme of the bar chart: Plotly, Viridis, Cividis, Blues or Turbo.
    #[clap(long, value_parser)]
    pub theme: Option<String>,

    /// (list of comma-separated region names or not specified) The regions to include.
    /// All the regions are included if not specified.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub regions: Option<Vec<String>>,

    /// (5 to 10, default 10) The number of regions in the Top-N chart and ranking.
    #[clap(long, value_parser)]
    pub top: Option<usize>,

    /// (file path, 'stdout' or empty) If specified, the summary of the dashboard will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the JSON summary. If provided, festdash will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Starts an interactive session: every command changes one setting and redraws the dashboard.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    /// Disables the colours in the bar chart.
    #[clap(long, takes_value = false)]
    pub plain: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
