// Interactive session: every command changes one setting, then the whole dashboard is
// rendered again from the file.

use std::io::BufRead;

use crate::dashboard::presenter::render_view;
use crate::dashboard::*;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Command {
    Path(String),
    Sheet(String),
    Year(u32),
    Theme(String),
    /// None selects all the regions.
    Regions(Option<Vec<String>>),
    Top(usize),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "Commands:
  path <file>          spreadsheet to read
  sheet <name>         worksheet name
  year <year>          year of the plan
  theme <name>         Plotly, Viridis, Cividis, Blues or Turbo
  regions all          select all the regions
  regions none         clear the selection
  regions <a,b,...>    select some regions
  top <n>              size of the Top-N ranking (5 to 10)
  show                 render again
  help                 this message
  quit                 leave the session
";

pub fn parse_command(line: &str) -> DashboardResult<Command> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let cmd = match (name.to_lowercase().as_str(), rest) {
        ("path", p) if !p.is_empty() => Command::Path(p.to_string()),
        ("sheet", s) if !s.is_empty() => Command::Sheet(s.to_string()),
        ("year", y) => match y.parse::<u32>() {
            Ok(y) => Command::Year(y),
            Err(_) => whatever!("Cannot understand year {:?}", y),
        },
        ("theme", t) if !t.is_empty() => Command::Theme(t.to_string()),
        ("regions", "all") => Command::Regions(None),
        ("regions", "none") => Command::Regions(Some(vec![])),
        ("regions", r) if !r.is_empty() => Command::Regions(Some(
            r.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )),
        ("top", n) => match n.parse::<usize>() {
            Ok(n) => Command::Top(n),
            Err(_) => whatever!("Cannot understand Top-N value {:?}", n),
        },
        ("show", _) => Command::Show,
        ("help", _) | ("?", _) => Command::Help,
        ("quit", _) | ("exit", _) => Command::Quit,
        (x @ ("path" | "sheet" | "theme" | "regions"), "") => {
            whatever!("Missing value for {:?}, type `help` for the list of commands", x)
        }
        (x, _) => whatever!("Unknown command {:?}, type `help` for the list of commands", x),
    };
    Ok(cmd)
}

/// Applies a settings command. Returns true if the dashboard should be rendered again.
pub fn apply(config: &mut DashboardConfig, cmd: Command) -> bool {
    debug!("apply: {:?}", cmd);
    match cmd {
        Command::Path(p) => config.data_path = p,
        Command::Sheet(s) => config.sheet_name = s,
        Command::Year(y) => config.year = y,
        Command::Theme(t) => config.theme = Theme::from_name(&t),
        Command::Regions(r) => config.regions = r,
        Command::Top(n) => config.top_n = n,
        Command::Show => {}
        Command::Help | Command::Quit => return false,
    }
    true
}

fn draw<W: Write>(config: &DashboardConfig, out: &mut W, style: Style) -> DashboardResult<()> {
    let text = match render(config) {
        Ok(view) => render_view(&view, style),
        Err(e) => {
            warn!("render failed: {:?}", e);
            format!("Error: {}\n", describe_error(&e))
        }
    };
    write!(out, "{}", text).context(WritingOutputSnafu {})
}

/// Runs the session until `quit` or the end of the input.
pub fn run_session<R: BufRead, W: Write>(
    mut config: DashboardConfig,
    input: R,
    out: &mut W,
    style: Style,
) -> DashboardResult<()> {
    info!("Starting session with {:?}", config);
    draw(&config, out, style)?;
    write!(out, "> ").context(WritingOutputSnafu {})?;
    out.flush().context(WritingOutputSnafu {})?;

    for line in input.lines() {
        let line = line.context(ReadingInputSnafu {})?;
        if !line.trim().is_empty() {
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => write!(out, "{}", HELP).context(WritingOutputSnafu {})?,
                Ok(cmd) => {
                    if apply(&mut config, cmd) {
                        draw(&config, out, style)?;
                    }
                }
                Err(e) => writeln!(out, "{}", describe_error(&e)).context(WritingOutputSnafu {})?,
            }
        }
        write!(out, "> ").context(WritingOutputSnafu {})?;
        out.flush().context(WritingOutputSnafu {})?;
    }
    info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(
            parse_command("path  /data/plan.xlsx").unwrap(),
            Command::Path("/data/plan.xlsx".to_string())
        );
        assert_eq!(
            parse_command("sheet 총괄").unwrap(),
            Command::Sheet("총괄".to_string())
        );
        assert_eq!(parse_command("TOP 7").unwrap(), Command::Top(7));
        assert_eq!(parse_command("regions all").unwrap(), Command::Regions(None));
        assert_eq!(
            parse_command("regions none").unwrap(),
            Command::Regions(Some(vec![]))
        );
        assert_eq!(
            parse_command("regions 서울, 부산,").unwrap(),
            Command::Regions(Some(vec!["서울".to_string(), "부산".to_string()]))
        );
        assert_eq!(parse_command("year 2025").unwrap(), Command::Year(2025));
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert!(parse_command("top many").is_err());
        assert!(parse_command("path").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn apply_commands() {
        let mut config = DashboardConfig::default();
        assert!(apply(&mut config, Command::Top(6)));
        assert!(apply(&mut config, Command::Theme("viridis".to_string())));
        assert!(apply(
            &mut config,
            Command::Regions(Some(vec!["서울".to_string()]))
        ));
        assert!(!apply(&mut config, Command::Help));
        assert_eq!(config.top_n, 6);
        assert_eq!(config.theme, Theme::Viridis);
        assert_eq!(config.regions, Some(vec!["서울".to_string()]));
    }

    #[test]
    fn session_redraws_after_each_change() {
        let config = DashboardConfig {
            data_path: "/does/not/exist/a.xlsx".to_string(),
            ..DashboardConfig::default()
        };
        let input = "top 7\n\npath /does/not/exist/b.xlsx\nhelp\ndance\nyear 1999\nquit\nshow\n";
        let mut out: Vec<u8> = Vec::new();
        run_session(config, input.as_bytes(), &mut out, Style::PLAIN).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Initial render, then `top` and `path`. Nothing after `quit`.
        assert_eq!(text.matches("File not found").count(), 3);
        assert_eq!(text.matches("/does/not/exist/a.xlsx").count(), 2);
        assert_eq!(text.matches("/does/not/exist/b.xlsx").count(), 1);
        assert!(text.contains("regions <a,b,...>"));
        assert!(text.contains("Unknown command \"dance\""));
        assert!(text.contains("Error: Year 1999 is not available"));
    }
}
