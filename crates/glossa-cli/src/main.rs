use glossa::fonts::{
    self, CheckMessage, DeterministicTextMeasurer, FontFile, FontLibrary, FontSettings,
    FontTextMeasurer, FontWeight, MetricsChecker, RenderQuery, RenderResult, TextMeasurer,
    TextStyle,
};
use glossa::{InMemoryUserDirectory, MentionRenderer};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Fonts(fonts::Error),
    Markup(glossa::Error),
    Json(serde_json::Error),
    DoesNotFit,
    ChecksFailed(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Fonts(err) => write!(f, "{err}"),
            CliError::Markup(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::DoesNotFit => write!(f, "Text does not fit"),
            CliError::ChecksFailed(count) => write!(f, "{count} font check(s) failed"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<fonts::Error> for CliError {
    fn from(value: fonts::Error) -> Self {
        Self::Fonts(value)
    }
}

impl From<glossa::Error> for CliError {
    fn from(value: glossa::Error) -> Self {
        Self::Markup(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Mentions,
    Fontconfig,
    Identify,
    Measure,
    Check,
}

#[derive(Debug, Clone, Copy, Default)]
enum TextMeasurerKind {
    Deterministic,
    #[default]
    Font,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    settings: Option<String>,
    data_dir: Option<PathBuf>,
    static_root: Option<PathBuf>,
    text_measurer: TextMeasurerKind,
    font_dirs: Vec<PathBuf>,
    font: String,
    weight: FontWeight,
    size: u32,
    spacing: i32,
    width: u32,
    lines: u32,
    cache_key: Option<String>,
    users: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::default(),
            input: None,
            pretty: false,
            settings: None,
            data_dir: None,
            static_root: None,
            text_measurer: TextMeasurerKind::default(),
            font_dirs: Vec::new(),
            font: "sans-serif".to_string(),
            weight: FontWeight::Default,
            size: 16,
            spacing: 0,
            width: RenderQuery::DEFAULT_MAX_WIDTH,
            lines: RenderQuery::DEFAULT_MAX_LINES,
            cache_key: None,
            users: None,
        }
    }
}

#[derive(Serialize)]
struct MeasureOut {
    #[serde(flatten)]
    result: RenderResult,
    fits: bool,
}

fn usage() -> &'static str {
    "glossa-cli\n\
\n\
USAGE:\n\
  glossa-cli [mentions] --users <json> [<path>|-]\n\
  glossa-cli fontconfig [--settings <json>] [--data-dir <dir>] [--static-root <dir>]\n\
  glossa-cli identify [--pretty] <font-file>\n\
  glossa-cli measure [--pretty] [--text-measurer deterministic|font] [--font-dir <dir>]... [--font <family>] [--weight normal|light|bold] [--size <px>] [--spacing <px>] [--width <px>] [--lines <n>] [--cache-key <key>] [<path>|-]\n\
  glossa-cli check [--pretty] [--text-measurer deterministic|font] [--font-dir <dir>]...\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Settings default to GLOSSA_DATA_DIR and GLOSSA_STATIC_ROOT.\n\
  - measure loads fonts from --font-dir, or from the configured font directories.\n\
  - measure exits with status 3 when the text does not fit.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, CliError> {
    value.parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "mentions" => args.command = Command::Mentions,
            "fontconfig" => args.command = Command::Fontconfig,
            "identify" => args.command = Command::Identify,
            "measure" => args.command = Command::Measure,
            "check" => args.command = Command::Check,
            "--pretty" => args.pretty = true,
            "--settings" => args.settings = Some(next_value(&mut it)?.clone()),
            "--data-dir" => args.data_dir = Some(next_value(&mut it)?.into()),
            "--static-root" => args.static_root = Some(next_value(&mut it)?.into()),
            "--font-dir" => args.font_dirs.push(next_value(&mut it)?.into()),
            "--users" => args.users = Some(next_value(&mut it)?.clone()),
            "--font" => args.font = next_value(&mut it)?.clone(),
            "--cache-key" => args.cache_key = Some(next_value(&mut it)?.clone()),
            "--text-measurer" => {
                args.text_measurer = match next_value(&mut it)?.as_str() {
                    "deterministic" => TextMeasurerKind::Deterministic,
                    "font" => TextMeasurerKind::Font,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--weight" => {
                args.weight = next_value(&mut it)?
                    .parse::<FontWeight>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--size" => args.size = parse_number(next_value(&mut it)?)?,
            "--spacing" => args.spacing = parse_number(next_value(&mut it)?)?,
            "--width" => args.width = parse_number(next_value(&mut it)?)?,
            "--lines" => args.lines = parse_number(next_value(&mut it)?)?,
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn resolve_settings(args: &Args) -> Result<FontSettings, CliError> {
    if let Some(path) = &args.settings {
        return Ok(FontSettings::from_json_str(&std::fs::read_to_string(path)?)?);
    }
    match (&args.data_dir, &args.static_root) {
        (Some(data_dir), Some(static_root)) => Ok(FontSettings::new(data_dir, static_root)),
        (None, None) => Ok(FontSettings::from_env()?),
        _ => Err(CliError::Usage(usage())),
    }
}

fn build_text_measurer(args: &Args) -> Result<Arc<dyn TextMeasurer + Send + Sync>, CliError> {
    match args.text_measurer {
        TextMeasurerKind::Deterministic => Ok(Arc::new(DeterministicTextMeasurer::default())),
        TextMeasurerKind::Font => {
            let library = if args.font_dirs.is_empty() {
                FontLibrary::from_settings(&resolve_settings(args)?)?
            } else {
                let mut library = FontLibrary::new();
                for dir in &args.font_dirs {
                    library.load_dir(dir)?;
                }
                library
            };
            tracing::debug!(faces = library.len(), "font library loaded");
            Ok(Arc::new(FontTextMeasurer::new(library)))
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Mentions => {
            let Some(users_path) = args.users.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let directory =
                InMemoryUserDirectory::from_json_str(&std::fs::read_to_string(users_path)?)?;
            let text = read_input(args.input.as_deref())?;
            let rendered = MentionRenderer::new(directory).render(&text)?;
            std::io::stdout().lock().write_all(rendered.as_bytes())?;
            Ok(())
        }
        Command::Fontconfig => {
            let path = fonts::ensure_configured(&resolve_settings(&args)?)?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Identify => {
            let Some(path) = args.input.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let mut font = FontFile::new(std::fs::File::open(path)?);
            write_json(font.name()?, args.pretty)
        }
        Command::Measure => {
            let text = read_input(args.input.as_deref())?;
            let text = text.strip_suffix('\n').unwrap_or(&text);
            let checker = MetricsChecker::new(build_text_measurer(&args)?);

            let style = TextStyle::new(args.font.clone(), args.size)
                .with_weight(args.weight)
                .with_spacing(args.spacing);
            let mut query = RenderQuery::new(style, text).with_limits(args.width, args.lines);
            if let Some(key) = &args.cache_key {
                query = query.with_cache_key(key.clone());
            }

            let result = checker.measure(&query)?;
            let fits = checker.fits(&query)?;
            write_json(&MeasureOut { result, fits }, args.pretty)?;
            if fits { Ok(()) } else { Err(CliError::DoesNotFit) }
        }
        Command::Check => {
            let checker = MetricsChecker::new(build_text_measurer(&args)?);
            let messages: Vec<CheckMessage> = fonts::check_fonts(&checker);
            write_json(&messages, args.pretty)?;
            if messages.is_empty() {
                Ok(())
            } else {
                Err(CliError::ChecksFailed(messages.len()))
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::DoesNotFit) => {
            eprintln!("{}", CliError::DoesNotFit);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
