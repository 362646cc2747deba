use bobgraf::{
    DEFAULT_TEMPLATE_PATH, PanelOptions, PanelPaths, build_panel_file, convert_display_file,
};
use std::path::PathBuf;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Bobgraf(bobgraf::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Bobgraf(err) => write!(f, "Error: {err}"),
        }
    }
}

impl From<bobgraf::Error> for CliError {
    fn from(value: bobgraf::Error) -> Self {
        Self::Bobgraf(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    /// Stage one: display → SVG.
    Svg,
    /// Stage two: SVG + template → panel JSON.
    Panel,
}

#[derive(Debug)]
enum Args {
    Svg {
        input: PathBuf,
        output: PathBuf,
        verbose: bool,
    },
    Panel {
        svg: PathBuf,
        template: PathBuf,
        verbose: bool,
    },
}

impl Args {
    fn verbose(&self) -> bool {
        match self {
            Args::Svg { verbose, .. } | Args::Panel { verbose, .. } => *verbose,
        }
    }
}

fn usage() -> &'static str {
    "bobgraf\n\
\n\
USAGE:\n\
  bobgraf svg [-v] <input.bob> <output.svg>\n\
  bobgraf panel [-v] <file.svg> [template.json]\n\
\n\
NOTES:\n\
  - svg converts label/textupdate widgets to SVG text; textupdate PVs go to inkscape:label.\n\
  - panel embeds <file.svg> into the template (default: ./json/template.json), appends\n\
    mapValue calls to ./js/helpers.js and writes ./json/<file>.json.\n\
  - -v/--verbose prints diagnostics to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut command: Option<Command> = None;
    let mut verbose = false;
    let mut positionals: Vec<PathBuf> = Vec::new();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "-v" | "--verbose" => verbose = true,
            "svg" if command.is_none() => command = Some(Command::Svg),
            "panel" if command.is_none() => command = Some(Command::Panel),
            "--" => positionals.extend(it.by_ref().map(PathBuf::from)),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path if command.is_some() => positionals.push(PathBuf::from(path)),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    let Some(command) = command else {
        return Err(CliError::Usage(usage()));
    };
    let mut positionals = positionals.into_iter();
    let args = match (command, positionals.len()) {
        (Command::Svg, 2) => Args::Svg {
            input: positionals.next().unwrap_or_default(),
            output: positionals.next().unwrap_or_default(),
            verbose,
        },
        (Command::Panel, 1 | 2) => Args::Panel {
            svg: positionals.next().unwrap_or_default(),
            template: positionals
                .next()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH)),
            verbose,
        },
        _ => return Err(CliError::Usage(usage())),
    };
    Ok(args)
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    match args {
        Args::Svg { input, output, .. } => {
            convert_display_file(&input, &output)?;
            tracing::debug!(output = %output.display(), "wrote SVG");
            Ok(())
        }
        Args::Panel { svg, template, .. } => {
            let out = build_panel_file(
                &svg,
                &template,
                &PanelPaths::default(),
                &PanelOptions::default(),
            )?;
            println!("Created: {}", out.display());
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_logging(args.verbose());

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
