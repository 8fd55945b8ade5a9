pub mod reader;

use anyhow::{anyhow, Result};
use clap::{builder::PossibleValue, error::ErrorKind, Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use reader::LineReader;
use std::{
    ffi::OsString,
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Template for a line-oriented command-line tool
#[derive(Debug, Parser)]
#[command(author, version, about, args_override_self = true)]
pub struct Args {
    /// Input file; default is terminal (stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Positional arguments after the input file are ignored
    #[arg(value_name = "EXTRA", hide = true)]
    pub extra: Vec<PathBuf>,

    /// Apply strict filtering
    #[arg(short, long)]
    pub filter: bool,

    /// File to which output will be written; default is terminal (stdout)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Strand to search; provide a positive number for the forward strand,
    /// a negative number for the reverse strand, or 0 for both strands
    #[arg(
        short,
        long,
        value_name = "INT",
        default_value = "0",
        allow_negative_numbers = true
    )]
    pub strand: i32,

    /// User-defined weight
    #[arg(
        short,
        long,
        value_name = "REAL",
        default_value = "0.9",
        allow_negative_numbers = true
    )]
    pub weight: f64,

    /// Log level
    #[arg(short, long)]
    pub log: Option<LogLevel>,
}

impl Args {
    /// Parses `argv`, or returns `None` when help should be shown instead.
    ///
    /// A help flag anywhere before `--` wins over any parse error from the
    /// other arguments.
    pub fn try_parse_or_help<I, T>(
        argv: I,
    ) -> Result<Option<Args>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        match Args::try_parse_from(&argv) {
            Ok(args) => Ok(Some(args)),
            Err(e) if e.kind() == ErrorKind::DisplayHelp => Ok(None),
            Err(e) if wants_help(&argv) => {
                debug!("help requested alongside {:?}", e.kind());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn strand_kind(&self) -> Strand {
        Strand::from(self.strand)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    Info,
    Debug,
}

impl ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &[LogLevel::Warn, LogLevel::Info, LogLevel::Debug]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            LogLevel::Warn => PossibleValue::new("warn"),
            LogLevel::Info => PossibleValue::new("info"),
            LogLevel::Debug => PossibleValue::new("debug"),
        })
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

/// Direction of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
    Both,
}

impl From<i32> for Strand {
    fn from(val: i32) -> Self {
        match val {
            v if v > 0 => Strand::Forward,
            v if v < 0 => Strand::Reverse,
            _ => Strand::Both,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strand::Forward => "forward",
            Strand::Reverse => "reverse",
            Strand::Both => "both",
        };
        write!(f, "{name}")
    }
}

// --------------------------------------------------
/// True when `-h` or `--help` appears among the options (argv[0] skipped).
pub fn wants_help(argv: &[OsString]) -> bool {
    argv.iter()
        .skip(1)
        .take_while(|arg| *arg != "--")
        .any(|arg| arg == "-h" || arg == "--help")
}

// --------------------------------------------------
pub fn run(args: Args) -> Result<()> {
    info!("args = {args:#?}");

    // Output is resolved first so a bad --out never touches the input
    let mut output: Box<dyn Write> = match &args.out {
        Some(path) => open_for_write(path)?,
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => open(path)?,
        None => Box::new(BufReader::new(io::stdin())),
    };

    let num_lines = process(&args, input, &mut output)?;
    info!("Read {num_lines} line(s)");

    Ok(())
}

// --------------------------------------------------
/// Reads `input` to the end, one bounded line at a time, and returns the
/// number of lines seen.
pub fn process(
    args: &Args,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<usize> {
    debug!(
        "filter = {}, strand = {}, weight = {}",
        args.filter,
        args.strand_kind(),
        args.weight
    );

    let mut reader = LineReader::new(input);
    let mut num_lines = 0;

    while let Some(raw) = reader.next_line()? {
        num_lines += 1;
        let line = String::from_utf8_lossy(raw);
        let line = line.trim_end();

        // Process the line here, writing results to `output`
        debug!("{num_lines}: {} byte(s)", line.len());
    }

    output.flush()?;

    Ok(num_lines)
}

// --------------------------------------------------
pub fn open(filename: &Path) -> Result<Box<dyn BufRead>> {
    Ok(Box::new(BufReader::new(File::open(filename).map_err(
        |e| anyhow!("error opening input file '{}': {e}", filename.display()),
    )?)))
}

// --------------------------------------------------
pub fn open_for_write(filename: &Path) -> Result<Box<dyn Write>> {
    Ok(Box::new(BufWriter::new(File::create(filename).map_err(
        |e| anyhow!("error opening output file '{}': {e}", filename.display()),
    )?)))
}
