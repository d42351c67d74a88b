use initok::ini::{IniFile, IoError, TokenKind};

use log::{debug, error, LevelFilter, SetLoggerError};
use simplelog::{Config, WriteLogger};
use std::env;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

const INITOK_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliOptions {
    data: bool,
    ini_path: PathBuf,
    verbose: bool,
    version: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RuntimeError {
    #[error("Missing commandline argument!")]
    CliMissingIniPath,
    #[error("Unknown argument: {0}")]
    CliUnknownArgument(String),
    #[error("{0:?}: {1}")]
    Io(PathBuf, #[source] IoError),
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl RuntimeError {
    fn exit_code(&self) -> i32 {
        match self {
            RuntimeError::CliMissingIniPath | RuntimeError::CliUnknownArgument(_) => 1,
            RuntimeError::Io(_, IoError::Open(_)) => 2,
            RuntimeError::Io(_, IoError::Read(_)) => 3,
            RuntimeError::Output(_) => 4,
        }
    }
}

fn help() {
    println!(
        "INITOK usage:
  initok --version
  initok [-v|--verbose] [-d|--data] <ini_path>"
    );
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, RuntimeError> {
    let mut cfg = CliOptions::default();

    for arg in args.iter().skip(1) {
        match &arg[..] {
            "--data" | "-d" => cfg.data = true,
            "--verbose" | "-v" => cfg.verbose = true,
            "--version" => cfg.version = true,
            _ if arg.starts_with('-') || !cfg.ini_path.as_os_str().is_empty() => {
                return Err(RuntimeError::CliUnknownArgument(arg.clone()))
            }
            _ => cfg.ini_path = arg.into(),
        }
    }

    if !cfg.version && cfg.ini_path.as_os_str().is_empty() {
        return Err(RuntimeError::CliMissingIniPath);
    }

    Ok(cfg)
}

/// Logs to stderr, so stdout only carries tokens
fn init_logger(verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    WriteLogger::init(level, Config::default(), io::stderr())
}

fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Section => "SECTION",
        TokenKind::Entry => "ENTRY",
        TokenKind::Value => "VALUE",
    }
}

fn print_tokens<W: Write>(file: &mut IniFile, writer: &mut W) -> io::Result<usize> {
    let mut count = 0;

    for token in file.tokenizer() {
        writeln!(
            writer,
            "TYPE: {} SIZE: {} TOKEN: \"{}\"",
            kind_name(token.kind()),
            token.size(),
            String::from_utf8_lossy(token.text()),
        )?;
        count += 1;
    }

    Ok(count)
}

fn run(cfg: &CliOptions) -> Result<(), RuntimeError> {
    let mut file = IniFile::load_from_path(&cfg.ini_path)
        .map_err(|e| RuntimeError::Io(cfg.ini_path.clone(), e))?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    if cfg.data {
        let data = file.to_data();
        debug!("Found {} sections in {:?}", data.len(), file.path());
        data.write_to(&mut writer)?;
    } else {
        let count = print_tokens(&mut file, &mut writer)?;
        debug!("Found {count} tokens in {:?}", file.path());
    }

    writer.flush()?;

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let cfg = match parse_args(args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: {e}");
            help();
            process::exit(e.exit_code())
        }
    };

    let logging = init_logger(cfg.verbose).is_ok();

    if cfg.version {
        println!("initok {}", INITOK_VERSION);
        process::exit(0);
    }

    debug!("Starting initok, reading: {:?}", &cfg.ini_path);

    if let Err(e) = run(&cfg) {
        if logging {
            error!("{e}");
        } else {
            eprintln!("ERROR: {e}");
        }
        if let RuntimeError::Io(..) = e {
            help();
        }
        process::exit(e.exit_code());
    }
}
