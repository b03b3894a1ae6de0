use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    env,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process,
};
use vault_index_config::{Config, ExtensionsConfig};
use vault_index_engine::{Indexer, ParseOptions, ParseResult};

struct Args {
    compact: bool,
    files: Vec<PathBuf>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut compact = false;
        let mut files = vec![];
        for arg in args {
            match arg.as_str() {
                "--compact" => compact = true,
                "-" => files.push(PathBuf::from(arg)),
                flag if flag.starts_with('-') => return Err(format!("unknown option '{flag}'")),
                _ => files.push(PathBuf::from(arg)),
            }
        }
        Ok(Self { compact, files })
    }
}

#[derive(Serialize)]
struct FileIndex<'a> {
    path: &'a Path,
    index: ParseResult,
}

fn parse_options(extensions: &ExtensionsConfig) -> ParseOptions {
    ParseOptions {
        tags: extensions.tags,
        wiki_links: extensions.wiki_links,
        wiki_embeds: extensions.wiki_embeds,
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("Failed to read stdin")?;
    Ok(source)
}

/// Indexes every file, printing results as it goes. Returns whether all
/// files were indexed.
fn run(indexer: &Indexer, args: &Args, pretty: bool) -> Result<bool> {
    if args.files.is_empty() {
        let index = indexer.parse(&read_stdin()?).context("Failed to index stdin")?;
        print_json(&index, pretty)?;
        return Ok(true);
    }

    let single = args.files.len() == 1;
    let mut all_ok = true;
    for path in &args.files {
        let source = if path == Path::new("-") {
            read_stdin()
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))
        };
        let index = source.and_then(|source| {
            indexer
                .parse(&source)
                .with_context(|| format!("Failed to index '{}'", path.display()))
        });

        match index {
            Ok(index) if single => print_json(&index, pretty)?,
            Ok(index) => print_json(&FileIndex { path, index }, pretty)?,
            Err(e) => {
                eprintln!("Error: {e:#}");
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "vault-index".to_string());
    let args = match Args::parse(args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program} [--compact] [FILE]...");
            process::exit(2);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => {
            log::debug!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let indexer = Indexer::new(parse_options(&config.extensions));
    let pretty = config.pretty && !args.compact;

    match run(&indexer, &args, pretty) {
        Ok(true) => Ok(()),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
