use std::io::{self, Write};
use std::path::PathBuf;

use clap::{App, AppSettings, Arg, ArgMatches};
use console::style;
use failure::{Error, ResultExt};
use log::{info, LevelFilter};

use crate::archive::ZipArchive;
use crate::report::{write_banner, write_extracted, write_preview};
use crate::utils::{base_directory, resolve_against};

/// Parsed command line options.
#[derive(Debug, Clone)]
pub struct Options {
    pub archive: PathBuf,
    pub directory: Option<PathBuf>,
    pub dest: PathBuf,
    pub preview_limit: usize,
    pub listing_limit: usize,
    pub progress: bool,
    pub verbosity: u64,
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("unzip-report")
        .about("Extracts a zip archive and reports what was unpacked")
        .author("Armin Ronacher <armin.ronacher@active-4.com>")
        .setting(AppSettings::ColoredHelp)
        .arg(
            Arg::with_name("archive")
                .index(1)
                .default_value("files.zip")
                .help("The archive to extract"),
        )
        .arg(
            Arg::with_name("directory")
                .short("C")
                .long("directory")
                .value_name("DIR")
                .help("Resolve relative paths against this directory"),
        )
        .arg(
            Arg::with_name("dest")
                .short("d")
                .long("dest")
                .value_name("DIR")
                .default_value(".")
                .help("The directory to extract into"),
        )
        .arg(
            Arg::with_name("preview")
                .long("preview")
                .value_name("N")
                .default_value("20")
                .help("Number of entries listed before extracting"),
        )
        .arg(
            Arg::with_name("list")
                .long("list")
                .value_name("N")
                .default_value("30")
                .help("Number of entries listed after extracting"),
        )
        .arg(
            Arg::with_name("no_progress")
                .long("no-progress")
                .help("Do not show a progress bar"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Increase log output (can be repeated)"),
        )
}

fn parse_limit(matches: &ArgMatches, name: &str) -> Result<usize, Error> {
    let raw = matches.value_of(name).unwrap_or_default();
    Ok(raw
        .parse::<usize>()
        .with_context(|_| format!("invalid value for --{}: {}", name, raw))?)
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Result<Options, Error> {
        Ok(Options {
            archive: PathBuf::from(matches.value_of_os("archive").unwrap_or_default()),
            directory: matches.value_of_os("directory").map(PathBuf::from),
            dest: PathBuf::from(matches.value_of_os("dest").unwrap_or_default()),
            preview_limit: parse_limit(matches, "preview")?,
            listing_limit: parse_limit(matches, "list")?,
            progress: !matches.is_present("no_progress"),
            verbosity: matches.occurrences_of("verbose"),
        })
    }
}

fn init_logging(verbosity: u64) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

/// Opens, lists and unpacks the archive described by `opts`.
pub fn run<W: Write>(opts: &Options, out: &mut W) -> Result<(), Error> {
    write_banner(out, "EXTRACTING FILES FROM ZIP ARCHIVE")?;

    let base = base_directory(opts.directory.as_ref().map(|x| x.as_path()))
        .context("could not resolve base directory")?;
    let archive_path = resolve_against(&base, &opts.archive);
    let dst = resolve_against(&base, &opts.dest);

    writeln!(out, "\nOpening archive: {}", opts.archive.display())?;
    let mut archive = ZipArchive::open(&archive_path)?;
    info!("unpacking {} into {}", archive.path().display(), dst.display());
    write_preview(out, archive.entries(), opts.preview_limit)?;

    writeln!(out, "\nExtracting all files...")?;
    out.flush()?;
    let pb = archive.progress_bar(opts.progress);
    archive.unpack(&dst, &pb)?;
    writeln!(out, "{} Extraction complete!", style("✓").green())?;

    writeln!(out)?;
    write_extracted(out, &dst, archive.entries(), opts.listing_limit)?;

    writeln!(out)?;
    write_banner(
        out,
        &format!("{}", style("SUCCESS: All files extracted").green().bold()),
    )?;
    Ok(())
}

pub fn main() -> Result<(), Error> {
    let matches = app().get_matches();
    let opts = Options::from_matches(&matches)?;
    init_logging(opts.verbosity);
    run(&opts, &mut io::stdout())
}
