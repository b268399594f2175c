//! Command-line interface for the corpus tools.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{CorpusError, Result};
use crate::inspect::{render_summaries, summarize_file};
use crate::matcher::{match_segments, MatchDirs};
use crate::splitter::{split_directory_with, SplitEvent};

/// Usage printed when `match` gets the wrong number of arguments.
pub const MATCH_USAGE: &str = "USAGE: lctl match <input file> <ltf_split dir> <ltf_match dir> <laf_split dir> <laf_match dir>\n\
this command will match all files in the index file against the split LDC files and put the result in the match dirs";

/// LCTL corpus tools - split and match LTF/LAF annotation files.
#[derive(Parser)]
#[command(name = "lctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the split LTF/LAF files declared in a parallel-corpus index into match directories.
    Match {
        /// <input file> <ltf_split dir> <ltf_match dir> <laf_split dir> <laf_match dir>
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// Split every LTF file of a directory into single-segment files.
    Split {
        /// Directory containing the source LTF files
        ltf_dir: PathBuf,

        /// Directory receiving the `<doc id>_<segment id>.ltf.xml` files
        output_dir: PathBuf,
    },

    /// Print a YAML summary of LTF/LAF files.
    Inspect {
        /// Files to inspect (`*.laf.xml` is read as LAF, anything else as LTF)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match { paths } => match_command(&paths),
        Commands::Split {
            ltf_dir,
            output_dir,
        } => split_command(&ltf_dir, &output_dir),
        Commands::Inspect { files } => inspect_command(&files),
    }
}

/// Turn the positional `match` arguments into the index path and directories.
///
/// Returns `None` unless exactly five paths are given.
pub fn parse_match_args(paths: &[PathBuf]) -> Option<(PathBuf, MatchDirs)> {
    let [input, ltf_split, ltf_match, laf_split, laf_match] = paths else {
        return None;
    };
    Some((
        input.clone(),
        MatchDirs {
            ltf_split: ltf_split.clone(),
            ltf_match: ltf_match.clone(),
            laf_split: laf_split.clone(),
            laf_match: laf_match.clone(),
        },
    ))
}

/// Execute the match command.
fn match_command(paths: &[PathBuf]) -> Result<()> {
    let Some((input, dirs)) = parse_match_args(paths) else {
        println!("{MATCH_USAGE}");
        return Ok(());
    };

    // Validate output directories before copying anything
    ensure_dir(&dirs.ltf_match)?;
    ensure_dir(&dirs.laf_match)?;

    println!(
        "{} {}",
        style("Matching").bold(),
        style(input.display()).cyan()
    );

    let report = match_segments(&input, &dirs)?;

    println!(
        "{} {} ids, {} files copied",
        style("Matched").green().bold(),
        report.ids.len(),
        report.files_copied
    );

    Ok(())
}

/// Execute the split command.
fn split_command(ltf_dir: &Path, output_dir: &Path) -> Result<()> {
    let pb = ProgressBar::new(0);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let result = split_directory_with(ltf_dir, output_dir, |event| match event {
        SplitEvent::Listed { files } => {
            pb.suspend(|| {
                println!(
                    "{} {} LTF files from {}",
                    style("Splitting").bold(),
                    style(files).cyan(),
                    style(ltf_dir.display()).green()
                );
            });
            pb.set_length(files as u64);
        }
        SplitEvent::Started(path) => pb.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
        SplitEvent::Finished { .. } => pb.inc(1),
    });
    pb.finish_and_clear();
    let report = result?;

    println!(
        "{} {} segment files to {}",
        style("Wrote").green().bold(),
        report.written.len(),
        output_dir.display()
    );

    Ok(())
}

/// Execute the inspect command.
fn inspect_command(files: &[PathBuf]) -> Result<()> {
    let summaries = files
        .iter()
        .map(|file| summarize_file(file))
        .collect::<Result<Vec<_>>>()?;

    print!("{}", render_summaries(&summaries)?);
    Ok(())
}

/// Fail unless `path` is an existing directory.
fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CorpusError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "directory does not exist"),
        ));
    }
    if !path.is_dir() {
        return Err(CorpusError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path is not a directory"),
        ));
    }
    Ok(())
}
