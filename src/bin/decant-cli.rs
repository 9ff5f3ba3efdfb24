use anyhow::Result;
use clap::Parser;

use std::path::PathBuf;
use std::process::ExitCode;

use decant::batch::{self, BatchSummary};
use decant::logging;
use decant::opts::Opts;

fn main() -> Result<ExitCode> {
    logging::init();
    let params = get_params()?;

    let opts = Opts {
        audio_dir: params.audio_dir,
        transcript_dir: params.transcript_dir,
        flat: params.flat,
        dry_run: params.dry_run,
    };

    // One line per archive as it completes; the summary repeats the details.
    let summary = batch::run_with_progress(&params.input, &opts, |source, outcome| {
        match outcome {
            Ok(conversion) => println!(
                "ok   {} -> {}",
                source.display(),
                conversion.transcript_path.display()
            ),
            Err(err) => println!("fail {}: {err}", source.display()),
        }
    })?;

    print_summary(&summary, opts.dry_run);

    if summary.failed() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &BatchSummary, dry_run: bool) {
    let suffix = if dry_run { " (dry run)" } else { "" };
    println!();
    println!("converted {} archive(s){suffix}", summary.conversions.len());
    for c in &summary.conversions {
        println!(
            "  {} -> audio: {}, transcript: {} ({} segment(s), {:.1}s)",
            c.source.display(),
            c.audio_path.display(),
            c.transcript_path.display(),
            c.segment_count,
            c.duration_seconds,
        );
    }
    if summary.failed() {
        println!("{} archive(s) failed", summary.failures.len());
        for f in &summary.failures {
            println!("  {}: {}", f.source.display(), f.message);
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "decant")]
#[command(about = "Convert speech-to-text archives into portable audio + transcript files")]
struct Params {
    /// A single archive, or a directory to scan recursively.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Directory that receives extracted audio files.
    #[arg(short = 'a', long = "audio-dir")]
    pub audio_dir: PathBuf,

    /// Directory that receives transcript JSON documents.
    #[arg(short = 't', long = "transcript-dir")]
    pub transcript_dir: PathBuf,

    /// Write directly into the output directories, without year/month buckets.
    #[arg(long = "flat", default_value_t = false)]
    pub flat: bool,

    /// Resolve and report output paths without writing anything.
    #[arg(long = "dry-run", default_value_t = false)]
    pub dry_run: bool,
}

fn get_params() -> Result<Params> {
    Ok(Params::parse())
}
