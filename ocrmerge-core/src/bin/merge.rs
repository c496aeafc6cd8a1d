use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use snafu::{ResultExt, ensure};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ocrmerge_core::error::{
    ConfigSnafu, DuplicateOutputSnafu, OcrMergeError, SerializeSnafu, WriteOutputSnafu,
};
use ocrmerge_core::{
    DetectionRecord, DetectionSource, JsonDetectionSource, MergeConfig, MergeConfigBuilder, Merger,
};

#[derive(Parser)]
#[command(name = "merge")]
#[command(about = "Merge fragmented OCR detections into text blocks")]
struct Args {
    #[arg(required = true, help = "JSON file(s) with raw OCR detections")]
    inputs: Vec<PathBuf>,

    #[arg(
        short,
        long,
        allow_negative_numbers = true,
        help = "Max gap between stacked boxes in pixels [default: 35, inspection: 5]"
    )]
    vertical: Option<f32>,

    #[arg(
        short = 'H',
        long,
        allow_negative_numbers = true,
        help = "Max distance between left edges in pixels [default: 35, inspection: 50]"
    )]
    horizontal: Option<f32>,

    #[arg(short, long, help = "Keep blocks scoring above this [default: 0.1]")]
    score: Option<f32>,

    #[arg(long, help = "Start from the single-image inspection thresholds")]
    inspection: bool,

    #[arg(
        short,
        long,
        help = "Output directory, required when merging several inputs"
    )]
    output: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON output")]
    pretty: bool,
}

impl Args {
    fn merge_config(&self) -> Result<MergeConfig, OcrMergeError> {
        let base = if self.inspection {
            MergeConfig::inspection()
        } else {
            MergeConfig::default()
        };

        MergeConfigBuilder::default()
            .vertical_threshold(self.vertical.unwrap_or(base.vertical_threshold))
            .horizontal_threshold(self.horizontal.unwrap_or(base.horizontal_threshold))
            .score_threshold(self.score.unwrap_or(base.score_threshold))
            .build()
            .context(ConfigSnafu)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.merge_config()?;
    info!(
        "Merging with vertical threshold {}, horizontal threshold {}, score threshold {}",
        config.vertical_threshold, config.horizontal_threshold, config.score_threshold
    );
    let merger = Merger::new(config);

    match (&args.output, args.inputs.as_slice()) {
        (None, [input]) => {
            let report = merger.process(&mut JsonDetectionSource, input)?;
            println!("{}", to_json(&report.records(), args.pretty)?);
        }
        (None, _) => {
            error!("Several inputs given without an output directory");
            return Err("--output is required when merging several inputs".into());
        }
        (Some(output_dir), inputs) => {
            // Resolved up front so a name clash fails before anything is written
            let paths = output_paths(output_dir, inputs)?;
            std::fs::create_dir_all(output_dir).context(WriteOutputSnafu {
                path: output_dir.display().to_string(),
            })?;

            let mut source = JsonDetectionSource;
            let batches = inputs
                .iter()
                .map(|input| source.detect(input))
                .collect::<Result<Vec<_>, _>>()?;

            let reports = merger.merge_batch(&batches);
            for (path, report) in paths.iter().zip(reports) {
                write_records(path, &report.records(), args.pretty)?;
                info!(
                    "Wrote {} of {} merged blocks to: {}",
                    report.kept_count(),
                    report.merged_count,
                    path.display()
                );
            }
        }
    }

    Ok(())
}

/// One output file per input, `<stem>.merged.json`.
///
/// Inputs sharing a file stem (`a/page.json`, `b/page.json`) get their
/// position appended instead, `page-0.merged.json` and `page-1.merged.json`.
/// Any name still produced twice is an error.
fn output_paths(output_dir: &Path, inputs: &[PathBuf]) -> Result<Vec<PathBuf>, OcrMergeError> {
    let stems: Vec<String> = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("input-{}", index))
        })
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_default() += 1;
    }

    let mut seen = HashSet::new();
    stems
        .iter()
        .enumerate()
        .map(|(index, stem)| -> Result<PathBuf, OcrMergeError> {
            let name = if counts[stem.as_str()] > 1 {
                format!("{}-{}.merged.json", stem, index)
            } else {
                format!("{}.merged.json", stem)
            };
            let path = output_dir.join(name);
            ensure!(
                seen.insert(path.clone()),
                DuplicateOutputSnafu {
                    path: path.display().to_string()
                }
            );
            Ok(path)
        })
        .collect()
}

fn to_json(records: &[DetectionRecord], pretty: bool) -> Result<String, OcrMergeError> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .context(SerializeSnafu)
}

fn write_records(
    path: &Path,
    records: &[DetectionRecord],
    pretty: bool,
) -> Result<(), OcrMergeError> {
    let json = to_json(records, pretty)?;

    std::fs::write(path, json).context(WriteOutputSnafu {
        path: path.display().to_string(),
    })
}
