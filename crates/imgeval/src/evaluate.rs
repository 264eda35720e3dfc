use std::{io::Write, path::PathBuf, time::Instant};

use imgeval_image::ImageMatrix;
use imgeval_io::{read_image_any, IoError};
use imgeval_metrics::{psnr_matrix, ssim_matrix};
use rayon::prelude::*;

use crate::{
    aggregate::Aggregator,
    config::EvalConfig,
    error::EvalError,
    pairing::{list_images, pair_files, FilePair},
};

/// Scores of one successfully processed pair.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRecord {
    /// Position of the pair in the run.
    pub index: usize,
    /// Name the pair is reported under.
    pub name: String,
    /// Peak signal-to-noise ratio in dB, bounded by the configured ceiling.
    pub psnr: f64,
    /// Mean structural similarity index.
    pub ssim: f64,
}

/// Result of processing one [`FilePair`].
#[derive(Clone, Debug, PartialEq)]
pub enum PairOutcome {
    /// Both metrics were computed.
    Scored(ScoreRecord),
    /// The two images differ in height, width or channel count.
    SkippedShapeMismatch {
        /// (height, width, channels) of the reference image.
        reference: [usize; 3],
        /// (height, width, channels) of the candidate image.
        candidate: [usize; 3],
    },
    /// One of the two files does not exist.
    SkippedMissingFile(PathBuf),
    /// Any other fault while loading or scoring the pair.
    SkippedOtherError(String),
}

impl PairOutcome {
    /// The scores, if the pair was scored.
    pub fn record(&self) -> Option<&ScoreRecord> {
        match self {
            PairOutcome::Scored(record) => Some(record),
            _ => None,
        }
    }
}

fn load(path: &std::path::Path) -> Result<ImageMatrix, PairOutcome> {
    read_image_any(path).map_err(|e: IoError| {
        if e.is_not_found() {
            PairOutcome::SkippedMissingFile(path.to_path_buf())
        } else {
            PairOutcome::SkippedOtherError(e.to_string())
        }
    })
}

/// Load both images of a pair and compute their PSNR and SSIM.
///
/// Never fails: every fault is turned into a skipped [`PairOutcome`] so that a
/// single bad pair cannot abort the run. A PSNR above `config.psnr_ceiling`,
/// including the infinite PSNR of pixel-identical images, is reported as the ceiling.
pub fn score_pair(pair: &FilePair, config: &EvalConfig) -> PairOutcome {
    let start = Instant::now();

    let (reference, candidate) = match (load(&pair.reference), load(&pair.candidate)) {
        (Ok(reference), Ok(candidate)) => (reference, candidate),
        (Err(outcome), _) | (_, Err(outcome)) => return outcome,
    };

    if reference.shape() != candidate.shape() {
        return PairOutcome::SkippedShapeMismatch {
            reference: reference.shape(),
            candidate: candidate.shape(),
        };
    }

    let scores = psnr_matrix(&reference, &candidate, config.data_range()).and_then(|psnr| {
        ssim_matrix(&reference, &candidate, &config.ssim).map(|ssim| (psnr, ssim))
    });

    let outcome = match scores {
        Ok((psnr, ssim)) => PairOutcome::Scored(ScoreRecord {
            index: pair.index,
            name: pair.name.clone(),
            psnr: psnr.min(config.psnr_ceiling),
            ssim,
        }),
        Err(e) => PairOutcome::SkippedOtherError(e.to_string()),
    };

    log::debug!("Scored {} in {:?}", pair.name, start.elapsed());
    outcome
}

/// Run a full evaluation: list, pair, score every pair and summarize.
///
/// Progress and the final summary are written to `out` as the run goes; pair
/// level problems are logged as warnings.
///
/// # Errors
///
/// Only setup problems abort the run: an invalid configuration, an unreadable
/// directory, no candidate images or no pairs. Writing to `out` may also fail.
pub fn evaluate<W: Write>(config: &EvalConfig, out: &mut W) -> Result<Aggregator, EvalError> {
    config.validate()?;

    let candidates = list_images(&config.candidate_dir, &config.candidate_extensions)?;
    writeln!(out, "Found {} rendered images.", candidates.len())?;

    let references = list_images(&config.reference_dir, &config.reference_extensions)?;
    log::info!(
        "Pairing {} candidates with {} references by {}",
        candidates.len(),
        references.len(),
        config.pairing
    );

    let pairs = pair_files(
        &config.reference_dir,
        &references,
        &config.candidate_dir,
        &candidates,
        &config.pairing,
    )?;
    writeln!(out, "Comparing against {} original images.", pairs.len())?;
    writeln!(out, "Calculating PSNR and SSIM...")?;

    let mut aggregator = Aggregator::default();
    if config.parallel {
        // par_iter keeps the pair order when collecting
        let outcomes = pairs
            .par_iter()
            .map(|pair| score_pair(pair, config))
            .collect::<Vec<_>>();
        for (pair, outcome) in pairs.iter().zip(outcomes) {
            aggregator.record(pair, outcome, out)?;
        }
    } else {
        for pair in &pairs {
            let outcome = score_pair(pair, config);
            aggregator.record(pair, outcome, out)?;
        }
    }

    aggregator.report(out)?;
    Ok(aggregator)
}
