use std::io::Write;

use crate::{
    evaluate::{PairOutcome, ScoreRecord},
    pairing::FilePair,
};

/// Averages over all scored pairs of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Number of scored pairs.
    pub count: usize,
    /// Arithmetic mean of the PSNR values.
    pub mean_psnr: f64,
    /// Arithmetic mean of the SSIM values.
    pub mean_ssim: f64,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Average Metrics ---")?;
        writeln!(
            f,
            "Average PSNR over {} images: {:.4}",
            self.count, self.mean_psnr
        )?;
        write!(
            f,
            "Average SSIM over {} images: {:.4}",
            self.count, self.mean_ssim
        )
    }
}

/// Collects the outcome of every pair and reports the run.
///
/// Only scored pairs enter the averages, skipped pairs are counted separately.
#[derive(Debug, Default)]
pub struct Aggregator {
    records: Vec<ScoreRecord>,
    shape_mismatches: usize,
    missing_files: usize,
    other_errors: usize,
}

impl Aggregator {
    /// Record the outcome of `pair` and report it.
    ///
    /// Scores are written to `out` immediately, skips are logged as warnings.
    pub fn record<W: Write>(
        &mut self,
        pair: &FilePair,
        outcome: PairOutcome,
        out: &mut W,
    ) -> std::io::Result<()> {
        match outcome {
            PairOutcome::Scored(record) => {
                writeln!(
                    out,
                    "  {}: PSNR={:.4}, SSIM={:.4}",
                    record.name, record.psnr, record.ssim
                )?;
                self.records.push(record);
            }
            PairOutcome::SkippedShapeMismatch {
                reference,
                candidate,
            } => {
                log::warn!(
                    "Image dimensions mismatch for {} {:?} vs {} {:?}. Skipping.",
                    pair.reference.display(),
                    reference,
                    pair.candidate.display(),
                    candidate
                );
                self.shape_mismatches += 1;
            }
            PairOutcome::SkippedMissingFile(path) => {
                log::warn!("File not found - {}. Skipping.", path.display());
                self.missing_files += 1;
            }
            PairOutcome::SkippedOtherError(cause) => {
                log::warn!(
                    "Error processing {} and {}: {}. Skipping.",
                    pair.reference.display(),
                    pair.candidate.display(),
                    cause
                );
                self.other_errors += 1;
            }
        }
        Ok(())
    }

    /// The scored pairs, in the order they were recorded.
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Number of pairs that were skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.shape_mismatches + self.missing_files + self.other_errors
    }

    /// Averages over the scored pairs, `None` if no pair was scored.
    pub fn summary(&self) -> Option<RunSummary> {
        if self.records.is_empty() {
            return None;
        }

        let count = self.records.len();
        let mean = |value: fn(&ScoreRecord) -> f64| {
            self.records.iter().map(value).sum::<f64>() / count as f64
        };

        Some(RunSummary {
            count,
            mean_psnr: mean(|r| r.psnr),
            mean_ssim: mean(|r| r.ssim),
        })
    }

    /// Write the final summary block to `out`.
    pub fn report<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.skipped() > 0 {
            log::info!(
                "Skipped {} pairs: {} shape mismatches, {} missing files, {} errors",
                self.skipped(),
                self.shape_mismatches,
                self.missing_files,
                self.other_errors
            );
        }

        match self.summary() {
            Some(summary) => writeln!(out, "\n{summary}"),
            None => writeln!(out, "\nNo metrics calculated."),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use approx::assert_relative_eq;

    use super::*;

    fn pair(index: usize) -> FilePair {
        FilePair {
            index,
            name: format!("{index}.png"),
            reference: PathBuf::from(format!("gt/{index}.png")),
            candidate: PathBuf::from(format!("renders/{index}.png")),
        }
    }

    fn scored(index: usize, psnr: f64, ssim: f64) -> PairOutcome {
        PairOutcome::Scored(ScoreRecord {
            index,
            name: format!("{index}.png"),
            psnr,
            ssim,
        })
    }

    #[test]
    fn summary_over_scored_pairs_only() -> std::io::Result<()> {
        let mut aggregator = Aggregator::default();
        let mut out = Vec::new();

        aggregator.record(&pair(0), scored(0, 30.0, 0.9), &mut out)?;
        aggregator.record(
            &pair(1),
            PairOutcome::SkippedShapeMismatch {
                reference: [8, 8, 3],
                candidate: [4, 4, 3],
            },
            &mut out,
        )?;
        aggregator.record(&pair(2), scored(2, 20.0, 0.5), &mut out)?;
        aggregator.record(
            &pair(3),
            PairOutcome::SkippedOtherError("boom".to_string()),
            &mut out,
        )?;

        assert_eq!(aggregator.records().len(), 2);
        assert_eq!(aggregator.skipped(), 2);

        let summary = aggregator.summary().expect("two pairs were scored");
        assert_eq!(summary.count, 2);
        assert_relative_eq!(summary.mean_psnr, 25.0);
        assert_relative_eq!(summary.mean_ssim, 0.7);

        aggregator.report(&mut out)?;
        let text = String::from_utf8(out).expect("report is utf-8");
        assert_eq!(
            text,
            "  0.png: PSNR=30.0000, SSIM=0.9000\n\
             \x20 2.png: PSNR=20.0000, SSIM=0.5000\n\
             \n\
             --- Average Metrics ---\n\
             Average PSNR over 2 images: 25.0000\n\
             Average SSIM over 2 images: 0.7000\n"
        );

        Ok(())
    }

    #[test]
    fn nothing_scored() -> std::io::Result<()> {
        let mut aggregator = Aggregator::default();
        let mut out = Vec::new();

        aggregator.record(
            &pair(0),
            PairOutcome::SkippedMissingFile(PathBuf::from("gt/0.png")),
            &mut out,
        )?;
        assert_eq!(aggregator.summary(), None);

        aggregator.report(&mut out)?;
        assert_eq!(
            String::from_utf8(out).expect("report is utf-8"),
            "\nNo metrics calculated.\n"
        );

        Ok(())
    }
}
