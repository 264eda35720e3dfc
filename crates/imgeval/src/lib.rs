#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! A run lists two directories, pairs their images, scores each pair with
//! PSNR and SSIM and reports the averages over the pairs that could be scored.
//!
//! ```no_run
//! use imgeval::{evaluate, EvalConfig, PairingMode};
//!
//! let config = EvalConfig::new("output/gt", "output/renders").with_pairing(PairingMode::Positional);
//! let aggregator = evaluate(&config, &mut std::io::stdout()).unwrap();
//! println!("{:?}", aggregator.summary());
//! ```

/// Accumulation of per-pair scores.
pub mod aggregate;

/// Run configuration.
pub mod config;

/// Error types for a run.
pub mod error;

/// Per-pair scoring and the run driver.
pub mod evaluate;

/// Directory listing and pairing.
pub mod pairing;

pub use crate::aggregate::{Aggregator, RunSummary};
pub use crate::config::{load_mapping, EvalConfig, PairingMode};
pub use crate::error::EvalError;
pub use crate::evaluate::{evaluate, score_pair, PairOutcome, ScoreRecord};
pub use crate::pairing::{list_images, pair_files, FilePair};
