use std::{collections::BTreeMap, path::Path, path::PathBuf, str::FromStr};

use imgeval_metrics::SsimConfig;

use crate::error::EvalError;

/// Extensions accepted for candidate images.
pub const CANDIDATE_EXTENSIONS: &[&str] = &["png"];

/// Extensions accepted for reference images.
pub const REFERENCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// PSNR reported for pixel-identical pairs, in dB.
pub const DEFAULT_PSNR_CEILING: f64 = 100.0;

/// How candidate images are associated with reference images.
#[derive(Clone, Debug, PartialEq)]
pub enum PairingMode {
    /// Pair files sharing the same file stem, e.g. `a.jpg` with `a.png`.
    Stem,
    /// Pair the n-th sorted reference with the n-th sorted candidate.
    Positional,
    /// Explicit table from reference file name to candidate file name.
    Mapping(BTreeMap<String, String>),
}

impl FromStr for PairingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stem" => Ok(PairingMode::Stem),
            "positional" => Ok(PairingMode::Positional),
            other => Err(format!(
                "unknown pairing mode '{other}', expected 'stem' or 'positional'"
            )),
        }
    }
}

impl std::fmt::Display for PairingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingMode::Stem => write!(f, "stem"),
            PairingMode::Positional => write!(f, "positional"),
            PairingMode::Mapping(table) => write!(f, "mapping ({} entries)", table.len()),
        }
    }
}

/// Configuration of an evaluation run.
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Directory holding the reference (ground truth) images.
    pub reference_dir: PathBuf,
    /// Directory holding the candidate (rendered) images.
    pub candidate_dir: PathBuf,
    /// How the two listings are paired.
    pub pairing: PairingMode,
    /// Accepted candidate extensions, compared case-insensitively.
    pub candidate_extensions: Vec<String>,
    /// Accepted reference extensions, compared case-insensitively.
    pub reference_extensions: Vec<String>,
    /// Upper bound of the reported PSNR. Pixel-identical pairs report this value.
    pub psnr_ceiling: f64,
    /// SSIM parameters. Its data range is also used for the PSNR.
    pub ssim: SsimConfig,
    /// Score the pairs on the rayon thread pool.
    pub parallel: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::new(),
            candidate_dir: PathBuf::new(),
            pairing: PairingMode::Stem,
            candidate_extensions: CANDIDATE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            reference_extensions: REFERENCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            psnr_ceiling: DEFAULT_PSNR_CEILING,
            ssim: SsimConfig::default(),
            parallel: false,
        }
    }
}

impl EvalConfig {
    /// Create a configuration with the default parameters for two directories.
    pub fn new(reference_dir: impl Into<PathBuf>, candidate_dir: impl Into<PathBuf>) -> Self {
        Self {
            reference_dir: reference_dir.into(),
            candidate_dir: candidate_dir.into(),
            ..Default::default()
        }
    }

    /// Use the given pairing mode.
    pub fn with_pairing(mut self, pairing: PairingMode) -> Self {
        self.pairing = pairing;
        self
    }

    /// The maximum possible pixel value used by both metrics.
    pub fn data_range(&self) -> f64 {
        self.ssim.data_range
    }

    /// Validate the parameters before any file is touched.
    pub fn validate(&self) -> Result<(), EvalError> {
        self.ssim.validate()?;
        if !self.psnr_ceiling.is_finite() || self.psnr_ceiling <= 0.0 {
            return Err(EvalError::InvalidPsnrCeiling(self.psnr_ceiling));
        }
        Ok(())
    }
}

/// Load a pairing table from a JSON object mapping reference names to candidate names.
///
/// ```json
/// { "IMG_0001.jpg": "00000.png", "IMG_0002.jpg": "00001.png" }
/// ```
pub fn load_mapping(path: impl AsRef<Path>) -> Result<BTreeMap<String, String>, EvalError> {
    let path = path.as_ref();
    let mapping_error = |reason: String| EvalError::MappingFile {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| mapping_error(e.to_string()))?;
    let table: BTreeMap<String, String> =
        serde_json::from_str(&content).map_err(|e| mapping_error(e.to_string()))?;

    if table.is_empty() {
        return Err(mapping_error("the table is empty".to_string()));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairing_mode_from_str() {
        assert_eq!("stem".parse::<PairingMode>(), Ok(PairingMode::Stem));
        assert_eq!(
            "Positional".parse::<PairingMode>(),
            Ok(PairingMode::Positional)
        );
        assert!("by-name".parse::<PairingMode>().is_err());
    }

    #[test]
    fn default_config() -> Result<(), EvalError> {
        let config = EvalConfig::new("gt", "renders");
        assert_eq!(config.pairing, PairingMode::Stem);
        assert_eq!(config.candidate_extensions, vec!["png"]);
        assert_eq!(config.reference_extensions, vec!["png", "jpg", "jpeg"]);
        assert_eq!(config.data_range(), 1.0);
        config.validate()?;

        let bad = EvalConfig {
            psnr_ceiling: f64::INFINITY,
            ..config
        };
        assert!(matches!(
            bad.validate(),
            Err(EvalError::InvalidPsnrCeiling(_))
        ));

        Ok(())
    }

    #[test]
    fn mapping_file() -> Result<(), EvalError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("mapping.json");
        std::fs::write(&path, r#"{ "IMG_1.jpg": "00000.png", "IMG_2.jpg": "00001.png" }"#)?;

        let table = load_mapping(&path)?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("IMG_2.jpg").map(String::as_str), Some("00001.png"));

        std::fs::write(&path, "[1, 2, 3]")?;
        assert!(matches!(
            load_mapping(&path),
            Err(EvalError::MappingFile { .. })
        ));

        std::fs::write(&path, "{}")?;
        assert!(matches!(
            load_mapping(&path),
            Err(EvalError::MappingFile { .. })
        ));

        Ok(())
    }
}
