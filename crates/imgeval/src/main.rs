use argh::FromArgs;
use std::path::PathBuf;

use imgeval::{load_mapping, EvalConfig, EvalError, PairingMode};

#[derive(FromArgs)]
/// Compute PSNR and SSIM between reference images and candidate images.
struct Args {
    /// directory with the reference (ground truth) images
    #[argh(option, short = 'r')]
    reference_dir: PathBuf,

    /// directory with the candidate (rendered) images
    #[argh(option, short = 'c')]
    candidate_dir: PathBuf,

    /// how to pair the images: stem (default) or positional
    #[argh(option, default = "PairingMode::Stem")]
    pairing: PairingMode,

    /// json table mapping reference names to candidate names, overrides --pairing
    #[argh(option)]
    mapping: Option<PathBuf>,

    /// maximum possible value of the normalized pixels
    #[argh(option, default = "1.0")]
    data_range: f64,

    /// psnr reported for pixel-identical pairs, in dB
    #[argh(option, default = "imgeval::config::DEFAULT_PSNR_CEILING")]
    psnr_ceiling: f64,

    /// side of the ssim window, must be odd
    #[argh(option, default = "7")]
    win_size: usize,

    /// weight the ssim window with a gaussian of sigma 1.5
    #[argh(switch)]
    gaussian_weights: bool,

    /// do not normalize the local variances by NP / (NP - 1)
    #[argh(switch)]
    no_sample_covariance: bool,

    /// score the pairs on all available cores
    #[argh(switch)]
    parallel: bool,
}

fn build_config(args: Args) -> Result<EvalConfig, EvalError> {
    let pairing = match args.mapping {
        Some(path) => PairingMode::Mapping(load_mapping(path)?),
        None => args.pairing,
    };

    let mut config = EvalConfig::new(args.reference_dir, args.candidate_dir).with_pairing(pairing);
    config.psnr_ceiling = args.psnr_ceiling;
    config.parallel = args.parallel;
    config.ssim.data_range = args.data_range;
    config.ssim.win_size = args.win_size;
    config.ssim.use_sample_covariance = !args.no_sample_covariance;
    if args.gaussian_weights {
        config.ssim.gaussian_sigma = Some(1.5);
    }

    Ok(config)
}

fn run(args: Args) -> Result<(), EvalError> {
    let config = build_config(args)?;
    let mut stdout = std::io::stdout().lock();
    imgeval::evaluate(&config, &mut stdout)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
