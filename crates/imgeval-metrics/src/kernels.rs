/// Create a box kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of `kernel_size` equal weights summing to one.
pub fn box_kernel_1d(kernel_size: usize) -> Vec<f64> {
    vec![1.0 / kernel_size as f64; kernel_size]
}

/// Create a gaussian kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Vec<f64> {
    let mean = (kernel_size as f64 - 1.0) / 2.0;
    let sigma_sq = sigma * sigma;

    let mut kernel = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - mean;
            (-(x * x) / (2.0 * sigma_sq)).exp()
        })
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Size of the gaussian window that covers `truncate` standard deviations on each side.
///
/// Returns `None` when the size does not fit in a `usize`.
pub fn gaussian_kernel_size(sigma: f64, truncate: f64) -> Option<usize> {
    let radius = (truncate * sigma + 0.5) as usize;
    radius.checked_mul(2)?.checked_add(1)
}
