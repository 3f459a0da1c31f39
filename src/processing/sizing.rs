/// Largest working size; nothing on screen is 32768 pixels wide.
pub const MAX_WORKING_SIZE: usize = 1 << 15;
/// Lower bound on the working size.
pub const MIN_WORKING_SIZE: usize = 64;

/// Working power-of-two size for a container dimension.
///
/// Starts at 32768 and halves while the candidate is larger than both 64 and
/// `n`. This is not "round up to the next power of two": anything under 128
/// collapses to 64, so `fit_power_of_two(100) == 64`.
pub fn fit_power_of_two(n: usize) -> usize {
    let mut size = MAX_WORKING_SIZE;
    while size > MIN_WORKING_SIZE && size > n {
        size >>= 1;
    }
    size
}

/// Square canvas that fits the smaller container dimension.
pub fn fit_square(width: usize, height: usize) -> usize {
    fit_power_of_two(width.min(height))
}

/// Per-panel size when two panels sit side by side with `margin` pixels of
/// chrome taken from each half.
pub fn fit_side_by_side(width: usize, margin: usize) -> usize {
    fit_power_of_two((width / 2).saturating_sub(margin))
}
