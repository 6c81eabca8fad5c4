/// Element whose width tracks load progress.
pub const LOADING_FILL_SELECTOR: &str = ".loading";

/// Container of the progress bar, faded out on reveal.
pub const LOADING_BAR_SELECTOR: &str = ".loading-bar";
