//! Text postprocessing.

pub mod distance;
pub mod postprocess;

pub use distance::{edit_distance, lcs_len, order_similarity, similarity};
pub use postprocess::{normalize_output, postprocess, snap_canonical};
