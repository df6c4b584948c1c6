//! snapocr reads short alphanumeric strings (serials, captchas, test cards)
//! from small screen captures without any model or external OCR engine.
//!
//! The pipeline binarizes the capture, segments it into glyphs, matches each
//! glyph against a library of rendered character templates, settles common
//! confusions with hole topology, and cleans up the resulting string.
//!
//! ```no_run
//! use snapocr::{Recognizer, TemplateLibrary};
//! use std::sync::Arc;
//!
//! let library = Arc::new(TemplateLibrary::with_system_fonts());
//! let recognizer = Recognizer::new(library);
//! let capture = image::RgbaImage::new(120, 40);
//! println!("{}", recognizer.recognize(&capture));
//! ```
//!
//! Optional features: `rayon` builds the template library in parallel,
//! `tracing` emits spans and events, `image-io` adds file helpers.

pub mod bank;
mod candidate;
pub mod engine;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod preprocess;
pub mod search;
pub mod segment;
pub mod template;
pub mod text;
mod trace;
pub mod util;

pub use bank::{BitmapFont, FontRasterizer, GlyphRasterizer, LibraryConfig, TemplateLibrary};
pub use candidate::top2::Scored;
pub use engine::{RecognitionOutput, Recognizer, RecognizerConfig};
pub use crate::image::binary::BinaryImage;
pub use crate::image::ImageView;
pub use preprocess::PreprocessConfig;
pub use search::{CandidateSet, GlyphMatch, MatchConfig, Matcher};
pub use segment::{Glyph, Segment, SegmentStrategy, Segmentation};
pub use text::normalize_output;
pub use util::{OcrError, OcrResult};
