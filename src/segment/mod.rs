//! Glyph segmentation.
//!
//! Two independent strategies run over the same immutable [`BinaryImage`]:
//! column projection ([`segment_projection`]) and 8-connected components
//! ([`segment_components`]). [`segment_robust`] picks between them and falls
//! back to evenly spaced forced cuts ([`segment_forced_cuts`]) when a wide
//! capture still comes out as a single blob.

use crate::image::binary::BinaryImage;
use crate::trace::{trace_event, trace_span};
use crate::util::OcrResult;

mod components;
mod forced;
mod projection;
mod split;

pub use components::segment_components;
pub use forced::segment_forced_cuts;
pub use projection::segment_projection;

/// Segments smaller than this in either dimension are dropped.
pub const MIN_SEGMENT_SIDE: usize = 2;

/// Inclusive bounding box of one candidate glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl Segment {
    /// Creates a box from inclusive edges.
    pub fn new(left: usize, right: usize, top: usize, bottom: usize) -> Self {
        debug_assert!(right >= left && bottom >= top);
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    /// Bounding box area in pixels.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Segment) -> Segment {
        Segment::new(
            self.left.min(other.left),
            self.right.max(other.right),
            self.top.min(other.top),
            self.bottom.max(other.bottom),
        )
    }

    fn is_usable(&self) -> bool {
        self.width() >= MIN_SEGMENT_SIDE && self.height() >= MIN_SEGMENT_SIDE
    }
}

/// Which strategy produced a segmentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentStrategy {
    Projection,
    Components,
    ForcedCuts,
}

impl SegmentStrategy {
    /// Short lowercase name for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentStrategy::Projection => "projection",
            SegmentStrategy::Components => "components",
            SegmentStrategy::ForcedCuts => "forced_cuts",
        }
    }
}

/// Ordered segments plus the strategy that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segmentation {
    pub strategy: SegmentStrategy,
    pub segments: Vec<Segment>,
}

/// A segment together with its cropped pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub segment: Segment,
    pub image: BinaryImage,
}

/// Decides between projection and component output.
///
/// Components win when projection collapsed everything into one block while
/// components found a plausible short string, or when components found more
/// glyphs without an implausible blow-up in count.
pub fn choose_strategy(
    projection: Vec<Segment>,
    components: Vec<Segment>,
) -> Segmentation {
    let (p, c) = (projection.len(), components.len());
    let prefer_components = p == 0
        || (c > 0
            && ((p <= 1 && (2..=8).contains(&c))
                || (c > p && c <= 24 && c as f64 <= p as f64 * 1.8)));
    if prefer_components {
        Segmentation {
            strategy: SegmentStrategy::Components,
            segments: components,
        }
    } else {
        Segmentation {
            strategy: SegmentStrategy::Projection,
            segments: projection,
        }
    }
}

/// Runs both strategies, selects one, and applies the forced-cut fallback.
pub fn segment_robust(img: &BinaryImage) -> Segmentation {
    let _span = trace_span!("segment", width = img.width(), height = img.height()).entered();

    let projection = segment_projection(img);
    let components = segment_components(img);
    trace_event!(
        "segment_candidates",
        projection = projection.len(),
        components = components.len()
    );

    let chosen = choose_strategy(projection, components);
    if chosen.segments.len() <= 1 {
        let forced = segment_forced_cuts(img);
        if forced.len() > chosen.segments.len() {
            return Segmentation {
                strategy: SegmentStrategy::ForcedCuts,
                segments: forced,
            };
        }
    }
    chosen
}

/// Crops every segment out of `img`.
pub fn crop_glyphs(img: &BinaryImage, segments: &[Segment]) -> OcrResult<Vec<Glyph>> {
    segments
        .iter()
        .map(|&segment| {
            let image = img.crop(segment.left, segment.top, segment.right, segment.bottom)?;
            Ok(Glyph { segment, image })
        })
        .collect()
}

/// Tight vertical trim of columns `left..=right`, as a segment.
pub(crate) fn trimmed(img: &BinaryImage, left: usize, right: usize) -> Option<Segment> {
    let (top, bottom) = img.ink_rows(left, right)?;
    Some(Segment::new(left, right, top, bottom))
}

pub(crate) fn retain_usable(mut segments: Vec<Segment>) -> Vec<Segment> {
    segments.retain(Segment::is_usable);
    segments
}
