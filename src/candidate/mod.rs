//! Candidate tracking for glyph matching.
//!
//! The matcher only ever needs the best two distinct candidates per glyph.

pub(crate) mod top2;
