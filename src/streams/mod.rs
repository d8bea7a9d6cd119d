//! Picks playable renditions from a play-info response.
//!
//! Streams are ordered MP4 first, then HLS, then everything else (DASH), and
//! each one is classified as pre-signed, cookie-protected or unusable.

pub mod descriptor;
pub mod render;
pub mod selector;

pub use descriptor::StreamDescriptor;
pub use render::{AccessKind, PlaybackInstruction};
pub use selector::{
    RenderedStream, Selection, StreamRank, UnusableReason, classify, rank_streams,
    select_and_render,
};
