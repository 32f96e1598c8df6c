//! Media handling
//!
//! Client-side image recompression: decode, downscale to a maximum
//! width, re-encode as a compressed `data:` URL.

mod compress;

pub use compress::ImageCompressor;
