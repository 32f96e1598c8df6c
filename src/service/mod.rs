//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! The newspaper service orchestrates the upstream text and image calls
//! and the fixed slot-assignment layout.

mod layout;
mod newspaper;

pub use layout::{LAYOUT_SLOTS, LayoutSlot, assign_slots};
pub use newspaper::{ArticleStub, NewspaperService, RawNewspaper};
