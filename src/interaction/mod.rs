//! Scroll-side inputs: stage entry detection and the sticky frame gate.

mod scroll_observer;
mod sticky;

pub use scroll_observer::{EntryEvent, EntryStream, ScrollObserver};
pub use sticky::{StickyFrame, StickyFrameConfig};
