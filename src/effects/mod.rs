//! Page effects: smooth scrolling, back-to-top, year stamp, scroll progress,
//! animated counters, load reveal, gallery lightbox and nav highlighting

mod back_to_top;
mod controller;
mod counter;
mod lightbox;
mod nav;
mod progress;
mod reveal;
mod smooth_scroll;
mod view;
mod year;

pub use back_to_top::BackToTop;
pub use controller::{PageEffectsController, ScrollEffectState, ScrollSnapshot};
pub use counter::{parse_target, CounterAnimation, CounterGroup, CounterPhase, StartLatch};
pub use lightbox::{GalleryItem, LightboxContent};
pub use nav::{NavHighlighter, SectionPosition};
pub use progress::{progress_percent, ScrollMetrics};
pub use reveal::RevealOnLoad;
pub use smooth_scroll::{anchor_target, is_in_page, SmoothScroll};
pub use view::{PageInventory, PageView};
pub use year::{today, year_text};
