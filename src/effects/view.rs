//! Rendering capability and page inventory for the effects controller

use super::lightbox::{GalleryItem, LightboxContent};

/// DOM writes performed by the page effects. Indexes refer to the order in
/// which the corresponding elements were listed in [`PageInventory`].
pub trait PageView {
    /// Animated scroll to a document offset
    fn smooth_scroll_to(&self, top: f64);
    fn set_back_to_top_visible(&self, visible: bool);
    /// Width of the progress bar, in percent
    fn set_progress_width(&self, percent: f64);
    fn write_year(&self, year: &str);
    fn set_counter_text(&self, index: usize, text: &str);
    fn reveal_cards(&self);
    fn show_lightbox(&self, content: &LightboxContent);
    /// Mark one nav link active and clear the rest; `None` clears all
    fn set_active_nav(&self, link: Option<usize>);
}

/// Which effect targets exist on the page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageInventory {
    pub back_to_top: bool,
    pub year_slots: usize,
    pub progress_bar: bool,
    /// `data-target` of each counter, in document order
    pub counter_targets: Vec<f64>,
    pub reveal_cards: usize,
    /// The modal and its image/caption elements are all present
    pub lightbox: bool,
    pub gallery: Vec<GalleryItem>,
    pub nav_links: usize,
}
