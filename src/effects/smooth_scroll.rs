//! In-page anchor scrolling

/// Same-page anchor an `href` points at, without the `#`.
///
/// A bare `#` names no element.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Whether a click on a link with this `href` should be handled in-page
pub fn is_in_page(href: &str) -> bool {
    href.starts_with('#')
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    /// Height of the fixed header, kept clear above the target
    pub header_offset: f64,
}

impl SmoothScroll {
    pub fn new(header_offset: f64) -> Self {
        Self { header_offset }
    }

    /// Document offset to scroll to, given the target's viewport-relative
    /// top and the current scroll offset
    pub fn target_top(&self, rect_top: f64, scroll_y: f64) -> f64 {
        rect_top + scroll_y - self.header_offset
    }
}
