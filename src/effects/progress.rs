//! Scroll progress bar

/// Scroll position and page geometry, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

/// How far down the page the reader is, as a bar width in `[0, 100]`.
///
/// A page that fits the viewport has nothing to scroll and reports 0.
pub fn progress_percent(metrics: &ScrollMetrics) -> f64 {
    let scrollable = metrics.max_scroll();
    if scrollable <= 0.0 {
        return 0.0;
    }
    (metrics.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}
