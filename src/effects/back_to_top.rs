//! Floating back-to-top button

/// Shows the button once the reader has scrolled past `threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackToTop {
    pub threshold: f64,
}

impl BackToTop {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn is_visible(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }
}
