//! Active navigation link tracking

/// Top offset of the section a nav link points to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPosition {
    /// Index of the link in the nav link list
    pub link: usize,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavHighlighter {
    /// How far below the current scroll offset a section may start and
    /// still count as reached
    pub offset: f64,
}

impl NavHighlighter {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// Link of the last section, in link order, whose top is at or above
    /// `scroll_y + offset`
    pub fn active_link(&self, scroll_y: f64, sections: &[SectionPosition]) -> Option<usize> {
        let y = scroll_y + self.offset;
        sections
            .iter()
            .rev()
            .find(|section| y >= section.top)
            .map(|section| section.link)
    }
}
