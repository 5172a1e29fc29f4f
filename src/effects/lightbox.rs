//! Gallery lightbox content

/// Data attributes of one gallery button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryItem {
    /// `data-gallery-src`
    pub src: Option<String>,
    /// `data-gallery-alt`
    pub alt: Option<String>,
}

impl GalleryItem {
    pub fn new(src: &str, alt: &str) -> Self {
        Self {
            src: Some(src.to_string()),
            alt: Some(alt.to_string()),
        }
    }
}

/// What the shared modal shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxContent {
    pub src: String,
    pub alt: String,
    pub caption: String,
}

impl From<&GalleryItem> for LightboxContent {
    fn from(item: &GalleryItem) -> Self {
        let alt = item.alt.clone().unwrap_or_default();
        Self {
            src: item.src.clone().unwrap_or_default(),
            caption: alt.clone(),
            alt,
        }
    }
}
