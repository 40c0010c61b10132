//! Heading anchor slugs.
//!
//! Anchors come from comrak's anchorizer, the same one its HTML renderer uses
//! for heading ids, so links built here resolve in rendered output.

use comrak::Anchorizer;

/// Turn heading text into an anchor slug, ignoring other headings.
pub fn slugify(text: &str) -> String {
    Anchorizer::new().anchorize(text.to_string())
}

/// Hands out unique anchors within one document, in document order.
pub struct AnchorRegistry {
    anchorizer: Anchorizer,
}

impl Default for AnchorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self {
            anchorizer: Anchorizer::new(),
        }
    }

    /// Unique anchor for heading text: the slug, or the slug with `-1`, `-2`, …
    pub fn assign(&mut self, text: &str) -> String {
        self.anchorizer.anchorize(text.to_string())
    }
}
