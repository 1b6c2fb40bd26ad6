//! Projects the current selection onto the host's description panel.

use crate::host::InfoPanel;
use crate::registry::Part;

#[derive(Debug, Clone, Copy)]
pub struct PresentationSync {
    indicator_count: usize,
}

impl PresentationSync {
    pub fn new(indicator_count: usize) -> Self {
        Self { indicator_count }
    }

    #[inline]
    pub fn indicator_count(&self) -> usize {
        self.indicator_count
    }

    /// Show `part`'s metadata with only its indicator lit.
    pub fn show(&self, panel: &mut dyn InfoPanel, index: usize, part: &Part) {
        panel.set_title(&part.title);
        panel.set_description(&part.description);
        panel.set_image(part.image.as_ref());
        for i in 0..self.indicator_count {
            panel.set_indicator(i, i == index);
        }
        panel.set_visible(true);
    }

    /// Nothing selected: panel hidden, every indicator off.
    pub fn hide(&self, panel: &mut dyn InfoPanel) {
        for i in 0..self.indicator_count {
            panel.set_indicator(i, false);
        }
        panel.set_visible(false);
    }
}
