//! Appearance variants of a module.
//!
//! A module starts on its default appearance. The first cycle hides the
//! default and shows a variant; from then on exactly one variant is shown.

/// Variant bookkeeping for one module. `index` is always in
/// `[0, variant_count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualState {
    index: usize,
    variant_count: usize,
    showing_default: bool,
}

impl VisualState {
    pub fn new(variant_count: usize) -> Self {
        Self {
            index: 0,
            variant_count: variant_count.max(1),
            showing_default: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn variant_count(&self) -> usize {
        self.variant_count
    }

    pub fn is_default(&self) -> bool {
        self.showing_default
    }

    pub fn shown(&self) -> Option<usize> {
        (!self.showing_default).then_some(self.index)
    }

    /// Step to the next (`forward`) or previous variant with wraparound and
    /// show it. Returns the newly shown index.
    pub fn cycle(&mut self, forward: bool) -> usize {
        self.showing_default = false;
        self.index = if forward {
            (self.index + 1) % self.variant_count
        } else {
            (self.index + self.variant_count - 1) % self.variant_count
        };
        self.index
    }

    /// Copy the variant shown by `other`. A source still on its default
    /// appearance leaves this state untouched. Returns whether anything
    /// changed.
    pub fn mimic(&mut self, other: Option<usize>) -> bool {
        let Some(index) = other else {
            return false;
        };
        let index = index % self.variant_count;
        if !self.showing_default && self.index == index {
            return false;
        }
        self.showing_default = false;
        self.index = index;
        true
    }
}
