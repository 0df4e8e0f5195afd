/// Vertical span of one row: rendered height plus the gap below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPitch(f64);

impl ItemPitch {
    /// `None` when the row has not been laid out yet (no positive, finite height).
    pub fn new(item_height: f64, gap: f64) -> Option<Self> {
        let pitch = item_height + gap;
        (item_height.is_finite() && item_height > 0.0 && pitch.is_finite()).then_some(Self(pitch))
    }

    pub fn px(self) -> f64 {
        self.0
    }
}

/// Row under a scroll offset. Overscroll above the first row reads as row 0.
pub fn index_at(offset: f64, pitch: ItemPitch) -> usize {
    if !(offset > 0.0) {
        return 0;
    }
    (offset / pitch.0).floor() as usize
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub pitch: ItemPitch,
    pub count: usize,
}

impl ScrollState {
    /// Row index clamped into the list, `None` for an empty list.
    pub fn index(&self) -> Option<usize> {
        let last = self.count.checked_sub(1)?;
        Some(index_at(self.offset, self.pitch).min(last))
    }
}
