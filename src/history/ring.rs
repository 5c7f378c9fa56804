use tracing::debug;

use crate::foundation::core::OffsetRange;
use crate::foundation::error::{CapacityExceeded, TrailError, TrailResult};

/// Fixed-capacity ring of retained frames used to pick a delayed blend source.
///
/// ```text
///   slots: [F5, F1, F2, F3, F4]    capacity = 5, full
///            ^head/tail
///   base_frame()       => slots[(tail + cap - 1) % cap]            = F5
///   calc_blend_frame() => slots[(tail + cap - 1 - offset) % cap]   = F3 (offset 2)
/// ```
///
/// The history exclusively owns every retained frame and the frozen snapshot. Frames are
/// released by `Drop` when they are overwritten, evicted, unfrozen, or when the history itself
/// is dropped. References returned by the read accessors borrow the history, so they cannot
/// outlive the next mutating call.
#[derive(Debug)]
pub struct FrameHistory<F> {
    // `None` is the empty placeholder for a slot that was never written or was dequeued.
    slots: Vec<Option<F>>,
    head: usize,
    tail: usize,
    full: bool,
    blend_offset: usize,
    offsets: OffsetRange,
    // Present iff frozen.
    frozen: Option<F>,
}

impl<F> FrameHistory<F> {
    /// Create an empty history with `capacity` slots.
    ///
    /// `offsets.max` must address a retained frame, so it has to be below `capacity`. The
    /// initial `blend_offset` is clamped into `offsets`.
    pub fn new(capacity: usize, blend_offset: usize, offsets: OffsetRange) -> TrailResult<Self> {
        if capacity == 0 {
            return Err(TrailError::validation("frame history capacity must be >= 1"));
        }
        if offsets.max >= capacity {
            return Err(TrailError::validation(format!(
                "max blend offset {} must be < capacity {capacity}",
                offsets.max
            )));
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            head: 0,
            tail: 0,
            full: false,
            blend_offset: offsets.clamp(blend_offset),
            offsets,
            frozen: None,
        })
    }

    /// Number of slots in the ring.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of retained frames.
    pub fn len(&self) -> usize {
        if self.full {
            self.capacity()
        } else {
            (self.tail + self.capacity() - self.head) % self.capacity()
        }
    }

    /// Return `true` when no frames are retained.
    pub fn is_empty(&self) -> bool {
        !self.full && self.head == self.tail
    }

    /// Return `true` when every slot holds a retained frame.
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Return `true` while a frozen snapshot pins the blend source.
    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Current blend offset in frames.
    pub fn blend_offset(&self) -> usize {
        self.blend_offset
    }

    /// Configured blend offset bounds.
    pub fn offset_range(&self) -> OffsetRange {
        self.offsets
    }

    /// Store `frame` at the write position.
    ///
    /// When the ring is full the frame is handed back inside the error and nothing changes.
    pub fn enqueue(&mut self, frame: F) -> Result<(), CapacityExceeded<F>> {
        if self.full {
            return Err(CapacityExceeded::new(frame, self.capacity()));
        }
        self.install(frame);
        Ok(())
    }

    /// Store `frame`, evicting the oldest retained frame first when the ring is full.
    ///
    /// Returns the evicted frame, if any.
    pub fn push(&mut self, frame: F) -> Option<F> {
        let evicted = if self.full { self.dequeue() } else { None };
        self.install(frame);
        evicted
    }

    /// Remove and return the oldest retained frame.
    pub fn dequeue(&mut self) -> Option<F> {
        if self.is_empty() {
            return None;
        }
        let frame = self.slots[self.head].take();
        self.head = (self.head + 1) % self.capacity();
        self.full = false;
        frame
    }

    /// Drop every retained frame. The frozen snapshot is independent and survives.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.full = false;
    }

    /// The most recently written frame.
    pub fn base_frame(&self) -> Option<&F> {
        self.frame_back(0)
    }

    /// The frame written `back` enqueues before the most recent one (`0` is the most recent).
    pub fn frame_back(&self, back: usize) -> Option<&F> {
        if back >= self.len() {
            return None;
        }
        let cap = self.capacity();
        self.slots[(self.tail + cap - 1 - back) % cap].as_ref()
    }

    /// The blend source: the frozen snapshot when frozen, otherwise the frame written
    /// [`blend_offset`](Self::blend_offset) enqueues before the most recent one.
    ///
    /// Returns `None` until enough frames are retained to reach that far back.
    pub fn calc_blend_frame(&self) -> Option<&F> {
        match &self.frozen {
            Some(snapshot) => Some(snapshot),
            None => self.frame_back(self.blend_offset),
        }
    }

    /// Increase the blend offset by one frame.
    ///
    /// The offset never exceeds the configured maximum, nor reaches further back than the
    /// oldest retained frame. Returns the new offset.
    pub fn inc_blend_offset(&mut self) -> usize {
        let ceiling = self
            .offsets
            .max
            .min(self.len().saturating_sub(1))
            .max(self.offsets.min);
        if self.blend_offset < ceiling {
            self.blend_offset += 1;
            debug!(offset = self.blend_offset, "blend offset increased");
        }
        self.blend_offset
    }

    /// Decrease the blend offset by one frame, stopping at the configured minimum.
    pub fn dec_blend_offset(&mut self) -> usize {
        if self.blend_offset > self.offsets.min {
            self.blend_offset -= 1;
            debug!(offset = self.blend_offset, "blend offset decreased");
        }
        self.blend_offset
    }

    /// Set the blend offset directly, clamped into the configured range.
    pub fn set_blend_offset(&mut self, offset: usize) -> usize {
        self.blend_offset = self.offsets.clamp(offset);
        self.blend_offset
    }

    /// Retained frames from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &F> + '_ {
        let cap = self.capacity();
        (0..self.len()).filter_map(move |i| self.slots[(self.head + i) % cap].as_ref())
    }

    fn install(&mut self, frame: F) {
        // Any previous occupant is released here.
        self.slots[self.tail] = Some(frame);
        self.tail = (self.tail + 1) % self.capacity();
        self.full = self.tail == self.head;
    }

    #[cfg(test)]
    pub(crate) fn cursors(&self) -> (usize, usize) {
        (self.head, self.tail)
    }
}

impl<F: Clone> FrameHistory<F> {
    /// Toggle freeze mode and return the new frozen state.
    ///
    /// Freezing deep-copies the most recently written frame, so later writes never touch the
    /// snapshot. Unfreezing releases it. Freezing an empty history is refused.
    pub fn toggle_freeze(&mut self) -> bool {
        if self.frozen.take().is_some() {
            debug!("blend source unfrozen");
            return false;
        }

        self.frozen = self.base_frame().cloned();
        if self.frozen.is_some() {
            debug!(retained = self.len(), "blend source frozen");
        } else {
            debug!("freeze ignored: no frame retained yet");
        }
        self.frozen.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/ring.rs"]
mod tests;
