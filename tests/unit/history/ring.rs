use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::frame::Frame;

fn range(min: usize, max: usize) -> OffsetRange {
    OffsetRange::new(min, max).unwrap()
}

fn history(capacity: usize, offset: usize) -> FrameHistory<u32> {
    FrameHistory::new(capacity, offset, range(1, capacity - 1)).unwrap()
}

#[derive(Debug, Default)]
struct Ledger {
    acquired: Cell<usize>,
    released: Cell<usize>,
}

impl Ledger {
    fn live(&self) -> usize {
        self.acquired.get() - self.released.get()
    }
}

#[derive(Debug)]
struct Tracked {
    id: u32,
    ledger: Rc<Ledger>,
}

impl Tracked {
    fn new(id: u32, ledger: &Rc<Ledger>) -> Self {
        ledger.acquired.set(ledger.acquired.get() + 1);
        Self {
            id,
            ledger: Rc::clone(ledger),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.id, &self.ledger)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.released.set(self.ledger.released.get() + 1);
    }
}

#[test]
fn construction_validates_capacity_and_range() {
    assert!(FrameHistory::<u32>::new(0, 1, range(0, 0)).is_err());
    assert!(FrameHistory::<u32>::new(5, 1, range(1, 5)).is_err());

    let h = FrameHistory::<u32>::new(5, 99, range(1, 4)).unwrap();
    assert_eq!(h.blend_offset(), 4);
    assert_eq!(h.capacity(), 5);
    assert!(h.is_empty());
    assert!(!h.is_full());
    assert!(!h.is_frozen());
    assert_eq!(h.cursors(), (0, 0));

    let h = FrameHistory::<u32>::new(5, 0, range(1, 4)).unwrap();
    assert_eq!(h.blend_offset(), 1);
}

#[test]
fn occupancy_tracks_enqueue_count() {
    let cap = 6;
    for n in 0..=cap {
        let mut h = history(cap, 1);
        for i in 0..n {
            h.enqueue(i as u32).unwrap();
        }
        assert_eq!(h.len(), n);
        assert_eq!(h.is_empty(), n == 0);
        assert_eq!(h.is_full(), n == cap);
    }
}

#[test]
fn enqueue_on_full_ring_hands_frame_back() {
    let mut h = history(3, 1);
    for i in 0..3 {
        h.enqueue(i).unwrap();
    }
    assert!(h.is_full());

    let err = h.enqueue(42).unwrap_err();
    assert_eq!(err.capacity(), 3);
    assert_eq!(err.into_frame(), 42);
    assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn base_frame_wraps_when_tail_is_zero() {
    let mut h = history(4, 1);
    assert_eq!(h.base_frame(), None);
    for i in 0..4 {
        h.enqueue(i).unwrap();
    }
    assert_eq!(h.cursors().1, 0);
    assert_eq!(h.base_frame(), Some(&3));
    assert_eq!(h.frame_back(3), Some(&0));
    assert_eq!(h.frame_back(4), None);
}

#[test]
fn blend_frame_scenario_capacity_five_offset_two() {
    let mut h = history(5, 2);
    for i in 0..5 {
        assert!(h.enqueue(i).is_ok());
    }
    assert!(h.is_full());
    assert_eq!(h.cursors().1, 0);
    assert_eq!(h.calc_blend_frame(), Some(&2));

    assert_eq!(h.push(5), Some(0));
    assert!(h.is_full());
    assert_eq!(h.cursors(), (1, 1));
    assert_eq!(h.calc_blend_frame(), Some(&3));
}

#[test]
fn blend_frame_is_offset_behind_most_recent_for_every_offset() {
    let cap = 7;
    for offset in 1..cap {
        let mut h = history(cap, offset);
        for i in 0..30u32 {
            h.push(i);
            let expected = (i as usize).checked_sub(offset).map(|v| v as u32);
            assert_eq!(h.calc_blend_frame().copied(), expected, "offset {offset} i {i}");
            assert_eq!(h.base_frame(), Some(&i));
        }
    }
}

#[test]
fn push_keeps_a_sliding_window() {
    let mut h = history(3, 1);
    for i in 0..10 {
        h.push(i);
    }
    assert!(h.is_full());
    assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![7, 8, 9]);
}

#[test]
fn dequeue_drains_oldest_first() {
    let mut h = history(3, 1);
    assert_eq!(h.dequeue(), None);
    for i in 0..3 {
        h.enqueue(i).unwrap();
    }
    assert_eq!(h.dequeue(), Some(0));
    assert!(!h.is_full());
    assert_eq!(h.dequeue(), Some(1));
    assert_eq!(h.len(), 1);
    h.enqueue(3).unwrap();
    h.enqueue(4).unwrap();
    assert!(h.is_full());
    assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    assert_eq!(h.dequeue(), Some(2));
    assert_eq!(h.dequeue(), Some(3));
    assert_eq!(h.dequeue(), Some(4));
    assert!(h.is_empty());
}

#[test]
fn offset_adjustment_is_clamped() {
    let mut h = FrameHistory::new(5, 1, range(1, 4)).unwrap();
    assert_eq!(h.inc_blend_offset(), 1);
    assert_eq!(h.dec_blend_offset(), 1);

    for i in 0..3 {
        h.push(i);
    }
    assert_eq!(h.inc_blend_offset(), 2);
    assert_eq!(h.inc_blend_offset(), 2);

    for i in 3..20 {
        h.push(i);
    }
    for _ in 0..50 {
        let v = h.inc_blend_offset();
        assert!((1..=4).contains(&v));
    }
    assert_eq!(h.blend_offset(), 4);

    for _ in 0..50 {
        let v = h.dec_blend_offset();
        assert!((1..=4).contains(&v));
    }
    assert_eq!(h.blend_offset(), 1);

    assert_eq!(h.set_blend_offset(100), 4);
    assert_eq!(h.set_blend_offset(0), 1);
}

#[test]
fn freeze_pins_a_copy_of_the_latest_frame() {
    let mut h = FrameHistory::new(5, 1, range(1, 4)).unwrap();
    for i in 0..4u8 {
        h.push(Frame::filled(2, 2, [i, i, i, 255]).unwrap());
    }

    assert!(h.toggle_freeze());
    assert!(h.is_frozen());

    for i in 4..9u8 {
        h.push(Frame::filled(2, 2, [i, i, i, 255]).unwrap());
    }
    let blend = h.calc_blend_frame().unwrap();
    assert_eq!(blend.pixel(0, 0), Some([3, 3, 3, 255]));
    assert_eq!(h.base_frame().unwrap().pixel(0, 0), Some([8, 8, 8, 255]));

    assert!(!h.toggle_freeze());
    assert!(!h.is_frozen());
    assert_eq!(h.calc_blend_frame().unwrap().pixel(0, 0), Some([7, 7, 7, 255]));
}

#[test]
fn freeze_is_refused_on_empty_history() {
    let mut h = history(3, 1);
    assert!(!h.toggle_freeze());
    assert!(!h.is_frozen());
    assert_eq!(h.calc_blend_frame(), None);
}

#[test]
fn clear_keeps_frozen_snapshot() {
    let mut h = history(3, 1);
    h.push(7);
    assert!(h.toggle_freeze());
    h.clear();
    assert!(h.is_empty());
    assert_eq!(h.base_frame(), None);
    assert_eq!(h.calc_blend_frame(), Some(&7));
}

#[test]
fn every_acquired_frame_is_released_exactly_once() {
    let ledger = Rc::new(Ledger::default());
    {
        let mut h = FrameHistory::new(4, 2, range(1, 3)).unwrap();
        for i in 0..4 {
            h.enqueue(Tracked::new(i, &ledger)).unwrap();
        }

        let rejected = h.enqueue(Tracked::new(99, &ledger)).unwrap_err();
        assert_eq!(ledger.live(), 5);
        drop(rejected);
        assert_eq!(ledger.live(), 4);

        assert!(h.toggle_freeze());
        assert_eq!(ledger.live(), 5);

        for i in 4..20 {
            drop(h.push(Tracked::new(i, &ledger)));
            assert_eq!(ledger.live(), 5);
        }

        assert!(!h.toggle_freeze());
        assert_eq!(ledger.live(), 4);
        assert!(h.toggle_freeze());

        let oldest = h.dequeue().unwrap();
        assert_eq!(oldest.id, 16);
        drop(oldest);
        assert_eq!(ledger.live(), 4);
        assert_eq!(h.calc_blend_frame().map(|f| f.id), Some(19));
    }
    assert_eq!(ledger.live(), 0);
    assert_eq!(ledger.acquired.get(), ledger.released.get());
}
