//! Virtual/logical index arithmetic for the tripled item sequence
//!
//! The carousel renders its N items three times. Positions in that
//! sequence are [`VirtualIndex`] values in `[0, 3N)`; the item they show
//! is the [`LogicalIndex`] `virtual mod N`. The middle copy `[N, 2N)` is
//! the resting zone: settling anywhere else is followed by a silent jump
//! of exactly N slides back into it.

use std::fmt;
use std::num::NonZeroUsize;

use crate::constants::layout::COPIES;

/// Position in the tripled (head, middle, tail) sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualIndex(pub usize);

/// Position in the caller's original item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalIndex(pub usize);

impl VirtualIndex {
    /// Raw position.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl LogicalIndex {
    /// Raw position.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for VirtualIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for LogicalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `virtual mod n`.
#[inline]
pub fn to_logical(virtual_index: usize, n: NonZeroUsize) -> usize {
    virtual_index % n.get()
}

/// Canonical resting slot of `logical` inside the middle copy.
#[inline]
pub fn to_middle_virtual(logical: usize, n: NonZeroUsize) -> usize {
    logical + n.get()
}

/// `virtual < N`.
#[inline]
pub fn is_in_head_copy(virtual_index: usize, n: NonZeroUsize) -> bool {
    virtual_index <= n.get() - 1
}

/// `virtual >= 2N`.
#[inline]
pub fn is_in_tail_copy(virtual_index: usize, n: NonZeroUsize) -> bool {
    virtual_index >= 2 * n.get()
}

/// Index space of one carousel. N is fixed for the carousel's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpace {
    len: NonZeroUsize,
}

impl IndexSpace {
    /// Index space over `len` items.
    pub const fn new(len: NonZeroUsize) -> Self {
        Self { len }
    }

    /// Build from a raw item count, returning `None` for an empty carousel.
    pub fn from_len(len: usize) -> Option<Self> {
        NonZeroUsize::new(len).map(Self::new)
    }

    /// Number of original items (N).
    #[inline]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Length of the tripled sequence (3N).
    #[inline]
    pub fn virtual_len(&self) -> usize {
        self.len.get() * COPIES
    }

    /// Item shown at `v`.
    #[inline]
    pub fn to_logical(&self, v: VirtualIndex) -> LogicalIndex {
        LogicalIndex(to_logical(v.0, self.len))
    }

    /// Middle-copy slot of `logical`.
    #[inline]
    pub fn to_middle_virtual(&self, logical: LogicalIndex) -> VirtualIndex {
        VirtualIndex(to_middle_virtual(logical.0 % self.len(), self.len))
    }

    /// `v` lies in `[0, N)`.
    #[inline]
    pub fn is_in_head_copy(&self, v: VirtualIndex) -> bool {
        is_in_head_copy(v.0, self.len)
    }

    /// `v` lies in `[2N, 3N)`.
    #[inline]
    pub fn is_in_tail_copy(&self, v: VirtualIndex) -> bool {
        is_in_tail_copy(v.0, self.len)
    }

    /// `v` lies in `[N, 2N)`.
    #[inline]
    pub fn is_in_middle_copy(&self, v: VirtualIndex) -> bool {
        !self.is_in_head_copy(v) && !self.is_in_tail_copy(v)
    }

    /// `v` lies in `[0, 3N)`.
    #[inline]
    pub fn contains(&self, v: VirtualIndex) -> bool {
        v.0 < self.virtual_len()
    }

    /// Clamp an arbitrary virtual index into `[0, 3N)`.
    #[inline]
    pub fn clamp(&self, v: VirtualIndex) -> VirtualIndex {
        VirtualIndex(v.0.min(self.virtual_len() - 1))
    }

    /// Where a settle at `v` must silently jump to, if anywhere.
    ///
    /// Head copy moves forward by N, tail copy moves back by N, the middle
    /// copy stays put.
    pub fn relocate_to_middle(&self, v: VirtualIndex) -> Option<VirtualIndex> {
        if self.is_in_head_copy(v) {
            Some(VirtualIndex(v.0 + self.len()))
        } else if self.is_in_tail_copy(v) {
            Some(VirtualIndex(v.0 - self.len()))
        } else {
            None
        }
    }

    /// Nearest slide for a free-form scroll offset.
    ///
    /// `round(offset / slide_width)`, ties rounding up, clamped into the
    /// tripled sequence. Returns `None` when the measurement is unusable
    /// (non-finite offset, or a width that is not a positive finite number).
    pub fn nearest_slide(
        &self,
        offset_px: f32,
        slide_width_px: f32,
    ) -> Option<VirtualIndex> {
        if !offset_px.is_finite()
            || !slide_width_px.is_finite()
            || slide_width_px <= 0.0
        {
            return None;
        }
        let raw = (offset_px / slide_width_px).round();
        if raw <= 0.0 {
            return Some(VirtualIndex(0));
        }
        Some(self.clamp(VirtualIndex(raw as usize)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(n: usize) -> IndexSpace {
        IndexSpace::from_len(n).expect("non-empty")
    }

    #[test]
    fn empty_len_has_no_space() {
        assert!(IndexSpace::from_len(0).is_none());
    }

    #[test]
    fn triple_copy_consistency() {
        for n in 1..=12 {
            let s = space(n);
            for v in 0..n {
                let a = s.to_logical(VirtualIndex(v));
                let b = s.to_logical(VirtualIndex(v + n));
                let c = s.to_logical(VirtualIndex(v + 2 * n));
                assert_eq!(a, b);
                assert_eq!(b, c);
                assert_eq!(a, LogicalIndex(v));
            }
        }
    }

    #[test]
    fn copy_boundaries() {
        let s = space(4);
        assert!(s.is_in_head_copy(VirtualIndex(0)));
        assert!(s.is_in_head_copy(VirtualIndex(3)));
        assert!(!s.is_in_head_copy(VirtualIndex(4)));
        assert!(s.is_in_middle_copy(VirtualIndex(4)));
        assert!(s.is_in_middle_copy(VirtualIndex(7)));
        assert!(s.is_in_tail_copy(VirtualIndex(8)));
        assert!(s.is_in_tail_copy(VirtualIndex(11)));
    }

    #[test]
    fn single_item_carousel() {
        let s = space(1);
        assert_eq!(s.virtual_len(), 3);
        assert_eq!(s.to_middle_virtual(LogicalIndex(0)), VirtualIndex(1));
        assert_eq!(s.relocate_to_middle(VirtualIndex(0)), Some(VirtualIndex(1)));
        assert_eq!(s.relocate_to_middle(VirtualIndex(2)), Some(VirtualIndex(1)));
        assert_eq!(s.relocate_to_middle(VirtualIndex(1)), None);
    }

    #[test]
    fn relocation_lands_in_middle_copy() {
        let s = space(5);
        for v in 0..s.virtual_len() {
            let v = VirtualIndex(v);
            let settled = s.relocate_to_middle(v).unwrap_or(v);
            assert!(s.is_in_middle_copy(settled));
            assert_eq!(s.to_logical(settled), s.to_logical(v));
        }
    }

    #[test]
    fn nearest_slide_rounds_half_up() {
        let s = space(3);
        assert_eq!(s.nearest_slide(0.0, 100.0), Some(VirtualIndex(0)));
        assert_eq!(s.nearest_slide(149.0, 100.0), Some(VirtualIndex(1)));
        assert_eq!(s.nearest_slide(150.0, 100.0), Some(VirtualIndex(2)));
        assert_eq!(s.nearest_slide(250.0, 100.0), Some(VirtualIndex(3)));
    }

    #[test]
    fn nearest_slide_clamps_overscroll() {
        let s = space(3);
        assert_eq!(s.nearest_slide(-80.0, 100.0), Some(VirtualIndex(0)));
        assert_eq!(s.nearest_slide(10_000.0, 100.0), Some(VirtualIndex(8)));
    }

    #[test]
    fn nearest_slide_rejects_bad_measurements() {
        let s = space(3);
        assert_eq!(s.nearest_slide(100.0, 0.0), None);
        assert_eq!(s.nearest_slide(100.0, -1.0), None);
        assert_eq!(s.nearest_slide(f32::NAN, 100.0), None);
        assert_eq!(s.nearest_slide(100.0, f32::INFINITY), None);
    }
}
