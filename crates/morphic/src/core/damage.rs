use std::mem;

use tracing::trace;

use crate::geom::Rect;

/// The list of screen regions that need repainting this frame.
///
/// Rectangles are appended as morphs change and drained once per cycle by the
/// world's repaint pass.
#[derive(Debug, Default, Clone)]
pub struct Damage {
    /// Damaged regions in world coordinates, in push order.
    rects: Vec<Rect>,
}

impl Damage {
    /// An empty damage list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a damaged region. Rectangles with no area are dropped.
    pub fn push(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    /// Number of queued rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// The queued rectangles.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// The bounding union of all queued rectangles.
    pub fn union(&self) -> Option<Rect> {
        self.rects
            .iter()
            .copied()
            .reduce(|acc, r| acc.union(&r))
    }

    /// Merge nearby rectangles in place.
    ///
    /// Each rectangle is folded into the first already-kept rectangle within
    /// `proximity` pixels of it. Passes repeat until one fails to shrink the
    /// list. Above `collapse_limit` rectangles the whole list is replaced by
    /// its union.
    pub fn condense(&mut self, proximity: f64, collapse_limit: usize) {
        let before = self.rects.len();
        if before > collapse_limit {
            self.rects = self.union().into_iter().collect();
            trace!(before, "damage collapsed to union");
            return;
        }
        let mut size = before;
        loop {
            self.rects = condense_pass(&self.rects, proximity);
            if self.rects.len() >= size {
                break;
            }
            size = self.rects.len();
        }
        trace!(before, after = self.rects.len(), "damage condensed");
    }

    /// Condense, then hand the rectangles over and leave the list empty.
    pub fn drain_condensed(&mut self, proximity: f64, collapse_limit: usize) -> Vec<Rect> {
        self.condense(proximity, collapse_limit);
        mem::take(&mut self.rects)
    }

    /// Drop everything queued.
    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

/// One merge pass over `src`.
fn condense_pass(src: &[Rect], proximity: f64) -> Vec<Rect> {
    let mut out: Vec<Rect> = Vec::with_capacity(src.len());
    for rect in src {
        match out.iter_mut().find(|r| r.is_near_to(rect, proximity)) {
            Some(hit) => *hit = hit.union(rect),
            None => out.push(*rect),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_rects_are_not_queued() {
        let mut d = Damage::new();
        d.push(Rect::from_xywh(0.0, 0.0, 0.0, 10.0));
        d.push(Rect::from_xywh(0.0, 0.0, 10.0, -1.0));
        assert!(d.is_empty());
        d.push(Rect::from_xywh(0.0, 0.0, 1.0, 1.0));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn near_rects_merge() {
        let mut d = Damage::new();
        d.push(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        d.push(Rect::from_xywh(25.0, 0.0, 10.0, 10.0));
        d.push(Rect::from_xywh(500.0, 500.0, 10.0, 10.0));
        d.condense(20.0, 1000);
        assert_eq!(
            d.rects(),
            &[
                Rect::from_xywh(0.0, 0.0, 35.0, 10.0),
                Rect::from_xywh(500.0, 500.0, 10.0, 10.0)
            ]
        );
    }

    #[test]
    fn merging_repeats_until_stable() {
        // The two groups only come within reach of each other after the first pass.
        let mut d = Damage::new();
        d.push(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        d.push(Rect::from_xywh(100.0, 0.0, 10.0, 10.0));
        d.push(Rect::from_xywh(20.0, 0.0, 10.0, 10.0));
        d.push(Rect::from_xywh(80.0, 0.0, 10.0, 10.0));
        d.push(Rect::from_xywh(45.0, 0.0, 20.0, 10.0));
        d.condense(20.0, 1000);
        assert_eq!(d.rects(), &[Rect::from_xywh(0.0, 0.0, 110.0, 10.0)]);
    }

    #[test]
    fn collapse_limit() {
        let mut d = Damage::new();
        for i in 0..5 {
            d.push(Rect::from_xywh(f64::from(i) * 100.0, 0.0, 1.0, 1.0));
        }
        d.condense(0.0, 4);
        assert_eq!(d.rects(), &[Rect::from_xywh(0.0, 0.0, 401.0, 1.0)]);
        let drained = d.drain_condensed(20.0, 4);
        assert_eq!(drained.len(), 1);
        assert!(d.is_empty());
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (0i32..800, 0i32..600, 1i32..120, 1i32..120).prop_map(|(x, y, w, h)| {
            Rect::from_xywh(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
        })
    }

    proptest! {
        #[test]
        fn condensing_never_loses_coverage(
            rects in prop::collection::vec(rect(), 0..60),
            proximity in 0.0f64..40.0,
            limit in 1usize..80,
        ) {
            let mut d = Damage::new();
            for r in &rects {
                d.push(*r);
            }
            d.condense(proximity, limit);
            prop_assert!(d.len() <= rects.len());
            for r in &rects {
                prop_assert!(d.rects().iter().any(|c| c.contains_rect(r)));
            }
        }
    }
}
