use std::time::Instant;

use crate::{
    Context,
    core::{Core, context::CoreContext, id::NodeId},
};

/// A one-shot callback run before a morph's next `step`.
pub type NextStep = Box<dyn FnOnce(&mut dyn Context)>;

/// Run one cooperative stepping pass over the world and the hand.
///
/// The walk is pre-order over a snapshot of the tree taken up front: morphs
/// created during the pass first step on the next frame, and morphs
/// destroyed during the pass are skipped.
pub(crate) fn step_frame(core: &mut Core, now: Instant) {
    let mut order = core.all_children(core.world());
    order.extend(core.all_children(core.hand_id()));
    for id in order {
        step_morph(core, id, now);
    }
}

/// Step a single morph if its throttle allows it.
fn step_morph(core: &mut Core, id: NodeId, now: Instant) {
    let Some(node) = core.nodes.get_mut(id) else {
        return;
    };
    if !is_due(node.fps, node.last_step, now) {
        return;
    }
    node.last_step = Some(now);
    if let Some(next) = node.on_next_step.take() {
        let mut ctx = CoreContext::new(core, id);
        next(&mut ctx);
    }
    core.call(id, |w, ctx| w.step(ctx));
}

/// True if a morph throttled to `fps` should step at `now`.
fn is_due(fps: f64, last: Option<Instant>, now: Instant) -> bool {
    let Some(last) = last else {
        return true;
    };
    if fps <= 0.0 {
        return true;
    }
    let elapsed = now.saturating_duration_since(last).as_secs_f64() * 1000.0;
    1000.0 / fps - elapsed < 1.0
}

/// Fold a sequence of callbacks into one that runs the first and queues
/// the rest for the following steps.
pub(crate) fn chain(mut steps: Vec<NextStep>) -> Option<NextStep> {
    if steps.is_empty() {
        return None;
    }
    let first = steps.remove(0);
    Some(Box::new(move |ctx: &mut dyn Context| {
        first(ctx);
        if let Some(rest) = chain(steps) {
            ctx.next_step(rest);
        }
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn throttle() {
        let t0 = Instant::now();
        assert!(is_due(10.0, None, t0));
        assert!(is_due(0.0, Some(t0), t0));
        assert!(!is_due(10.0, Some(t0), t0 + Duration::from_millis(50)));
        assert!(is_due(10.0, Some(t0), t0 + Duration::from_millis(100)));
        // Within a millisecond of the interval counts as due.
        assert!(is_due(10.0, Some(t0), t0 + Duration::from_micros(99_500)));
    }
}
