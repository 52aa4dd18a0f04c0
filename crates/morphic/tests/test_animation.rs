//! Animations, glides and morph stepping against a pinned clock.

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use morphic::{
        Context, Morph, NodeId,
        animation::{Animation, Easing},
        error::Result,
        geom::{Color, Point, Rect},
        testing::Harness,
        widget::Widget,
        widgets::Plain,
    };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn slide_x(target: NodeId, delta: f64, duration: Duration) -> Animation {
        Animation::new(
            target,
            |ctx| ctx.position().x,
            |ctx, x| {
                let y = ctx.position().y;
                ctx.set_position(Point::new(x, y));
            },
            delta,
            duration,
        )
        .easing(Easing::Linear)
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce(&mut dyn Context) + 'static) {
        let n = Arc::new(AtomicUsize::new(0));
        let inner = n.clone();
        (n, move |_ctx: &mut dyn Context| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn setup() -> Result<(Harness, NodeId)> {
        let mut h = Harness::new();
        let a = h.add(Morph::new(Plain).bounds(Rect::from_xywh(0.0, 0.0, 20.0, 20.0)))?;
        Ok((h, a))
    }

    #[test]
    fn linear_animation_is_halfway_at_half_time() -> Result<()> {
        let (mut h, a) = setup()?;
        let (done, on_done) = counter();
        h.world.core.animate(slide_x(a, 100.0, ms(100)).on_complete(on_done));
        assert!(h.world.core.is_animating(a));

        h.advance(ms(50))?;
        assert!(close(h.world.core.bounds(a).left(), 50.0));
        assert_eq!(done.load(Ordering::SeqCst), 0);

        h.advance(ms(60))?;
        assert!(close(h.world.core.bounds(a).left(), 100.0));
        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert!(!h.world.core.is_animating(a));
        assert_eq!(h.world.core.animation_count(), 0);

        h.advance(ms(50))?;
        assert_eq!(done.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn destinations_are_exact_under_any_easing() -> Result<()> {
        for easing in [Easing::Sinusoidal, Easing::Elastic, Easing::CubicOut, Easing::QuadIn] {
            let (mut h, a) = setup()?;
            h.world.core.animate(slide_x(a, 33.3, ms(70)).easing(easing));
            h.advance(ms(100))?;
            assert!(close(h.world.core.bounds(a).left(), 33.3));
        }
        Ok(())
    }

    #[test]
    fn glide_lands_both_axes_together() -> Result<()> {
        let (mut h, a) = setup()?;
        let (done, on_done) = counter();
        h.world.core.glide(
            a,
            Point::new(100.0, 50.0),
            ms(100),
            Easing::Linear,
            Some(Box::new(on_done)),
        );
        h.advance(ms(50))?;
        let mid = h.world.core.bounds(a).origin;
        assert!(close(mid.x, 50.0) && close(mid.y, 25.0));

        h.advance(ms(50))?;
        let end = h.world.core.bounds(a).origin;
        assert!(close(end.x, 100.0) && close(end.y, 50.0));
        assert_eq!(done.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn cancelled_animations_stop_where_they_are() -> Result<()> {
        let (mut h, a) = setup()?;
        let (done, on_done) = counter();
        let id = h.world.core.animate(slide_x(a, 100.0, ms(100)).on_complete(on_done));
        h.advance(ms(30))?;
        h.world.core.cancel_animation(id);
        h.advance(ms(100))?;
        assert!(close(h.world.core.bounds(a).left(), 30.0));
        assert_eq!(done.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[test]
    fn finishing_jumps_without_completing() -> Result<()> {
        let (mut h, a) = setup()?;
        let (done, on_done) = counter();
        let id = h.world.core.animate(slide_x(a, 100.0, ms(100)).on_complete(on_done));
        h.advance(ms(20))?;
        h.world.core.finish_animation(id);
        assert!(close(h.world.core.bounds(a).left(), 100.0));
        h.advance(ms(200))?;
        assert_eq!(done.load(Ordering::SeqCst), 0);
        assert_eq!(h.world.core.animation_count(), 0);
        Ok(())
    }

    #[test]
    fn destroying_the_target_ends_its_animations() -> Result<()> {
        let (mut h, a) = setup()?;
        let (done, on_done) = counter();
        h.world.core.animate(slide_x(a, 100.0, ms(100)).on_complete(on_done));
        h.advance(ms(20))?;
        h.world.core.destroy(a)?;
        h.advance(ms(200))?;
        assert_eq!(done.load(Ordering::SeqCst), 0);
        assert_eq!(h.world.core.animation_count(), 0);
        Ok(())
    }

    #[test]
    fn grabbing_cancels_glides() -> Result<()> {
        let mut h = Harness::new();
        let a = h.add(
            Morph::new(Plain)
                .bounds(Rect::from_xywh(0.0, 0.0, 20.0, 20.0))
                .draggable(),
        )?;
        h.world.core.glide(a, Point::new(200.0, 0.0), ms(100), Easing::Linear, None);
        h.advance(ms(50))?;
        h.move_to(Point::new(110.0, 10.0));
        h.world.grab(a)?;
        assert!(!h.world.core.is_animating(a));
        h.advance(ms(100))?;
        assert!(close(h.world.core.bounds(a).left(), 100.0));
        Ok(())
    }

    /// Counts its steps.
    struct Ticker(Arc<AtomicUsize>);

    impl Widget for Ticker {
        fn step(&mut self, _ctx: &mut dyn Context) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn fps_throttles_stepping() -> Result<()> {
        let mut h = Harness::new();
        let fast = Arc::new(AtomicUsize::new(0));
        let slow = Arc::new(AtomicUsize::new(0));
        h.add(Morph::new(Ticker(fast.clone())))?;
        h.add(Morph::new(Ticker(slow.clone())).fps(10.0))?;

        // Twenty 10ms frames.
        h.advance(ms(200))?;
        assert_eq!(fast.load(Ordering::SeqCst), 20);
        assert_eq!(slow.load(Ordering::SeqCst), 2);
        Ok(())
    }

    fn snapshot(seen: &Arc<Mutex<Vec<&'static str>>>) -> Vec<&'static str> {
        seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    #[test]
    fn next_steps_run_one_per_step() -> Result<()> {
        let (mut h, a) = setup()?;
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (s1, s2) = (seen.clone(), seen.clone());
        h.world.core.set_next_step(
            a,
            Box::new(move |ctx: &mut dyn Context| {
                let steps: Vec<Box<dyn FnOnce(&mut dyn Context)>> = vec![
                    Box::new(move |_ctx: &mut dyn Context| {
                        if let Ok(mut s) = s1.lock() {
                            s.push("first");
                        }
                    }),
                    Box::new(move |_ctx: &mut dyn Context| {
                        if let Ok(mut s) = s2.lock() {
                            s.push("second");
                        }
                    }),
                ];
                ctx.next_steps(steps);
            }),
        );
        h.cycle()?;
        assert!(snapshot(&seen).is_empty());
        h.cycle()?;
        assert_eq!(snapshot(&seen), vec!["first"]);
        h.cycle()?;
        assert_eq!(snapshot(&seen), vec!["first", "second"]);
        h.cycle()?;
        assert_eq!(snapshot(&seen), vec!["first", "second"]);
        Ok(())
    }

    #[test]
    fn animations_repaint_what_they_move() -> Result<()> {
        let (mut h, a) = setup()?;
        h.cycle()?;
        h.world.core.animate(slide_x(a, 100.0, ms(100)));
        h.advance(ms(100))?;
        let here = h.world.core.bounds(a);
        assert!(h.world.last_repaired().iter().any(|r| r.contains_rect(&here)));
        assert_eq!(h.pixel(here.center()), Some(Color::rgb(80, 80, 80)));
        assert_ne!(h.pixel(Point::new(5.0, 5.0)), Some(Color::rgb(80, 80, 80)));
        Ok(())
    }
}
