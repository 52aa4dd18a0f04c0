//! What hit-testing and the raster cache see of a morph's rendering.

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use morphic::{
        Morph, ReadContext, Widget,
        error::Result,
        geom::{Color, Point, Rect},
        render::Render,
        testing::Harness,
    };

    /// Paints its left half, or all of itself once `full` is set. Only the
    /// painted pixels can be hit.
    struct Shape {
        /// Paint the whole morph.
        full: bool,
    }

    impl Widget for Shape {
        fn render(&self, r: &mut Render<'_>, _ctx: &dyn ReadContext) -> Result<()> {
            let extent = r.extent();
            let width = if self.full { extent.x } else { extent.x / 2.0 };
            r.fill_rect(Rect::from_xywh(0.0, 0.0, width, extent.y), Color::BLACK);
            Ok(())
        }

        fn is_free_form(&self) -> bool {
            true
        }
    }

    #[test]
    fn free_form_hits_follow_the_painted_pixels() -> Result<()> {
        let mut h = Harness::new();
        let shape = h.add(
            Morph::new(Shape { full: false }).bounds(Rect::from_xywh(0.0, 0.0, 100.0, 50.0)),
        )?;
        let world = h.root();
        h.cycle()?;
        let (left, right) = (Point::new(25.0, 25.0), Point::new(75.0, 25.0));
        assert_eq!(h.world.core.top_morph_at(world, left, &[]), Some(shape));
        assert_eq!(h.world.core.top_morph_at(world, right, &[]), Some(world));
        assert_ne!(h.pixel(right), Some(Color::BLACK));

        if let Some(s) = h.world.core.widget_mut::<Shape>(shape) {
            s.full = true;
        }
        h.world.core.changed(shape);
        h.cycle()?;
        assert_eq!(h.pixel(right), Some(Color::BLACK));
        assert_eq!(h.world.core.top_morph_at(world, right, &[]), Some(shape));
        Ok(())
    }

    /// Counts how often it is asked to render.
    struct Counted {
        /// Shared render count.
        renders: Arc<AtomicUsize>,
    }

    impl Widget for Counted {
        fn render(&self, r: &mut Render<'_>, ctx: &dyn ReadContext) -> Result<()> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            r.fill(ctx.color());
            Ok(())
        }

        fn is_caching_image(&self) -> bool {
            true
        }
    }

    #[test]
    fn caching_morphs_blit_until_rerendered() -> Result<()> {
        let renders = Arc::new(AtomicUsize::new(0));
        let mut h = Harness::new();
        let a = h.add(
            Morph::new(Counted {
                renders: renders.clone(),
            })
            .bounds(Rect::from_xywh(10.0, 10.0, 40.0, 40.0))
            .color(Color::rgb(0, 0, 200)),
        )?;
        h.cycle()?;
        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(h.pixel(Point::new(20.0, 20.0)), Some(Color::rgb(0, 0, 200)));

        // Repainting and moving reuse the kept raster.
        h.world.core.changed(a);
        h.cycle()?;
        h.world.core.move_by(a, Point::new(100.0, 0.0));
        h.cycle()?;
        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(h.pixel(Point::new(120.0, 20.0)), Some(Color::rgb(0, 0, 200)));

        h.world.core.rerender(a);
        h.cycle()?;
        assert_eq!(renders.load(Ordering::SeqCst), 2);

        // A colour change discards the raster too.
        h.world.core.set_color(a, Color::rgb(0, 200, 0));
        h.cycle()?;
        assert_eq!(renders.load(Ordering::SeqCst), 3);
        assert_eq!(h.pixel(Point::new(120.0, 20.0)), Some(Color::rgb(0, 200, 0)));
        Ok(())
    }
}
