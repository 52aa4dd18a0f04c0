use crate::{
    Morph,
    geom::{Color, Rect},
    widget::Widget,
};

/// Default fill of a new frame.
const FRAME_COLOR: Color = Color::rgb(255, 250, 245);

/// A container that clips its children to its bounds and accepts drops.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame;

impl Frame {
    /// A frame morph at `bounds`, ready to receive dropped morphs.
    pub fn morph(bounds: Rect) -> Morph {
        Morph::new(Self)
            .bounds(bounds)
            .color(FRAME_COLOR)
            .accepts_drops()
    }
}

impl Widget for Frame {
    fn clips_children(&self) -> bool {
        true
    }

    fn duplicate(&self) -> Option<Box<dyn Widget>> {
        Some(Box::new(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Core, error::Result, geom::Point, preferences::Preferences, widgets::Plain};

    #[test]
    fn frames_clip_and_accept() -> Result<()> {
        let mut core = Core::new(Point::new(200.0, 200.0), Preferences::default());
        let f = core.create(Frame::morph(Rect::from_xywh(0.0, 0.0, 50.0, 50.0)));
        core.add(core.world(), f)?;
        let inner = core.create(Morph::new(Plain).bounds(Rect::from_xywh(40.0, 40.0, 40.0, 40.0)));
        core.add(f, inner)?;
        assert_eq!(core.full_bounds(f), Rect::from_xywh(0.0, 0.0, 50.0, 50.0));
        assert_eq!(core.visible_bounds(inner), Rect::from_xywh(40.0, 40.0, 10.0, 10.0));
        assert_eq!(core.top_morph_at(core.world(), Point::new(60.0, 60.0), &[]), Some(core.world()));
        assert_eq!(core.top_morph_at(core.world(), Point::new(45.0, 45.0), &[]), Some(inner));
        assert!(core.wants_drop_of(f, inner));
        assert_eq!(core.name_of(f), "frame");
        Ok(())
    }
}
