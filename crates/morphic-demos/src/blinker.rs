use morphic::{Context, Widget, error::Result, geom::Color};

/// Alternates between two colours on every step. Pair it with a morph fps
/// to set the blink rate.
#[derive(Debug, Clone, Copy)]
pub struct Blinker {
    /// Colour shown while on.
    on: Color,
    /// Colour shown while off.
    off: Color,
    /// Whether the next step turns the light off.
    lit: bool,
    /// Completed blinks.
    count: u64,
}

impl Blinker {
    /// A blinker starting in the `off` colour.
    pub fn new(on: Color, off: Color) -> Self {
        Self {
            on,
            off,
            lit: false,
            count: 0,
        }
    }

    /// Number of steps taken.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Widget for Blinker {
    fn step(&mut self, ctx: &mut dyn Context) -> Result<()> {
        self.lit = !self.lit;
        self.count += 1;
        ctx.set_color(if self.lit { self.on } else { self.off });
        Ok(())
    }

    fn duplicate(&self) -> Option<Box<dyn Widget>> {
        Some(Box::new(Self {
            count: 0,
            ..*self
        }))
    }
}
