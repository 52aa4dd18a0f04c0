use morphic::{
    Context, EventOutcome, ReadContext, Widget,
    error::Result,
    event::mouse::Button,
    geom::{Color, Point, Rect},
    render::Render,
    widgets::dial_value,
};

/// Colour of the filled part of the gauge.
const GAUGE: Color = Color::rgb(70, 130, 180);

/// A knob whose value follows the angle of the pointer around its centre
/// while the left button is held. The value is shown as a gauge along the
/// bottom edge.
#[derive(Debug, Clone, Copy)]
pub struct Knob {
    /// Current value, in `min..max`.
    value: f64,
    /// Value at 12 o'clock.
    min: f64,
    /// Value approached just left of 12 o'clock.
    max: f64,
}

impl Knob {
    /// A knob over `min..max`, starting at `min`.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            value: min,
            min,
            max,
        }
    }

    /// The current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Track the pointer, repainting when the value changes.
    fn follow(&mut self, pos: Point, ctx: &mut dyn Context) {
        let v = dial_value(ctx.bounds().center(), pos, self.min, self.max);
        if v != self.value {
            self.value = v;
            ctx.rerender();
        }
    }
}

impl Widget for Knob {
    fn render(&self, r: &mut Render<'_>, ctx: &dyn ReadContext) -> Result<()> {
        r.fill(ctx.color());
        let extent = r.extent();
        let span = self.max - self.min;
        let fraction = if span == 0.0 {
            0.0
        } else {
            ((self.value - self.min) / span).clamp(0.0, 1.0)
        };
        let height = (extent.y / 5.0).max(1.0);
        r.fill_rect(
            Rect::from_xywh(0.0, extent.y - height, extent.x * fraction, height),
            GAUGE,
        );
        r.stroke_rect(r.local_bounds(), 1.0, Color::BLACK);
        Ok(())
    }

    fn handles_mouse_move(&self) -> bool {
        true
    }

    fn mouse_down_left(&mut self, pos: Point, ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.follow(pos, ctx);
        Ok(EventOutcome::Handle)
    }

    fn mouse_move(&mut self, pos: Point, button: Option<Button>, ctx: &mut dyn Context) -> Result<()> {
        if button == Some(Button::Left) {
            self.follow(pos, ctx);
        }
        Ok(())
    }

    fn duplicate(&self) -> Option<Box<dyn Widget>> {
        Some(Box::new(*self))
    }
}
