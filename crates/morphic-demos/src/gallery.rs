use std::time::Duration;

use morphic::{
    Morph, NodeId, World,
    animation::Easing,
    error::Result,
    event::{
        key::Mods,
        mouse::{Button, Mouse},
    },
    geom::{Color, Point, Rect},
    widgets::{Frame, Plain, ScrollFrame, scroll},
};
use tracing::info;

use crate::{blinker::Blinker, knob::Knob};

/// Default world size for the gallery.
pub const SIZE: Point = Point::new(640.0, 400.0);

/// Ids of the interesting morphs in the gallery scene.
#[derive(Debug, Clone, Copy)]
pub struct Gallery {
    /// A clipping frame that accepts drops.
    pub frame: NodeId,
    /// A draggable card inside the frame.
    pub card: NodeId,
    /// A scroll frame holding a column of swatches.
    pub scroller: NodeId,
    /// A template that hands out copies when dragged.
    pub template: NodeId,
    /// A rotary knob.
    pub knob: NodeId,
    /// A blinking light stepped at 4 fps.
    pub blinker: NodeId,
}

/// Swatch colours stacked in the scroll frame.
const SWATCHES: [Color; 6] = [
    Color::rgb(230, 80, 80),
    Color::rgb(230, 160, 60),
    Color::rgb(220, 210, 70),
    Color::rgb(90, 190, 90),
    Color::rgb(70, 140, 220),
    Color::rgb(150, 90, 200),
];

/// Populate `world` with the gallery scene.
pub fn build(world: &mut World) -> Result<Gallery> {
    let root = world.id();
    let frame = world.add(Frame::morph(Rect::from_xywh(20.0, 20.0, 260.0, 200.0)))?;
    let card = world.core.create(
        Morph::new(Plain)
            .bounds(Rect::from_xywh(40.0, 40.0, 60.0, 40.0))
            .color(Color::rgb(60, 120, 90))
            .draggable(),
    );
    world.core.add(frame, card)?;

    let scroller = ScrollFrame::create(&mut world.core, Rect::from_xywh(320.0, 20.0, 200.0, 200.0))?;
    world.core.add(root, scroller)?;
    if let Some(contents) = scroll::contents_of(&world.core, scroller) {
        for (i, color) in SWATCHES.iter().enumerate() {
            let y = 30.0 + 70.0 * i as f64;
            let swatch = world.core.create(
                Morph::new(Plain)
                    .bounds(Rect::from_xywh(340.0, y, 160.0, 50.0))
                    .color(*color)
                    .draggable(),
            );
            world.core.add(contents, swatch)?;
        }
    }
    scroll::adjust_bounds(&mut world.core, scroller)?;

    let template = world.add(
        Morph::new(Plain)
            .bounds(Rect::from_xywh(20.0, 260.0, 50.0, 50.0))
            .color(Color::rgb(240, 140, 40))
            .template(),
    )?;
    let knob = world.add(
        Morph::new(Knob::new(0.0, 100.0))
            .bounds(Rect::from_xywh(120.0, 260.0, 80.0, 80.0))
            .color(Color::rgb(225, 225, 215)),
    )?;
    let blinker = world.add(
        Morph::new(Blinker::new(Color::rgb(250, 220, 60), Color::rgb(90, 80, 40)))
            .bounds(Rect::from_xywh(240.0, 260.0, 30.0, 30.0))
            .fps(4.0),
    )?;
    Ok(Gallery {
        frame,
        card,
        scroller,
        template,
        knob,
        blinker,
    })
}

/// Feed a left-button gesture from `from` to `to` in `steps` moves.
fn gesture(world: &mut World, from: Point, to: Point, steps: u32) {
    world.mouse(Mouse::Down {
        pos: from,
        button: Button::Left,
        mods: Mods::NONE,
    });
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        world.mouse(Mouse::Move {
            pos: from + (to - from) * t,
        });
    }
    world.mouse(Mouse::Up { pos: to });
}

/// Run cycles for `total`, moving a pinned clock forward by `frame` before
/// each. Returns the number of cycles run.
pub fn run_for(world: &mut World, total: Duration, frame: Duration) -> Result<u32> {
    let mut cycles = 0;
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        world.advance_clock(frame);
        world.do_one_cycle()?;
        elapsed += frame;
        cycles += 1;
    }
    Ok(cycles)
}

/// A scripted tour of the gallery: copy the template into the frame, turn
/// the knob to three o'clock, scroll the swatches and glide the card.
pub fn tour(world: &mut World, g: &Gallery, frame: Duration) -> Result<u32> {
    world.do_one_cycle()?;

    let start = world.core.bounds(g.template).center();
    gesture(world, start, Point::new(180.0, 160.0), 8);
    info!("template copied into the frame");

    let knob = world.core.bounds(g.knob);
    gesture(
        world,
        Point::new(knob.center().x, knob.top() + 5.0),
        Point::new(knob.right() - 5.0, knob.center().y),
        6,
    );
    info!("knob turned");

    world.mouse(Mouse::Move {
        pos: world.core.bounds(g.scroller).center(),
    });
    world.mouse(Mouse::Scroll { dy: -2.0, dx: 0.0 });
    info!("swatches scrolled");

    world.core.glide(
        g.card,
        Point::new(180.0, 120.0),
        Duration::from_millis(300),
        Easing::Sinusoidal,
        None,
    );
    let cycles = run_for(world, Duration::from_millis(500), frame)?;
    info!(cycles, "tour finished");
    Ok(cycles + 1)
}
