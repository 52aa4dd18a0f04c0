use std::time::Duration;

use morphic::{
    error::Result,
    geom::{Color, Point},
    testing::Harness,
    widgets::scroll,
};

use crate::{
    blinker::Blinker,
    gallery::{SIZE, build, run_for, tour},
    knob::Knob,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn the_scene_is_well_formed() -> Result<()> {
    let mut h = Harness::with_size(SIZE);
    let g = build(&mut h.world)?;
    let core = &h.world.core;
    core.validate_tree()?;
    assert_eq!(core.parent_of(g.card), Some(g.frame));
    assert!(core.node(g.template).is_some_and(|n| n.is_template()));
    let contents = scroll::contents_of(core, g.scroller);
    assert!(contents.is_some_and(|c| core.children_of(c).len() == 6));
    assert!(contents.is_some_and(|c| core.bounds(c).height() == 410.0));
    Ok(())
}

#[test]
fn the_tour_changes_everything_it_touches() -> Result<()> {
    let mut h = Harness::with_size(SIZE);
    let g = build(&mut h.world)?;
    let cycles = tour(&mut h.world, &g, Duration::from_millis(10))?;
    assert_eq!(cycles, 51);
    let core = &h.world.core;
    core.validate_tree()?;

    let in_frame = core.children_of(g.frame);
    assert_eq!(in_frame.len(), 2);
    let copy = core.node(in_frame[1]).expect("copy exists");
    assert!(copy.is_draggable() && !copy.is_template());
    let at = copy.position();
    assert!(close(at.x, 155.0) && close(at.y, 135.0));

    let value = core.widget_ref::<Knob>(g.knob).map(Knob::value);
    assert!(value.is_some_and(|v| close(v, 25.0)));

    let contents = scroll::contents_of(core, g.scroller).expect("scroller has contents");
    assert_eq!(core.bounds(contents).top(), -60.0);

    let card = core.bounds(g.card).origin;
    assert!(close(card.x, 180.0) && close(card.y, 120.0));

    let blinks = core.widget_ref::<Blinker>(g.blinker).map(Blinker::count);
    assert_eq!(blinks, Some(3));
    Ok(())
}

#[test]
fn the_knob_gauge_is_painted() -> Result<()> {
    let mut h = Harness::with_size(SIZE);
    let g = build(&mut h.world)?;
    tour(&mut h.world, &g, Duration::from_millis(10))?;
    let knob = h.world.core.bounds(g.knob);
    let gauge = Point::new(knob.left() + 5.0, knob.bottom() - 5.0);
    assert_eq!(h.pixel(gauge), Some(Color::rgb(70, 130, 180)));
    let empty = Point::new(knob.right() - 10.0, knob.bottom() - 5.0);
    assert_eq!(h.pixel(empty), Some(Color::rgb(225, 225, 215)));
    Ok(())
}

#[test]
fn idle_worlds_only_step() -> Result<()> {
    let mut h = Harness::with_size(SIZE);
    build(&mut h.world)?;
    h.cycle()?;
    h.take_presented();
    run_for(&mut h.world, Duration::from_millis(300), Duration::from_millis(10))?;
    // Only the blinker's square changes.
    let presented = h.take_presented();
    assert!(!presented.is_empty());
    assert!(presented.iter().all(|r| r.width() <= 30.0 && r.height() <= 30.0));
    Ok(())
}
