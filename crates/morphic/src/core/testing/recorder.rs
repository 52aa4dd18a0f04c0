/*! An instrumented widget that logs each hook it receives. */
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use image::RgbaImage;

use crate::{
    Context, Morph, NodeId, ReadContext,
    error::Result,
    event::key::Key,
    geom::{Point, Rect},
    widget::{EventOutcome, Widget},
};

/// Shared hook log. Entries read `label.hook`.
pub type Log = Arc<Mutex<Vec<String>>>;

/// A fresh, empty log.
pub fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

/// A widget that appends an entry to a shared [`Log`] for every hook call.
///
/// Event hooks answer with a configurable outcome, so tests can decide
/// where bubbling stops. Copies share the original's log.
#[derive(Clone)]
pub struct Recorder {
    /// Prefix of every log entry.
    label: String,
    /// Where entries go.
    log: Log,
    /// Answer for event hooks.
    outcome: EventOutcome,
    /// Offer a user menu on right click.
    menu: bool,
    /// Redirect grabs here.
    grab_root: Option<NodeId>,
}

impl Recorder {
    /// A recorder that ignores every event.
    pub fn new(label: impl Into<String>, log: &Log) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
            outcome: EventOutcome::Ignore,
            menu: false,
            grab_root: None,
        }
    }

    /// Handle every event instead of letting it bubble.
    pub fn handling(mut self) -> Self {
        self.outcome = EventOutcome::Handle;
        self
    }

    /// Offer a context menu.
    pub fn with_menu(mut self) -> Self {
        self.menu = true;
        self
    }

    /// Redirect grabs to another morph.
    pub fn grab_root(mut self, id: NodeId) -> Self {
        self.grab_root = Some(id);
        self
    }

    /// Append an entry.
    fn record(&self, hook: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.push(format!("{}.{hook}", self.label));
        }
    }

    /// Append an entry and answer with the configured outcome.
    fn event(&self, hook: &str) -> Result<EventOutcome> {
        self.record(hook);
        Ok(self.outcome)
    }
}

impl Widget for Recorder {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn mouse_down_left(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("mouse_down_left")
    }

    fn mouse_down_right(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("mouse_down_right")
    }

    fn mouse_click_left(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("mouse_click_left")
    }

    fn mouse_click_right(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("mouse_click_right")
    }

    fn mouse_double_click(
        &mut self,
        _pos: Point,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        self.event("mouse_double_click")
    }

    fn mouse_enter(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        self.record("mouse_enter");
        Ok(())
    }

    fn mouse_leave(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        self.record("mouse_leave");
        Ok(())
    }

    fn mouse_enter_dragging(
        &mut self,
        _dragged: Option<NodeId>,
        _ctx: &mut dyn Context,
    ) -> Result<()> {
        self.record("mouse_enter_dragging");
        Ok(())
    }

    fn mouse_leave_dragging(
        &mut self,
        _dragged: Option<NodeId>,
        _ctx: &mut dyn Context,
    ) -> Result<()> {
        self.record("mouse_leave_dragging");
        Ok(())
    }

    fn mouse_scroll(&mut self, _dy: f64, _dx: f64, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("mouse_scroll")
    }

    fn root_for_grab(&self, _ctx: &dyn ReadContext) -> Option<NodeId> {
        self.grab_root
    }

    fn prepare_to_be_grabbed(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        self.record("prepare_to_be_grabbed");
        Ok(())
    }

    fn react_to_grab_of(&mut self, _grabbed: NodeId, _ctx: &mut dyn Context) -> Result<()> {
        self.record("react_to_grab_of");
        Ok(())
    }

    fn just_dropped(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        self.record("just_dropped");
        Ok(())
    }

    fn react_to_drop_of(&mut self, _dropped: NodeId, _ctx: &mut dyn Context) -> Result<()> {
        self.record("react_to_drop_of");
        Ok(())
    }

    fn react_to_template_copy(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        self.record("react_to_template_copy");
        Ok(())
    }

    fn user_menu(&mut self, _ctx: &mut dyn Context) -> Option<Morph> {
        if !self.menu {
            return None;
        }
        self.record("user_menu");
        let label = format!("{}_menu", self.label);
        Some(Morph::new(Self::new(label, &self.log)).extent(Point::new(60.0, 80.0)))
    }

    fn developers_menu(&mut self, _ctx: &mut dyn Context) -> Option<Morph> {
        if !self.menu {
            return None;
        }
        self.record("developers_menu");
        let label = format!("{}_dev_menu", self.label);
        Some(Morph::new(Self::new(label, &self.log)).extent(Point::new(60.0, 80.0)))
    }

    fn process_key_down(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("process_key_down")
    }

    fn process_key_up(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("process_key_up")
    }

    fn process_key_press(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("process_key_press")
    }

    fn dropped_image(
        &mut self,
        _image: &RgbaImage,
        _name: &str,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        self.event("dropped_image")
    }

    fn dropped_svg(&mut self, _svg: &str, _name: &str, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("dropped_svg")
    }

    fn dropped_audio(
        &mut self,
        _data: &[u8],
        _name: &str,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        self.event("dropped_audio")
    }

    fn dropped_text(
        &mut self,
        _text: &str,
        _name: Option<&str>,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        self.event("dropped_text")
    }

    fn dropped_binary(
        &mut self,
        _data: &[u8],
        _name: &str,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        self.event("dropped_binary")
    }

    fn begin_bulk_drop(&mut self, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("begin_bulk_drop")
    }

    fn end_bulk_drop(&mut self, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.event("end_bulk_drop")
    }

    fn react_to_world_resize(&mut self, _bounds: Rect, _ctx: &mut dyn Context) -> Result<()> {
        self.record("react_to_world_resize");
        Ok(())
    }

    fn duplicate(&self) -> Option<Box<dyn Widget>> {
        Some(Box::new(self.clone()))
    }

    fn update_references(&mut self, map: &HashMap<NodeId, NodeId>) {
        if let Some(root) = self.grab_root {
            self.grab_root = Some(map.get(&root).copied().unwrap_or(root));
        }
    }
}
