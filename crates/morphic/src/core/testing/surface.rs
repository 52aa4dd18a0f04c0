use std::sync::{Arc, Mutex};

use crate::{Surface, error::Result, geom::Rect, render::Canvas};

/// A surface that remembers every rectangle presented to it.
pub struct RecordingSurface {
    /// Shared list of presented rectangles, in order.
    pub presented: Arc<Mutex<Vec<Rect>>>,
}

impl RecordingSurface {
    /// Create returns the shared rectangle list and the surface writing to
    /// it. Keep the list to inspect what the world presented.
    pub fn create() -> (Arc<Mutex<Vec<Rect>>>, Self) {
        let presented = Arc::new(Mutex::new(Vec::new()));
        let surface = Self {
            presented: presented.clone(),
        };
        (presented, surface)
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, _canvas: &Canvas, rect: Rect) -> Result<()> {
        if let Ok(mut presented) = self.presented.lock() {
            presented.push(rect);
        }
        Ok(())
    }
}
