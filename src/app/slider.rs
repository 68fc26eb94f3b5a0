//! Horizontal mouse slider over a terminal rect.

use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Default)]
pub struct Slider {
    area: Rect,
    value: f64,
    dragging: bool,
}

impl Slider {
    pub fn new(value: f64) -> Self {
        Self {
            value: clamp_unit(value),
            ..Self::default()
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Record where the slider was drawn this frame.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Follow an externally driven value, unless the user is holding the knob.
    pub fn sync(&mut self, value: f64) {
        if !self.dragging {
            self.value = clamp_unit(value);
        }
    }

    /// Left button pressed at `(x, y)`. Starts a drag when inside the slider
    /// and returns the value under the pointer.
    pub fn press(&mut self, x: u16, y: u16) -> Option<f64> {
        if !self.area.contains(Position::new(x, y)) {
            return None;
        }
        self.dragging = true;
        self.value = self.value_at(x);
        Some(self.value)
    }

    /// Pointer moved while the button is held. Returns the new value only
    /// when it actually changed.
    pub fn drag(&mut self, x: u16) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        let value = self.value_at(x);
        if (value - self.value).abs() > 1e-6 {
            self.value = value;
            Some(value)
        } else {
            None
        }
    }

    /// Button released. Returns the final value if a drag was in progress.
    pub fn release(&mut self) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some(self.value)
    }

    /// Leftmost column is 0.0, rightmost is 1.0.
    fn value_at(&self, x: u16) -> f64 {
        let span = f64::from(self.area.width.saturating_sub(1).max(1));
        let relative = f64::from(x) - f64::from(self.area.x);
        clamp_unit(relative / span)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
