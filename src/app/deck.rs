//! Turntable animation state: platter rotation, tone-arm needle and the
//! title marquee.

/// Needle angle while a record is playing.
pub const NEEDLE_PLAYING: f32 = 129.0;
/// Needle angle at rest.
pub const NEEDLE_RESTING: f32 = 90.0;

const NEEDLE_EASING: f32 = 0.15;
const NEEDLE_SNAP: f32 = 0.1;

/// Spokes drawn on the platter, one per 45 degree step.
const SPOKES: [char; 4] = ['│', '╱', '─', '╲'];

/// Columns of blank space between the end of a scrolling text and its repeat.
const MARQUEE_GAP: usize = 4;

#[derive(Debug, Clone)]
pub struct DeckAnimation {
    platter_angle: u16,
    needle_angle: f32,
    /// Frames since the marquee last restarted.
    marquee_ticks: u64,
    scroll_speed: f32,
}

impl DeckAnimation {
    pub fn new(scroll_speed: f32) -> Self {
        Self {
            platter_angle: 0,
            needle_angle: NEEDLE_RESTING,
            marquee_ticks: 0,
            scroll_speed: scroll_speed.max(0.0),
        }
    }

    /// Step one frame.
    pub fn advance(&mut self, playing: bool) {
        if playing {
            self.platter_angle = (self.platter_angle + 1) % 360;
        }

        let target = if playing {
            NEEDLE_PLAYING
        } else {
            NEEDLE_RESTING
        };
        let diff = target - self.needle_angle;
        if diff.abs() > NEEDLE_SNAP {
            self.needle_angle += diff * NEEDLE_EASING;
        } else {
            self.needle_angle = target;
        }

        self.marquee_ticks = self.marquee_ticks.wrapping_add(1);
    }

    pub fn reset_marquee(&mut self) {
        self.marquee_ticks = 0;
    }

    #[cfg(test)]
    pub(crate) fn skip_frames(&mut self, frames: u64) {
        self.marquee_ticks = self.marquee_ticks.wrapping_add(frames);
    }

    pub fn platter_angle(&self) -> u16 {
        self.platter_angle
    }

    pub fn needle_angle(&self) -> f32 {
        self.needle_angle
    }

    pub fn spoke(&self) -> char {
        SPOKES[usize::from(self.platter_angle() / 45) % SPOKES.len()]
    }

    /// Tone-arm glyph: upright at rest, slanted once it is past halfway down.
    pub fn needle_glyph(&self) -> char {
        let halfway = (NEEDLE_PLAYING + NEEDLE_RESTING) / 2.0;
        if self.needle_angle() >= halfway {
            '╲'
        } else {
            '│'
        }
    }

    /// Window of `width` columns onto `text`, scrolled right to left.
    ///
    /// Text that already fits is returned unchanged.
    pub fn marquee(&self, text: &str, width: usize) -> String {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= width {
            return text.to_string();
        }

        let cycle = chars.len() + MARQUEE_GAP;
        let offset = self.marquee_ticks as f64 * f64::from(self.scroll_speed);
        let start = (offset as u64 % cycle as u64) as usize;
        (0..width)
            .map(|i| chars.get((start + i) % cycle).copied().unwrap_or(' '))
            .collect()
    }
}
