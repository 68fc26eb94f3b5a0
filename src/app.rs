//! Application module: the presentation-side model driven by the runtime.
//!
//! `App` holds what the coordinator does not: the playlist cursor, the
//! add-songs prompt, the status line, the deck animation and the clickable
//! widgets of the last drawn frame.

mod deck;
mod input;
mod model;
mod slider;

pub use deck::DeckAnimation;
pub use input::{Action, key_action};
pub use model::*;
pub use slider::Slider;
