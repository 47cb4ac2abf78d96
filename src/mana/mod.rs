//! Mana costs and rules text with embedded costs.

mod cost;
mod symbol;
mod text;

pub use cost::{Dialect, ManaCost};
pub use symbol::{Color, ManaSymbol};
pub use text::ManaText;
