//! coinratio TUI: terminal charts for a coin pair.
//!
//! Shows, in a 2×2 grid:
//! - Price history of the first coin
//! - Price history of the second coin
//! - The first/second ratio over the display window
//! - A summary pane with the close hint
//!
//! The view stays up until the user explicitly closes it.

pub mod input;
pub mod theme;
pub mod ui;
pub mod view;
pub mod viewer;

pub use theme::ChartSlot;
pub use view::{ChartSpec, RatioView};
pub use viewer::show;
