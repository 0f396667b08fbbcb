//! Presentation of sensor snapshots.

mod table;
mod terminal;

use anyhow::Result;

use crate::sensors::SensorSnapshot;

pub use terminal::TerminalPresenter;

/// Draws snapshots and reports when the operator asks to quit.
pub trait Presenter {
    /// Draws one frame from index-ordered snapshots.
    fn render(&mut self, snapshots: &[SensorSnapshot]) -> Result<()>;

    /// Checks for a quit request without blocking.
    fn quit_requested(&mut self) -> Result<bool>;
}
