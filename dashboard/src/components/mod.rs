//! ==============================================================================
//! components/mod.rs - UI Components
//! ==============================================================================

mod generate;
mod header;
mod history;
mod mode_bar;
mod quiz_display;
mod tabs;

pub use generate::GenerateTab;
pub use header::Header;
pub use history::HistoryTab;
pub use mode_bar::ModeBar;
pub use quiz_display::QuizDisplay;
pub use tabs::{Tab, TabNav};
