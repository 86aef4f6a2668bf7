pub mod actions;
pub mod controller;
pub mod editor;
pub mod history;
pub mod input;
pub mod shortcuts;

pub use controller::{Gesture, InteractionController, NodeTransform};
pub use editor::Editor;
pub use history::{History, HistoryEntry};
pub use input::{InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
