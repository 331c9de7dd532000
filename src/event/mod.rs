//! Event system: keys, targeted UI events, keymaps.

pub mod binding;
pub mod input;
pub mod ui_event;

pub use binding::{Action, Keymap};
pub use input::{Key, KeyEvent, Modifiers, SPACE};
pub use ui_event::{EventResult, UiEvent};
