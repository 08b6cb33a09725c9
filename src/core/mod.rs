mod keymap;
mod session;

pub use keymap::ascii_for_key;
pub use session::{KeyPress, Session, Transition};
