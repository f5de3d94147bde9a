//! On-screen menu
//!
//! Six fixed lines, each bound to a setting or an action. The dispatcher
//! turns button releases into [`MenuAction`]s and keeps the overlay text in
//! step with the settings.

mod dispatcher;
mod lines;

pub use dispatcher::{Dispatcher, MenuAction};
pub use lines::{line_text, render_menu, MenuLine, LineText, LINE_CHARS};
