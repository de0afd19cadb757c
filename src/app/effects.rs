use crate::app::{App, Message, Model};

impl App {
    /// Apply the side effects of a message after the pure update ran.
    ///
    /// Disk writes stay out of [`update`](crate::app::update) so state
    /// transitions remain testable without touching the filesystem.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if matches!(msg, Message::Save) {
            model.save_buffer();
        }
    }
}
