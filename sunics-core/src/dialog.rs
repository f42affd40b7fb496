//! The "how it works" help dialog.

/// Label keys shown inside the dialog, in order.
pub const HELP_KEYS: &[&str] = &[
    "howto_1",
    "howto_2",
    "howto_3",
    "howto_4",
    "howto_disclaimer",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent<'a> {
    TriggerClick,
    CloseClick,
    /// Click somewhere on the backdrop. `on_body` is true when the click landed
    /// inside the dialog itself.
    BackdropClick { on_body: bool },
    KeyDown(&'a str),
}

#[derive(Debug, Clone, Default)]
pub struct HelpDialog {
    shown: bool,
}

impl HelpDialog {
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Apply an event and return whether the dialog is now shown.
    pub fn handle(&mut self, event: DialogEvent<'_>) -> bool {
        match event {
            DialogEvent::TriggerClick => self.shown = true,
            DialogEvent::CloseClick => self.shown = false,
            DialogEvent::BackdropClick { on_body: false } => self.shown = false,
            DialogEvent::BackdropClick { on_body: true } => {}
            DialogEvent::KeyDown("Escape") if self.shown => self.shown = false,
            DialogEvent::KeyDown(_) => {}
        }
        self.shown
    }
}
