use parley_core::Message;

use crate::ui::compose::{ComposeForm, ComposeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Compose,
}

/// Top-level UI state.
pub struct App {
    pub running: bool,
    /// Displayed transcript, in arrival order. The last entry is the
    /// comparison baseline for header suppression.
    pub messages: Vec<Message>,
    /// Channel names from the subscription list, shown in the sidebar.
    pub channels: Vec<String>,
    pub status: Option<String>,
    pub input_mode: InputMode,
    pub compose: Option<ComposeForm>,
}

impl App {
    pub fn new(channels: Vec<String>) -> Self {
        Self {
            running: true,
            messages: Vec::new(),
            channels,
            status: None,
            input_mode: InputMode::Normal,
            compose: None,
        }
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn open_compose(&mut self, kind: ComposeKind) {
        self.compose = Some(ComposeForm::new(kind));
        self.input_mode = InputMode::Compose;
        self.status = None;
    }

    pub fn close_compose(&mut self) {
        self.compose = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn add_channel(&mut self, name: &str) {
        if !self.channels.iter().any(|channel| channel == name) {
            self.channels.push(name.to_string());
        }
    }
}
