use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// What kind of outbound action a form produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeKind {
    Private,
    Stream,
    Join,
}

/// The outbound request a completed form describes. Transient: built on
/// submit, discarded once the request finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Private {
        recipient: String,
        content: String,
    },
    Stream {
        channel: String,
        subject: String,
        content: String,
    },
    Join {
        channel: String,
    },
}

/// A single-line text field. The cursor is a byte offset into `value`.
#[derive(Debug)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub cursor: usize,
}

impl Field {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
        }
    }

    fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if let Some((offset, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.value.remove(offset);
            self.cursor = offset;
        }
    }

    fn move_left(&mut self) {
        if let Some((offset, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = offset;
        }
    }

    fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Display width of the text left of the cursor, for cursor placement.
    pub fn cursor_width(&self) -> u16 {
        self.value[..self.cursor].width() as u16
    }
}

/// State of the compose overlay: a short list of fields, one focused.
#[derive(Debug)]
pub struct ComposeForm {
    pub kind: ComposeKind,
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl ComposeForm {
    pub fn new(kind: ComposeKind) -> Self {
        let fields = match kind {
            ComposeKind::Private => vec![Field::new("To"), Field::new("Message")],
            ComposeKind::Stream => vec![
                Field::new("Channel"),
                Field::new("Subject"),
                Field::new("Message"),
            ],
            ComposeKind::Join => vec![Field::new("Channel")],
        };
        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ComposeKind::Private => "Private message",
            ComposeKind::Stream => "Channel message",
            ComposeKind::Join => "Join channel",
        }
    }

    fn focused_field(&mut self) -> &mut Field {
        &mut self.fields[self.focus]
    }

    /// Feed one key into the form. Returns the finished request when the
    /// last field is submitted.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Outbound> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_field().insert(c);
            }
            KeyCode::Backspace => self.focused_field().backspace(),
            KeyCode::Left => self.focused_field().move_left(),
            KeyCode::Right => self.focused_field().move_right(),
            KeyCode::Tab => self.focus = (self.focus + 1) % self.fields.len(),
            KeyCode::BackTab => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            }
            KeyCode::Enter => {
                if self.focus + 1 < self.fields.len() {
                    self.focus += 1;
                } else {
                    return Some(self.finish());
                }
            }
            _ => {}
        }
        None
    }

    fn finish(&self) -> Outbound {
        let value = |index: usize| self.fields[index].value.trim().to_string();
        match self.kind {
            ComposeKind::Private => Outbound::Private {
                recipient: value(0),
                content: value(1),
            },
            ComposeKind::Stream => Outbound::Stream {
                channel: value(0),
                subject: value(1),
                content: value(2),
            },
            ComposeKind::Join => Outbound::Join { channel: value(0) },
        }
    }
}
