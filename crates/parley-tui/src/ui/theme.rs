// Transcript and chrome colors. The header colors keep the classic look:
// sender green, channel yellow, subject blue.

use ratatui::style::Color;

pub const SENDER: Color = Color::Green;
pub const CHANNEL: Color = Color::Yellow;
pub const SUBJECT: Color = Color::Blue;
pub const STATUS: Color = Color::DarkGray;
pub const SIDEBAR_TITLE: Color = Color::Cyan;
