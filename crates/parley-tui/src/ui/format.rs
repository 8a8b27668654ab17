use parley_core::{Message, Recipient};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::ui::theme;

/// Which header fields to print above a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    pub sender: bool,
    pub recipient: bool,
    pub subject: bool,
}

/// Decide which headers are redundant given the previously displayed
/// message.
///
/// With no previous message everything is shown. Otherwise each field is
/// shown only when it differs from the message rendered directly above.
/// Private messages never print recipient or subject headers; only sender
/// and content are rendered for them.
pub fn fields_to_show(current: &Message, previous: Option<&Message>) -> HeaderFields {
    let private = current.is_private();
    match previous {
        None => HeaderFields {
            sender: true,
            recipient: !private,
            subject: !private,
        },
        Some(previous) => HeaderFields {
            sender: current.sender != previous.sender,
            recipient: !private && current.recipient != previous.recipient,
            subject: !private && current.subject != previous.subject,
        },
    }
}

/// Render the header and body lines for one message.
pub fn message_lines(message: &Message, previous: Option<&Message>) -> Vec<Line<'static>> {
    let fields = fields_to_show(message, previous);
    let mut lines = Vec::new();

    if fields.sender {
        lines.push(Line::from(Span::styled(
            message.sender.clone(),
            Style::default().fg(theme::SENDER),
        )));
    }

    if let Recipient::Channel(channel) = &message.recipient {
        let mut spans = Vec::new();
        if fields.recipient {
            spans.push(Span::styled(
                channel.clone(),
                Style::default().fg(theme::CHANNEL),
            ));
        }
        if fields.recipient && fields.subject {
            spans.push(Span::raw(" > "));
        }
        if fields.subject {
            spans.push(Span::styled(
                message.subject.clone(),
                Style::default().fg(theme::SUBJECT),
            ));
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }
    }

    if message.content.is_empty() {
        lines.push(Line::from(""));
    } else {
        for content_line in message.content.lines() {
            lines.push(Line::from(content_line.to_string()));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_message(sender: &str, channel: &str, subject: &str) -> Message {
        Message {
            event_id: 1,
            sender: sender.to_string(),
            recipient: Recipient::Channel(channel.to_string()),
            subject: subject.to_string(),
            content: "hi".to_string(),
        }
    }

    fn private_message(sender: &str, participants: &[&str]) -> Message {
        Message {
            event_id: 1,
            sender: sender.to_string(),
            recipient: Recipient::Private(
                participants.iter().map(|p| p.to_string()).collect(),
            ),
            subject: String::new(),
            content: "psst".to_string(),
        }
    }

    #[test]
    fn no_previous_message_shows_everything() {
        let current = channel_message("Ada", "general", "standup");
        let fields = fields_to_show(&current, None);
        assert_eq!(
            fields,
            HeaderFields { sender: true, recipient: true, subject: true }
        );
    }

    #[test]
    fn identical_headers_are_fully_suppressed() {
        let current = channel_message("Ada", "general", "standup");
        let fields = fields_to_show(&current, Some(&current));
        assert_eq!(
            fields,
            HeaderFields { sender: false, recipient: false, subject: false }
        );
    }

    #[test]
    fn each_field_is_compared_independently() {
        let previous = channel_message("Ada", "general", "standup");
        let current = channel_message("Ada", "general", "retro");
        let fields = fields_to_show(&current, Some(&previous));
        assert_eq!(
            fields,
            HeaderFields { sender: false, recipient: false, subject: true }
        );

        let current = channel_message("Grace", "engines", "standup");
        let fields = fields_to_show(&current, Some(&previous));
        assert_eq!(
            fields,
            HeaderFields { sender: true, recipient: true, subject: false }
        );
    }

    #[test]
    fn private_messages_never_show_recipient_or_subject() {
        let current = private_message("Ada", &["Ada", "Grace"]);
        let fields = fields_to_show(&current, None);
        assert_eq!(
            fields,
            HeaderFields { sender: true, recipient: false, subject: false }
        );

        let previous = channel_message("Grace", "general", "standup");
        let fields = fields_to_show(&current, Some(&previous));
        assert!(!fields.recipient);
        assert!(!fields.subject);
    }

    #[test]
    fn private_message_renders_only_sender_and_content() {
        let current = private_message("Ada", &["Ada", "Grace"]);
        let lines = message_lines(&current, None);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "Ada");
        assert_eq!(lines[1].to_string(), "psst");
    }

    #[test]
    fn channel_header_joins_recipient_and_subject() {
        let current = channel_message("Ada", "general", "standup");
        let lines = message_lines(&current, None);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].to_string(), "general > standup");
    }

    #[test]
    fn separator_is_omitted_when_only_one_header_field_shows() {
        let previous = channel_message("Ada", "general", "standup");
        let current = channel_message("Ada", "general", "retro");
        let lines = message_lines(&current, Some(&previous));
        assert_eq!(lines[0].to_string(), "retro");
    }

    #[test]
    fn fully_suppressed_message_is_content_only() {
        let current = channel_message("Ada", "general", "standup");
        let lines = message_lines(&current, Some(&current));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "hi");
    }
}
