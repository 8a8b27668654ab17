use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::ui::compose::ComposeForm;
use crate::ui::format::message_lines;
use crate::ui::theme;
use crate::ui::App;

pub fn render(frame: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1)])
        .split(outer[0]);

    render_sidebar(frame, app, columns[0]);
    render_transcript(frame, app, columns[1]);
    render_status(frame, app, outer[1]);

    if let Some(form) = &app.compose {
        render_compose(frame, form, frame.area());
    }
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .channels
        .iter()
        .map(|channel| ListItem::new(channel.as_str()))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Channels")
            .title_style(Style::default().fg(theme::SIDEBAR_TITLE)),
    );
    frame.render_widget(list, area);
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let mut previous = None;
    for message in &app.messages {
        lines.extend(message_lines(message, previous));
        previous = Some(message);
    }

    // Keep the tail in view.
    let height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(height) as u16;

    let transcript = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .scroll((scroll, 0));
    frame.render_widget(transcript, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status {
        Some(status) => status.as_str(),
        None => "q quit  p private  s channel  j join",
    };
    let status = Paragraph::new(text).style(Style::default().fg(theme::STATUS));
    frame.render_widget(status, area);
}

fn render_compose(frame: &mut Frame, form: &ComposeForm, area: Rect) {
    let width = area.width.min(60);
    let height = (form.fields.len() as u16) * 3 + 2;
    let modal = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height: height.min(area.height),
    };

    frame.render_widget(Clear, modal);
    let block = Block::default().borders(Borders::ALL).title(form.title());
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let constraints: Vec<Constraint> =
        form.fields.iter().map(|_| Constraint::Length(3)).collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in form.fields.iter().enumerate() {
        let border_style = if index == form.focus {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(field.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(field.label)
                .border_style(border_style),
        );
        frame.render_widget(widget, rows[index]);
        if index == form.focus {
            frame.set_cursor_position((
                rows[index].x + 1 + field.cursor_width(),
                rows[index].y + 1,
            ));
        }
    }
}
