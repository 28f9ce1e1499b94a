//! Panel rendering
//!
//! Presentation only: sidebar with the conversation list, transcript of the
//! active conversation, ghost suggestion, and the prompt input. No state
//! lives here.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::state::PanelState;
use crate::conversation::{Mode, Role};
use crate::draft::DraftHost;

const SIDEBAR_WIDTH: u16 = 28;

impl PanelState {
    /// Render the panel
    pub fn render(&self, frame: &mut Frame, draft: &dyn DraftHost) {
        let columns = Layout::horizontal([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(20),
        ])
        .split(frame.area());

        self.render_sidebar(frame, columns[0]);
        self.render_main(frame, columns[1], draft);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .store
            .iter()
            .map(|conversation| {
                let active = self.store.active_id() == Some(conversation.id.as_str());
                let title = if active && self.editing_title {
                    format!("{}_", self.title_input)
                } else {
                    conversation.title.clone()
                };
                let title = truncate_to_width(&title, (area.width.saturating_sub(4)) as usize);
                let style = if active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(title, style)))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Chats ")
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_main(&self, frame: &mut Frame, area: Rect, draft: &dyn DraftHost) {
        let suggestion_height = if self.suggestions.is_visible() { 5 } else { 0 };
        let rows = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(suggestion_height),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_transcript(frame, rows[0]);
        if suggestion_height > 0 {
            self.render_suggestion(frame, rows[1], draft);
        }
        self.render_prompt(frame, rows[2]);
        self.render_status(frame, rows[3]);
    }

    fn render_transcript(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .store
            .active()
            .map(|c| format!(" {} ", c.title))
            .unwrap_or_else(|| " AI Copilot ".to_string());

        let mut lines: Vec<Line> = Vec::new();
        match self.store.active() {
            Some(conversation) if !conversation.messages.is_empty() => {
                for message in &conversation.messages {
                    let (author, style) = match message.role {
                        Role::User => ("You", Style::default().fg(Color::Green)),
                        Role::Assistant => ("Copilot", Style::default().fg(Color::Magenta)),
                    };
                    lines.push(Line::from(Span::styled(
                        format!("{author} · {}", message.mode.label()),
                        style.add_modifier(Modifier::BOLD),
                    )));
                    for content_line in message.content.lines() {
                        lines.push(Line::from(content_line.to_string()));
                    }
                    lines.push(Line::default());
                }
            }
            _ => {
                lines.push(Line::default());
                lines.push(Line::from(
                    "Ask questions or generate edits powered by your research.",
                ));
                lines.push(Line::from(
                    "Enter submits · Ctrl+G suggests · Ctrl+T switches mode",
                ));
            }
        }

        // Keep the tail of the transcript in view
        let height = area.height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(height) as u16;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            area,
        );
    }

    fn render_suggestion(&self, frame: &mut Frame, area: Rect, draft: &dyn DraftHost) {
        let Some(suggestion) = self.suggestions.current() else {
            return;
        };

        let tail: String = draft
            .draft()
            .chars()
            .rev()
            .take(40)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        let lines = vec![
            Line::from(vec![
                Span::raw(format!("…{tail}")),
                Span::styled(
                    suggestion.text.clone(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "Tab accepts · Esc rejects",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Suggestion ")
            .border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn render_prompt(&self, frame: &mut Frame, area: Rect) {
        let mode_label = match self.mode {
            Mode::Ask => " Ask ",
            Mode::Edit => " Edit ",
            Mode::Suggest => " Suggest ",
        };
        let border = if self.awaiting_response {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let mut prompt = self.prompt.clone();
        prompt.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(mode_label)
                .border_style(border),
        );
        frame.render_widget(&prompt, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.mode.label()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        )];

        if self.awaiting_response {
            spans.push(Span::styled(
                " thinking… ",
                Style::default().fg(Color::Yellow),
            ));
        }
        if self.suggestions.is_generating() {
            spans.push(Span::styled(
                " suggesting… ",
                Style::default().fg(Color::Yellow),
            ));
        }
        if !self.dispatcher.is_configured() {
            spans.push(Span::styled(
                " no default chat model ",
                Style::default().fg(Color::Red),
            ));
        }
        spans.push(Span::styled(
            " Ctrl+N new · Ctrl+D delete · F2 rename · Alt+↑/↓ switch · Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Truncate a string to a display width, appending an ellipsis when cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
