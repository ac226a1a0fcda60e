use crate::session::Route;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Top bar: app name, current screen and the signed-in user.
pub struct Header<'a> {
    route: Route,
    username: Option<&'a str>,
    loading: bool,
}

impl<'a> Header<'a> {
    pub fn new(route: Route, username: Option<&'a str>, loading: bool) -> Self {
        Self {
            route,
            username,
            loading,
        }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (status, status_style) = match self.username {
            Some(name) => (format!("● {}", name), Style::default().fg(STATUS_OK)),
            None => ("○ signed out".to_string(), Style::default().fg(STATUS_ERROR)),
        };

        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                "QuestMap",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(self.route.title(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(status, status_style),
        ];
        if self.loading {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled("loading…", text_style.add_modifier(Modifier::DIM)));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
