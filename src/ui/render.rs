use crate::notify::ToastKind;
use crate::session::Route;
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::form::TextField;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect, layout_regions, toast_rect};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, HEADER_TEXT, PANEL_BORDER, POPUP_BORDER, STATUS_ERROR, STATUS_INFO,
    STATUS_OK,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    let username = app.store().current_user().map(|user| user.username.as_str());
    frame.render_widget(
        Header::new(app.route(), username, app.is_loading()).widget(),
        header,
    );
    frame.render_widget(Clear, body);

    match app.route() {
        Route::SignIn => draw_sign_in(frame, app, body),
        Route::SignUp => draw_sign_up(frame, app, body),
        Route::Home => draw_map(frame, app, body),
        Route::Profile => draw_profile(frame, app, body),
        Route::Friends => draw_friends(frame, app, body),
        Route::Quests => draw_quests(frame, app, body),
    }

    frame.render_widget(Footer::new(app.route()).widget(footer), footer);
    draw_toasts(frame, app, area);
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PANEL_BORDER))
}

fn field_line(label: &str, field: &TextField, focused: bool) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let mut line = Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(ACCENT)),
        Span::styled(format!("{:<18}", label), Style::default().fg(HEADER_TEXT)),
        Span::raw(field.display()),
        Span::styled(
            if focused { "▏" } else { "" }.to_string(),
            Style::default().fg(ACCENT),
        ),
    ]);
    if focused {
        line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
    }
    line
}

fn error_line(error: Option<&str>) -> Line<'static> {
    match error {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(STATUS_ERROR),
        )),
        None => Line::from(""),
    }
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
    ))
}

fn draw_sign_in(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let form = app.sign_in_form();
    let focus = form.cursor.index();
    let lines = vec![
        Line::from(""),
        field_line("Username", &form.username, focus == 0),
        field_line("Password", &form.password, focus == 1),
        Line::from(""),
        error_line(
            form.error
                .as_deref()
                .or(app.store().state().user.error.as_deref()),
        ),
        dim("No account yet? Press Ctrl+N to sign up."),
    ];
    let area = centered_rect(60, 50, body);
    frame.render_widget(Paragraph::new(lines).block(panel("Sign in")), area);
}

fn draw_sign_up(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let form = app.sign_up_form();
    let focus = form.cursor.index();
    let avatar = match &form.avatar {
        Some(file) => Line::from(Span::styled(
            format!("  Avatar: {} ({}, {} bytes)", file.name, file.mime, file.size),
            Style::default().fg(STATUS_OK),
        )),
        None => dim("  Avatar: none attached"),
    };
    let lines = vec![
        Line::from(""),
        field_line("Username", &form.username, focus == 0),
        field_line("Password", &form.password, focus == 1),
        field_line("Confirm password", &form.confirm, focus == 2),
        field_line("Avatar file", &form.avatar_path, focus == 3),
        avatar,
        Line::from(""),
        error_line(
            form.error
                .as_deref()
                .or(app.store().state().user.error.as_deref()),
        ),
        dim("Already registered? Press Ctrl+N to sign in."),
    ];
    let area = centered_rect(70, 60, body);
    frame.render_widget(Paragraph::new(lines).block(panel("Sign up")), area);
}

fn draw_map(frame: &mut Frame<'_>, app: &App, body: Rect) {
    if let Some(map) = app.map() {
        map.render(frame, body, &app.markers());
    }

    if !app.task_popup_open() {
        return;
    }
    let Some(quest) = app.store().state().quest.current_quest.as_ref() else {
        return;
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("{}, {}", quest.city, quest.country),
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(quest.description.clone()),
        Line::from(""),
        dim(format!(
            "{:.4}, {:.4}",
            quest.coordinates.latitude, quest.coordinates.longitude
        )),
        Line::from(""),
        dim("G: Go there  Enter/Esc: Close"),
    ];
    let area = centered_rect(60, 40, body);
    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(" New quest ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(
        Paragraph::new(lines).block(popup).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_profile(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(body);

    let state = app.store().state();
    let mut info = Vec::new();
    if let Some(user) = app.store().current_user() {
        info.push(Line::from(vec![
            Span::styled("Username   ", Style::default().fg(HEADER_TEXT)),
            Span::raw(user.username.clone()),
        ]));
        info.push(Line::from(vec![
            Span::styled("Avatar     ", Style::default().fg(HEADER_TEXT)),
            Span::raw(if user.avatar.is_empty() {
                "none".to_string()
            } else {
                user.avatar.clone()
            }),
        ]));
        info.push(Line::from(vec![
            Span::styled("Completed  ", Style::default().fg(HEADER_TEXT)),
            Span::raw(state.quest.completed.len().to_string()),
        ]));
        info.push(Line::from(vec![
            Span::styled("Friends    ", Style::default().fg(HEADER_TEXT)),
            Span::raw(user.friends.len().to_string()),
        ]));
    }
    info.push(Line::from(""));
    match &state.quest.current_quest {
        Some(quest) => {
            info.push(Line::from(Span::styled(
                format!("Current quest: {}, {}", quest.city, quest.country),
                Style::default().fg(ACCENT),
            )));
            info.push(Line::from(quest.description.clone()));
        }
        None => info.push(dim("No active quest. Roll one on the map (F2, R).")),
    }
    frame.render_widget(
        Paragraph::new(info)
            .block(panel("Profile"))
            .wrap(Wrap { trim: true }),
        columns[0],
    );

    let form = app.profile_form();
    let focus = form.cursor.index();
    let mut lines = vec![
        field_line("Add photos", &form.photo_paths, focus == 0),
        field_line("Description", &form.description, focus == 1),
        field_line("New avatar", &form.avatar_path, focus == 2),
        Line::from(""),
        dim(format!("Photos attached: {}", form.photos.len())),
    ];
    for file in form.photos.files() {
        lines.push(Line::from(format!("  • {} ({} bytes)", file.name, file.size)));
    }
    lines.push(Line::from(""));
    lines.push(error_line(
        form.error.as_deref().or(state.quest.error.as_deref()),
    ));
    frame.render_widget(
        Paragraph::new(lines).block(panel("Complete quest")),
        columns[1],
    );
}

fn draw_friends(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(body);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let form = app.friends_form();
    frame.render_widget(
        Paragraph::new(field_line("Add by username", &form.username, true))
            .block(panel("Add friend")),
        rows[0],
    );

    let friend_state = &app.store().state().friend;
    let mut list = Vec::new();
    if friend_state.friends.is_empty() {
        list.push(dim("No friends yet."));
    }
    for (idx, friend) in friend_state.friends.iter().enumerate() {
        let mut line = Line::from(format!(" {}", friend.username));
        if idx == form.selected {
            line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
        }
        list.push(line);
    }
    if let Some(error) = friend_state.error.as_deref() {
        list.push(Line::from(""));
        list.push(error_line(Some(error)));
    }
    frame.render_widget(Paragraph::new(list).block(panel("Friends")), columns[0]);

    let mut quests = Vec::new();
    if friend_state.selected_user_quests.is_empty() {
        quests.push(dim("Press Enter on a friend to see their achievements."));
    }
    for completion in &friend_state.selected_user_quests {
        quests.push(Line::from(Span::styled(
            format!("{}, {}", completion.city, completion.country),
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        )));
        if !completion.comment.is_empty() {
            quests.push(Line::from(format!("  {}", completion.comment)));
        }
    }
    frame.render_widget(
        Paragraph::new(quests)
            .block(panel("Achievements"))
            .wrap(Wrap { trim: true }),
        columns[1],
    );
}

fn draw_quests(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let completed = &app.store().state().quest.completed;
    let mut lines = Vec::new();
    if completed.is_empty() {
        lines.push(dim("No completed quests yet."));
    }
    for completion in completed.iter().skip(app.quests_scroll()) {
        lines.push(Line::from(Span::styled(
            format!("{}, {}", completion.city, completion.country),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        if let Some(date) = completion.completion_date.as_deref() {
            lines.push(dim(format!("  completed {}", date)));
        }
        if !completion.description.is_empty() {
            lines.push(Line::from(format!("  {}", completion.description)));
        }
        if !completion.coupon.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  coupon: {}", completion.coupon),
                Style::default().fg(STATUS_OK),
            )));
        }
        lines.push(dim(format!("  {} photo(s)", completion.images.len())));
        lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel("Achievements"))
            .wrap(Wrap { trim: true }),
        body,
    );
}

fn draw_toasts(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if app.toasts().is_empty() {
        return;
    }
    let lines: Vec<Line> = app
        .toasts()
        .visible()
        .map(|toast| {
            let color = match toast.kind {
                ToastKind::Success => STATUS_OK,
                ToastKind::Error => STATUS_ERROR,
                ToastKind::Info => STATUS_INFO,
            };
            Line::from(Span::styled(toast.message.clone(), Style::default().fg(color)))
        })
        .collect();
    let rect = toast_rect(area, lines.len() as u16);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(POPUP_BORDER)),
        ),
        rect,
    );
}
