mod carousel;
mod detail;
mod grid;
mod popup;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    carousel::render(frame, app, chunks[0]);
    grid::render_search(frame, app, chunks[1]);
    grid::render(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if app.modal_open {
        detail::render(frame, app);
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(error) = &app.error {
        Line::from(vec![Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )])
    } else if let Some(notice) = &app.notice {
        Line::from(vec![Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Green),
        )])
    } else if app.loading || app.detail_loading {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else {
        let help = if app.search_mode {
            "type to filter | Backspace: delete | Ctrl+u: clear | Enter/Esc: done"
        } else if app.modal_open {
            "o: open artwork | y: copy URL | Esc/q: close"
        } else {
            "hjkl/arrows: move | n/p: page | g/G: first/last | Enter: details | /: search | q: quit"
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    use super::*;
    use crate::action::Action;
    use crate::app::tests::{item, numbered_items, record, test_app, FakeCatalog};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_loading_state() {
        let (mut app, _rx) = test_app(FakeCatalog::default());
        app.loading = true;
        assert!(draw(&app).contains("Loading catalog..."));
    }

    #[test]
    fn renders_empty_state_after_failed_load() {
        let (mut app, _rx) = test_app(FakeCatalog::default());
        app.update(Action::ListFailed("API error: offline".into()));
        let screen = draw(&app);
        assert!(screen.contains("No creatures found"));
        assert!(screen.contains("Error: API error: offline"));
    }

    #[test]
    fn renders_cards_and_featured_name() {
        let (mut app, _rx) = test_app(FakeCatalog::default());
        app.update(Action::ListLoaded(vec![
            item(25, "pikachu"),
            item(26, "raichu"),
            item(1, "bulbasaur"),
        ]));
        let screen = draw(&app);
        assert!(screen.contains("Pikachu"));
        assert!(screen.contains("No. 001"));
        assert!(screen.contains("Featured: Pikachu"));
        // Single page: no pager
        assert!(!screen.contains("Page 1 of"));
    }

    #[test]
    fn renders_pager_when_paginated() {
        let (mut app, _rx) = test_app(FakeCatalog::default());
        app.update(Action::ListLoaded(numbered_items(30)));
        app.update(Action::NextPage);
        let screen = draw(&app);
        assert!(screen.contains("Page 2 of 3"));
        assert!(screen.contains("Mon13"));
        assert!(!screen.contains("Mon12 "));
    }

    #[test]
    fn renders_modal_states() {
        let (mut app, _rx) = test_app(FakeCatalog::default());
        app.modal_open = true;
        app.detail_loading = true;
        assert!(draw(&app).contains("Loading details..."));

        app.detail_loading = false;
        assert!(draw(&app).contains("Details unavailable"));

        app.selected = Some(record(25, "pikachu"));
        let screen = draw(&app);
        assert!(screen.contains("Electric"));
        assert!(screen.contains("0.4 m"));
        assert!(screen.contains("6.0 kg"));
        assert!(screen.contains("Static"));
        assert!(screen.contains("HP"));
        assert!(screen.contains("No. 025"));
    }

    #[test]
    fn renders_in_tiny_terminal() {
        let (mut app, _rx) = test_app(FakeCatalog::default());
        app.update(Action::ListLoaded(numbered_items(30)));
        app.modal_open = true;
        app.selected = Some(record(25, "pikachu"));
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }
}
