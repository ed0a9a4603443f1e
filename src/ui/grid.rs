use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, GRID_COLUMNS};
use crate::listing::Page;
use crate::types::{capitalize, DexNumber, ListItem};

pub fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = if app.search_term.is_empty() && !app.search_mode {
        Line::from(Span::styled(
            "Press / to search by name",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(app.search_term.as_str())];
        if app.search_mode {
            spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };

    let search = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search "),
    );
    frame.render_widget(search, area);
}

/// Card grid for the current page, followed by the pager when there is
/// more than one page.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let page = app.page();

    if app.loading {
        let loading = Paragraph::new("Loading catalog...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(loading, centered_line(area));
        return;
    }

    if page.filtered_count == 0 {
        let empty = Paragraph::new("No creatures found")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, centered_line(area));
        return;
    }

    let (cards_area, pager_area) = if page.has_multiple_pages() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    render_cards(frame, app, &page, cards_area);

    if let Some(pager_area) = pager_area {
        render_pager(frame, &page, pager_area);
    }
}

fn render_cards(frame: &mut Frame, app: &App, page: &Page, area: Rect) {
    let rows = app.page_size.div_ceil(GRID_COLUMNS).max(1);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Max(4); rows])
        .split(area);

    for (row, chunk) in page.items.chunks(GRID_COLUMNS).enumerate() {
        let Some(&row_area) = row_areas.get(row) else {
            break;
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(row_area);

        for (col, item) in chunk.iter().enumerate() {
            let index = row * GRID_COLUMNS + col;
            render_card(frame, item, index == app.cursor && !app.modal_open, cells[col]);
        }
    }
}

fn render_card(frame: &mut Frame, item: &ListItem, is_selected: bool, area: Rect) {
    let (border, name_style) = if is_selected {
        (
            Style::default().fg(Color::Yellow),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(Span::styled(capitalize(&item.name), name_style)),
        Line::from(Span::styled(
            DexNumber(item.id()).to_string(),
            Style::default().fg(Color::Red),
        )),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(card, area);
}

fn render_pager(frame: &mut Frame, page: &Page, area: Rect) {
    let enabled = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled(
            "◀ p  ",
            if page.page > 1 { enabled } else { disabled },
        ),
        Span::styled(
            format!("Page {} of {}", page.page, page.total_pages),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  n ▶",
            if page.page < page.total_pages {
                enabled
            } else {
                disabled
            },
        ),
        Span::styled(
            format!("   ({} matches)", page.filtered_count),
            Style::default().fg(Color::Gray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y, area.width, area.height.min(1))
}
