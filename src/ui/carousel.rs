use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::types::{capitalize, DexNumber};

/// Featured-creature banner. Shows the current slide's name (once the list
/// has it), number, artwork URL and a position indicator.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            format!(" dex - {} ", app.catalog_name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let Some(image) = app.carousel.current() else {
        let empty = Paragraph::new("Browse the catalog below")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    };

    let name = app
        .item_by_id(image.id)
        .map(|item| capitalize(&item.name))
        .unwrap_or_else(|| image.alt.clone());

    let dots: Vec<Span> = (0..app.carousel.len())
        .map(|i| {
            if i == app.carousel.index() {
                Span::styled("● ", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let lines = vec![
        Line::from(vec![
            Span::styled("Featured: ", Style::default().fg(Color::Gray)),
            Span::styled(
                name,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                DexNumber(Some(image.id)).to_string(),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(Span::styled(
            image.src.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(dots),
    ];

    let banner = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(banner, area);
}
