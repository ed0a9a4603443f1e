use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::types::{capitalize, DetailRecord, DexNumber};

use super::popup;

const BAR_WIDTH: usize = 24;

pub fn render(frame: &mut Frame, app: &App) {
    let title = match &app.selected {
        Some(record) => capitalize(&record.name),
        None => "Details".to_string(),
    };
    let area = popup::open(frame, &title, 64, 24);

    if app.detail_loading {
        let loading = Paragraph::new("Loading details...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(loading, area);
        return;
    }

    let Some(record) = &app.selected else {
        let empty = Paragraph::new(vec![
            Line::from("Details unavailable"),
            Line::from(""),
            Line::from(Span::styled(
                "Esc: close",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    };

    render_record(frame, app, record, area);
}

fn render_record(frame: &mut Frame, app: &App, record: &DetailRecord, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                capitalize(&record.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                DexNumber(Some(record.id)).to_string(),
                Style::default().fg(Color::Red),
            ),
        ])
        .alignment(Alignment::Center),
        type_badges(record).alignment(Alignment::Center),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{:.1} m", record.height_m()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" height   ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1} kg", record.weight_kg()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" weight   ", Style::default().fg(Color::Gray)),
            Span::styled(
                record.primary_ability().map(capitalize).unwrap_or_else(|| "-".into()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ability", Style::default().fg(Color::Gray)),
        ])
        .alignment(Alignment::Center),
    ];

    if record.abilities.len() > 1 {
        let others: Vec<String> = record.abilities[1..]
            .iter()
            .map(|a| capitalize(&a.name))
            .collect();
        lines.push(
            Line::from(Span::styled(
                format!("also: {}", others.join(", ")),
                Style::default().fg(Color::Gray),
            ))
            .alignment(Alignment::Center),
        );
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            "Base stats",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );

    for stat in &record.stats {
        let filled = stat_fill(stat.base_stat, BAR_WIDTH);
        lines.push(Line::from(vec![
            Span::raw(format!("{:>8} ", stat_label(&stat.stat_name))),
            Span::styled("█".repeat(filled), Style::default().fg(stat_color(&stat.stat_name))),
            Span::styled(
                "░".repeat(BAR_WIDTH - filled),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!(" {:>3}", stat.base_stat),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        app.artwork_url(record.id),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "o: open artwork | y: copy URL | Esc: close",
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

fn type_badges(record: &DetailRecord) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, slot) in record.types.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" {} ", capitalize(&slot.type_name)),
            Style::default()
                .fg(Color::White)
                .bg(type_color(&slot.type_name))
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Cells of a `width`-wide bar filled for a base stat; 255 fills it.
fn stat_fill(base_stat: u32, width: usize) -> usize {
    let ratio = (f64::from(base_stat) / 255.0).min(1.0);
    (ratio * width as f64).round() as usize
}

fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn type_color(type_name: &str) -> Color {
    rgb(match type_name {
        "fire" => 0xF08030,
        "water" => 0x6890F0,
        "grass" => 0x78C850,
        "electric" => 0xF8D030,
        "ice" => 0x98D8D8,
        "fighting" => 0xC03028,
        "poison" => 0xA040A0,
        "ground" => 0xE0C068,
        "flying" => 0xA890F0,
        "psychic" => 0xF85888,
        "bug" => 0xA8B820,
        "rock" => 0xB8A038,
        "ghost" => 0x705898,
        "dragon" => 0x7038F8,
        "steel" => 0xB8B8D0,
        "fairy" => 0xEE99AC,
        _ => 0xA8A878,
    })
}

fn stat_color(stat_name: &str) -> Color {
    rgb(match stat_name {
        "hp" => 0xFE0000,
        "attack" => 0xFF7F2F,
        "defense" => 0xF8D030,
        "special-attack" => 0x6890F0,
        "special-defense" => 0x78C850,
        "speed" => 0xF85888,
        _ => 0x444444,
    })
}

fn stat_label(stat_name: &str) -> &str {
    match stat_name {
        "hp" => "HP",
        "attack" => "Attack",
        "defense" => "Defense",
        "special-attack" => "Sp. Atk",
        "special-defense" => "Sp. Def",
        "speed" => "Speed",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_fill_is_capped() {
        assert_eq!(stat_fill(0, 24), 0);
        assert_eq!(stat_fill(255, 24), 24);
        assert_eq!(stat_fill(300, 24), 24);
        assert_eq!(stat_fill(128, 24), 12);
    }

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(rgb(0xF08030), Color::Rgb(0xF0, 0x80, 0x30));
        assert_eq!(type_color("fire"), Color::Rgb(0xF0, 0x80, 0x30));
        assert_eq!(type_color("shadow"), Color::Rgb(0xA8, 0xA8, 0x78));
        assert_eq!(stat_color("unknown"), Color::Rgb(0x44, 0x44, 0x44));
    }

    #[test]
    fn stat_labels() {
        assert_eq!(stat_label("special-attack"), "Sp. Atk");
        assert_eq!(stat_label("hp"), "HP");
        assert_eq!(stat_label("accuracy"), "accuracy");
    }
}
