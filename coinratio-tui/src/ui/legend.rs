//! Fourth pane: pair summary and the close hint.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::theme;
use crate::view::RatioView;

pub fn render(f: &mut Frame, area: Rect, view: &RatioView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Summary ")
        .title_style(theme::secondary());

    let width = view
        .legend
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = view
        .legend
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<width$}  "), theme::muted()),
                Span::styled(value.as_str(), theme::secondary()),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("q", theme::key_hint()),
        Span::styled(" / ", theme::muted()),
        Span::styled("Esc", theme::key_hint()),
        Span::styled(" / ", theme::muted()),
        Span::styled("Enter", theme::key_hint()),
        Span::styled("  close", theme::muted()),
    ]));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
