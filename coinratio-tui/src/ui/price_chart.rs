//! One line chart with date x-axis, inside a titled border.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::theme;
use crate::view::{format_date, format_value, ChartSpec};

pub fn render(f: &mut Frame, area: Rect, spec: &ChartSpec) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(spec.slot))
        .title(format!(" {} ", spec.title))
        .title_style(theme::panel_title(spec.slot))
        .style(Style::default().bg(theme::BACKGROUND));

    let data = spec.plottable();
    match spec.bounds() {
        Some(bounds) => render_chart(f, area, block, spec, &data, bounds.x, bounds.y),
        None => render_empty(f, area, block),
    }
}

fn render_empty(f: &mut Frame, area: Rect, block: Block) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No plottable data.", theme::warning())),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(
    f: &mut Frame,
    area: Rect,
    block: Block,
    spec: &ChartSpec,
    data: &[(f64, f64)],
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::series_color(spec.slot)))
        .graph_type(GraphType::Line)
        .data(data);

    let x_mid = (x_bounds[0] + x_bounds[1]) / 2.0;
    let y_mid = (y_bounds[0] + y_bounds[1]) / 2.0;

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(spec.x_label.as_str(), theme::secondary()))
                .style(theme::muted())
                .bounds(x_bounds)
                .labels(vec![
                    Span::styled(format_date(x_bounds[0]), theme::muted()),
                    Span::styled(format_date(x_mid), theme::muted()),
                    Span::styled(format_date(x_bounds[1]), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(spec.y_label.as_str(), theme::secondary()))
                .style(theme::muted())
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(format_value(y_bounds[0]), theme::muted()),
                    Span::styled(format_value(y_mid), theme::muted()),
                    Span::styled(format_value(y_bounds[1]), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
