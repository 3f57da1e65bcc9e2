//! Top-level layout: 2×2 grid: coin A | coin B / ratio | summary.

pub mod legend;
pub mod price_chart;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::view::RatioView;

/// Draw the entire view.
pub fn draw(f: &mut Frame, view: &RatioView) {
    let [top_left, top_right, bottom_left, bottom_right] = grid(f.area());

    price_chart::render(f, top_left, &view.first);
    price_chart::render(f, top_right, &view.second);
    price_chart::render(f, bottom_left, &view.ratio);
    legend::render(f, bottom_right, view);
}

/// Split an area into four equal quadrants, row-major.
pub fn grid(area: Rect) -> [Rect; 4] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let halves = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };
    let top = halves(rows[0]);
    let bottom = halves(rows[1]);

    [top[0], top[1], bottom[0], bottom[1]]
}
