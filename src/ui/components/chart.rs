use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph, Wrap,
    },
};

use crate::app::state::{Phase, ViewState};
use crate::geometry::{Canvas as ChartCanvas, Chart, ChartGeometry, Point};
use crate::stock::ChangeDirection;
use crate::timeframe::Timeframe;
use crate::ui::styles::{direction_color, error_style, secondary_line, selection_style};

/// Rough width of a `$123.45` label in canvas units, used to keep extremum
/// labels inside the plot.
const PRICE_LABEL_WIDTH: f64 = 60.0;

/// Timeframe labels for the chart title, the selected one highlighted.
pub fn timeframe_legend(selected: Timeframe) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, timeframe) in Timeframe::all().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        if *timeframe == selected {
            spans.push(Span::styled(format!("[{}]", timeframe.label), selection_style()));
        } else {
            spans.push(Span::raw(format!(" {} ", timeframe.label)));
        }
    }
    Line::from(spans)
}

/// Geometry uses a top-left origin; the ratatui canvas grows upwards.
pub fn to_canvas(point: Point, canvas: &ChartCanvas) -> (f64, f64) {
    (point.x, canvas.height - point.y)
}

/// Text shown instead of the plot, or `None` when there is a chart to draw.
/// This panel is the only place a failure message is shown.
pub fn panel_message(view: &ViewState, chart: &Chart) -> Option<Line<'static>> {
    match (view.phase, chart) {
        (Phase::Idle, _) => Some(secondary_line("Type a ticker and press Enter.")),
        (Phase::Loading, _) => Some(Line::from("Loading…")),
        (Phase::Failure, _) => Some(Line::from(Span::styled(
            view.error.clone().unwrap_or_default(),
            error_style(),
        ))),
        (Phase::Success, Chart::Empty) => Some(secondary_line("No chart data found.")),
        (Phase::Success, Chart::Plotted(_)) => None,
    }
}

/// Vertical `(x, bottom, top)` strokes in canvas space that shade the area
/// polygon, sampled at `columns + 1` evenly spaced x positions.
pub fn area_strokes(geometry: &ChartGeometry, columns: usize) -> Vec<(f64, f64, f64)> {
    let canvas = geometry.canvas;
    let Some((baseline, outline)) = geometry
        .area
        .len()
        .checked_sub(2)
        .map(|end| (geometry.area[end].y, &geometry.area[..end]))
    else {
        return Vec::new();
    };
    let Some(last) = outline.last() else {
        return Vec::new();
    };
    let bottom = canvas.height - baseline;
    let columns = columns.max(1);

    (0..=columns)
        .map(|column| {
            let x = canvas.width * column as f64 / columns as f64;
            let y = outline
                .windows(2)
                .find(|pair| pair[0].x <= x && x <= pair[1].x)
                .map(|pair| {
                    let t = (x - pair[0].x) / (pair[1].x - pair[0].x);
                    pair[0].y + (pair[1].y - pair[0].y) * t
                })
                .unwrap_or(last.y);
            (x, bottom, canvas.height - y)
        })
        .collect()
}

pub fn render_price_chart(f: &mut Frame<'_>, area: Rect, view: &ViewState, chart: &Chart) {
    let symbol = view
        .request
        .as_ref()
        .map(|request| request.symbol.to_string())
        .unwrap_or_else(|| "Price chart".to_string());
    let mut title = vec![Span::raw(format!(" {symbol}  "))];
    title.extend(timeframe_legend(view.selected_timeframe).spans);
    title.push(Span::raw(" "));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title));

    match (panel_message(view, chart), chart.geometry()) {
        (None, Some(geometry)) => {
            let direction = view
                .profile
                .as_ref()
                .map(|profile| profile.change_direction())
                .unwrap_or(ChangeDirection::Unknown);
            let columns = usize::from(area.width.saturating_sub(2)) * 2;
            f.render_widget(plot(geometry, direction, columns).block(block), area);
        }
        (message, _) => {
            f.render_widget(
                Paragraph::new(message.unwrap_or_default())
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(block),
                area,
            );
        }
    }
}

fn plot(
    geometry: &ChartGeometry,
    direction: ChangeDirection,
    columns: usize,
) -> Canvas<'_, impl Fn(&mut Context<'_>) + '_> {
    let canvas = geometry.canvas;
    let color = match direction {
        ChangeDirection::Unknown | ChangeDirection::Flat => Color::Cyan,
        other => direction_color(other),
    };
    let fill = area_strokes(geometry, columns);

    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, canvas.width])
        .y_bounds([0.0, canvas.height])
        .paint(move |ctx| {
            for &(x, bottom, top) in &fill {
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: bottom,
                    x2: x,
                    y2: top,
                    color: Color::Indexed(236),
                });
            }
            ctx.layer();

            let (_, baseline) = to_canvas(
                Point {
                    x: 0.0,
                    y: canvas.baseline(),
                },
                &canvas,
            );
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: baseline,
                x2: canvas.width,
                y2: baseline,
                color: Color::DarkGray,
            });

            for pair in geometry.points.windows(2) {
                let (x1, y1) = to_canvas(pair[0], &canvas);
                let (x2, y2) = to_canvas(pair[1], &canvas);
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                });
            }
            if let [only] = geometry.points.as_slice() {
                let (x, y) = to_canvas(*only, &canvas);
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: y,
                    x2: canvas.width,
                    y2: y,
                    color,
                });
            }

            ctx.layer();
            for (extremum, offset) in [(&geometry.max, 10.0), (&geometry.min, -16.0)] {
                let (x, y) = to_canvas(extremum.point, &canvas);
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color: Color::White,
                });
                let label_x = x.min(canvas.width - PRICE_LABEL_WIDTH).max(0.0);
                let label_y = (y + offset).clamp(0.0, canvas.height);
                ctx.print(label_x, label_y, extremum.label.clone());
            }

            for label in &geometry.date_labels {
                ctx.print(
                    label.x.max(0.0),
                    0.0,
                    Span::styled(label.text.clone(), Style::default().fg(Color::DarkGray)),
                );
            }
        })
}
