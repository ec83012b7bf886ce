//! Pixel-space layout for the price chart.
//!
//! Coordinates follow screen convention: `y` grows downwards, so the highest
//! close maps to the smallest `y`. Everything here is pure; calling
//! [`compute_geometry`] twice with the same input yields the same output.

use chrono::{Local, TimeZone};

use crate::stock::PricePoint;
use crate::utils::short_date_label;

const MID_LABEL_OFFSET: f64 = 35.0;
const LAST_LABEL_OFFSET: f64 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Marker for the highest or lowest close.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremum {
    pub index: usize,
    pub price: f64,
    pub point: Point,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub index: usize,
    pub x: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub canvas: Canvas,
    pub min_close: f64,
    pub max_close: f64,
    pub step: f64,
    pub points: Vec<Point>,
    /// Polyline closed along the baseline.
    pub area: Vec<Point>,
    pub max: Extremum,
    pub min: Extremum,
    pub date_labels: Vec<AxisLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Empty,
    Plotted(ChartGeometry),
}

impl Chart {
    pub fn geometry(&self) -> Option<&ChartGeometry> {
        match self {
            Chart::Empty => None,
            Chart::Plotted(geometry) => Some(geometry),
        }
    }
}

/// Lay out `series` on `canvas`, with date labels in the local time zone.
pub fn compute_geometry(series: &[PricePoint], canvas: Canvas) -> Chart {
    compute_geometry_in(series, canvas, &Local)
}

pub fn compute_geometry_in<Tz: TimeZone>(series: &[PricePoint], canvas: Canvas, tz: &Tz) -> Chart
where
    Tz::Offset: std::fmt::Display,
{
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Chart::Empty;
    };

    let min_close = series
        .iter()
        .map(|p| p.close_price)
        .fold(f64::INFINITY, f64::min);
    let max_close = series
        .iter()
        .map(|p| p.close_price)
        .fold(f64::NEG_INFINITY, f64::max);

    let step = canvas.width / (series.len().saturating_sub(1).max(1)) as f64;
    // Halved operands keep the spread finite for any finite closes; halving
    // is exact, so the ratio is unchanged. A flat series divides by 1.
    let half_span = match max_close / 2.0 - min_close / 2.0 {
        d if d == 0.0 => 1.0,
        d => d,
    };
    let inner_height = canvas.inner_height();
    let y_of = |value: f64| {
        let ratio = (value / 2.0 - min_close / 2.0) / half_span;
        canvas.padding + inner_height - ratio * inner_height
    };

    let points: Vec<Point> = series
        .iter()
        .enumerate()
        .map(|(i, p)| Point {
            x: i as f64 * step,
            y: y_of(p.close_price),
        })
        .collect();

    let mut area = points.clone();
    area.push(Point {
        x: canvas.width,
        y: canvas.baseline(),
    });
    area.push(Point {
        x: 0.0,
        y: canvas.baseline(),
    });

    let extremum = |target: f64| {
        let index = series
            .iter()
            .position(|p| p.close_price == target)
            .unwrap_or(0);
        Extremum {
            index,
            price: target,
            point: Point {
                x: index as f64 * step,
                y: y_of(target),
            },
            label: format!("${target:.2}"),
        }
    };
    let max = extremum(max_close);
    let min = extremum(min_close);

    let last_index = series.len() - 1;
    let mut date_labels = vec![AxisLabel {
        index: 0,
        x: 0.0,
        text: short_date_label(first.timestamp_millis, tz),
    }];
    if series.len() > 3 {
        let mid = series.len() / 2;
        date_labels.push(AxisLabel {
            index: mid,
            x: canvas.width / 2.0 - MID_LABEL_OFFSET,
            text: short_date_label(series[mid].timestamp_millis, tz),
        });
    }
    date_labels.push(AxisLabel {
        index: last_index,
        x: canvas.width - LAST_LABEL_OFFSET,
        text: short_date_label(last.timestamp_millis, tz),
    });

    Chart::Plotted(ChartGeometry {
        canvas,
        min_close,
        max_close,
        step,
        points,
        area,
        max,
        min,
        date_labels,
    })
}
