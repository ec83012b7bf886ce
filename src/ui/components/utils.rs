use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn split_vertical(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    split(area, Direction::Vertical, constraints)
}

pub fn split_horizontal(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    split(area, Direction::Horizontal, constraints)
}

fn split(area: Rect, direction: Direction, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(direction)
        .constraints(constraints.to_vec())
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_split_honours_fixed_rows() {
        let area = Rect::new(0, 0, 80, 24);
        let rows = split_vertical(area, &[Constraint::Length(3), Constraint::Min(1)]);
        assert_eq!(rows[0].height, 3);
        assert_eq!(rows[1].y, 3);
        assert_eq!(rows[1].height, 21);
    }

    #[test]
    fn horizontal_split_covers_the_width() {
        let area = Rect::new(0, 0, 80, 24);
        let cols = split_horizontal(area, &[Constraint::Length(20), Constraint::Min(1)]);
        assert_eq!(cols[0].width + cols[1].width, 80);
    }
}
