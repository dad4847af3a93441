use ratatui::layout::Rect;

/// Centered card of at most `width` x `height` within `screen`
pub fn card_area(screen: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width.saturating_sub(2));
    let height = height.min(screen.height.saturating_sub(2));
    Rect {
        x: screen.x + screen.width.saturating_sub(width) / 2,
        y: screen.y + screen.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Lay `widths` out left to right, centered in `area` on row `y`
pub fn centered_row(area: Rect, y: u16, height: u16, widths: &[u16], gap: u16) -> Vec<Rect> {
    let total: u16 = widths.iter().sum::<u16>() + gap * widths.len().saturating_sub(1) as u16;
    let mut x = area.x + area.width.saturating_sub(total) / 2;
    widths
        .iter()
        .map(|&w| {
            let rect = Rect::new(x, y, w.min(area.right().saturating_sub(x)), height);
            x = x.saturating_add(w + gap);
            rect
        })
        .collect()
}

/// Single line at `y` spanning `area`
pub fn line_at(area: Rect, y: u16) -> Rect {
    Rect::new(area.x, y, area.width, 1)
}

/// Move `rect` so it lies fully inside `bounds` (when it fits)
pub fn keep_inside(rect: Rect, bounds: Rect) -> Rect {
    let width = rect.width.min(bounds.width);
    let height = rect.height.min(bounds.height);
    let x = rect.x.clamp(bounds.x, bounds.right().saturating_sub(width));
    let y = rect.y.clamp(bounds.y, bounds.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_row() {
        let rects = centered_row(Rect::new(0, 0, 20, 10), 2, 3, &[4, 4], 2);
        assert_eq!(rects, vec![Rect::new(5, 2, 4, 3), Rect::new(11, 2, 4, 3)]);
    }

    #[test]
    fn test_keep_inside() {
        let bounds = Rect::new(0, 0, 20, 10);
        assert_eq!(keep_inside(Rect::new(18, 9, 5, 3), bounds), Rect::new(15, 7, 5, 3));
        assert_eq!(keep_inside(Rect::new(3, 2, 5, 3), bounds), Rect::new(3, 2, 5, 3));
    }

    #[test]
    fn test_card_area_shrinks_to_screen() {
        let card = card_area(Rect::new(0, 0, 30, 10), 60, 24);
        assert_eq!(card, Rect::new(1, 1, 28, 8));
    }
}
