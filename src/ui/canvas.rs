//! Off-screen rendering for widgets that scroll past the edge of their area.
//!
//! Ratatui widgets clip to the `Rect` they are given, which cannot start at
//! a negative coordinate.  Cards and sections that are partially scrolled
//! out of view are rendered into a scratch [`Buffer`] at full size and then
//! copied cell by cell into the frame, keeping only what lands in `clip`.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Copy `src` into `dst` with its top-left corner at `(x, y)`, skipping
/// every cell outside `clip`.
pub fn blit(src: &Buffer, dst: &mut Buffer, x: i32, y: i32, clip: Rect) {
    let clip = clip.intersection(dst.area);
    if clip.is_empty() {
        return;
    }
    let (clip_left, clip_top) = (i32::from(clip.x), i32::from(clip.y));
    let (clip_right, clip_bottom) = (i32::from(clip.right()), i32::from(clip.bottom()));

    for sy in 0..src.area.height {
        let dy = y + i32::from(sy);
        if dy < clip_top || dy >= clip_bottom {
            continue;
        }
        for sx in 0..src.area.width {
            let dx = x + i32::from(sx);
            if dx < clip_left || dx >= clip_right {
                continue;
            }
            let Some(cell) = src.cell((src.area.x + sx, src.area.y + sy)) else {
                continue;
            };
            if let Some(target) = dst.cell_mut((dx as u16, dy as u16)) {
                *target = cell.clone();
            }
        }
    }
}

/// Render `widget` at `width × height` and blit it at `(x, y)`.
pub fn render_clipped<W: Widget>(
    widget: W,
    width: u16,
    height: u16,
    dst: &mut Buffer,
    x: i32,
    y: i32,
    clip: Rect,
) {
    if width == 0 || height == 0 {
        return;
    }
    // Skip the scratch buffer entirely when nothing would be visible.
    let right = x + i32::from(width);
    let bottom = y + i32::from(height);
    if right <= i32::from(clip.x)
        || bottom <= i32::from(clip.y)
        || x >= i32::from(clip.right())
        || y >= i32::from(clip.bottom())
    {
        return;
    }

    let mut scratch = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(scratch.area, &mut scratch);
    blit(&scratch, dst, x, y, clip);
}
