use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style, palette::tailwind},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// Gap between neighbouring chips.
const CHIP_GAP: u16 = 1;

/// One row of chips for the currently selected values.
///
/// Stateless: selection and focus are fed in per frame. The geometry lives in
/// [`chip_areas`] so mouse hit-testing and rendering can never disagree.
pub(crate) struct ChipRow<'a> {
    chips: &'a [String],
    focused: Option<usize>,
    alert: bool,
    accent: Option<Color>,
}

impl<'a> ChipRow<'a> {
    pub fn new(chips: &'a [String], focused: Option<usize>, alert: bool) -> Self {
        Self {
            chips,
            focused,
            alert,
            accent: None,
        }
    }

    pub fn accent(mut self, accent: Option<Color>) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for ChipRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, (chip, rect)) in self.chips.iter().zip(chip_areas(self.chips, area)).enumerate() {
            if rect.width == 0 {
                continue;
            }
            let mut style = Style::default()
                .bg(if self.alert {
                    tailwind::RED.c600
                } else {
                    self.accent.unwrap_or(tailwind::INDIGO.c600)
                })
                .fg(Color::White);
            if self.focused == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            buf.set_stringn(rect.x, rect.y, chip_text(chip), rect.width as usize, style);
        }
    }
}

fn chip_text(chip: &str) -> String {
    format!(" {chip} ✕ ")
}

/// Left-to-right chip rectangles inside `area`, clipped at its right edge.
pub(crate) fn chip_areas(chips: &[String], area: Rect) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(chips.len());
    let mut x = area.x;
    let right = area.right();
    for chip in chips {
        let width = UnicodeWidthStr::width(chip_text(chip).as_str()) as u16;
        let avail = right.saturating_sub(x);
        rects.push(Rect {
            x,
            y: area.y,
            width: width.min(avail),
            height: area.height.min(1),
        });
        x = x.saturating_add(width + CHIP_GAP).min(right);
    }
    rects
}

/// Total width the row wants, including gaps.
pub(crate) fn row_width(chips: &[String]) -> u16 {
    let chips_width: u16 = chips
        .iter()
        .map(|c| UnicodeWidthStr::width(chip_text(c).as_str()) as u16)
        .sum();
    let gaps = CHIP_GAP * chips.len().saturating_sub(1) as u16;
    chips_width + gaps
}

#[cfg(test)]
mod test {
    use super::*;

    fn chips(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn areas_are_laid_out_left_to_right() {
        let chips = chips(&["AI", "Theory"]);
        let area = Rect::new(2, 1, 40, 1);
        let rects = chip_areas(&chips, area);

        // " AI ✕ " is 6 cells wide, " Theory ✕ " is 10
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(2, 1, 6, 1));
        assert_eq!(rects[1], Rect::new(9, 1, 10, 1));
        assert_eq!(row_width(&chips), 17);
    }

    #[test]
    fn areas_clip_at_the_right_edge() {
        let chips = chips(&["AI", "Theory"]);
        let area = Rect::new(0, 0, 10, 1);
        let rects = chip_areas(&chips, area);

        assert_eq!(rects[0].width, 6);
        assert_eq!(rects[1].x, 7);
        assert_eq!(rects[1].width, 3, "second chip is clipped");
    }

    #[test]
    fn render_marks_the_focused_chip() {
        let chips = chips(&["AI"]);
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        ChipRow::new(&chips, Some(0), false).render(area, &mut buf);

        let cell = &buf[(1, 0)];
        assert_eq!(cell.symbol(), "A");
        assert!(cell.modifier.contains(Modifier::REVERSED));
        assert_eq!(cell.bg, tailwind::INDIGO.c600);

        let mut buf = Buffer::empty(area);
        ChipRow::new(&chips, None, true).render(area, &mut buf);
        let cell = &buf[(1, 0)];
        assert!(!cell.modifier.contains(Modifier::REVERSED));
        assert_eq!(cell.bg, tailwind::RED.c600);
    }

    #[test]
    fn accent_replaces_the_default_background() {
        let chips = chips(&["AI"]);
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        ChipRow::new(&chips, None, false)
            .accent(Some(Color::Cyan))
            .render(area, &mut buf);
        assert_eq!(buf[(1, 0)].bg, Color::Cyan);
    }
}
