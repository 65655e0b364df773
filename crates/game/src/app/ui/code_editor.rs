use engine::{rgb, AssetStore, Canvas, Color, FontSize, Point, PointerState, Rect};

use super::{truncate_chars, Widget};
use crate::app::config::palette;

const TEXT_INSET: i32 = 15;
const FIRST_LINE_OFFSET: i32 = 10;
const LINE_STEP: i32 = 22;
const BOTTOM_MARGIN: i32 = 20;

const DECLARATION_MARKERS: [&str; 5] = ["class ", "void ", "private ", "public ", "def "];
const IMPORT_MARKERS: [&str; 3] = ["using ", "import ", "from "];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Comment,
    Declaration,
    Import,
    Plain,
}

impl LineKind {
    pub(crate) fn color(self) -> Color {
        match self {
            LineKind::Comment => palette::CODE_GREEN,
            LineKind::Declaration => palette::CODE_BLUE,
            LineKind::Import => palette::CODE_PURPLE,
            LineKind::Plain => palette::TEXT_LIGHT,
        }
    }
}

/// Cosmetic colouring by substring; comments win over keywords.
pub(crate) fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.starts_with("//") || trimmed.starts_with('#') {
        LineKind::Comment
    } else if DECLARATION_MARKERS.iter().any(|marker| line.contains(marker)) {
        LineKind::Declaration
    } else if IMPORT_MARKERS.iter().any(|marker| line.contains(marker)) {
        LineKind::Import
    } else {
        LineKind::Plain
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CodeEditor {
    rect: Rect,
    lines: Vec<String>,
}

impl CodeEditor {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            rect,
            lines: Vec::new(),
        }
    }

    pub(crate) fn set_code(&mut self, code: &str) {
        self.lines = code
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
    }

    #[cfg(test)]
    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rendering stops after the line that pushes the offset past the bottom margin.
    pub(crate) fn visible_line_count(&self) -> usize {
        let mut offset = FIRST_LINE_OFFSET;
        let mut count = 0;
        for _ in &self.lines {
            count += 1;
            offset += LINE_STEP;
            if offset > self.rect.height - BOTTOM_MARGIN {
                break;
            }
        }
        count
    }
}

impl Widget for CodeEditor {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, _pointer: PointerState, _dt_seconds: f32) {}

    fn draw(&self, canvas: &mut Canvas, assets: &AssetStore) {
        canvas.fill_rounded_rect(self.rect, 8, palette::CODE_BG);
        canvas.stroke_rounded_rect(self.rect, 8, rgb(60, 60, 60), 2);

        let font = assets.font_for(FontSize::Code);
        let max_chars = ((self.rect.width - 2 * TEXT_INSET).max(0) as u32 / font.advance()) as usize;
        for (index, line) in self.lines.iter().take(self.visible_line_count()).enumerate() {
            canvas.draw_text(
                font,
                truncate_chars(line, max_chars),
                Point::new(
                    self.rect.x + TEXT_INSET,
                    self.rect.y + FIRST_LINE_OFFSET + index as i32 * LINE_STEP,
                ),
                classify_line(line).color(),
            );
        }
    }
}
