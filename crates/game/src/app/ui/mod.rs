use engine::{AssetStore, BitmapFont, Canvas, InputEvent, Point, PointerState, Rect};

mod button;
mod chat_box;
mod code_editor;
mod health_bar;
mod module_card;
mod village_area;

pub(crate) use button::Button;
#[cfg(test)]
pub(crate) use chat_box::CANNED_REPLY;
pub(crate) use chat_box::ChatBox;
pub(crate) use code_editor::CodeEditor;
pub(crate) use health_bar::HealthBar;
pub(crate) use module_card::ModuleCard;
pub(crate) use village_area::VillageArea;

/// Interactive screen element owned by exactly one scene.
pub(crate) trait Widget {
    fn bounds(&self) -> Rect;

    fn enabled(&self) -> bool {
        true
    }

    fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// A primary release inside the bounds of an enabled widget.
    fn is_clicked(&self, event: &InputEvent) -> bool {
        self.enabled()
            && event
                .is_primary_release()
                .is_some_and(|position| self.hit_test(position))
    }

    fn update(&mut self, pointer: PointerState, dt_seconds: f32);

    fn draw(&self, canvas: &mut Canvas, assets: &AssetStore);
}

/// Derived from the latest pointer snapshot only; nothing carries over between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct HoverState {
    pub(crate) hovered: bool,
    pub(crate) pressed: bool,
}

impl HoverState {
    pub(crate) fn from_pointer(bounds: Rect, enabled: bool, pointer: PointerState) -> Self {
        let hovered = enabled
            && pointer
                .position
                .is_some_and(|position| bounds.contains(position));
        Self {
            hovered,
            pressed: hovered && pointer.primary_down,
        }
    }
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

pub(crate) fn tail_chars(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    match text.char_indices().nth(count - max_chars) {
        Some((index, _)) => &text[index..],
        None => text,
    }
}

/// Greedy word wrap; a single word wider than `max_width` gets its own line.
pub(crate) fn wrap_words(font: BitmapFont, text: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.measure(&candidate).0 <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
