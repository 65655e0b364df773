use std::collections::VecDeque;
use std::f32::consts::TAU;

use engine::{
    rgb, with_alpha, AssetStore, Canvas, FontSize, InputEvent, Key, Point, PointerState, Rect,
};
use tracing::debug;

use super::{tail_chars, truncate_chars, Widget};
use crate::app::config::{palette, ASSISTANT_SPRITE};

const CHAT_CAPACITY: usize = 5;
const VISIBLE_MESSAGES: usize = 3;
const MESSAGE_CHARS: usize = 50;
const INPUT_VISIBLE_CHARS: usize = 30;
const MESSAGE_STEP: i32 = 25;
const CARET_BLINK_SPEED: f32 = 6.0;
const INPUT_PLACEHOLDER: &str = "Type your question here...";
const ASSISTANT_LABEL: &str = "Ask CinthIA!";
pub(crate) const CANNED_REPLY: &str = "Good question! Let me help you with that...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChatMessage {
    pub(crate) text: String,
    pub(crate) from_assistant: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ChatBox {
    rect: Rect,
    input_rect: Rect,
    messages: VecDeque<ChatMessage>,
    input: String,
    active: bool,
    caret_phase: f32,
}

impl ChatBox {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            rect,
            input_rect: Rect::new(rect.x + 10, rect.bottom() - 40, rect.width - 100, 30),
            messages: VecDeque::with_capacity(CHAT_CAPACITY + 1),
            input: String::new(),
            active: false,
            caret_phase: 0.0,
        }
    }

    /// Keeps the newest five messages.
    pub(crate) fn add_message(&mut self, text: impl Into<String>, from_assistant: bool) {
        self.messages.push_back(ChatMessage {
            text: text.into(),
            from_assistant,
        });
        while self.messages.len() > CHAT_CAPACITY {
            self.messages.pop_front();
        }
    }

    #[cfg(test)]
    pub(crate) fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    #[cfg(test)]
    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(test)]
    pub(crate) fn input_rect(&self) -> Rect {
        self.input_rect
    }

    /// Handles focus and typing. Enter commits a non-empty input and queues the canned reply.
    pub(crate) fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerPressed { position, .. } => {
                self.active = self.input_rect.contains(position);
            }
            InputEvent::KeyPressed(Key::Enter) if self.active => self.submit(),
            InputEvent::KeyPressed(Key::Backspace) if self.active => {
                self.input.pop();
            }
            InputEvent::TextEntered(ch) if self.active && !ch.is_control() => {
                self.input.push(ch);
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        if self.input.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        debug!(chars = text.chars().count(), "chat_submitted");
        self.add_message(text, false);
        self.add_message(CANNED_REPLY, true);
    }
}

impl Widget for ChatBox {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, _pointer: PointerState, dt_seconds: f32) {
        self.caret_phase = (self.caret_phase + dt_seconds * CARET_BLINK_SPEED).rem_euclid(TAU);
    }

    fn draw(&self, canvas: &mut Canvas, assets: &AssetStore) {
        canvas.fill_rounded_rect(self.rect, 10, with_alpha(rgb(40, 40, 50), 230));
        canvas.stroke_rounded_rect(self.rect, 10, palette::GOLD, 2);

        let font = assets.font_for(FontSize::Small);
        let skip = self.messages.len().saturating_sub(VISIBLE_MESSAGES);
        for (row, message) in self.messages.iter().skip(skip).enumerate() {
            let color = if message.from_assistant {
                palette::CYAN
            } else {
                palette::WHITE
            };
            canvas.draw_text(
                font,
                truncate_chars(&message.text, MESSAGE_CHARS),
                Point::new(self.rect.x + 10, self.rect.y + 10 + row as i32 * MESSAGE_STEP),
                color,
            );
        }

        let border = if self.active {
            palette::WHITE
        } else {
            rgb(100, 100, 100)
        };
        canvas.fill_rounded_rect(self.input_rect, 5, rgb(60, 60, 70));
        canvas.stroke_rounded_rect(self.input_rect, 5, border, 1);
        let text_origin = self.input_rect.top_left().offset(5, 10);
        if self.input.is_empty() {
            canvas.draw_text(font, INPUT_PLACEHOLDER, text_origin, rgb(150, 150, 150));
        } else {
            canvas.draw_text(
                font,
                tail_chars(&self.input, INPUT_VISIBLE_CHARS),
                text_origin,
                palette::WHITE,
            );
        }
        if self.active && self.caret_phase.sin() >= 0.0 {
            let (width, height) = font.measure(tail_chars(&self.input, INPUT_VISIBLE_CHARS));
            canvas.fill_rect(
                Rect::new(
                    text_origin.x + width as i32 + 2,
                    text_origin.y,
                    2,
                    height as i32,
                ),
                palette::WHITE,
            );
        }

        if let Some(portrait) = assets.image(&ASSISTANT_SPRITE) {
            canvas.draw_image_scaled(
                portrait,
                Rect::new(self.rect.right() - 65, self.rect.bottom() - 75, 60, 60),
            );
        }
        let (label_width, label_height) = font.measure(ASSISTANT_LABEL);
        canvas.draw_text(
            font,
            ASSISTANT_LABEL,
            Point::new(
                self.rect.right() - label_width as i32 - 8,
                self.rect.bottom() - label_height as i32 - 4,
            ),
            palette::GOLD,
        );
    }
}
