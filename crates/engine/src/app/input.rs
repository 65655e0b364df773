use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerMoved(Point),
    PointerPressed { button: MouseButton, position: Point },
    PointerReleased { button: MouseButton, position: Point },
    KeyPressed(Key),
    TextEntered(char),
    QuitRequested,
}

impl InputEvent {
    pub fn is_primary_release(&self) -> Option<Point> {
        match *self {
            InputEvent::PointerReleased {
                button: MouseButton::Primary,
                position,
            } => Some(position),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    pub position: Option<Point>,
    pub primary_down: bool,
}

impl PointerState {
    pub fn at(position: Point) -> Self {
        Self {
            position: Some(position),
            primary_down: false,
        }
    }

    pub fn with_primary_down(mut self, primary_down: bool) -> Self {
        self.primary_down = primary_down;
        self
    }
}
