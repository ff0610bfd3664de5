// Turns polled window state into the pointer/touch events the reveal controller understands.
// minifb only tells us "where is the mouse" and "is the button down" each frame, so we diff
// consecutive samples. The left button stands in for a single finger: press = touch start,
// drag = touch move, release = touch end. Hover moves are swallowed while it is held.

use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter(Point),
    Move(Point),
    Leave,
    TouchStart(Point),
    TouchMove(Point),
    TouchEnd,
}

#[derive(Debug, Default)]
pub struct InputTracker {
    last_pos: Option<Point>,
    pressed: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's sample. `pos` is None when the mouse is outside the window.
    pub fn sample(&mut self, pos: Option<Point>, left_down: bool) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        match (self.last_pos, pos) {
            (None, Some(p)) => events.push(PointerEvent::Enter(p)),
            (Some(_), None) => {
                if self.pressed {
                    self.pressed = false;
                    events.push(PointerEvent::TouchEnd);
                }
                events.push(PointerEvent::Leave);
            }
            _ => {}
        }

        if let Some(p) = pos {
            let moved = self.last_pos.is_some_and(|last| last != p);
            match (self.pressed, left_down) {
                (false, true) => {
                    self.pressed = true;
                    events.push(PointerEvent::TouchStart(p));
                }
                (true, true) => {
                    if moved {
                        events.push(PointerEvent::TouchMove(p));
                    }
                }
                (true, false) => {
                    self.pressed = false;
                    events.push(PointerEvent::TouchEnd);
                    if moved {
                        events.push(PointerEvent::Move(p));
                    }
                }
                (false, false) => {
                    if moved {
                        events.push(PointerEvent::Move(p));
                    }
                }
            }
        }

        self.last_pos = pos;
        events
    }
}
