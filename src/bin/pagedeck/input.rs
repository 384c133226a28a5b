//! Input thread: crossterm key and mouse events mapped onto raw device events.

use crossbeam_channel::Sender;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use pagedeck::{RawEvent, TouchEvent};
use std::thread;
use std::time::{Duration, Instant};

use crate::terminal_surface::StripGeometry;

/// Holding the strip at least this long is a long press.
pub(crate) const LONG_PRESS_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Raw(RawEvent),
    Redraw,
    Exit,
}

/// Left-button contact on the strip, tracked from press to release.
#[derive(Debug, Clone, Copy)]
struct Contact {
    x: u32,
    y: u32,
    x_out: u32,
    y_out: u32,
    moved: bool,
    started: Instant,
}

/// Turns terminal events into [`InputEvent`]s. Owns the in-flight strip contact.
#[derive(Debug)]
pub(crate) struct InputMapper {
    strip: StripGeometry,
    contact: Option<Contact>,
}

impl InputMapper {
    pub(crate) fn new(strip: StripGeometry) -> Self {
        Self {
            strip,
            contact: None,
        }
    }

    pub(crate) fn map(&mut self, event: Event, now: Instant) -> Option<InputEvent> {
        match event {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse, now).map(InputEvent::Raw),
            Event::Resize(_, _) => Some(InputEvent::Redraw),
            _ => None,
        }
    }

    fn map_mouse(&mut self, mouse: MouseEvent, now: Instant) -> Option<RawEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.strip.contains(mouse.column, mouse.row) {
                    return None;
                }
                let (x, y) = self.strip.to_pixels(mouse.column, mouse.row);
                self.contact = Some(Contact {
                    x,
                    y,
                    x_out: x,
                    y_out: y,
                    moved: false,
                    started: now,
                });
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (x_out, y_out) = self.strip.to_pixels(mouse.column, mouse.row);
                if let Some(contact) = self.contact.as_mut() {
                    contact.moved |= (x_out, y_out) != (contact.x, contact.y);
                    contact.x_out = x_out;
                    contact.y_out = y_out;
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let contact = self.contact.take()?;
                let held = now.saturating_duration_since(contact.started);
                let touch = if contact.moved {
                    TouchEvent::Drag {
                        x: contact.x,
                        y: contact.y,
                        x_out: contact.x_out,
                        y_out: contact.y_out,
                    }
                } else if held >= Duration::from_millis(LONG_PRESS_MS) {
                    TouchEvent::Long {
                        x: contact.x,
                        y: contact.y,
                    }
                } else {
                    TouchEvent::Short {
                        x: contact.x,
                        y: contact.y,
                    }
                };
                Some(RawEvent::Touch(touch))
            }
            _ => None,
        }
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Exit);
    }
    let raw = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(InputEvent::Exit),
        KeyCode::Char(ch @ '1'..='9') => RawEvent::Key {
            index: ch as usize - '1' as usize,
            pressed: true,
        },
        KeyCode::Char('0') => RawEvent::Key {
            index: 9,
            pressed: true,
        },
        KeyCode::Char(ch) => {
            if let Some(index) = "asdf".find(ch) {
                RawEvent::DialPush {
                    index,
                    pressed: true,
                }
            } else if let Some(index) = "zxcv".find(ch) {
                RawEvent::DialTurn { index, steps: -1 }
            } else if let Some(index) = "ZXCV".find(ch) {
                RawEvent::DialTurn { index, steps: 1 }
            } else {
                return None;
            }
        }
        _ => return None,
    };
    Some(InputEvent::Raw(raw))
}

pub(crate) fn spawn_input_thread(
    tx: Sender<InputEvent>,
    strip: StripGeometry,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut mapper = InputMapper::new(strip);
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(err) => {
                    tracing::debug!(error = %err, "terminal read error");
                    let _ = tx.send(InputEvent::Exit);
                    break;
                }
            };
            let Some(mapped) = mapper.map(event, Instant::now()) else {
                continue;
            };
            let exit = mapped == InputEvent::Exit;
            if tx.send(mapped).is_err() || exit {
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagedeck::Size;

    fn geometry() -> StripGeometry {
        StripGeometry {
            left: 0,
            top: 10,
            cols: 80,
            rows: 2,
            pixels: Size::new(800, 100),
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn digit_keys_map_to_key_indices() {
        let mut mapper = InputMapper::new(geometry());
        let now = Instant::now();
        assert_eq!(
            mapper.map(key(KeyCode::Char('1')), now),
            Some(InputEvent::Raw(RawEvent::Key {
                index: 0,
                pressed: true
            }))
        );
        assert_eq!(
            mapper.map(key(KeyCode::Char('0')), now),
            Some(InputEvent::Raw(RawEvent::Key {
                index: 9,
                pressed: true
            }))
        );
    }

    #[test]
    fn dial_keys_press_and_turn() {
        let mut mapper = InputMapper::new(geometry());
        let now = Instant::now();
        assert_eq!(
            mapper.map(key(KeyCode::Char('s')), now),
            Some(InputEvent::Raw(RawEvent::DialPush {
                index: 1,
                pressed: true
            }))
        );
        assert_eq!(
            mapper.map(key(KeyCode::Char('c')), now),
            Some(InputEvent::Raw(RawEvent::DialTurn { index: 2, steps: -1 }))
        );
        assert_eq!(
            mapper.map(key(KeyCode::Char('V')), now),
            Some(InputEvent::Raw(RawEvent::DialTurn { index: 3, steps: 1 }))
        );
    }

    #[test]
    fn quit_keys_exit() {
        let mut mapper = InputMapper::new(geometry());
        let now = Instant::now();
        assert_eq!(mapper.map(key(KeyCode::Esc), now), Some(InputEvent::Exit));
        assert_eq!(mapper.map(key(KeyCode::Char('q')), now), Some(InputEvent::Exit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(mapper.map(ctrl_c, now), Some(InputEvent::Exit));
    }

    #[test]
    fn quick_click_on_strip_is_short_touch() {
        let mut mapper = InputMapper::new(geometry());
        let start = Instant::now();
        assert_eq!(
            mapper.map(mouse(MouseEventKind::Down(MouseButton::Left), 25, 10), start),
            None
        );
        assert_eq!(
            mapper.map(
                mouse(MouseEventKind::Up(MouseButton::Left), 25, 10),
                start + Duration::from_millis(50)
            ),
            Some(InputEvent::Raw(RawEvent::Touch(TouchEvent::Short {
                x: 250,
                y: 0
            })))
        );
    }

    #[test]
    fn held_click_is_long_press() {
        let mut mapper = InputMapper::new(geometry());
        let start = Instant::now();
        mapper.map(mouse(MouseEventKind::Down(MouseButton::Left), 5, 11), start);
        assert_eq!(
            mapper.map(
                mouse(MouseEventKind::Up(MouseButton::Left), 5, 11),
                start + Duration::from_millis(LONG_PRESS_MS)
            ),
            Some(InputEvent::Raw(RawEvent::Touch(TouchEvent::Long {
                x: 50,
                y: 50
            })))
        );
    }

    #[test]
    fn move_while_held_is_drag() {
        let mut mapper = InputMapper::new(geometry());
        let start = Instant::now();
        mapper.map(mouse(MouseEventKind::Down(MouseButton::Left), 60, 10), start);
        mapper.map(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 10), start);
        assert_eq!(
            mapper.map(mouse(MouseEventKind::Up(MouseButton::Left), 10, 10), start),
            Some(InputEvent::Raw(RawEvent::Touch(TouchEvent::Drag {
                x: 600,
                y: 0,
                x_out: 100,
                y_out: 0
            })))
        );
    }

    #[test]
    fn clicks_outside_strip_are_ignored() {
        let mut mapper = InputMapper::new(geometry());
        let now = Instant::now();
        assert_eq!(
            mapper.map(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2), now),
            None
        );
        assert_eq!(
            mapper.map(mouse(MouseEventKind::Up(MouseButton::Left), 5, 2), now),
            None
        );
    }
}
