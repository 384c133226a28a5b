use anyhow::Result;
use crossbeam_channel::{select, Receiver};
use pagedeck::{EventRouter, PageManager, Rasterizer, Surface};
use std::time::Duration;

use crate::input::InputEvent;

const EVENT_LOOP_IDLE_MS: u64 = 50;

/// Process input events one at a time until exit or a device failure.
///
/// Each event runs to completion (route, dispatch, render, actions,
/// navigation) before the next one is received.
pub(crate) fn run_event_loop<S: Surface, R: Rasterizer>(
    manager: &mut PageManager<S, R>,
    router: &EventRouter,
    input_rx: &Receiver<InputEvent>,
) -> Result<()> {
    let idle = Duration::from_millis(EVENT_LOOP_IDLE_MS);
    let mut running = true;
    while running {
        select! {
            recv(input_rx) -> event => {
                match event {
                    Ok(InputEvent::Raw(raw)) => {
                        if let Some(logical) = router.route(raw) {
                            tracing::debug!(?logical, "dispatching event");
                            manager.dispatch(logical)?;
                        }
                    }
                    Ok(InputEvent::Redraw) => manager.refresh()?,
                    Ok(InputEvent::Exit) | Err(_) => running = false,
                }
            }
            default(idle) => {}
        }
    }
    tracing::info!("event loop stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use pagedeck::{
        Bitmap, DeviceCapability, DeviceError, IconRef, ItemState, PageTree, RawEvent, Size,
        StateSet,
    };

    #[derive(Default)]
    struct NullSurface {
        clears: usize,
    }

    impl Surface for NullSurface {
        fn render_key(&mut self, _index: usize, _bitmap: &Bitmap) -> Result<(), DeviceError> {
            Ok(())
        }

        fn render_led_strip(&mut self, _bitmap: &Bitmap) -> Result<(), DeviceError> {
            Ok(())
        }

        fn clear_all(&mut self) -> Result<(), DeviceError> {
            self.clears += 1;
            Ok(())
        }

        fn set_brightness(&mut self, _percent: u8) -> Result<(), DeviceError> {
            Ok(())
        }
    }

    struct Solid;

    impl Rasterizer for Solid {
        fn rasterize(&self, _icon: &IconRef, size: Size) -> Option<Bitmap> {
            Some(Bitmap::filled(size, [1, 2, 3]))
        }
    }

    #[test]
    fn navigates_then_stops_on_exit() {
        let cap = DeviceCapability::stream_deck_plus();
        let mut tree = PageTree::new("Main", cap);
        let settings = tree
            .create_child(tree.root(), "Settings", "Icons/cog.svg", (1, 3))
            .unwrap();
        let mut manager = PageManager::new(tree, NullSurface::default(), Solid);
        let router = EventRouter::new(&cap);
        let (tx, rx) = bounded(8);
        tx.send(InputEvent::Raw(RawEvent::Key {
            index: 7,
            pressed: true,
        }))
        .unwrap();
        tx.send(InputEvent::Redraw).unwrap();
        tx.send(InputEvent::Exit).unwrap();

        run_event_loop(&mut manager, &router, &rx).unwrap();

        assert_eq!(manager.active(), settings);
        assert_eq!(manager.surface().clears, 2);
    }

    #[test]
    fn disconnected_input_ends_the_loop() {
        let cap = DeviceCapability::stream_deck_plus();
        let tree = PageTree::new("Main", cap);
        let mut manager = PageManager::new(tree, NullSurface::default(), Solid);
        let router = EventRouter::new(&cap);
        let (tx, rx) = bounded::<InputEvent>(1);
        drop(tx);
        assert!(run_event_loop(&mut manager, &router, &rx).is_ok());
    }

    /// Surface whose key writes fail, as an unplugged device would.
    #[derive(Default)]
    struct UnpluggedSurface {
        resets: usize,
        closes: usize,
    }

    impl Surface for UnpluggedSurface {
        fn render_key(&mut self, index: usize, _bitmap: &Bitmap) -> Result<(), DeviceError> {
            Err(DeviceError::new("render_key", format!("key {index} write failed")))
        }

        fn render_led_strip(&mut self, _bitmap: &Bitmap) -> Result<(), DeviceError> {
            Ok(())
        }

        fn clear_all(&mut self) -> Result<(), DeviceError> {
            Ok(())
        }

        fn set_brightness(&mut self, _percent: u8) -> Result<(), DeviceError> {
            Ok(())
        }

        fn reset(&mut self) -> Result<(), DeviceError> {
            self.resets += 1;
            Ok(())
        }

        fn close(&mut self) -> Result<(), DeviceError> {
            self.closes += 1;
            Ok(())
        }
    }

    fn lit(name: &str) -> ItemState {
        ItemState::new(format!("Icons/{name}.svg"), name)
    }

    #[test]
    fn device_failure_stops_the_loop_and_shutdown_releases_once() {
        let cap = DeviceCapability::stream_deck_plus();
        let mut tree = PageTree::new("Main", cap);
        let root = tree.root();
        tree.page_mut(root)
            .unwrap()
            .create_button((0, 1), StateSet::from(vec![lit("a"), lit("b")]), None)
            .unwrap();
        let mut manager = PageManager::new(tree, UnpluggedSurface::default(), Solid);
        let router = EventRouter::new(&cap);
        let (tx, rx) = bounded(8);
        tx.send(InputEvent::Raw(RawEvent::Key {
            index: 1,
            pressed: true,
        }))
        .unwrap();
        tx.send(InputEvent::Exit).unwrap();

        let err = run_event_loop(&mut manager, &router, &rx).unwrap_err();
        assert!(err.to_string().contains("render_key"));
        assert!(manager.shutdown().is_ok());
        assert!(manager.shutdown().is_ok());

        assert_eq!(manager.surface().resets, 1);
        assert_eq!(manager.surface().closes, 1);
    }
}
