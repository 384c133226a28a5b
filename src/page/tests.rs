use super::*;
use crate::action::{Invocation, ManagerRequest};
use crate::event::Direction;
use crate::item::{ItemState, StateSet};
use crate::test_support::{call_log, FakeRasterizer, RecordingSurface};

fn one_state(label: &str) -> StateSet {
    StateSet::from(vec![ItemState::new(format!("Icons/{label}.svg"), label)])
}

#[test]
fn create_child_wires_forward_and_back_buttons() {
    let mut tree = PageTree::new("Main", DeviceCapability::stream_deck_plus());
    let settings = tree
        .create_child(tree.root(), "Settings", "Icons/settings.svg", (1, 3))
        .expect("settings");

    let main = tree.page(tree.root()).expect("main");
    let forward = main.button(GridPos::new(1, 3)).expect("forward button");
    assert_eq!(forward.current_label(), Some("Settings"));
    assert_eq!(
        forward.core().action().and_then(Action::navigation_target),
        Some(settings)
    );
    assert_eq!(main.children(), &[settings]);

    let page = tree.page(settings).expect("settings page");
    assert_eq!(page.parent(), Some(tree.root()));
    let back = page.button(GridPos::new(0, 0)).expect("back button");
    assert_eq!(back.current_label(), Some("Back"));
    assert_eq!(
        back.current_icon().map(|icon| icon.as_str()),
        Some(DEFAULT_BACK_ICON)
    );
    assert_eq!(
        back.core().action().and_then(Action::navigation_target),
        Some(tree.root())
    );
}

#[test]
fn create_child_out_of_bounds_leaves_tree_unchanged() {
    let mut tree = PageTree::new("Main", DeviceCapability::stream_deck_plus());
    let err = tree
        .create_child(tree.root(), "Far", "Icons/far.svg", (5, 0))
        .expect_err("out of bounds");

    assert!(matches!(err, ConfigError::OutOfBounds { row: 5, col: 0, .. }));
    assert_eq!(tree.len(), 1);
    let main = tree.page(tree.root()).expect("main");
    assert!(main.children().is_empty());
    assert_eq!(main.buttons().count(), 0);
}

#[test]
fn create_child_on_occupied_slot_fails() {
    let mut tree = PageTree::new("Main", DeviceCapability::stream_deck_plus());
    tree.create_child(tree.root(), "A", "Icons/a.svg", (0, 3))
        .expect("first");
    let err = tree
        .create_child(tree.root(), "B", "Icons/b.svg", (0, 3))
        .expect_err("occupied");

    assert!(matches!(err, ConfigError::SlotOccupied(_)));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.find("B"), None);
}

#[test]
fn create_child_of_unknown_parent_fails() {
    let mut tree = PageTree::new("Main", DeviceCapability::stream_deck_plus());
    let mut scratch = PageTree::new("Other", DeviceCapability::stream_deck_plus());
    let ghost = scratch
        .create_child(scratch.root(), "Ghost", "Icons/g.svg", (0, 1))
        .expect("ghost");

    let err = tree
        .create_child(ghost, "Child", "Icons/c.svg", (0, 1))
        .expect_err("unknown parent");
    assert_eq!(err, ConfigError::UnknownPage(ghost));
}

#[test]
fn custom_back_icon_is_used_for_new_children() {
    let mut tree = PageTree::new("Main", DeviceCapability::stream_deck_plus())
        .with_back_icon("Icons/home.svg");
    let child = tree
        .create_child(tree.root(), "Child", "Icons/c.svg", (0, 1))
        .expect("child");
    let back = tree
        .page(child)
        .and_then(|page| page.button(GridPos::new(0, 0)))
        .expect("back");
    assert_eq!(back.current_icon().map(|icon| icon.as_str()), Some("Icons/home.svg"));
}

#[test]
fn breadcrumb_lists_names_from_root() {
    let mut tree = PageTree::new("Main", DeviceCapability::stream_deck_plus());
    let settings = tree
        .create_child(tree.root(), "Settings", "Icons/s.svg", (1, 3))
        .expect("settings");
    let sound = tree
        .create_child(settings, "Sound", "Icons/v.svg", (0, 3))
        .expect("sound");
    assert_eq!(tree.breadcrumb(sound), vec!["Main", "Settings", "Sound"]);
    assert_eq!(tree.find("Sound"), Some(sound));
}

#[test]
fn dial_slots_reject_out_of_range_and_duplicates() {
    let mut page = Page::new(
        PageId::detached(0),
        "Main".into(),
        None,
        DeviceCapability::stream_deck_plus(),
    );
    assert!(matches!(
        page.create_dial(4, StateSet::new(), None),
        Err(ConfigError::DialOutOfRange { index: 4, count: 4 })
    ));
    page.create_dial(1, StateSet::new(), None).expect("dial");
    assert!(matches!(
        page.create_dial(1, StateSet::new(), None),
        Err(ConfigError::SlotOccupied(_))
    ));
    assert!(matches!(
        page.create_composite_dial(1, StateSet::new()),
        Err(ConfigError::SlotOccupied(_))
    ));
}

#[test]
fn only_one_composite_dial_per_page() {
    let mut page = Page::new(
        PageId::detached(0),
        "Display".into(),
        None,
        DeviceCapability::stream_deck_plus(),
    );
    page.create_composite_dial(0, StateSet::new())
        .expect("composite");
    assert!(page.strip().is_some());
    assert!(matches!(
        page.create_composite_dial(2, StateSet::new()),
        Err(ConfigError::StripAlreadyBound)
    ));
    assert!(page.dial(2).is_none());
}

#[test]
fn strip_needs_a_device_with_one() {
    let mut page = Page::new(
        PageId::detached(0),
        "Main".into(),
        None,
        DeviceCapability::stream_deck_mk2(),
    );
    assert!(matches!(page.touch_strip(), Err(ConfigError::NoStrip)));
    assert!(matches!(
        page.add_touch_zone(0, StateSet::new(), None),
        Err(ConfigError::NoStrip)
    ));
    assert!(page.create_dial(0, StateSet::new(), None).is_err());
}

#[test]
fn events_for_empty_slots_are_dropped() {
    let cap = DeviceCapability::stream_deck_plus();
    let mut surface = RecordingSurface::default();
    let raster = FakeRasterizer;
    let mut page = Page::new(PageId::detached(0), "Main".into(), None, cap);

    let mut ctx = ItemContext::new(&mut surface, &raster, &cap);
    let events = [
        LogicalEvent::ButtonPress { row: 0, col: 0 },
        LogicalEvent::ButtonPress { row: 9, col: 9 },
        LogicalEvent::DialPress(3),
        LogicalEvent::DialRotate {
            index: 7,
            direction: Direction::Left,
            magnitude: 1,
        },
        LogicalEvent::LedTap { x: 10, y: 10 },
        LogicalEvent::LedSwipe(Direction::Right),
    ];
    for event in events {
        page.handle_input(event, &mut ctx).expect("dropped quietly");
    }
    assert!(ctx.take_requests().is_empty());
    drop(ctx);
    assert!(surface.calls.is_empty());
}

#[test]
fn button_press_routes_to_the_addressed_button() {
    let cap = DeviceCapability::stream_deck_plus();
    let mut surface = RecordingSurface::default();
    let raster = FakeRasterizer;
    let mut page = Page::new(PageId::detached(0), "Main".into(), None, cap);
    page.create_button((1, 1), one_state("mute"), Some(Action::Brightness(75)))
        .expect("button");

    let mut ctx = ItemContext::new(&mut surface, &raster, &cap);
    page.handle_input(LogicalEvent::ButtonPress { row: 1, col: 1 }, &mut ctx)
        .expect("press");
    assert_eq!(ctx.take_requests(), vec![ManagerRequest::SetBrightness(75)]);
}

#[test]
fn plain_dial_rotation_reaches_rotation_action() {
    let cap = DeviceCapability::stream_deck_plus();
    let mut surface = RecordingSurface::default();
    let raster = FakeRasterizer;
    let log = call_log();
    let mut page = Page::new(PageId::detached(0), "Sound".into(), None, cap);
    let sink = log.clone();
    page.create_dial(
        1,
        one_state("volume"),
        Some(Action::from_fn("volume", move |invocation| {
            sink.borrow_mut().push(*invocation);
            Ok(())
        })),
    )
    .expect("dial");

    let mut ctx = ItemContext::new(&mut surface, &raster, &cap);
    page.handle_input(
        LogicalEvent::DialRotate {
            index: 1,
            direction: Direction::Right,
            magnitude: 2,
        },
        &mut ctx,
    )
    .expect("rotate");
    assert_eq!(
        *log.borrow(),
        vec![Invocation::Rotate {
            direction: Direction::Right,
            amount: 10,
        }]
    );
}

#[test]
fn strip_events_go_through_bound_composite_dial() {
    let cap = DeviceCapability::stream_deck_plus();
    let mut surface = RecordingSurface::default();
    let raster = FakeRasterizer;
    let mut page = Page::new(PageId::detached(0), "Display".into(), None, cap);
    page.create_composite_dial(0, one_state("brightness"))
        .expect("composite");
    for (index, percent) in [25u8, 50, 75, 100].into_iter().enumerate() {
        page.add_touch_zone(
            index,
            one_state(&percent.to_string()),
            Some(Action::Brightness(percent)),
        )
        .expect("zone");
    }

    let mut ctx = ItemContext::new(&mut surface, &raster, &cap);
    page.handle_input(LogicalEvent::LedTap { x: 610, y: 50 }, &mut ctx)
        .expect("tap");
    assert_eq!(ctx.take_requests(), vec![ManagerRequest::SetBrightness(100)]);

    page.handle_input(
        LogicalEvent::DialRotate {
            index: 0,
            direction: Direction::Right,
            magnitude: 2,
        },
        &mut ctx,
    )
    .expect("rotate");
    assert_eq!(page.composite().map(CompositeDial::current_screen), Some(2));
}
