//! Demo page tree shipped with the simulator.
//!
//! Build failures are logged by the engine and the affected step is skipped,
//! so smaller profiles still get every page their grid can hold.

use pagedeck::{
    config::AppConfig, Action, DeviceCapability, ItemState, PageId, PageTree, StateSet,
};
use serde_json::json;

use crate::actions::{shell_action, RunMode};

const BRIGHTNESS_STEPS: [u8; 4] = [25, 50, 75, 100];

fn states(pairs: &[(&str, &str)]) -> StateSet {
    pairs
        .iter()
        .map(|(icon, label)| ItemState::new(*icon, *label))
        .collect()
}

pub(crate) fn build_demo_tree(config: &AppConfig, capability: DeviceCapability) -> PageTree {
    let mut tree = PageTree::new("Main", capability).with_back_icon(config.back_icon.as_str());
    let root = tree.root();

    if let Some(main) = tree.page_mut(root) {
        let _ = main.create_button(
            (0, 0),
            states(&[("Icons/console.svg", "Terminal")]),
            Some(shell_action("open_terminal", "gnome-terminal", json!(null), RunMode::Spawn)),
        );
    }

    let _content = tree
        .create_child(root, "Content", "Icons/movie-open-outline.svg", (0, 3))
        .ok();
    let Ok(settings) = tree.create_child(root, "Settings", "Icons/cog.svg", (1, 3)) else {
        return tree;
    };

    if let Ok(sound) = tree.create_child(settings, "Sound", "Icons/speaker-multiple.svg", (0, 3)) {
        build_sound_page(&mut tree, sound, config.dial_scale);
    }
    if let Ok(video) = tree.create_child(settings, "Video", "Icons/camera.svg", (1, 3)) {
        if let Some(page) = tree.page_mut(video) {
            let _ = page.create_button(
                (0, 1),
                states(&[("Icons/record-rec.svg", "OBS")]),
                Some(shell_action("open_obs", "obs --start", json!(null), RunMode::Spawn)),
            );
        }
    }
    if let Ok(display) = tree.create_child(settings, "Display", "Icons/monitor.svg", (1, 2)) {
        build_display_page(&mut tree, display);
    }
    tree
}

fn build_sound_page(tree: &mut PageTree, sound: PageId, dial_scale: u32) {
    let Some(page) = tree.page_mut(sound) else {
        return;
    };
    let _ = page.create_button(
        (0, 3),
        states(&[
            ("Icons/volume-high.svg", "Mute"),
            ("Icons/volume-mute.svg", "Unmute"),
        ]),
        Some(shell_action(
            "toggle_mic",
            "pactl set-source-mute @DEFAULT_SOURCE@ toggle",
            json!(null),
            RunMode::Wait,
        )),
    );
    if let Ok(dial) = page.create_dial(
        1,
        states(&[
            ("Icons/volume-minus.svg", "Volume down"),
            ("Icons/volume-medium.svg", "Volume"),
            ("Icons/volume-plus.svg", "Volume up"),
        ]),
        Some(shell_action(
            "control_volume",
            "pactl set-sink-volume {sink} {sign}{amount}%",
            json!({"sink": "@DEFAULT_SINK@"}),
            RunMode::Wait,
        )),
    ) {
        dial.set_scale(dial_scale);
    }
}

fn build_display_page(tree: &mut PageTree, display: PageId) {
    let Some(page) = tree.page_mut(display) else {
        return;
    };
    if page
        .create_composite_dial(0, states(&[("Icons/brightness-6.svg", "Brightness")]))
        .is_err()
    {
        return;
    }
    for (index, percent) in BRIGHTNESS_STEPS.into_iter().enumerate() {
        let icon = format!("Icons/brightness-{percent}.svg");
        let _ = page.add_touch_zone(
            index,
            StateSet::from(vec![ItemState::new(icon, format!("{percent}%"))]),
            Some(Action::Brightness(percent)),
        );
    }
}
