//! Facade surface: prelude, config loading, and the top-level error type.

use std::error::Error as _;

use perch::prelude::*;
use perch_harness::MockHost;

#[test]
fn prelude_drives_a_popover() {
    let host: MockHost<&'static str> = MockHost::new(Viewport::new(1024.0, 768.0));
    let anchor = host.create_element(Rect::new(100.0, 200.0, 50.0, 20.0));

    let props = PopoverProps::new("menu")
        .anchor(anchor)
        .anchor_origin(Origin::new(Vertical::Bottom, Horizontal::Left))
        .animated(false)
        .open(true);
    let mut popover = Popover::new(host.clone(), props);
    let root = popover.root_id().unwrap();
    host.attach_root(root, Size::new(80.0, 40.0)).unwrap();

    let placement: Placement = popover.handle_mounted().unwrap().placement;
    assert_eq!((placement.top, placement.left), (220.0, 100.0));
}

#[test]
fn pure_engine_matches_host_bound_pass() {
    let anchor = perch::NamedPoints::page(&Rect::new(100.0, 200.0, 50.0, 20.0));
    let target = perch::NamedPoints::local(Size::new(80.0, 40.0));
    let placement = perch::compute(
        &anchor,
        &target,
        Viewport::new(1024.0, 768.0),
        &perch::PlacementOptions::default(),
    );
    assert_eq!((placement.top, placement.left), (220.0, 100.0));
    assert_eq!(placement.z_index, perch::DEFAULT_POPOVER_Z_INDEX);
}

#[cfg(feature = "config")]
#[test]
fn load_config_applies_to_props() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("popover.toml");
    std::fs::write(
        &path,
        "can_auto_position = false\n\n[target_origin]\nvertical = \"bottom\"\nhorizontal = \"right\"\n",
    )
    .unwrap();

    let config = perch::load_config(&path).unwrap();
    let props = PopoverProps::from_config(&config, ());
    assert!(!props.can_auto_position);
    assert_eq!(
        props.target_origin,
        Origin::new(Vertical::Bottom, Horizontal::Right)
    );
}

#[cfg(feature = "config")]
#[test]
fn invalid_config_surfaces_as_facade_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("popover.toml");
    std::fs::write(&path, "z_index = -5\n").unwrap();

    let err: Error = perch::load_config(&path).unwrap_err();
    assert!(err.to_string().starts_with("popover config: validation errors"));
    assert!(err.source().is_some());
}

#[cfg(feature = "config")]
#[test]
fn missing_config_file_is_io_error() {
    let err = perch::load_config("/definitely/not/here/popover.toml").unwrap_err();
    let Error::Config(inner) = err;
    assert!(matches!(inner, perch::PopoverConfigError::Io(_)));
}
