#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use perch_core::geometry::{Rect, Size, Viewport};
use perch_layout::{
    Horizontal, NamedPoints, Origin, PlacementOptions, Vertical, compute, primary_position,
};

#[derive(Debug, Arbitrary)]
struct Input {
    anchor: (i16, i16, u16, u16),
    panel: (u16, u16),
    viewport: (u16, u16),
    anchor_origin: (u8, u8),
    target_origin: (u8, u8),
    auto_position: bool,
}

fn origin((v, h): (u8, u8)) -> Origin {
    let vertical = [Vertical::Top, Vertical::Center, Vertical::Bottom][usize::from(v % 3)];
    let horizontal = [Horizontal::Left, Horizontal::Middle, Horizontal::Right][usize::from(h % 3)];
    Origin::new(vertical, horizontal)
}

fuzz_target!(|input: Input| {
    let (x, y, w, h) = input.anchor;
    let anchor = NamedPoints::page(&Rect::new(
        f64::from(x),
        f64::from(y),
        f64::from(w),
        f64::from(h),
    ));
    let target = NamedPoints::local(Size::new(
        f64::from(input.panel.0),
        f64::from(input.panel.1),
    ));
    let viewport = Viewport::new(f64::from(input.viewport.0), f64::from(input.viewport.1));
    let options = PlacementOptions {
        anchor_origin: origin(input.anchor_origin),
        target_origin: origin(input.target_origin),
        auto_position: input.auto_position,
        ..PlacementOptions::default()
    };

    let placement = compute(&anchor, &target, viewport, &options);

    // Top-left corner is always on the page.
    assert!(placement.top >= 0.0 && placement.top.is_finite());
    assert!(placement.left >= 0.0 && placement.left.is_finite());
    assert_eq!(placement.max_height, viewport.height);

    // Same geometry, same answer.
    assert_eq!(placement, compute(&anchor, &target, viewport, &options));

    // A primary position that already fits is never moved.
    let primary = primary_position(&anchor, &target, options.anchor_origin, options.target_origin);
    let fits = primary.top >= 0.0
        && primary.left >= 0.0
        && primary.top + target.bottom <= viewport.height
        && primary.left + target.right <= viewport.width;
    if fits {
        assert_eq!((placement.top, placement.left), (primary.top, primary.left));
    }
});
