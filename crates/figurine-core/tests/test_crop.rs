mod common;

use approx::assert_relative_eq;

use common::{loaded_crop_state, CountingSurface, Lcg};
use figurine_core::config::CropConfig;
use figurine_core::consts::HANDLE_HIT_TOLERANCE;
use figurine_core::crop::{
    compute_fitted_box, init_crop, AspectPreset, CropController, CropEvent, CropHandle, CropRect,
    CropState, Cropper, FittedImageBox, HandleCursor,
};
use figurine_core::error::EditorError;
use figurine_core::geometry::{Point, Size};
use figurine_core::surface::ListenerKind;

fn square_fitted() -> FittedImageBox {
    FittedImageBox {
        width: 1000.0,
        height: 1000.0,
        left: 0.0,
        top: 0.0,
    }
}

fn base_rect() -> CropRect {
    CropRect::new(100.0, 100.0, 200.0, 100.0)
}

fn resize(handle: CropHandle, dx: f32, dy: f32) -> Option<CropRect> {
    CropController::default().resize(&base_rect(), handle, dx, dy, &square_fitted(), 2.0)
}

// ---------------------------------------------------------------------------
// Fitted box
// ---------------------------------------------------------------------------

#[test]
fn test_fitted_box_wide_image_letterboxes_vertically() {
    let fitted = compute_fitted_box(Size::new(500.0, 500.0), Size::new(1000.0, 500.0)).unwrap();
    assert_eq!(
        fitted,
        FittedImageBox {
            width: 500.0,
            height: 250.0,
            left: 0.0,
            top: 125.0
        }
    );
}

#[test]
fn test_fitted_box_tall_image_letterboxes_horizontally() {
    let fitted = compute_fitted_box(Size::new(500.0, 500.0), Size::new(500.0, 1000.0)).unwrap();
    assert_eq!(
        fitted,
        FittedImageBox {
            width: 250.0,
            height: 500.0,
            left: 125.0,
            top: 0.0
        }
    );
}

#[test]
fn test_fitted_box_matching_aspect_fills_container() {
    let fitted = compute_fitted_box(Size::new(800.0, 600.0), Size::new(400.0, 300.0)).unwrap();
    assert_eq!(fitted.size(), Size::new(800.0, 600.0));
    assert_eq!(fitted.origin(), Point::ZERO);
}

#[test]
fn test_fitted_box_rejects_empty_sizes() {
    assert!(compute_fitted_box(Size::new(0.0, 500.0), Size::new(100.0, 100.0)).is_none());
    assert!(compute_fitted_box(Size::new(500.0, 500.0), Size::new(100.0, 0.0)).is_none());
    assert!(compute_fitted_box(Size::new(f32::NAN, 500.0), Size::new(100.0, 100.0)).is_none());
}

// ---------------------------------------------------------------------------
// Default crop
// ---------------------------------------------------------------------------

#[test]
fn test_init_crop_square_on_wide_image() {
    let fitted = compute_fitted_box(Size::new(500.0, 500.0), Size::new(1000.0, 500.0)).unwrap();
    let rect = init_crop(&fitted, 1.0, 0.8);
    assert_eq!(rect, CropRect::new(150.0, 150.0, 200.0, 200.0));
}

#[test]
fn test_init_crop_wider_than_image_limits_by_width() {
    let fitted = compute_fitted_box(Size::new(500.0, 500.0), Size::new(1000.0, 500.0)).unwrap();
    let rect = init_crop(&fitted, 4.0, 0.8);
    assert_eq!(rect, CropRect::new(50.0, 200.0, 400.0, 100.0));
}

#[test]
fn test_loading_image_produces_default_crop() {
    let c = CropController::default();
    let state = loaded_crop_state(&c, Size::new(500.0, 500.0), Size::new(1000.0, 500.0), 1.0);
    assert_eq!(state.rect, Some(CropRect::new(150.0, 150.0, 200.0, 200.0)));
    assert!(state.rect.unwrap().is_within(&state.fitted.unwrap()));
}

#[test]
fn test_no_rect_until_both_sizes_known() {
    let c = CropController::default();
    let state = c.apply(
        &CropState::new(1.0),
        &CropEvent::ImageLoaded {
            natural: Size::new(640.0, 480.0),
        },
    );
    assert!(state.fitted.is_none());
    assert!(state.rect.is_none());
}

#[test]
fn test_container_resize_recomputes_fitted_and_crop() {
    let c = CropController::default();
    let state = loaded_crop_state(&c, Size::new(500.0, 500.0), Size::new(1000.0, 500.0), 1.0);
    let state = c.apply(&state, &CropEvent::ContainerResized(Size::new(1000.0, 1000.0)));
    assert_eq!(
        state.fitted,
        Some(FittedImageBox {
            width: 1000.0,
            height: 500.0,
            left: 0.0,
            top: 250.0
        })
    );
    assert_eq!(state.rect, Some(CropRect::new(300.0, 300.0, 400.0, 400.0)));
}

#[test]
fn test_aspect_change_recomputes_crop() {
    let c = CropController::default();
    let state = loaded_crop_state(&c, Size::new(500.0, 500.0), Size::new(1000.0, 500.0), 1.0);
    let state = c.apply(&state, &CropEvent::SetAspectRatio(4.0));
    assert_eq!(state.aspect_ratio, 4.0);
    assert_eq!(state.rect, Some(CropRect::new(50.0, 200.0, 400.0, 100.0)));
}

#[test]
fn test_invalid_aspect_is_ignored() {
    let c = CropController::default();
    let state = loaded_crop_state(&c, Size::new(500.0, 500.0), Size::new(1000.0, 500.0), 1.0);
    for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let next = c.apply(&state, &CropEvent::SetAspectRatio(bad));
        assert_eq!(next.aspect_ratio, 1.0);
        assert_eq!(next.rect, state.rect);
    }
}

#[test]
fn test_unload_drops_geometry_keeps_aspect() {
    let c = CropController::default();
    let state = loaded_crop_state(&c, Size::new(500.0, 500.0), Size::new(1000.0, 500.0), 0.75);
    let state = c.apply(&state, &CropEvent::Unload);
    assert!(state.rect.is_none());
    assert!(state.fitted.is_none());
    assert_eq!(state.aspect_ratio, 0.75);
}

#[test]
fn test_unusable_initial_aspect_falls_back_to_default() {
    for bad in [0.0, -2.0, f32::NAN, f32::INFINITY] {
        assert_eq!(CropState::new(bad).aspect_ratio, AspectPreset::default().ratio());
    }

    let c = CropController::default();
    let state = loaded_crop_state(&c, Size::new(500.0, 500.0), Size::new(1000.0, 500.0), 0.0);
    assert_eq!(state.rect, Some(CropRect::new(150.0, 150.0, 200.0, 200.0)));
}

#[test]
fn test_default_crop_grows_to_min_size_in_small_box() {
    let c = CropController::default();

    let state = loaded_crop_state(&c, Size::new(24.0, 24.0), Size::new(100.0, 100.0), 1.0);
    assert_eq!(state.rect, Some(CropRect::new(2.0, 2.0, 20.0, 20.0)));

    let state = loaded_crop_state(&c, Size::new(40.0, 40.0), Size::new(100.0, 100.0), 2.0);
    assert_eq!(state.rect, Some(CropRect::new(0.0, 10.0, 40.0, 20.0)));
}

#[test]
fn test_default_crop_fills_box_smaller_than_min_size() {
    let c = CropController::default();
    let state = loaded_crop_state(&c, Size::new(15.0, 15.0), Size::new(100.0, 100.0), 1.0);
    assert_eq!(state.rect, Some(CropRect::new(0.0, 0.0, 15.0, 15.0)));
}

// ---------------------------------------------------------------------------
// Resize rules per handle
// ---------------------------------------------------------------------------

#[test]
fn test_east_edge_grows_width_and_rederives_height() {
    assert_eq!(
        resize(CropHandle::E, 50.0, 0.0),
        Some(CropRect::new(100.0, 100.0, 250.0, 125.0))
    );
}

#[test]
fn test_east_edge_clamps_at_fitted_right() {
    let prev = CropRect::new(700.0, 100.0, 200.0, 100.0);
    let next =
        CropController::default().resize(&prev, CropHandle::E, 200.0, 0.0, &square_fitted(), 2.0);
    assert_eq!(next, Some(CropRect::new(700.0, 100.0, 300.0, 150.0)));
}

#[test]
fn test_west_edge_moves_left_side() {
    assert_eq!(
        resize(CropHandle::W, -50.0, 0.0),
        Some(CropRect::new(50.0, 100.0, 250.0, 125.0))
    );
}

#[test]
fn test_north_edge_derives_width_from_height() {
    assert_eq!(
        resize(CropHandle::N, 0.0, -20.0),
        Some(CropRect::new(100.0, 80.0, 240.0, 120.0))
    );
}

#[test]
fn test_south_edge_derives_width_from_height() {
    assert_eq!(
        resize(CropHandle::S, 0.0, 20.0),
        Some(CropRect::new(100.0, 100.0, 240.0, 120.0))
    );
}

#[test]
fn test_southeast_corner_follows_width() {
    assert_eq!(
        resize(CropHandle::Se, 40.0, 5.0),
        Some(CropRect::new(100.0, 100.0, 240.0, 120.0))
    );
}

#[test]
fn test_northwest_corner_anchors_bottom_right() {
    let next = resize(CropHandle::Nw, -40.0, -10.0).unwrap();
    assert_eq!(next, CropRect::new(60.0, 80.0, 240.0, 120.0));
    assert_eq!(next.right(), base_rect().right());
    assert_eq!(next.bottom(), base_rect().bottom());
}

#[test]
fn test_northeast_corner_anchors_bottom() {
    let next = resize(CropHandle::Ne, 40.0, 0.0).unwrap();
    assert_eq!(next, CropRect::new(100.0, 80.0, 240.0, 120.0));
    assert_eq!(next.bottom(), base_rect().bottom());
}

#[test]
fn test_southwest_corner_anchors_right() {
    let next = resize(CropHandle::Sw, -40.0, 0.0).unwrap();
    assert_eq!(next, CropRect::new(60.0, 100.0, 240.0, 120.0));
    assert_eq!(next.right(), base_rect().right());
}

#[test]
fn test_move_translates_without_resizing() {
    assert_eq!(
        resize(CropHandle::Move, 30.0, -20.0),
        Some(CropRect::new(130.0, 80.0, 200.0, 100.0))
    );
}

#[test]
fn test_move_clamps_at_fitted_left() {
    let prev = CropRect::new(10.0, 100.0, 200.0, 100.0);
    let next =
        CropController::default().resize(&prev, CropHandle::Move, -50.0, 0.0, &square_fitted(), 2.0);
    assert_eq!(next, Some(CropRect::new(0.0, 100.0, 200.0, 100.0)));
}

#[test]
fn test_move_past_right_edge_trims_to_fit() {
    let prev = CropRect::new(750.0, 100.0, 200.0, 100.0);
    let next =
        CropController::default().resize(&prev, CropHandle::Move, 100.0, 0.0, &square_fitted(), 2.0);
    assert_eq!(next, Some(CropRect::new(850.0, 100.0, 150.0, 75.0)));
}

#[test]
fn test_resize_below_minimum_is_rejected() {
    let prev = CropRect::new(100.0, 100.0, 40.0, 20.0);
    let next =
        CropController::default().resize(&prev, CropHandle::E, -30.0, 0.0, &square_fitted(), 2.0);
    assert_eq!(next, None);
}

#[test]
fn test_custom_min_size_from_config() {
    let c = CropController::new(CropConfig {
        min_size: 150.0,
        ..CropConfig::default()
    });
    let next = c.resize(&base_rect(), CropHandle::E, -20.0, 0.0, &square_fitted(), 2.0);
    assert_eq!(next, None);
}

// ---------------------------------------------------------------------------
// Drag sessions
// ---------------------------------------------------------------------------

fn square_state(aspect_ratio: f32) -> (CropController, CropState) {
    let c = CropController::default();
    let state = loaded_crop_state(
        &c,
        Size::new(1000.0, 1000.0),
        Size::new(1000.0, 1000.0),
        aspect_ratio,
    );
    (c, state)
}

#[test]
fn test_drag_applies_incremental_deltas() {
    let (c, state) = square_state(2.0);
    assert_eq!(state.rect, Some(CropRect::new(100.0, 300.0, 800.0, 400.0)));

    let state = c.begin_handle_drag(&state, CropHandle::E, Point::new(900.0, 500.0));
    let state = c.on_pointer_move(&state, Point::new(910.0, 500.0));
    assert_eq!(state.rect, Some(CropRect::new(100.0, 300.0, 810.0, 405.0)));
    let state = c.on_pointer_move(&state, Point::new(920.0, 500.0));
    assert_eq!(state.rect, Some(CropRect::new(100.0, 300.0, 820.0, 410.0)));
}

#[test]
fn test_rejected_move_keeps_rect_and_advances_pointer() {
    let (c, state) = square_state(2.0);
    let before = state.rect;
    let state = c.begin_handle_drag(&state, CropHandle::E, Point::new(900.0, 500.0));

    let state = c.on_pointer_move(&state, Point::new(100.0, 500.0));
    assert_eq!(state.rect, before);
    assert_eq!(state.drag.unwrap().last_pointer, Point::new(100.0, 500.0));

    // The next delta is measured from the rejected pointer position.
    let state = c.on_pointer_move(&state, Point::new(150.0, 500.0));
    assert_eq!(state.rect, Some(CropRect::new(100.0, 300.0, 850.0, 425.0)));
}

#[test]
fn test_pointer_move_without_session_is_noop() {
    let (c, state) = square_state(1.0);
    let next = c.on_pointer_move(&state, Point::new(10.0, 10.0));
    assert_eq!(next, state);
}

#[test]
fn test_begin_drag_without_rect_is_noop() {
    let c = CropController::default();
    let state = CropState::new(1.0);
    let next = c.begin_handle_drag(&state, CropHandle::Se, Point::ZERO);
    assert!(!next.is_dragging());
}

#[test]
fn test_end_drag_keeps_rect() {
    let (c, state) = square_state(1.0);
    let state = c.begin_handle_drag(&state, CropHandle::Move, Point::new(500.0, 500.0));
    let state = c.on_pointer_move(&state, Point::new(480.0, 470.0));
    let moved = state.rect;
    let state = c.end_handle_drag(&state);
    assert!(!state.is_dragging());
    assert_eq!(state.rect, moved);
    assert_eq!(c.on_pointer_move(&state, Point::new(0.0, 0.0)), state);
}

#[test]
fn test_random_drags_keep_rect_valid() {
    let mut rng = Lcg::new(42);
    let ratios = [1.0, 0.75, 16.0 / 9.0, 9.0 / 16.0];
    let c = CropController::default();

    for _ in 0..20 {
        let aspect = *rng.pick(&ratios);
        let mut state =
            loaded_crop_state(&c, Size::new(500.0, 500.0), Size::new(800.0, 600.0), aspect);
        let fitted = state.fitted.unwrap();
        let mut pointer = Point::new(250.0, 250.0);

        for _ in 0..50 {
            let handle = *rng.pick(CropHandle::ALL);
            state = c.begin_handle_drag(&state, handle, pointer);
            for _ in 0..5 {
                pointer = pointer.offset(rng.range(-60.0, 60.0), rng.range(-60.0, 60.0));
                state = c.on_pointer_move(&state, pointer);

                let rect = state.rect.unwrap();
                assert!(rect.is_within(&fitted), "{rect:?} escaped {fitted:?}");
                assert!(rect.width >= 20.0 && rect.height >= 20.0, "{rect:?}");
                assert_relative_eq!(rect.aspect(), aspect, max_relative = 1e-3);
            }
            state = c.end_handle_drag(&state);
        }
    }
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

#[test]
fn test_hit_test_prefers_corners_then_edges_then_interior() {
    let rect = base_rect();
    let hit = |x, y| CropHandle::hit_test(&rect, Point::new(x, y), HANDLE_HIT_TOLERANCE);
    assert_eq!(hit(102.0, 98.0), Some(CropHandle::Nw));
    assert_eq!(hit(295.0, 195.0), Some(CropHandle::Se));
    assert_eq!(hit(200.0, 100.0), Some(CropHandle::N));
    assert_eq!(hit(300.0, 150.0), Some(CropHandle::E));
    assert_eq!(hit(200.0, 150.0), Some(CropHandle::Move));
    assert_eq!(hit(50.0, 50.0), None);
}

#[test]
fn test_hit_test_small_rect_resolves_to_corner() {
    let rect = CropRect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(
        CropHandle::hit_test(&rect, Point::new(5.0, 0.0), HANDLE_HIT_TOLERANCE),
        Some(CropHandle::Nw)
    );
}

#[test]
fn test_handle_parse_and_display() {
    assert_eq!("NE".parse::<CropHandle>(), Ok(CropHandle::Ne));
    assert_eq!(" move ".parse::<CropHandle>(), Ok(CropHandle::Move));
    assert!("middle".parse::<CropHandle>().is_err());
    for handle in CropHandle::ALL {
        assert_eq!(handle.to_string().parse::<CropHandle>(), Ok(*handle));
    }
}

#[test]
fn test_handle_cursors() {
    assert_eq!(CropHandle::N.cursor(), HandleCursor::ResizeVertical);
    assert_eq!(CropHandle::W.cursor(), HandleCursor::ResizeHorizontal);
    assert_eq!(CropHandle::Se.cursor(), HandleCursor::ResizeNwSe);
    assert_eq!(CropHandle::Ne.cursor(), HandleCursor::ResizeNeSw);
    assert_eq!(CropHandle::Move.cursor(), HandleCursor::Move);
}

// ---------------------------------------------------------------------------
// Aspect presets
// ---------------------------------------------------------------------------

#[test]
fn test_aspect_preset_ratios() {
    assert_eq!(AspectPreset::default().ratio(), 1.0);
    assert_relative_eq!(AspectPreset::Portrait.ratio(), 0.75);
    assert_relative_eq!(AspectPreset::Widescreen.ratio(), 16.0 / 9.0);
}

#[test]
fn test_aspect_preset_parsing() {
    assert_eq!("16:9".parse::<AspectPreset>().unwrap(), AspectPreset::Widescreen);
    assert_eq!("Story".parse::<AspectPreset>().unwrap(), AspectPreset::Story);
    assert_eq!("0.75".parse::<AspectPreset>().unwrap(), AspectPreset::Portrait);
    assert_eq!("2:1".parse::<AspectPreset>().unwrap(), AspectPreset::Custom(2.0));
}

#[test]
fn test_aspect_preset_rejects_garbage() {
    for bad in ["wide", "1:0", "0", "-2", "a:b"] {
        let err = bad.parse::<AspectPreset>().unwrap_err();
        assert!(matches!(err, EditorError::InvalidAspect(_)), "{bad}");
    }
}

#[test]
fn test_aspect_preset_display() {
    assert_eq!(AspectPreset::Landscape.to_string(), "4:3");
    assert_eq!(AspectPreset::Custom(2.0).to_string(), "2.000");
}

// ---------------------------------------------------------------------------
// Cropper instance and listener lifetime
// ---------------------------------------------------------------------------

fn loaded_cropper(surface: &CountingSurface) -> Cropper<CountingSurface> {
    let mut cropper = Cropper::new(surface.clone(), CropConfig::default(), 1.0);
    cropper.dispatch(CropEvent::ContainerResized(Size::new(500.0, 500.0)));
    cropper.dispatch(CropEvent::ImageLoaded {
        natural: Size::new(1000.0, 500.0),
    });
    cropper
}

#[test]
fn test_cropper_listens_for_resize_while_image_bound() {
    let surface = CountingSurface::default();
    let mut cropper = Cropper::new(surface.clone(), CropConfig::default(), 1.0);
    cropper.dispatch(CropEvent::ContainerResized(Size::new(500.0, 500.0)));
    assert!(!cropper.is_listening_for_resize());

    cropper.dispatch(CropEvent::ImageLoaded {
        natural: Size::new(1000.0, 500.0),
    });
    assert!(cropper.is_listening_for_resize());
    assert_eq!(surface.last_kinds.get(), Some(ListenerKind::Resize));

    cropper.dispatch(CropEvent::Unload);
    assert!(!cropper.is_listening_for_resize());
    assert_eq!(surface.live(), 0);
}

#[test]
fn test_cropper_drag_listeners_follow_session() {
    let surface = CountingSurface::default();
    let mut cropper = loaded_cropper(&surface);
    assert_eq!(surface.live(), 1);

    cropper.dispatch(CropEvent::BeginHandleDrag {
        handle: CropHandle::Se,
        pointer: Point::new(350.0, 350.0),
    });
    assert!(cropper.is_listening_for_drag());
    assert_eq!(surface.live(), 2);
    assert_eq!(surface.last_kinds.get(), Some(ListenerKind::PointerMove));

    cropper.dispatch(CropEvent::PointerMove(Point::new(360.0, 360.0)));
    assert_eq!(cropper.rect(), Some(CropRect::new(150.0, 150.0, 210.0, 210.0)));
    assert_eq!(surface.attached.get(), 2);

    cropper.dispatch(CropEvent::EndHandleDrag);
    assert!(!cropper.is_listening_for_drag());
    assert_eq!(surface.live(), 1);
}

#[test]
fn test_dropping_cropper_releases_everything() {
    let surface = CountingSurface::default();
    {
        let mut cropper = loaded_cropper(&surface);
        cropper.dispatch(CropEvent::BeginHandleDrag {
            handle: CropHandle::Move,
            pointer: Point::new(250.0, 250.0),
        });
        assert_eq!(surface.live(), 2);
    }
    assert_eq!(surface.live(), 0);
}
