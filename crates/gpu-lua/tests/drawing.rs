mod common;

use common::harness;
use gpu_native::coords::{Color, Rect};
use gpu_native::draw::{BlitTransform, DrawCmd, Shape};
use gpu_native::Backend;

// ── blit ────────────────────────────────────────────────────────────────

#[test]
fn blit_arity_picks_the_transform() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        local img = GPU.Image.new(4, 4, GPU.FORMAT_RGBA)
        screen:blit(img, nil, 1, 2)
        screen:blit(img, nil, 1, 2, 90)
        screen:blit(img, nil, 1, 2, 2, 3)
        screen:blit(img, nil, 1, 2, 2, 3, 45)
        screen:blit(img, GPU.Rect.new(0, 0, 2, 2), 1, 2, 2, 3, 45, 0.5, 0.25)
        "#,
    )
    .unwrap();

    let transforms: Vec<_> = h
        .screen_draws()
        .into_iter()
        .map(|item| match item.cmd {
            DrawCmd::Blit { src, transform, x, y, .. } => {
                assert_eq!((x, y), (1.0, 2.0));
                (src, transform)
            }
            other => panic!("unexpected draw {other:?}"),
        })
        .collect();

    assert_eq!(
        transforms,
        vec![
            (None, BlitTransform::None),
            (None, BlitTransform::Rotate { degrees: 90.0 }),
            (None, BlitTransform::Scale { scale_x: 2.0, scale_y: 3.0 }),
            (None, BlitTransform::Transform { degrees: 45.0, scale_x: 2.0, scale_y: 3.0 }),
            (
                Some(Rect::new(0.0, 0.0, 2.0, 2.0)),
                BlitTransform::TransformX { pivot_x: 0.5, pivot_y: 0.25, degrees: 45.0, scale_x: 2.0, scale_y: 3.0 },
            ),
        ]
    );
}

#[test]
fn blit_with_eight_arguments_is_an_arity_error() {
    let h = harness();
    let err = h
        .run(
            r#"
            local screen = GPU.init(64, 64, 0)
            local img = GPU.Image.new(4, 4, GPU.FORMAT_RGBA)
            screen:blit(img, nil, 1, 2, 3, 4, 5, 6)
            "#,
        )
        .unwrap_err();
    assert!(err.to_string().contains("Target:blit: expected 4, 5, 6, 7 or 9 arguments, got 8"), "{err}");
    assert!(h.screen_draws().is_empty());
}

#[test]
fn blit_rect_passes_nil_rects_as_none() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        local img = GPU.Image.new(4, 4, GPU.FORMAT_RGBA)
        screen:blit_rect(img, nil, GPU.Rect.new(1, 1, 8, 8))
        "#,
    )
    .unwrap();
    match &h.screen_draws()[0].cmd {
        DrawCmd::BlitRect { src, dest, .. } => {
            assert_eq!(*src, None);
            assert_eq!(*dest, Some(Rect::new(1.0, 1.0, 8.0, 8.0)));
        }
        other => panic!("unexpected draw {other:?}"),
    }
}

// ── shapes ──────────────────────────────────────────────────────────────

#[test]
fn rect_round_accepts_corners_or_a_rect() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        screen:rect_round(0, 0, 10, 10, 2, 255, 0, 0, 255)
        screen:rect_round_filled(GPU.Rect.new(1, 2, 3, 4), 1, 0, 255, 0, 255)
        "#,
    )
    .unwrap();
    let shapes: Vec<_> = h
        .screen_draws()
        .into_iter()
        .map(|item| match item.cmd {
            DrawCmd::Shape { shape, .. } => shape,
            other => panic!("unexpected draw {other:?}"),
        })
        .collect();
    assert_eq!(
        shapes,
        vec![
            Shape::RectangleRound { x1: 0.0, y1: 0.0, x2: 10.0, y2: 10.0, radius: 2.0, filled: false },
            Shape::RectangleRound2 { rect: Rect::new(1.0, 2.0, 3.0, 4.0), radius: 1.0, filled: true },
        ]
    );

    let err = h.run("GPU.context_target():rect_round(0, 0, 10, 10, 2, 255, 0, 0)").unwrap_err();
    assert!(err.to_string().contains("expected 6 or 9 arguments, got 8"), "{err}");
}

#[test]
fn ellipse_degrees_default_to_zero() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        screen:ellipse(5, 5, 3, 2, 1, 2, 3, 4)
        screen:ellipse_filled(5, 5, 3, 2, 1, 2, 3, 4, 30)
        "#,
    )
    .unwrap();
    let draws = h.screen_draws();
    assert!(matches!(draws[0].cmd, DrawCmd::Shape { shape: Shape::Ellipse { degrees, filled: false, .. }, .. } if degrees == 0.0));
    assert!(matches!(draws[1].cmd, DrawCmd::Shape { shape: Shape::Ellipse { degrees, filled: true, .. }, .. } if degrees == 30.0));
}

#[test]
fn colour_channels_are_clamped() {
    let h = harness();
    h.run("screen = GPU.init(64, 64, 0); screen:line(0, 0, 5, 5, 300, -4, 12, 999)").unwrap();
    h.run("GPU.init(64, 64, 0):line(0, 0, 5, 5, 300, -4, 12, 999)").unwrap();
    match &h.screen_draws()[0].cmd {
        DrawCmd::Shape { color, .. } => assert_eq!(*color, Color::rgba(255, 0, 12, 255)),
        other => panic!("unexpected draw {other:?}"),
    }
}

#[test]
fn polygon_needs_coordinate_pairs() {
    let h = harness();
    let err = h.run("GPU.init(64, 64, 0):polygon({0, 0, 4, 0, 4}, 1, 1, 1, 255)").unwrap_err();
    assert!(err.to_string().contains("even number of coordinates"), "{err}");
}

#[test]
fn gradient_fill_emits_one_strip_per_pixel() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        screen:gradient_fill_rect(0, 0, 0, 255, 200, 100, 0, 255, GPU.Rect.new(2, 3, 4, 2), false)
        "#,
    )
    .unwrap();

    let strips: Vec<_> = h
        .screen_draws()
        .into_iter()
        .map(|item| match item.cmd {
            DrawCmd::Shape { shape: Shape::Rectangle2 { rect, filled: true }, color } => (rect, color),
            other => panic!("unexpected draw {other:?}"),
        })
        .collect();
    assert_eq!(
        strips,
        vec![
            (Rect::new(2.0, 3.0, 1.0, 2.0), Color::rgba(0, 0, 0, 255)),
            (Rect::new(3.0, 3.0, 1.0, 2.0), Color::rgba(50, 25, 0, 255)),
            (Rect::new(4.0, 3.0, 1.0, 2.0), Color::rgba(100, 50, 0, 255)),
            (Rect::new(5.0, 3.0, 1.0, 2.0), Color::rgba(150, 75, 0, 255)),
        ]
    );
}

#[test]
fn vertical_gradient_uses_rows_and_empty_rects_draw_nothing() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        screen:gradient_fill_rect(0, 0, 0, 255, 0, 0, 0, 255, GPU.Rect.new(0, 0, 5, 3), true)
        screen:gradient_fill_rect(0, 0, 0, 255, 0, 0, 0, 255, GPU.Rect.new(0, 0, 5, 0), true)
        "#,
    )
    .unwrap();
    let draws = h.screen_draws();
    assert_eq!(draws.len(), 3);
    assert!(matches!(
        draws[2].cmd,
        DrawCmd::Shape { shape: Shape::Rectangle2 { rect, .. }, .. } if rect == Rect::new(0.0, 2.0, 5.0, 1.0)
    ));
}

#[test]
fn fractional_gradient_ends_in_a_narrow_strip() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        screen:gradient_fill_rect(0, 0, 0, 255, 250, 0, 0, 255, GPU.Rect.new(0, 0, 2.5, 4), false)
        "#,
    )
    .unwrap();

    let strips: Vec<_> = h
        .screen_draws()
        .into_iter()
        .map(|item| match item.cmd {
            DrawCmd::Shape { shape: Shape::Rectangle2 { rect, .. }, color } => (rect, color.r),
            other => panic!("unexpected draw {other:?}"),
        })
        .collect();
    assert_eq!(
        strips,
        vec![
            (Rect::new(0.0, 0.0, 1.0, 4.0), 0),
            (Rect::new(1.0, 0.0, 1.0, 4.0), 100),
            (Rect::new(2.0, 0.0, 0.5, 4.0), 200),
        ]
    );
}

#[test]
fn huge_gradients_are_capped() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        screen:gradient_fill_rect(0, 0, 0, 255, 255, 255, 255, 255, GPU.Rect.new(0, 0, 1e8, 1), false)
        screen:gradient_fill_rect(0, 0, 0, 255, 255, 255, 255, 255, GPU.Rect.new(0, 0, -20, 1), false)
        "#,
    )
    .unwrap();
    assert_eq!(h.screen_draws().len(), 16_384);
}

// ── target state ────────────────────────────────────────────────────────

#[test]
fn clear_arity_and_clip_rect() {
    let h = harness();
    let (x, y, w, hh): (f32, f32, f32, f32) = h
        .eval(
            r#"
            local screen = GPU.init(64, 48, 0)
            local previous = screen:set_clip_rect(GPU.Rect.new(0, 0, 4, 4))
            screen:clear()
            screen:clear(1, 2, 3)
            screen:clear(1, 2, 3, 4)
            return previous.x, previous.y, previous.w, previous.h
            "#,
        )
        .unwrap();
    assert_eq!((x, y, w, hh), (0.0, 0.0, 64.0, 48.0));

    let draws = h.screen_draws();
    let clip = Some(Rect::new(0.0, 0.0, 4.0, 4.0));
    assert_eq!(draws[0].cmd, DrawCmd::Clear(None));
    assert_eq!(draws[1].cmd, DrawCmd::Clear(Some(Color::rgba(1, 2, 3, 255))));
    assert_eq!(draws[2].cmd, DrawCmd::Clear(Some(Color::rgba(1, 2, 3, 4))));
    assert!(draws.iter().all(|d| d.clip_rect == clip));

    let err = h.run("GPU.context_target():clear(1, 2)").unwrap_err();
    assert!(err.to_string().contains("expected 0, 3 or 4 arguments, got 2"), "{err}");
}

#[test]
fn set_camera_returns_the_previous_camera() {
    let h = harness();
    let (zoom, new_zoom): (f32, f32) = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            local previous = screen:set_camera(GPU.Camera.new(1, 2, 0, 0, 3))
            return previous.zoom, screen.camera.zoom
            "#,
        )
        .unwrap();
    assert_eq!((zoom, new_zoom), (1.0, 3.0));
}

#[test]
fn flip_is_counted() {
    let h = harness();
    h.run("local s = GPU.init(64, 64, 0); s:flip(); s:flip()").unwrap();
    assert_eq!(h.headless.counters().flips, 2);
}

#[test]
fn a_frame_loop_keeps_one_frame_of_draws() {
    let h = harness();
    h.run(
        r#"
        screen = GPU.init(64, 64, 0)
        for i = 1, 500 do
            screen:clear()
            screen:pixel(i % 64, 0, 255, 255, 255, 255)
            screen:flip()
        end
        screen:clear()
        "#,
    )
    .unwrap();
    assert_eq!(h.screen_draws().len(), 1);
    let screen = h.headless.context_target().unwrap();
    assert_eq!(h.headless.draw_log(screen).unwrap().presented().len(), 2);
    assert_eq!(h.headless.counters().flips, 500);
}

#[test]
fn triangle_batch_rejects_unknown_flags() {
    let h = harness();
    h.run("screen = GPU.init(64, 64, 0)").unwrap();
    let err = h.run("screen:triangle_batch(nil, {0, 0, 1, 0, 0, 1}, nil, 0x100)").unwrap_err();
    assert!(err.to_string().contains("0x100 is not a valid batch layout"), "{err}");

    h.run("screen:triangle_batch(nil, {0, 0, 1, 0, 0, 1}, nil, GPU.BATCH_XY)").unwrap();
    assert!(matches!(
        h.screen_draws()[0].cmd,
        DrawCmd::TriangleBatch { image: None, num_vertices: 3, num_indices: 0, .. }
    ));
}
