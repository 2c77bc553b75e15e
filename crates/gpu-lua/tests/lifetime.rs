mod common;

use common::harness;

// ── free ────────────────────────────────────────────────────────────────

#[test]
fn freeing_twice_calls_the_native_free_once() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        local img = GPU.Image.new(4, 4, GPU.FORMAT_RGBA)
        img:free()
        img:free()
        img:destroy()
        "#,
    )
    .unwrap();
    h.collect();
    assert_eq!(h.headless.counters().images_freed, 1);
    assert_eq!(h.headless.live_images(), 0);
}

#[test]
fn using_a_freed_image_raises() {
    let h = harness();
    let err = h
        .run(
            r#"
            local screen = GPU.init(64, 64, 0)
            local img = GPU.Image.new(4, 4, GPU.FORMAT_RGBA)
            img:free()
            return img.w
            "#,
        )
        .unwrap_err();
    assert!(err.to_string().contains("Image has already been freed"), "{err}");
}

// ── collection ──────────────────────────────────────────────────────────

#[test]
fn collecting_an_owned_wrapper_frees_it() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        local function scratch()
            local img = GPU.Image.new(4, 4, GPU.FORMAT_RGBA)
            return img.w
        end
        scratch()
        "#,
    )
    .unwrap();
    h.collect();
    assert_eq!(h.headless.counters().images_created, 1);
    assert_eq!(h.headless.counters().images_freed, 1);
}

#[test]
fn collecting_a_borrowed_wrapper_leaves_the_target_alone() {
    let h = harness();
    h.run(
        r#"
        screen = GPU.init(64, 64, 0)
        local function peek()
            local t = GPU.context_target()
            return t.w
        end
        peek()
        "#,
    )
    .unwrap();
    h.collect();
    assert_eq!(h.headless.counters().targets_freed, 0);
    assert_eq!(h.headless.live_targets(), 1);
}

#[test]
fn freeing_a_borrowed_wrapper_only_empties_it() {
    let h = harness();
    let err = h
        .run(
            r#"
            local screen = GPU.init(64, 64, 0)
            local t = GPU.context_target()
            t:free()
            return t.w
            "#,
        )
        .unwrap_err();
    assert!(err.to_string().contains("Target has already been freed"), "{err}");
    assert_eq!(h.headless.counters().targets_freed, 0);
    assert_eq!(h.headless.live_targets(), 1);
}

#[test]
fn freeing_the_init_screen_frees_the_window_target() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        screen:free()
        screen:free()
        assert(GPU.context_target() == nil)
        "#,
    )
    .unwrap();
    assert_eq!(h.headless.counters().targets_freed, 1);
    assert_eq!(h.headless.live_targets(), 0);
}

#[test]
fn collecting_the_init_screen_frees_it() {
    let h = harness();
    h.run(
        r#"
        local function open()
            local screen = GPU.init(64, 64, 0)
            return screen.w
        end
        open()
        "#,
    )
    .unwrap();
    h.collect();
    assert_eq!(h.headless.counters().targets_freed, 1);
    assert_eq!(h.headless.live_targets(), 0);
}

#[test]
fn freeing_an_alias_keeps_the_source_pixels() {
    let h = harness();
    let (r, g, b, a, w): (u8, u8, u8, u8, u16) = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            local img = GPU.Image.new(4, 4, GPU.FORMAT_RGBA)
            local t = GPU.load_target(img)
            t:clear_rgba(10, 20, 30, 255)
            local alias = img:create_alias()
            assert(alias.is_alias)
            alias:free()
            local p = t:get_pixel(1, 1)
            return p.r, p.g, p.b, p.a, img.w
            "#,
        )
        .unwrap();
    assert_eq!((r, g, b, a, w), (10, 20, 30, 255, 4));
    assert_eq!(h.headless.counters().images_freed, 1);
}

// ── sessions ────────────────────────────────────────────────────────────

#[test]
fn wrappers_from_before_quit_are_stale() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        img = GPU.Image.new(4, 4, GPU.FORMAT_RGBA)
        GPU.quit()
        "#,
    )
    .unwrap();

    let err = h.run("return img.w").unwrap_err();
    assert!(err.to_string().contains("stale Image"), "{err}");

    h.run("img:free(); img = nil").unwrap();
    h.collect();
    assert_eq!(h.headless.counters().images_freed, 0);
}

#[test]
fn closing_the_renderer_makes_targets_stale() {
    let h = harness();
    let err = h
        .run(
            r#"
            local screen = GPU.init(64, 64, 0)
            GPU.close_current_renderer()
            screen:clear()
            "#,
        )
        .unwrap_err();
    assert!(err.to_string().contains("stale Target"), "{err}");
}

#[test]
fn a_new_session_after_quit_works() {
    let h = harness();
    let w: u16 = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            GPU.quit()
            local screen = GPU.init(32, 16, 0)
            local img = GPU.Image.new(8, 8, GPU.FORMAT_RGBA)
            img:free()
            return screen.w
            "#,
        )
        .unwrap();
    assert_eq!(w, 32);
    assert_eq!(h.headless.counters().images_freed, 1);
}
