mod common;

use common::harness;

// ── value wrappers ──────────────────────────────────────────────────────

#[test]
fn rect_fields_round_trip() {
    let h = harness();
    let (x, y, w, hh, width): (f32, f32, f32, f32, f32) = h
        .eval(
            r#"
            local r = GPU.Rect.new(1, 2, 3, 4)
            assert(r == GPU.make_rect(1, 2, 3, 4))
            r.width = 7
            return r.x, r.y, r.w, r.height, r.width
            "#,
        )
        .unwrap();
    assert_eq!((x, y, w, hh, width), (1.0, 2.0, 7.0, 4.0, 7.0));
}

#[test]
fn rect_new_fills_missing_fields_with_zero() {
    let h = harness();
    let (w, hh): (f32, f32) = h.eval("local r = GPU.Rect.new(5, 6); return r.w, r.h").unwrap();
    assert_eq!((w, hh), (0.0, 0.0));
    assert!(h.run("GPU.Rect.new(1, 2, 3, 4, 5)").is_err());
}

#[test]
fn camera_fields_round_trip() {
    let h = harness();
    let (x, y, z, angle, zoom): (f32, f32, f32, f32, f32) = h
        .eval(
            r#"
            local c = GPU.Camera.new(1, 2, 3, 45, 2)
            assert(c == GPU.Camera.new(1, 2, 3, 45, 2))
            c.x = -8
            c.y = 16.5
            c.angle = 90
            return c.x, c.y, c.z, c.angle, c.zoom
            "#,
        )
        .unwrap();
    assert_eq!((x, y, z, angle, zoom), (-8.0, 16.5, 3.0, 90.0, 2.0));
}

#[test]
fn shader_block_fields_round_trip() {
    let h = harness();
    let (position, texcoord, color, mvp): (i32, i32, i32, i32) = h
        .eval(
            r#"
            local b = GPU.ShaderBlock.new(0, 1, 2, 3)
            assert(b == GPU.ShaderBlock.new(0, 1, 2, 3))
            b.color_loc = 7
            b.modelview_projection_loc = -1
            return b.position_loc, b.texcoord_loc, b.color_loc, b.modelview_projection_loc
            "#,
        )
        .unwrap();
    assert_eq!((position, texcoord, color, mvp), (0, 1, 7, -1));
    assert!(h.run("GPU.ShaderBlock.new(1, 2)").is_err());
}

#[test]
fn attribute_format_fields_round_trip() {
    let h = harness();
    let (per_sprite, elems, kind, normalize, stride, offset): (bool, i32, u32, bool, i32, i32) = h
        .eval(
            r#"
            local f = GPU.AttributeFormat.new(2, GPU.TYPE_FLOAT, false, 8, 0)
            f.is_per_sprite = true
            f.normalize = true
            f.stride_bytes = 16
            f.offset_bytes = 4
            f.type = GPU.TYPE_INT
            return f.is_per_sprite, f.num_elems_per_value, f.type, f.normalize, f.stride_bytes, f.offset_bytes
            "#,
        )
        .unwrap();
    assert_eq!((per_sprite, elems, kind, normalize, stride, offset), (true, 2, 0x1404, true, 16, 4));

    let err = h.run("GPU.AttributeFormat.new(2, GPU.TYPE_FLOAT, false, 8, 0).type = 7").unwrap_err();
    assert!(err.to_string().contains("data type"), "{err}");
}

#[test]
fn blend_mode_from_preset_and_field_validation() {
    let h = harness();
    let (src, eq): (i32, i32) = h
        .eval(
            r#"
            local b = GPU.get_blend_mode_from_preset(GPU.BLEND_SUBTRACT)
            assert(b == GPU.BlendMode.from_preset(GPU.BLEND_SUBTRACT))
            return b.source_color, b.color_equation
            "#,
        )
        .unwrap();
    assert_eq!((src, eq), (1, 0x800A));

    let err = h.run("GPU.BlendMode.new().source_color = 12345").unwrap_err();
    assert!(err.to_string().contains("12345 is not a valid blend function"), "{err}");
    assert!(h.run("GPU.get_blend_mode_from_preset(99)").is_err());
}

#[test]
fn renderer_id_fields_are_writable() {
    let h = harness();
    let (name, major): (String, i32) = h
        .eval(
            r#"
            local id = GPU.make_renderer_id("custom", GPU.RENDERER_CUSTOM_0, 1, 2)
            id.name = "renamed"
            id.major_version = 3
            return id.name, id.major_version
            "#,
        )
        .unwrap();
    assert_eq!((name, major), ("renamed".to_owned(), 3));
}

#[test]
fn make_color_clamps() {
    let h = harness();
    let (r, a): (u8, u8) = h.eval("local c = GPU.make_color(-1, 2, 3, 400); return c.r, c.a").unwrap();
    assert_eq!((r, a), (0, 255));
}

// ── constants ───────────────────────────────────────────────────────────

#[test]
fn constants_drop_the_native_prefix() {
    let h = harness();
    let values: (i64, i64, i64, i64, i64, i64) = h
        .eval(
            r#"
            return GPU.FILTER_LINEAR, GPU.RENDERER_OPENGL_3, GPU.BATCH_XY_ST_RGBA,
                GPU.FEATURE_ALL_SHADERS, GPU.TYPE_FLOAT, GPU.DEBUG_LEVEL_MAX
            "#,
        )
        .unwrap();
    assert_eq!(values, (1, 4, 0x15, 0x700, 0x1406, 3));
    let missing: mlua::Value = h.eval("return GPU.WINDOW_").unwrap();
    assert!(missing.is_nil());
}

// ── module functions ────────────────────────────────────────────────────

#[test]
fn linked_version_and_error_strings() {
    let h = harness();
    let (major, minor, text): (u8, u8, String) = h
        .eval(
            r#"
            local v = GPU.get_linked_version()
            return v.major, v.minor, GPU.get_error_string(GPU.ERROR_FILE_NOT_FOUND)
            "#,
        )
        .unwrap();
    assert_eq!((major, minor, text.as_str()), (0, 11, "FILE NOT FOUND"));
}

#[test]
fn pop_error_is_nil_when_the_stack_is_empty() {
    let h = harness();
    let empty: bool = h.eval("return GPU.pop_error() == nil").unwrap();
    assert!(empty);
}

#[test]
fn renderer_order_round_trips() {
    let h = harness();
    let (n, first): (usize, String) = h
        .eval(
            r#"
            local order = GPU.get_default_renderer_order()
            GPU.set_renderer_order({ order[2] })
            local now = GPU.get_renderer_order()
            return #now, now[1].name
            "#,
        )
        .unwrap();
    let default = gpu_native::Backend::default_renderer_order(&*h.headless);
    assert_eq!((n, first), (1, default[1].name.clone()));
}

#[test]
fn features_are_enabled_once_initialised() {
    let h = harness();
    let (enabled, before): (bool, bool) = h
        .eval(
            r#"
            local before = GPU.is_feature_enabled(GPU.FEATURE_RENDER_TARGETS)
            local screen = GPU.init(64, 64, 0)
            return GPU.is_feature_enabled(GPU.FEATURE_RENDER_TARGETS), before
            "#,
        )
        .unwrap();
    assert!(enabled);
    assert!(!before);
}

#[test]
fn missing_image_raises_a_native_failure() {
    let h = harness();
    let err = h
        .run(
            r#"
            local screen = GPU.init(64, 64, 0)
            GPU.Image.new("definitely/not/here.png")
            "#,
        )
        .unwrap_err();
    assert!(err.to_string().contains("GPU_LoadImage"), "{err}");
    assert_eq!(h.headless.live_images(), 0);
}

#[test]
fn image_properties_and_setters() {
    let h = harness();
    let (filter, wrap_x, wrap_y, blending): (i32, i32, i32, bool) = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            local img = GPU.Image.new(8, 4, GPU.FORMAT_RGBA)
            assert(img.w == 8 and img.h == 4 and img.bytes_per_pixel == 4)
            img.filter_mode = GPU.FILTER_NEAREST
            img:set_wrap_mode(GPU.WRAP_REPEAT, GPU.WRAP_MIRRORED)
            img.blending = false
            return img.filter_mode, img.wrap_mode_x, img.wrap_mode_y, img.blending
            "#,
        )
        .unwrap();
    assert_eq!((filter, wrap_x, wrap_y, blending), (0, 1, 2, false));

    let err = h.run("GPU.Image.new(2, 2, GPU.FORMAT_RGBA).snap_mode = 9").unwrap_err();
    assert!(err.to_string().contains("9 is not a valid snap mode"), "{err}");
}

#[test]
fn image_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shot.png");
    let h = harness();
    h.lua.globals().set("path", path.to_str().unwrap()).unwrap();
    let (saved, w, hh): (bool, u16, u16) = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            local img = GPU.Image.new(3, 2, GPU.FORMAT_RGBA)
            local ok = img:save(path, GPU.FILE_AUTO)
            local again = GPU.load_image(path)
            return ok, again.w, again.h
            "#,
        )
        .unwrap();
    assert!(saved);
    assert_eq!((w, hh), (3, 2));
}

#[test]
fn virtual_coords_are_returned() {
    let h = harness();
    let (x, y): (f32, f32) = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            return GPU.get_virtual_coords(screen, 10, 20)
            "#,
        )
        .unwrap();
    assert_eq!((x, y), (10.0, 20.0));
}

#[test]
fn matrix_stack_functions() {
    let h = harness();
    let (tx, ty, n): (f32, f32, usize) = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            GPU.matrix_mode(GPU.MODELVIEW)
            GPU.load_identity()
            GPU.translate(3, 4, 0)
            local m = GPU.get_model_view()
            return m[13], m[14], #m
            "#,
        )
        .unwrap();
    assert_eq!((tx, ty, n), (3.0, 4.0, 16));
    assert!(h.run("GPU.load_matrix({1, 2, 3})").is_err());
}
