mod common;

use common::harness;
use gpu_native::types::{AttributeValue, DataType, UniformValue};

const VERTEX: &str = "attribute vec2 gpu_Vertex; uniform mat4 gpu_ModelViewProjectionMatrix; void main() {}";
const FRAGMENT: &str = "uniform float tint; void main() {}";

fn with_sources(h: &common::Harness) {
    h.lua.globals().set("VERTEX", VERTEX).unwrap();
    h.lua.globals().set("FRAGMENT", FRAGMENT).unwrap();
}

// ── programs ────────────────────────────────────────────────────────────

#[test]
fn program_new_dispatches_on_arity() {
    let h = harness();
    with_sources(&h);
    let linked: (bool, bool, bool) = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            local v = GPU.compile_shader(GPU.VERTEX_SHADER, VERTEX)
            local f = GPU.compile_shader(GPU.FRAGMENT_SHADER, FRAGMENT)

            local empty = GPU.Program.new()
            empty:attach(v)
            empty:attach(f)

            local pair = GPU.Program.new(v, f)
            local many = GPU.Program.new({ v, f })
            return empty:link(), pair.id ~= many.id, not pair:is_default()
            "#,
        )
        .unwrap();
    assert_eq!(linked, (true, true, true));

    let err = h.run("GPU.Program.new(1, 2, 3)").unwrap_err();
    assert!(err.to_string().contains("Program.new: expected 0, 1 or 2 arguments, got 3"), "{err}");
}

#[test]
fn compile_failure_carries_the_shader_message() {
    let h = harness();
    let err = h
        .run(
            r#"
            local screen = GPU.init(64, 64, 0)
            GPU.compile_shader(GPU.VERTEX_SHADER, "int nothing;")
            "#,
        )
        .unwrap_err();
    assert!(err.to_string().contains("no entry point 'main'"), "{err}");
    let message: String = h.eval("return GPU.get_shader_message()").unwrap();
    assert!(message.contains("no entry point"));
}

#[test]
fn link_failure_raises() {
    let h = harness();
    with_sources(&h);
    let err = h
        .run(
            r#"
            local screen = GPU.init(64, 64, 0)
            local v = GPU.compile_shader(GPU.VERTEX_SHADER, VERTEX)
            GPU.link_many_shaders({ v })
            "#,
        )
        .unwrap_err();
    assert!(err.to_string().contains("GPU_LinkShaderProgram"), "{err}");
}

#[test]
fn locations_and_shader_block() {
    let h = harness();
    with_sources(&h);
    let (position, mvp, missing): (i32, i32, i32) = h
        .eval(
            r#"
            local screen = GPU.init(64, 64, 0)
            local p = GPU.link_shaders(
                GPU.compile_shader(GPU.VERTEX_SHADER, VERTEX),
                GPU.compile_shader(GPU.FRAGMENT_SHADER, FRAGMENT))
            local block = p:load_shader_block("gpu_Vertex", "gpu_TexCoord", "gpu_Color", "gpu_ModelViewProjectionMatrix")
            p:activate(block)
            assert(GPU.get_current_shader_program() == p.id)
            return block.position_loc, block.modelview_projection_loc, p:uniform_location("nope")
            "#,
        )
        .unwrap();
    assert!(position >= 0);
    assert!(mvp >= 0);
    assert_eq!(missing, -1);
}

#[test]
fn freeing_shaders_and_programs_counts_once() {
    let h = harness();
    with_sources(&h);
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        local v = GPU.compile_shader(GPU.VERTEX_SHADER, VERTEX)
        local f = GPU.compile_shader(GPU.FRAGMENT_SHADER, FRAGMENT)
        local p = GPU.link_shaders(v, f)
        p:free(); p:free()
        v:free(); f:destroy(); v:free()
        "#,
    )
    .unwrap();
    h.collect();
    assert_eq!(h.headless.counters().programs_freed, 1);
    assert_eq!(h.headless.counters().shaders_freed, 2);
}

// ── uniforms and attributes ─────────────────────────────────────────────

#[test]
fn uniforms_reach_the_backend() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        GPU.set_uniformi(1, -3)
        GPU.set_uniformfv(2, 2, { 1, 2, 3, 4 })
        GPU.set_uniform_matrixfv(3, 1, 2, 2, false, { 1, 0, 0, 1 })
        "#,
    )
    .unwrap();
    assert_eq!(h.headless.uniform(1), Some(UniformValue::Int(-3)));
    assert_eq!(
        h.headless.uniform(2),
        Some(UniformValue::FloatVec { elems_per_value: 2, values: vec![1.0, 2.0, 3.0, 4.0] })
    );
    assert_eq!(
        h.headless.uniform(3),
        Some(UniformValue::Matrix { num_matrices: 1, rows: 2, cols: 2, transpose: false, values: vec![1.0, 0.0, 0.0, 1.0] })
    );
}

#[test]
fn attribute_source_keeps_every_element() {
    let h = harness();
    h.run(
        r#"
        local screen = GPU.init(64, 64, 0)
        GPU.set_attributeiv(4, { 1, 2, 3 })
        local fmt = GPU.make_attribute_format(2, GPU.TYPE_FLOAT, false, 0, 0)
        local attr = GPU.make_attribute(5, { 0.5, 1.5, 2.5, 3.5 }, fmt)
        assert(#attr == 4 and attr.format.type == GPU.TYPE_FLOAT)
        GPU.set_attribute_source(2, attr)
        "#,
    )
    .unwrap();
    assert_eq!(h.headless.attribute(4), Some(AttributeValue::IntVec(vec![1, 2, 3])));

    let (num_values, attribute) = h.headless.attribute_source(5).unwrap();
    assert_eq!(num_values, 2);
    assert_eq!(attribute.format.kind, DataType::Float);
    let floats: Vec<f32> = attribute.bytes().chunks_exact(4).map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]])).collect();
    assert_eq!(floats, vec![0.5, 1.5, 2.5, 3.5]);
}

#[test]
fn attribute_format_rejects_unknown_types() {
    let h = harness();
    let err = h.run("GPU.make_attribute_format(2, 7, false, 0, 0)").unwrap_err();
    assert!(err.to_string().contains("7 is not a valid data type"), "{err}");
}
