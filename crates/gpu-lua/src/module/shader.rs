use gpu_native::types::{AttributeValue, ShaderType, UniformValue};
use mlua::UserDataRef;

use super::Registrar;
use crate::args::enum_arg;
use crate::error::Raise;
use crate::wrappers::{LuaAttribute, LuaAttributeFormat, LuaImage, LuaProgram, LuaShader, LuaShaderBlock};

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    programs(reg)?;
    uniforms(reg)?;
    attributes(reg)
}

fn programs(reg: &Registrar) -> mlua::Result<()> {
    reg.function("compile_shader", |_, s, (stage, source): (i32, String)| {
        let stage: ShaderType = enum_arg("compile_shader", "shader stage", stage)?;
        let shader = s.backend().compile_shader(stage, &source).raise()?;
        Ok(LuaShader::owned(s, shader))
    })?;
    reg.function("load_shader", |_, s, (stage, filename): (i32, String)| {
        let stage: ShaderType = enum_arg("load_shader", "shader stage", stage)?;
        let shader = s.backend().load_shader(stage, &filename).raise()?;
        Ok(LuaShader::owned(s, shader))
    })?;
    reg.function("link_shaders", |_, s, (a, b): (UserDataRef<LuaShader>, UserDataRef<LuaShader>)| {
        let program = s.backend().link_shaders(a.slot.get()?, b.slot.get()?).raise()?;
        Ok(LuaProgram::owned(s, program))
    })?;
    reg.function("link_many_shaders", |_, s, shaders: Vec<UserDataRef<LuaShader>>| {
        LuaProgram::link_many(s, &shaders)
    })?;

    reg.function("deactivate_shader_program", |_, s, ()| {
        s.backend().deactivate_program();
        Ok(())
    })?;
    reg.function("get_current_shader_program", |_, s, ()| Ok(s.backend().current_program()))?;
    reg.function("get_shader_message", |_, s, ()| Ok(s.backend().shader_message()))?;
    reg.function("get_shader_block", |_, s, ()| Ok(LuaShaderBlock(s.backend().shader_block())))?;
    reg.function("set_shader_block", |_, s, block: UserDataRef<LuaShaderBlock>| {
        s.backend().set_shader_block(block.0);
        Ok(())
    })?;
    reg.function(
        "set_shader_image",
        |_, s, (image, location, unit): (Option<UserDataRef<LuaImage>>, i32, i32)| {
            let image = image.map(|i| i.slot.get()).transpose()?;
            s.backend().set_shader_image(image, location, unit).raise()
        },
    )
}

fn uniforms(reg: &Registrar) -> mlua::Result<()> {
    fn set(s: &crate::Session, location: i32, value: UniformValue) -> mlua::Result<()> {
        s.backend().set_uniform(location, &value);
        Ok(())
    }

    reg.function("set_uniformi", |_, s, (loc, v): (i32, i32)| set(s, loc, UniformValue::Int(v)))?;
    reg.function("set_uniformui", |_, s, (loc, v): (i32, u32)| set(s, loc, UniformValue::UInt(v)))?;
    reg.function("set_uniformf", |_, s, (loc, v): (i32, f32)| set(s, loc, UniformValue::Float(v)))?;
    reg.function("set_uniformiv", |_, s, (loc, elems_per_value, values): (i32, i32, Vec<i32>)| {
        set(s, loc, UniformValue::IntVec { elems_per_value, values })
    })?;
    reg.function("set_uniformuiv", |_, s, (loc, elems_per_value, values): (i32, i32, Vec<u32>)| {
        set(s, loc, UniformValue::UIntVec { elems_per_value, values })
    })?;
    reg.function("set_uniformfv", |_, s, (loc, elems_per_value, values): (i32, i32, Vec<f32>)| {
        set(s, loc, UniformValue::FloatVec { elems_per_value, values })
    })?;
    reg.function(
        "set_uniform_matrixfv",
        |_, s, (loc, num_matrices, rows, cols, transpose, values): (i32, i32, i32, i32, bool, Vec<f32>)| {
            set(s, loc, UniformValue::Matrix { num_matrices, rows, cols, transpose, values })
        },
    )
}

fn attributes(reg: &Registrar) -> mlua::Result<()> {
    fn set(s: &crate::Session, location: i32, value: AttributeValue) -> mlua::Result<()> {
        s.backend().set_attribute(location, &value);
        Ok(())
    }

    reg.function("set_attributef", |_, s, (loc, v): (i32, f32)| set(s, loc, AttributeValue::Float(v)))?;
    reg.function("set_attributei", |_, s, (loc, v): (i32, i32)| set(s, loc, AttributeValue::Int(v)))?;
    reg.function("set_attributeui", |_, s, (loc, v): (i32, u32)| set(s, loc, AttributeValue::UInt(v)))?;
    reg.function("set_attributefv", |_, s, (loc, v): (i32, Vec<f32>)| set(s, loc, AttributeValue::FloatVec(v)))?;
    reg.function("set_attributeiv", |_, s, (loc, v): (i32, Vec<i32>)| set(s, loc, AttributeValue::IntVec(v)))?;
    reg.function("set_attributeuiv", |_, s, (loc, v): (i32, Vec<u32>)| set(s, loc, AttributeValue::UIntVec(v)))?;

    reg.function("make_attribute_format", |_, _, args: (i32, u32, bool, i32, i32)| {
        Ok(LuaAttributeFormat::new("make_attribute_format", args)?)
    })?;
    reg.function(
        "make_attribute",
        |_, _, (location, values, format): (i32, Vec<f64>, UserDataRef<LuaAttributeFormat>)| {
            Ok(LuaAttribute::new(location, &values, &format))
        },
    )?;
    reg.function("set_attribute_source", |_, s, (num_values, attribute): (i32, UserDataRef<LuaAttribute>)| {
        s.backend().set_attribute_source(num_values, &attribute.0);
        Ok(())
    })
}
