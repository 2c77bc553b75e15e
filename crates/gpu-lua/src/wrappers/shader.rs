use std::rc::Rc;

use gpu_native::types::{Attribute, AttributeFormat, DataType, ShaderBlock};
use gpu_native::{ProgramHandle, ShaderHandle};
use mlua::{AnyUserData, Lua, MetaMethod, MultiValue, UserData, UserDataFields, UserDataMethods, UserDataRef, Variadic};

use crate::args::enum_arg;
use crate::error::{BindingError, Raise};
use crate::session::{Session, Slot};

/// `Shader`: a compiled shader object.
#[derive(Debug)]
pub struct LuaShader {
    pub(crate) slot: Slot<ShaderHandle>,
}

impl LuaShader {
    pub(crate) fn owned(session: &Rc<Session>, handle: ShaderHandle) -> Self {
        Self { slot: Slot::owned(session, handle) }
    }
}

impl UserData for LuaShader {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("id", |_, this| Ok(this.slot.get()?.raw()));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method_mut("free", |_, this, ()| this.slot.free().raise());
        methods.add_method_mut("destroy", |_, this, ()| this.slot.free().raise());
    }
}

/// `GPU.Program`: a shader program.
#[derive(Debug)]
pub struct LuaProgram {
    pub(crate) slot: Slot<ProgramHandle>,
}

impl LuaProgram {
    pub(crate) fn owned(session: &Rc<Session>, handle: ProgramHandle) -> Self {
        Self { slot: Slot::owned(session, handle) }
    }

    pub(crate) fn link_many(session: &Rc<Session>, shaders: &[UserDataRef<LuaShader>]) -> mlua::Result<Self> {
        let handles = shaders.iter().map(|s| s.slot.get()).collect::<Result<Vec<_>, _>>()?;
        let program = session.backend().link_many_shaders(&handles).raise()?;
        Ok(Self::owned(session, program))
    }

    /// `Program.new()`, `Program.new({shaders})`, `Program.new(a, b)`.
    fn from_args(lua: &Lua, args: MultiValue) -> mlua::Result<Self> {
        let session = Session::of(lua)?;
        match args.len() {
            0 => {
                let program = session.backend().create_program().raise()?;
                Ok(Self::owned(&session, program))
            }
            1 => {
                let shaders: Vec<UserDataRef<LuaShader>> = lua.unpack_multi(args)?;
                Self::link_many(&session, &shaders)
            }
            2 => {
                let (a, b): (UserDataRef<LuaShader>, UserDataRef<LuaShader>) = lua.unpack_multi(args)?;
                let program = session.backend().link_shaders(a.slot.get()?, b.slot.get()?).raise()?;
                Ok(Self::owned(&session, program))
            }
            n => Err(BindingError::arity("Program.new", "0, 1 or 2", n).into()),
        }
    }
}

impl UserData for LuaProgram {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("id", |_, this| Ok(this.slot.get()?.raw()));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("new", LuaProgram::from_args);

        methods.add_method_mut("free", |_, this, ()| this.slot.free().raise());
        methods.add_method_mut("destroy", |_, this, ()| this.slot.free().raise());

        methods.add_method("attach", |_, this, shader: UserDataRef<LuaShader>| {
            this.slot.backend().attach_shader(this.slot.get()?, shader.slot.get()?).raise()
        });
        methods.add_method("detach", |_, this, shader: UserDataRef<LuaShader>| {
            this.slot.backend().detach_shader(this.slot.get()?, shader.slot.get()?).raise()
        });
        methods.add_method("link", |_, this, ()| this.slot.backend().link_program(this.slot.get()?).raise());
        methods.add_method("activate", |_, this, block: Option<UserDataRef<LuaShaderBlock>>| {
            let block = block.map(|b| b.0);
            this.slot.backend().activate_program(this.slot.get()?, block).raise()
        });
        methods.add_method("is_default", |_, this, ()| Ok(this.slot.backend().is_default_program(this.slot.get()?)));
        methods.add_method("attribute_location", |_, this, name: String| {
            this.slot.backend().attribute_location(this.slot.get()?, &name).raise()
        });
        methods.add_method("uniform_location", |_, this, name: String| {
            this.slot.backend().uniform_location(this.slot.get()?, &name).raise()
        });
        methods.add_method(
            "load_shader_block",
            |_, this, (position, texcoord, color, mvp): (String, String, String, String)| {
                let block = this
                    .slot
                    .backend()
                    .load_shader_block(this.slot.get()?, &position, &texcoord, &color, &mvp)
                    .raise()?;
                Ok(LuaShaderBlock(block))
            },
        );
    }
}

/// `ShaderBlock`: standard attribute and uniform locations of a program.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LuaShaderBlock(pub ShaderBlock);

impl UserData for LuaShaderBlock {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        value_fields!(fields, position_loc: i32, texcoord_loc: i32, color_loc: i32, modelview_projection_loc: i32);
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("new", |_, v: Variadic<i32>| match v.len() {
            0 => Ok(LuaShaderBlock(ShaderBlock::default())),
            4 => Ok(LuaShaderBlock(ShaderBlock::new(v[0], v[1], v[2], v[3]))),
            n => Err(BindingError::arity("ShaderBlock.new", "0 or 4", n).into()),
        });
        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| Ok(super::same_value(this, &other)));
    }
}

/// `AttributeFormat`: layout of one vertex attribute stream.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LuaAttributeFormat(pub AttributeFormat);

impl LuaAttributeFormat {
    pub(crate) fn new(
        function: &'static str,
        (elems, kind, normalize, stride, offset): (i32, u32, bool, i32, i32),
    ) -> Result<Self, BindingError> {
        let kind: DataType = enum_arg(function, "data type", kind)?;
        Ok(Self(AttributeFormat::new(elems, kind, normalize, stride, offset)))
    }
}

impl UserData for LuaAttributeFormat {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        value_fields!(fields, is_per_sprite: bool, num_elems_per_value: i32, normalize: bool, stride_bytes: i32, offset_bytes: i32);
        fields.add_field_method_get("type", |_, this| Ok(u32::from(this.0.kind)));
        fields.add_field_method_set("type", |_, this, kind: u32| {
            this.0.kind = enum_arg("AttributeFormat.type", "data type", kind)?;
            Ok(())
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("new", |_, args: (i32, u32, bool, i32, i32)| {
            Ok(LuaAttributeFormat::new("AttributeFormat.new", args)?)
        });
        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| Ok(super::same_value(this, &other)));
    }
}

/// `Attribute`: a location, a format and an owned copy of the vertex data.
#[derive(Debug, Clone, PartialEq)]
pub struct LuaAttribute(pub Attribute);

impl LuaAttribute {
    pub(crate) fn new(location: i32, values: &[f64], format: &LuaAttributeFormat) -> Self {
        Self(Attribute::new(location, values, format.0))
    }
}

impl UserData for LuaAttribute {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        value_fields!(fields, location: i32);
        fields.add_field_method_get("format", |_, this| Ok(LuaAttributeFormat(this.0.format)));
        fields.add_field_method_get("num_elements", |_, this| Ok(this.0.len()));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function(
            "new",
            |_, (location, values, format): (i32, Vec<f64>, UserDataRef<LuaAttributeFormat>)| {
                Ok(LuaAttribute::new(location, &values, &format))
            },
        );
        methods.add_meta_method(MetaMethod::Len, |_, this, ()| Ok(this.0.len()));
    }
}
