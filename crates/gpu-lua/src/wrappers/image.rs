use std::rc::Rc;

use gpu_native::types::{BlendEq, BlendFunc, FileFormat, FilterMode, ImageFormat, ImageInfo, SnapMode, WrapMode};
use gpu_native::ImageHandle;
use mlua::{AnyUserData, Lua, MetaMethod, MultiValue, UserData, UserDataFields, UserDataMethods, UserDataRef};

use crate::args::{color, color_table, enum_arg};
use crate::error::{BindingError, Raise};
use crate::session::{Session, Slot};

use super::{LuaBlendMode, LuaRect, LuaRenderer, LuaTarget};

/// `GPU.Image`: a texture.
///
/// Owned when the script created it (`Image.new`, `copy`, `create_alias`,
/// `Target:to_image`); borrowed when reached through `target.image`.
#[derive(Debug)]
pub struct LuaImage {
    pub(crate) slot: Slot<ImageHandle>,
}

impl LuaImage {
    pub(crate) fn owned(session: &Rc<Session>, handle: ImageHandle) -> Self {
        Self { slot: Slot::owned(session, handle) }
    }

    pub(crate) fn borrowed(session: &Rc<Session>, handle: ImageHandle) -> Self {
        Self { slot: Slot::borrowed(session, handle) }
    }

    pub(crate) fn load(session: &Rc<Session>, path: &str) -> mlua::Result<Self> {
        let image = session.backend().load_image(path).raise()?;
        Ok(Self::owned(session, image))
    }

    /// `Image.new(path)` or `Image.new(w, h, format)`.
    fn from_args(lua: &Lua, args: MultiValue) -> mlua::Result<Self> {
        let session = Session::of(lua)?;
        match args.len() {
            1 => {
                let path: String = lua.unpack_multi(args)?;
                Self::load(&session, &path)
            }
            3 => {
                let (w, h, format): (u16, u16, i32) = lua.unpack_multi(args)?;
                let format: ImageFormat = enum_arg("Image.new", "image format", format)?;
                let image = session.backend().create_image(w, h, format).raise()?;
                Ok(Self::owned(&session, image))
            }
            n => Err(BindingError::arity("Image.new", "1 or 3", n).into()),
        }
    }

    #[inline]
    fn handle(&self) -> mlua::Result<ImageHandle> {
        Ok(self.slot.get()?)
    }

    fn info(&self) -> mlua::Result<ImageInfo> {
        self.slot.backend().image_info(self.handle()?).raise()
    }

    pub(crate) fn create_alias(&self) -> mlua::Result<Self> {
        let alias = self.slot.backend().create_alias_image(self.handle()?).raise()?;
        Ok(Self::owned(self.slot.session(), alias))
    }

    pub(crate) fn copy(&self) -> mlua::Result<Self> {
        let copy = self.slot.backend().copy_image(self.handle()?).raise()?;
        Ok(Self::owned(self.slot.session(), copy))
    }
}

impl UserData for LuaImage {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("w", |_, this| Ok(this.info()?.w));
        fields.add_field_method_get("h", |_, this| Ok(this.info()?.h));
        fields.add_field_method_get("base_w", |_, this| Ok(this.info()?.base_w));
        fields.add_field_method_get("base_h", |_, this| Ok(this.info()?.base_h));
        fields.add_field_method_get("texture_w", |_, this| Ok(this.info()?.texture_w));
        fields.add_field_method_get("texture_h", |_, this| Ok(this.info()?.texture_h));
        fields.add_field_method_get("format", |_, this| Ok(i32::from(this.info()?.format)));
        fields.add_field_method_get("num_layers", |_, this| Ok(this.info()?.num_layers));
        fields.add_field_method_get("bytes_per_pixel", |_, this| Ok(this.info()?.bytes_per_pixel));
        fields.add_field_method_get("has_mipmaps", |_, this| Ok(this.info()?.has_mipmaps));
        fields.add_field_method_get("using_virtual_resolution", |_, this| Ok(this.info()?.using_virtual_resolution));
        fields.add_field_method_get("refcount", |_, this| Ok(this.info()?.refcount));
        fields.add_field_method_get("is_alias", |_, this| Ok(this.info()?.is_alias));
        fields.add_field_method_get("color", |lua, this| color_table(lua, this.info()?.color));
        fields.add_field_method_get("blend_mode", |_, this| Ok(LuaBlendMode(this.info()?.blend_mode)));
        fields.add_field_method_get("renderer", |_, this| {
            Ok(this.info()?.renderer.map(|r| LuaRenderer::new(this.slot.session(), r)))
        });
        fields.add_field_method_get("target", |_, this| {
            Ok(this.info()?.target.map(|t| LuaTarget::borrowed(this.slot.session(), t)))
        });

        fields.add_field_method_get("blending", |_, this| Ok(this.info()?.use_blending));
        fields.add_field_method_set("blending", |_, this, enable: bool| {
            this.slot.backend().set_image_blending(this.handle()?, enable).raise()
        });
        fields.add_field_method_get("filter_mode", |_, this| Ok(i32::from(this.info()?.filter_mode)));
        fields.add_field_method_set("filter_mode", |_, this, mode: i32| {
            let mode: FilterMode = enum_arg("Image.filter_mode", "filter mode", mode)?;
            this.slot.backend().set_image_filter(this.handle()?, mode).raise()
        });
        fields.add_field_method_get("snap_mode", |_, this| Ok(i32::from(this.info()?.snap_mode)));
        fields.add_field_method_set("snap_mode", |_, this, mode: i32| {
            let mode: SnapMode = enum_arg("Image.snap_mode", "snap mode", mode)?;
            this.slot.backend().set_image_snap(this.handle()?, mode).raise()
        });
        fields.add_field_method_get("wrap_mode_x", |_, this| Ok(i32::from(this.info()?.wrap_mode_x)));
        fields.add_field_method_set("wrap_mode_x", |_, this, mode: i32| {
            let x: WrapMode = enum_arg("Image.wrap_mode_x", "wrap mode", mode)?;
            let y = this.info()?.wrap_mode_y;
            this.slot.backend().set_image_wrap(this.handle()?, x, y).raise()
        });
        fields.add_field_method_get("wrap_mode_y", |_, this| Ok(i32::from(this.info()?.wrap_mode_y)));
        fields.add_field_method_set("wrap_mode_y", |_, this, mode: i32| {
            let y: WrapMode = enum_arg("Image.wrap_mode_y", "wrap mode", mode)?;
            let x = this.info()?.wrap_mode_x;
            this.slot.backend().set_image_wrap(this.handle()?, x, y).raise()
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("new", LuaImage::from_args);

        methods.add_method_mut("free", |_, this, ()| this.slot.free().raise());
        methods.add_method_mut("destroy", |_, this, ()| this.slot.free().raise());
        methods.add_method("create_alias", |_, this, ()| this.create_alias());
        methods.add_method("copy", |_, this, ()| this.copy());

        methods.add_method("save", |_, this, (filename, format): (String, Option<i32>)| {
            let format: FileFormat = enum_arg("Image:save", "file format", format.unwrap_or(0))?;
            this.slot.backend().save_image(this.handle()?, &filename, format).raise()
        });
        methods.add_method("generate_mipmaps", |_, this, ()| {
            this.slot.backend().generate_mipmaps(this.handle()?).raise()
        });

        methods.add_method("set_rgb", |_, this, (r, g, b): (i64, i64, i64)| {
            this.slot.backend().set_image_color(this.handle()?, Some(color(r, g, b, 255))).raise()
        });
        methods.add_method("set_rgba", |_, this, (r, g, b, a): (i64, i64, i64, i64)| {
            this.slot.backend().set_image_color(this.handle()?, Some(color(r, g, b, a))).raise()
        });
        methods.add_method("unset_color", |_, this, ()| this.slot.backend().set_image_color(this.handle()?, None).raise());

        methods.add_method("set_blend_function", |_, this, (sc, dc, sa, da): (i32, i32, i32, i32)| {
            const FUNC: &str = "Image:set_blend_function";
            let f = |v| enum_arg::<BlendFunc, i32>(FUNC, "blend function", v);
            this.slot.backend().set_image_blend_function(this.handle()?, f(sc)?, f(dc)?, f(sa)?, f(da)?).raise()
        });
        methods.add_method("set_blend_equation", |_, this, (ce, ae): (i32, i32)| {
            const FUNC: &str = "Image:set_blend_equation";
            let e = |v| enum_arg::<BlendEq, i32>(FUNC, "blend equation", v);
            this.slot.backend().set_image_blend_equation(this.handle()?, e(ce)?, e(ae)?).raise()
        });
        methods.add_method("set_blend_mode", |_, this, preset: i32| {
            let preset = enum_arg("Image:set_blend_mode", "blend preset", preset)?;
            this.slot.backend().set_image_blend_mode(this.handle()?, preset).raise()
        });
        methods.add_method("set_wrap_mode", |_, this, (x, y): (i32, i32)| {
            const FUNC: &str = "Image:set_wrap_mode";
            let (x, y) = (enum_arg(FUNC, "wrap mode", x)?, enum_arg(FUNC, "wrap mode", y)?);
            this.slot.backend().set_image_wrap(this.handle()?, x, y).raise()
        });

        methods.add_method("set_virtual_resolution", |_, this, (w, h): (u16, u16)| {
            this.slot.backend().set_image_virtual_resolution(this.handle()?, w, h).raise()
        });
        methods.add_method("unset_virtual_resolution", |_, this, ()| {
            this.slot.backend().unset_image_virtual_resolution(this.handle()?).raise()
        });
        methods.add_method(
            "update_bytes",
            |_, this, (rect, bytes, bytes_per_row): (Option<UserDataRef<LuaRect>>, mlua::String, i32)| {
                let rect = rect.map(|r| r.0);
                this.slot.backend().update_image_bytes(this.handle()?, rect, &bytes.as_bytes(), bytes_per_row).raise()
            },
        );

        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| {
            let other = other.borrow::<LuaImage>().ok().and_then(|o| o.slot.get().ok());
            Ok(other.is_some() && other == this.slot.get().ok())
        });
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            Ok(match this.info() {
                Ok(info) => format!("Image({}x{})", info.w, info.h),
                Err(_) => "Image(released)".to_owned(),
            })
        });
    }
}
