use std::rc::Rc;

use gpu_native::coords::{Color, Rect};
use gpu_native::draw::{BlitTransform, Shape};
use gpu_native::types::{BatchFlags, TargetInfo};
use gpu_native::{ImageHandle, TargetHandle};
use mlua::{AnyUserData, Lua, MetaMethod, MultiValue, UserData, UserDataFields, UserDataMethods, UserDataRef};

use crate::args::{color, color_table, flags_arg, vertex_pairs};
use crate::error::{BindingError, Raise};
use crate::session::{Session, Slot};

use super::{LuaCamera, LuaContext, LuaImage, LuaRect};

/// Upper bound on the strips one gradient fill issues.
pub(crate) const MAX_GRADIENT_STRIPS: u32 = 16_384;

/// A render target: a window or an image being drawn into.
#[derive(Debug)]
pub struct LuaTarget {
    pub(crate) slot: Slot<TargetHandle>,
}

impl LuaTarget {
    pub(crate) fn owned(session: &Rc<Session>, handle: TargetHandle) -> Self {
        Self { slot: Slot::owned(session, handle) }
    }

    pub(crate) fn borrowed(session: &Rc<Session>, handle: TargetHandle) -> Self {
        Self { slot: Slot::borrowed(session, handle) }
    }

    #[inline]
    pub(crate) fn handle(&self) -> mlua::Result<TargetHandle> {
        Ok(self.slot.get()?)
    }

    fn info(&self) -> mlua::Result<TargetInfo> {
        self.slot.backend().target_info(self.handle()?).raise()
    }

    fn draw(&self, shape: Shape, color: Color) -> mlua::Result<()> {
        self.slot.backend().draw(self.handle()?, &shape, color).raise()
    }

    fn clear_with(&self, color: Option<Color>) -> mlua::Result<()> {
        self.slot.backend().clear(self.handle()?, color).raise()
    }

    /// `clear()`, `clear(r, g, b)` or `clear(r, g, b, a)`.
    fn clear(&self, lua: &Lua, args: MultiValue) -> mlua::Result<()> {
        match args.len() {
            0 => self.clear_with(None),
            3 => {
                let (r, g, b): (i64, i64, i64) = lua.unpack_multi(args)?;
                self.clear_with(Some(color(r, g, b, 255)))
            }
            4 => {
                let (r, g, b, a): (i64, i64, i64, i64) = lua.unpack_multi(args)?;
                self.clear_with(Some(color(r, g, b, a)))
            }
            n => Err(BindingError::arity("Target:clear", "0, 3 or 4", n).into()),
        }
    }

    /// `blit(image, src|nil, x, y [, ...])`; the arity picks the transform.
    fn blit(&self, lua: &Lua, args: MultiValue) -> mlua::Result<()> {
        type Head = (UserDataRef<LuaImage>, Option<UserDataRef<LuaRect>>, f32, f32);

        let (image, src, x, y, transform) = match args.len() {
            4 => {
                let (image, src, x, y): Head = lua.unpack_multi(args)?;
                (image, src, x, y, BlitTransform::None)
            }
            5 => {
                let (image, src, x, y, degrees): (UserDataRef<LuaImage>, Option<UserDataRef<LuaRect>>, f32, f32, f32) =
                    lua.unpack_multi(args)?;
                (image, src, x, y, BlitTransform::Rotate { degrees })
            }
            6 => {
                let (image, src, x, y, scale_x, scale_y): (
                    UserDataRef<LuaImage>,
                    Option<UserDataRef<LuaRect>>,
                    f32,
                    f32,
                    f32,
                    f32,
                ) = lua.unpack_multi(args)?;
                (image, src, x, y, BlitTransform::Scale { scale_x, scale_y })
            }
            7 => {
                let (image, src, x, y, scale_x, scale_y, degrees): (
                    UserDataRef<LuaImage>,
                    Option<UserDataRef<LuaRect>>,
                    f32,
                    f32,
                    f32,
                    f32,
                    f32,
                ) = lua.unpack_multi(args)?;
                (image, src, x, y, BlitTransform::Transform { degrees, scale_x, scale_y })
            }
            9 => {
                let (image, src, x, y, scale_x, scale_y, degrees, pivot_x, pivot_y): (
                    UserDataRef<LuaImage>,
                    Option<UserDataRef<LuaRect>>,
                    f32,
                    f32,
                    f32,
                    f32,
                    f32,
                    f32,
                    f32,
                ) = lua.unpack_multi(args)?;
                (image, src, x, y, BlitTransform::TransformX { pivot_x, pivot_y, degrees, scale_x, scale_y })
            }
            n => return Err(BindingError::arity("Target:blit", "4, 5, 6, 7 or 9", n).into()),
        };
        let src = src.map(|r| r.0);
        self.slot.backend().blit(self.handle()?, image.slot.get()?, src, x, y, transform).raise()
    }

    /// `rect_round(x1, y1, x2, y2, radius, r, g, b, a)` or `rect_round(rect, radius, r, g, b, a)`.
    fn rect_round(&self, lua: &Lua, args: MultiValue, filled: bool) -> mlua::Result<()> {
        let function = if filled { "Target:rect_round_filled" } else { "Target:rect_round" };
        match args.len() {
            9 => {
                let (x1, y1, x2, y2, radius, r, g, b, a): (f32, f32, f32, f32, f32, i64, i64, i64, i64) =
                    lua.unpack_multi(args)?;
                self.draw(Shape::RectangleRound { x1, y1, x2, y2, radius, filled }, color(r, g, b, a))
            }
            6 => {
                let (rect, radius, r, g, b, a): (UserDataRef<LuaRect>, f32, i64, i64, i64, i64) =
                    lua.unpack_multi(args)?;
                self.draw(Shape::RectangleRound2 { rect: rect.0, radius, filled }, color(r, g, b, a))
            }
            n => Err(BindingError::arity(function, "6 or 9", n).into()),
        }
    }

    /// `ellipse(x, y, rx, ry, r, g, b, a [, degrees])`.
    fn ellipse(&self, lua: &Lua, args: MultiValue, filled: bool) -> mlua::Result<()> {
        let function = if filled { "Target:ellipse_filled" } else { "Target:ellipse" };
        let (x, y, rx, ry, r, g, b, a, degrees) = match args.len() {
            8 => {
                let (x, y, rx, ry, r, g, b, a): (f32, f32, f32, f32, i64, i64, i64, i64) = lua.unpack_multi(args)?;
                (x, y, rx, ry, r, g, b, a, 0.0)
            }
            9 => lua.unpack_multi::<(f32, f32, f32, f32, i64, i64, i64, i64, f32)>(args)?,
            n => return Err(BindingError::arity(function, "8 or 9", n).into()),
        };
        self.draw(Shape::Ellipse { x, y, rx, ry, degrees, filled }, color(r, g, b, a))
    }

    /// Fills `rect` with one-pixel strips interpolated from `from` to `to`:
    /// rows when `vertical`, columns otherwise. A fractional extent ends in a
    /// narrower strip; nothing past [`MAX_GRADIENT_STRIPS`] is drawn.
    pub(crate) fn gradient_fill_rect(&self, from: Color, to: Color, rect: Rect, vertical: bool) -> mlua::Result<()> {
        let extent = if vertical { rect.h } else { rect.w };
        // Saturating cast: NaN and negative extents give zero strips.
        let strips = (extent.ceil() as u32).min(MAX_GRADIENT_STRIPS);
        for i in 0..strips {
            let offset = i as f32;
            let size = (extent - offset).min(1.0);
            let strip = if vertical {
                Rect::new(rect.x, rect.y + offset, rect.w, size)
            } else {
                Rect::new(rect.x + offset, rect.y, size, rect.h)
            };
            self.draw(Shape::Rectangle2 { rect: strip, filled: true }, from.lerp(to, offset / extent))?;
        }
        Ok(())
    }

    fn triangle_batch(
        &self,
        image: Option<ImageHandle>,
        values: &[f32],
        indices: Option<&[u16]>,
        flags: u32,
    ) -> mlua::Result<()> {
        let flags: BatchFlags = flags_arg("Target:triangle_batch", "batch layout", flags)?;
        self.slot.backend().triangle_batch(self.handle()?, image, values, indices, flags).raise()
    }
}

impl UserData for LuaTarget {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("w", |_, this| Ok(this.info()?.w));
        fields.add_field_method_get("h", |_, this| Ok(this.info()?.h));
        fields.add_field_method_get("base_w", |_, this| Ok(this.info()?.base_w));
        fields.add_field_method_get("base_h", |_, this| Ok(this.info()?.base_h));
        fields.add_field_method_get("using_virtual_resolution", |_, this| Ok(this.info()?.using_virtual_resolution));
        fields.add_field_method_get("is_alias", |_, this| Ok(this.info()?.is_alias));
        fields.add_field_method_get("refcount", |_, this| Ok(this.info()?.refcount));
        fields.add_field_method_get("viewport", |_, this| Ok(LuaRect(this.info()?.viewport)));
        fields.add_field_method_get("clip_rect", |_, this| Ok(this.info()?.clip_rect.map(LuaRect)));
        fields.add_field_method_get("color", |lua, this| {
            this.info()?.color.map(|c| color_table(lua, c)).transpose()
        });
        fields.add_field_method_get("image", |_, this| {
            Ok(this.info()?.image.map(|i| LuaImage::borrowed(this.slot.session(), i)))
        });
        fields.add_field_method_get("camera", |_, this| {
            this.slot.backend().camera(this.handle()?).map(LuaCamera).raise()
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        // ── lifetime / context ──────────────────────────────────────────

        methods.add_method_mut("free", |_, this, ()| this.slot.free().raise());
        methods.add_method_mut("destroy", |_, this, ()| this.slot.free().raise());
        methods.add_method("make_current", |_, this, window_id: u32| {
            this.slot.backend().make_current(this.handle()?, window_id).raise()
        });
        methods.add_method("context", |_, this, ()| {
            Ok(this.slot.backend().context_info(this.handle()?).raise()?.map(LuaContext))
        });
        methods.add_method("to_image", |_, this, ()| {
            let image = this.slot.backend().copy_image_from_target(this.handle()?).raise()?;
            Ok(LuaImage::owned(this.slot.session(), image))
        });

        // ── view state ──────────────────────────────────────────────────

        methods.add_method("set_virtual_resolution", |_, this, (w, h): (u16, u16)| {
            this.slot.backend().set_target_virtual_resolution(this.handle()?, w, h).raise()
        });
        methods.add_method("unset_virtual_resolution", |_, this, ()| {
            this.slot.backend().unset_target_virtual_resolution(this.handle()?).raise()
        });
        methods.add_method("get_virtual_coords", |_, this, (x, y): (f32, f32)| {
            this.slot.backend().virtual_coords(this.handle()?, x, y).raise()
        });
        methods.add_method("set_viewport", |_, this, rect: UserDataRef<LuaRect>| {
            this.slot.backend().set_viewport(this.handle()?, rect.0).raise()
        });
        methods.add_method("set_camera", |_, this, camera: Option<UserDataRef<LuaCamera>>| {
            let previous = this.slot.backend().set_camera(this.handle()?, camera.map(|c| c.0)).raise()?;
            Ok(LuaCamera(previous))
        });
        methods.add_method("get_pixel", |lua, this, (x, y): (i16, i16)| {
            let c = this.slot.backend().pixel(this.handle()?, x, y).raise()?;
            color_table(lua, c)
        });
        methods.add_method("set_clip_rect", |_, this, rect: UserDataRef<LuaRect>| {
            this.slot.backend().set_clip_rect(this.handle()?, rect.0).map(LuaRect).raise()
        });
        methods.add_method("set_clip", |_, this, (x, y, w, h): (f32, f32, f32, f32)| {
            this.slot.backend().set_clip_rect(this.handle()?, Rect::new(x, y, w, h)).map(LuaRect).raise()
        });
        methods.add_method("unset_clip", |_, this, ()| this.slot.backend().unset_clip(this.handle()?).raise());
        methods.add_method("set_rgb", |_, this, (r, g, b): (i64, i64, i64)| {
            this.slot.backend().set_target_color(this.handle()?, Some(color(r, g, b, 255))).raise()
        });
        methods.add_method("set_rgba", |_, this, (r, g, b, a): (i64, i64, i64, i64)| {
            this.slot.backend().set_target_color(this.handle()?, Some(color(r, g, b, a))).raise()
        });
        methods.add_method("unset_color", |_, this, ()| {
            this.slot.backend().set_target_color(this.handle()?, None).raise()
        });

        // ── frame ───────────────────────────────────────────────────────

        methods.add_method("clear", |lua, this, args: MultiValue| this.clear(lua, args));
        methods.add_method("clear_rgb", |_, this, (r, g, b): (i64, i64, i64)| {
            this.clear_with(Some(color(r, g, b, 255)))
        });
        methods.add_method("clear_rgba", |_, this, (r, g, b, a): (i64, i64, i64, i64)| {
            this.clear_with(Some(color(r, g, b, a)))
        });
        methods.add_method("flip", |_, this, ()| this.slot.backend().flip(this.handle()?).raise());

        // ── blits ───────────────────────────────────────────────────────

        methods.add_method("blit", |lua, this, args: MultiValue| this.blit(lua, args));
        methods.add_method(
            "blit_rect",
            |_,
             this,
             (image, src, dest): (UserDataRef<LuaImage>, Option<UserDataRef<LuaRect>>, Option<UserDataRef<LuaRect>>)| {
                let (src, dest) = (src.map(|r| r.0), dest.map(|r| r.0));
                this.slot.backend().blit_rect(this.handle()?, image.slot.get()?, src, dest).raise()
            },
        );
        methods.add_method(
            "triangle_batch",
            |_, this, (image, values, indices, flags): (Option<UserDataRef<LuaImage>>, Vec<f32>, Option<Vec<u16>>, u32)| {
                let image = image.map(|i| i.slot.get()).transpose()?;
                this.triangle_batch(image, &values, indices.as_deref(), flags)
            },
        );

        // ── shapes ──────────────────────────────────────────────────────

        methods.add_method("pixel", |_, this, (x, y, r, g, b, a): (f32, f32, i64, i64, i64, i64)| {
            this.draw(Shape::Pixel { x, y }, color(r, g, b, a))
        });
        methods.add_method(
            "line",
            |_, this, (x1, y1, x2, y2, r, g, b, a): (f32, f32, f32, f32, i64, i64, i64, i64)| {
                this.draw(Shape::Line { x1, y1, x2, y2 }, color(r, g, b, a))
            },
        );
        for (name, filled) in [("arc", false), ("arc_filled", true)] {
            methods.add_method(
                name,
                move |_,
                      this,
                      (x, y, radius, start_angle, end_angle, r, g, b, a): (
                    f32,
                    f32,
                    f32,
                    f32,
                    f32,
                    i64,
                    i64,
                    i64,
                    i64,
                )| {
                    this.draw(Shape::Arc { x, y, radius, start_angle, end_angle, filled }, color(r, g, b, a))
                },
            );
        }
        for (name, filled) in [("circle", false), ("circle_filled", true)] {
            methods.add_method(
                name,
                move |_, this, (x, y, radius, r, g, b, a): (f32, f32, f32, i64, i64, i64, i64)| {
                    this.draw(Shape::Circle { x, y, radius, filled }, color(r, g, b, a))
                },
            );
        }
        for (name, filled) in [("ellipse", false), ("ellipse_filled", true)] {
            methods.add_method(name, move |lua, this, args: MultiValue| this.ellipse(lua, args, filled));
        }
        for (name, filled) in [("sector", false), ("sector_filled", true)] {
            methods.add_method(
                name,
                move |_,
                      this,
                      (x, y, inner_radius, outer_radius, start_angle, end_angle, r, g, b, a): (
                    f32,
                    f32,
                    f32,
                    f32,
                    f32,
                    f32,
                    i64,
                    i64,
                    i64,
                    i64,
                )| {
                    let shape = Shape::Sector { x, y, inner_radius, outer_radius, start_angle, end_angle, filled };
                    this.draw(shape, color(r, g, b, a))
                },
            );
        }
        for (name, filled) in [("tri", false), ("tri_filled", true)] {
            methods.add_method(
                name,
                move |_,
                      this,
                      (x1, y1, x2, y2, x3, y3, r, g, b, a): (f32, f32, f32, f32, f32, f32, i64, i64, i64, i64)| {
                    this.draw(Shape::Tri { x1, y1, x2, y2, x3, y3, filled }, color(r, g, b, a))
                },
            );
        }
        for (name, filled) in [("rect", false), ("rect_filled", true)] {
            methods.add_method(
                name,
                move |_, this, (x1, y1, x2, y2, r, g, b, a): (f32, f32, f32, f32, i64, i64, i64, i64)| {
                    this.draw(Shape::Rectangle { x1, y1, x2, y2, filled }, color(r, g, b, a))
                },
            );
        }
        for (name, filled) in [("rect2", false), ("rect_filled2", true)] {
            methods.add_method(
                name,
                move |_, this, (rect, r, g, b, a): (UserDataRef<LuaRect>, i64, i64, i64, i64)| {
                    this.draw(Shape::Rectangle2 { rect: rect.0, filled }, color(r, g, b, a))
                },
            );
        }
        for (name, filled) in [("rect_round", false), ("rect_round_filled", true)] {
            methods.add_method(name, move |lua, this, args: MultiValue| this.rect_round(lua, args, filled));
        }
        for (name, filled) in [("polygon", false), ("polygon_filled", true)] {
            methods.add_method(
                name,
                move |_, this, (vertices, r, g, b, a): (Vec<f32>, i64, i64, i64, i64)| {
                    let vertices = vertex_pairs(if filled { "Target:polygon_filled" } else { "Target:polygon" }, vertices)?;
                    this.draw(Shape::Polygon { vertices, filled }, color(r, g, b, a))
                },
            );
        }
        methods.add_method(
            "gradient_fill_rect",
            |_,
             this,
             (r1, g1, b1, a1, r2, g2, b2, a2, rect, vertical): (
                i64,
                i64,
                i64,
                i64,
                i64,
                i64,
                i64,
                i64,
                UserDataRef<LuaRect>,
                bool,
            )| { this.gradient_fill_rect(color(r1, g1, b1, a1), color(r2, g2, b2, a2), rect.0, vertical) },
        );

        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| {
            let other = other.borrow::<LuaTarget>().ok().and_then(|o| o.slot.get().ok());
            Ok(other.is_some() && other == this.slot.get().ok())
        });
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            Ok(match this.info() {
                Ok(info) => format!("Target({}x{})", info.w, info.h),
                Err(_) => "Target(released)".to_owned(),
            })
        });
    }
}
