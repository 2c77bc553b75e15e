//! Opaque native handles.
//!
//! A handle is only an identifier: it carries no lifetime and is `Copy`.
//! Ownership (who frees it, and when) is tracked by the script wrappers.
//! Pointer-backed handles store the address as `u64`; shader objects are the
//! native `u32` ids.

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident($raw:ty)) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name($raw);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: $raw) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> $raw {
                self.0
            }
        }
    };
}

handle!(
    /// A render target (`GPU_Target*`).
    TargetHandle(u64)
);
handle!(
    /// A texture (`GPU_Image*`).
    ImageHandle(u64)
);
handle!(
    /// A live renderer (`GPU_Renderer*`).
    RendererHandle(u64)
);
handle!(
    /// A compiled shader object.
    ShaderHandle(u32)
);
handle!(
    /// A linked (or linkable) shader program object.
    ProgramHandle(u32)
);
