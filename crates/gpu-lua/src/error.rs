use gpu_native::NativeError;
use thiserror::Error;

/// Errors raised into Lua by the bindings.
#[derive(Debug, Error)]
pub enum BindingError {
    /// No overload of `function` takes `got` arguments.
    #[error("{function}: expected {expected} arguments, got {got}")]
    Arity { function: &'static str, expected: &'static str, got: usize },

    #[error("{function}: {details}")]
    Argument { function: &'static str, details: String },

    #[error(transparent)]
    Native(#[from] NativeError),

    /// Reserved for SDL_gpu entry points a build leaves unbound; every
    /// function the module registers today is bound.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("{0} has already been freed")]
    Freed(&'static str),

    #[error("stale {0}: the renderer session it belongs to was closed")]
    Stale(&'static str),
}

impl BindingError {
    pub(crate) fn arity(function: &'static str, expected: &'static str, got: usize) -> Self {
        Self::Arity { function, expected, got }
    }

    pub(crate) fn argument(function: &'static str, details: impl Into<String>) -> Self {
        Self::Argument { function, details: details.into() }
    }
}

impl From<BindingError> for mlua::Error {
    fn from(err: BindingError) -> Self {
        mlua::Error::external(err)
    }
}

/// Turns a backend result into a Lua result, logging native failures.
pub(crate) trait Raise<T> {
    fn raise(self) -> mlua::Result<T>;
}

impl<T> Raise<T> for gpu_native::error::Result<T> {
    fn raise(self) -> mlua::Result<T> {
        self.map_err(|err| {
            log::warn!("{err}");
            BindingError::Native(err).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_failure_message_carries_details() {
        let err = BindingError::from(NativeError::failed("GPU_LoadImage", "failed to load 'x.png'"));
        assert_eq!(err.to_string(), "GPU_LoadImage failed: failed to load 'x.png'");
    }

    #[test]
    fn arity_message() {
        let err = BindingError::arity("Target:blit", "4, 5, 6, 7 or 9", 8);
        assert_eq!(err.to_string(), "Target:blit: expected 4, 5, 6, 7 or 9 arguments, got 8");
    }

    #[test]
    fn not_implemented_names_the_entry_point() {
        let err = mlua::Error::from(BindingError::NotImplemented("GPU_SetWindowResolution"));
        assert!(err.to_string().contains("GPU_SetWindowResolution is not implemented"), "{err}");
    }
}
