use std::rc::Rc;

use anyhow::{Context, bail};
use gpu_lua::Session;
use gpu_native::Backend;
use gpu_native::headless::Headless;
use gpu_native::logging::{LoggingConfig, init_logging};
use mlua::Lua;

const USAGE: &str = "usage: gpu-run <script.lua> [--sdl] [--log <filter>]";

#[derive(Debug, Default, PartialEq)]
struct Options {
    script: String,
    sdl: bool,
    log_filter: Option<String>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut script = None;
        let mut opts = Options::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--sdl" => opts.sdl = true,
                "--log" => opts.log_filter = Some(args.next().context("--log needs a filter")?),
                flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
                _ if script.is_some() => bail!("only one script can be run\n{USAGE}"),
                _ => script = Some(arg),
            }
        }

        opts.script = script.context(USAGE)?;
        Ok(opts)
    }
}

fn backend(sdl: bool) -> anyhow::Result<Rc<dyn Backend>> {
    if sdl {
        #[cfg(feature = "sdl-gpu")]
        return Ok(Rc::new(gpu_native::ffi::SdlGpu::new()));
        #[cfg(not(feature = "sdl-gpu"))]
        bail!("--sdl needs gpu-run built with the `sdl-gpu` feature");
    }
    Ok(Rc::new(Headless::new()))
}

// mlua errors are not `Send` without the `send` feature, which the
// `Rc`-holding wrappers rule out, so they are flattened into text here.
fn lua_error(err: mlua::Error) -> anyhow::Error {
    anyhow::anyhow!("{err}")
}

fn run(name: &str, source: &str, backend: &Rc<dyn Backend>) -> anyhow::Result<()> {
    let session = Session::new(Rc::clone(backend));

    let lua = Lua::new();
    gpu_lua::install(&lua, session).map_err(lua_error).context("installing the GPU module")?;

    let result = lua.load(source).set_name(format!("@{name}")).exec();

    // Owned wrappers release their handles as the state closes, before the
    // library goes away.
    drop(lua);
    backend.quit();

    result.map_err(lua_error).with_context(|| format!("script {name} failed"))
}

fn main() -> anyhow::Result<()> {
    let opts = Options::parse(std::env::args().skip(1))?;
    init_logging(LoggingConfig { env_filter: opts.log_filter.clone(), ..LoggingConfig::default() });

    let source = std::fs::read_to_string(&opts.script).with_context(|| format!("reading {}", opts.script))?;
    let backend = backend(opts.sdl)?;
    log::info!("running {} on the {} backend", opts.script, if opts.sdl { "SDL_gpu" } else { "headless" });

    run(&opts.script, &source, &backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Options> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn script_and_flags() {
        let opts = parse(&["demo.lua", "--sdl", "--log", "gpu_lua=debug"]).unwrap();
        assert_eq!(
            opts,
            Options { script: "demo.lua".into(), sdl: true, log_filter: Some("gpu_lua=debug".into()) }
        );
    }

    #[test]
    fn script_is_required() {
        assert!(parse(&["--sdl"]).is_err());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(parse(&["demo.lua", "--fast"]).is_err());
        assert!(parse(&["a.lua", "b.lua"]).is_err());
    }

    #[test]
    fn headless_is_the_default_backend() {
        let backend = backend(false).unwrap();
        assert_eq!(backend.linked_version().minor, 11);
    }

    #[test]
    fn script_runs_against_the_headless_backend() {
        let backend = backend(false).unwrap();
        run("ok.lua", "local s = GPU.init(16, 16, 0); s:clear(); s:flip()", &backend).unwrap();
    }

    #[test]
    fn script_errors_carry_the_script_name() {
        let backend = backend(false).unwrap();
        let err = run("bad.lua", "error('boom')", &backend).unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains("script bad.lua failed"), "{text}");
        assert!(text.contains("boom"), "{text}");
    }
}
