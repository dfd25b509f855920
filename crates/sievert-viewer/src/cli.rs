//! Command-line parsing. Flags override whatever the config file set.

use std::path::PathBuf;

use sievert_core::{Result, SvError};
use sievert_render::RenderMode;

use crate::config::ViewerConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub c: Option<f64>,
    pub steps: Option<(u32, u32)>,
    pub tangents: bool,
    pub wireframe: bool,
    pub frames: Option<u32>,
    pub obj: Option<PathBuf>,
    pub bin: Option<PathBuf>,
    pub summary: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => out.help = true,
                "--config" => out.config = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--c" => out.c = Some(number(&value(&mut args, &arg)?, &arg)?),
                "--steps" => {
                    let u = number(&value(&mut args, &arg)?, &arg)?;
                    let v = number(&value(&mut args, &arg)?, &arg)?;
                    out.steps = Some((u, v));
                }
                "--tangents" => out.tangents = true,
                "--wireframe" => out.wireframe = true,
                "--frames" => out.frames = Some(number(&value(&mut args, &arg)?, &arg)?),
                "--obj" => out.obj = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--bin" => out.bin = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--summary" => out.summary = true,
                other => return Err(SvError::Config(format!("unknown argument '{other}'"))),
            }
        }
        Ok(out)
    }

    /// Apply flag overrides on top of a loaded config.
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(c) = self.c {
            config.surface.c = c;
        }
        if let Some((u, v)) = self.steps {
            config.surface.u_steps = u;
            config.surface.v_steps = v;
        }
        if self.tangents {
            config.mesh.tangents = true;
        }
        if self.wireframe {
            config.mode = RenderMode::Wireframe;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| SvError::Config(format!("{flag} requires a value")))
}

fn number<T: std::str::FromStr>(text: &str, flag: &str) -> Result<T> {
    text.parse()
        .map_err(|_| SvError::Config(format!("{flag}: '{text}' is not a valid number")))
}
