use anyhow::Result;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};

#[cfg(unix)]
use std::os::unix::ffi::OsStrExt;

/// Process environment as handed over by the host.
///
/// Entries are kept exactly as the host exposes them, duplicates included.
/// Iteration order is unspecified: it follows whatever order the host
/// delivers and is not guaranteed to be stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(OsString, OsString)>,
}

impl Environment {
    pub fn capture() -> Self {
        std::env::vars_os().collect()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub args: Vec<OsString>,
    pub env: Environment,
}

impl Invocation {
    pub fn capture() -> Self {
        Self {
            args: std::env::args_os().skip(1).collect(),
            env: Environment::capture(),
        }
    }
}

pub fn write_banner<W: Write>(out: &mut W, banner: &str) -> Result<()> {
    writeln!(out, "{}", banner)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_args<W: Write>(out: &mut W, args: &[OsString]) -> Result<()> {
    writeln!(out, "Command Line Arguments:")?;
    for (i, arg) in args.iter().enumerate() {
        write!(out, "arg[{}]: ", i)?;
        write_os(out, arg)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_env<W: Write>(out: &mut W, env: &Environment) -> Result<()> {
    writeln!(out, "\nEnvironment Variables:")?;
    for (key, value) in env.iter() {
        write_os(out, key)?;
        out.write_all(b"=")?;
        write_os(out, value)?;
        writeln!(out)?;
    }
    Ok(())
}

// Raw bytes on unix so nothing the host handed over is altered.
#[cfg(unix)]
fn write_os<W: Write>(out: &mut W, s: &OsStr) -> io::Result<()> {
    out.write_all(s.as_bytes())
}

#[cfg(not(unix))]
fn write_os<W: Write>(out: &mut W, s: &OsStr) -> io::Result<()> {
    out.write_all(s.to_string_lossy().as_bytes())
}
