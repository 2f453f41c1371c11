use crate::SHELL_NAME;
use crate::command::Flow;
use crate::env::Environment;
use log::debug;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;

/// A command that is not a builtin: an external program run as a child
/// process.
pub(crate) struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    /// Resolve `name` against the `PATH` of the live process environment.
    ///
    /// `None` means no matching program exists; the caller reports that as
    /// an unknown command.
    pub fn resolve(env: &Environment, name: &str, args: &[&str]) -> Option<Self> {
        let search_paths = env.get_var("PATH").unwrap_or_default();
        let program = find_command_path(OsStr::new(&search_paths), Path::new(name))?;
        Some(Self {
            program: program.as_os_str().to_owned(),
            args: args.iter().map(|arg| arg.into()).collect(),
        })
    }

    /// Run the program and block until it terminates.
    ///
    /// The child inherits the shell's standard streams and environment,
    /// runs in the shell's working directory, and sees the resolved
    /// program path as its argv[0]. Its exit status is logged and
    /// otherwise ignored; whatever the child did, the shell keeps going.
    pub fn run(self, stderr: &mut dyn Write, env: &Environment) -> Flow {
        let mut child = match std::process::Command::new(&self.program)
            .args(&self.args)
            .current_dir(&env.current_dir)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                let _ = writeln!(
                    stderr,
                    "{SHELL_NAME}: {}: {e}",
                    self.program.to_string_lossy()
                );
                return Flow::Continue;
            }
        };

        // wait() returns only once the child has exited or been killed by
        // a signal; a stopped child keeps us blocked here.
        match child.wait() {
            Ok(status) => debug!("{} finished: {status}", self.program.to_string_lossy()),
            Err(e) => {
                let _ = writeln!(stderr, "{SHELL_NAME}: wait failed: {e}");
            }
        }
        Flow::Continue
    }
}

/// Resolve a command path the way a typical shell would.
///
/// Absolute paths and relative paths with more than one component are
/// checked directly. `./`-prefixed names are checked against the current
/// directory. A bare name is searched through each directory of
/// `search_paths` in order, first hit wins. Empty input never resolves.
pub(crate) fn find_command_path<'a>(
    search_paths: &OsStr,
    path: &'a Path,
) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return path.exists().then(|| Cow::Borrowed(path));
    }

    if path.starts_with("./") && path.exists() {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    components.next()?;
    if components.next().is_some() {
        // Relative path with several components, e.g. bin/tool.
        return path.exists().then(|| Cow::Borrowed(path));
    }

    std::env::split_paths(search_paths)
        .map(|dir| dir.join(path))
        .find(|candidate| candidate.exists())
        .map(Cow::Owned)
}
