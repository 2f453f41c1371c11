use crate::SHELL_NAME;
use crate::command::{Flow, Invocation};
use crate::env::Environment;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed with [`argh`] (`FromArgs`) and executed in-process
/// without spawning a child.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Executes the command.
    ///
    /// Errors describe what failed; the caller turns them into a single
    /// diagnostic line on the error stream and keeps the shell running.
    fn execute(
        self,
        registry: &Registry,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow>;
}

impl<T: BuiltinCommand> Invocation for T {
    fn invoke(
        self: Box<Self>,
        registry: &Registry,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Flow {
        match T::execute(*self, registry, stdout, stderr, env) {
            Ok(flow) => flow,
            Err(e) => {
                let _ = writeln!(stderr, "{SHELL_NAME}: {e:#}");
                Flow::Continue
            }
        }
    }
}

/// Fallback invocation for argument vectors a builtin's parser rejects,
/// and for `--help` requests. Prints the parser's output and keeps going.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl Invocation for InvalidArgs {
    fn invoke(
        self: Box<Self>,
        _registry: &Registry,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Flow {
        if self.is_error {
            let _ = writeln!(stderr, "{SHELL_NAME}: {}", self.output.trim_end());
        } else {
            let _ = writeln!(stdout, "{}", self.output.trim_end());
        }
        Flow::Continue
    }
}

/// Creates instances of a single builtin type when its name matches.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Object-safe creation interface the registry stores.
trait BuiltinFactory {
    /// Name this factory answers to.
    fn name(&self) -> &'static str;

    /// Parse `args` into a ready-to-run invocation.
    fn create(&self, args: &[&str]) -> Box<dyn Invocation>;
}

impl<T: BuiltinCommand + 'static> BuiltinFactory for Factory<T> {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn create(&self, args: &[&str]) -> Box<dyn Invocation> {
        match T::from_args(&[T::name()], args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        }
    }
}

/// The fixed set of builtins, built once and read-only afterwards.
///
/// Shared by reference across loop iterations; builtin actions themselves
/// receive it read-only, which is how `help` enumerates the names.
pub struct Registry {
    factories: Vec<Box<dyn BuiltinFactory>>,
}

impl Default for Registry {
    /// Registers `cd`, `help` and `exit`.
    fn default() -> Self {
        Self {
            factories: vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Exit>::default()),
            ],
        }
    }
}

impl Registry {
    /// Look up `name` and, on a hit, parse `args` into an invocation.
    ///
    /// Matching is exact and case-sensitive. `None` means the name is not
    /// a builtin and should be launched as an external program.
    pub fn lookup(&self, name: &str, args: &[&str]) -> Option<Box<dyn Invocation>> {
        self.factories
            .iter()
            .find(|factory| factory.name() == name)
            .map(|factory| factory.create(args))
    }

    /// Number of registered builtins.
    pub fn count(&self) -> usize {
        self.factories.len()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.iter().map(|factory| factory.name())
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(
        self,
        _registry: &Registry,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow> {
        let Some(target) = self.target.filter(|t| !t.is_empty()) else {
            return Err(anyhow::anyhow!("cd: expected argument"));
        };

        let target = PathBuf::from(target);
        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        let canonical =
            fs::canonicalize(&new_dir).with_context(|| format!("cd: {}", new_dir.display()))?;
        env::set_current_dir(&canonical)
            .with_context(|| format!("cd: can't chdir to {}", canonical.display()))?;
        env.current_dir = canonical;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// List the commands that are built into the shell.
pub struct Help {
    #[argh(positional, greedy)]
    /// ignored; help takes no arguments.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(
        self,
        registry: &Registry,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Flow> {
        writeln!(stdout, "This is {SHELL_NAME}, a small interactive shell.")?;
        writeln!(stdout, "Type program names and arguments, then press enter.")?;
        writeln!(stdout, "The following commands are built in:")?;
        for name in registry.names() {
            writeln!(stdout, "  {name}")?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored; exit always succeeds.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    /// Only signals termination; stopping is the loop's job.
    fn execute(
        self,
        _registry: &Registry,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Flow> {
        Ok(Flow::Terminate)
    }
}
