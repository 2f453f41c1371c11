//! minish: a small interactive shell.
//!
//! The shell reads one line at a time, splits it into words, and either
//! runs one of its builtins (`cd`, `help`, `exit`) in-process or launches
//! an external program and waits for it to finish. There is no quoting,
//! no pipelines and no scripting: a line is just words separated by
//! blanks, and the first word names the command.
//!
//! The main entry point is [`Interpreter`]. Feed its `run` method any
//! [`io_adapters::LineReader`] and it drives the read-eval loop until the
//! input ends or the `exit` builtin is invoked.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
pub mod io_adapters;
mod lexer;

pub use builtin::Registry;
pub use command::Flow;
pub use interpreter::{Interpreter, StopReason};

/// Name the shell uses to identify itself in diagnostics.
pub(crate) const SHELL_NAME: &str = "minish";

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Tests that read or change the process working directory must hold
    /// this lock; cargo runs tests in parallel.
    pub(crate) fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX.get_or_init(|| Mutex::new(())).lock().unwrap()
    }
}
