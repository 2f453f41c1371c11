use crate::builtin::Registry;
use crate::env::Environment;
use std::io::Write;

/// Tells the read-eval loop whether to keep prompting after a command.
///
/// Every dispatched command yields exactly one `Flow`, whatever happened
/// while it ran: recoverable failures are reported where they occur and
/// folded into [`Flow::Continue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep the loop running.
    Continue,
    /// Stop the loop; the shell exits successfully.
    Terminate,
}

/// Object-safe trait for a ready-to-run command produced by the registry.
///
/// Implemented by builtins via a blanket impl and by the argument-error
/// fallback the registry hands out when parsing fails.
pub trait Invocation {
    /// Run the command.
    ///
    /// Infallible by contract: anything that goes wrong is written to
    /// `stderr` and the returned [`Flow`] is still a definite answer.
    fn invoke(
        self: Box<Self>,
        registry: &Registry,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Flow;
}
