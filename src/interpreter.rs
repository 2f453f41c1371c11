use crate::SHELL_NAME;
use crate::builtin::Registry;
use crate::command::Flow;
use crate::env::Environment;
use crate::external::ExternalCommand;
use crate::io_adapters::LineReader;
use crate::lexer;
use anyhow::Result;
use log::debug;
use std::io::Write;

/// Prompt displayed before every read.
const PROMPT: &str = "> ";

/// Why the read-eval loop stopped.
///
/// Both reasons are normal terminations and map to a success exit code;
/// they stay distinct so the trigger remains observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The input stream ended.
    EndOfInput,
    /// The `exit` builtin asked the loop to stop.
    ExitRequested,
}

/// The shell's interpreter: dispatches argument vectors and drives the
/// read-eval loop.
///
/// Owns the builtin [`Registry`], read-only after construction, and the
/// [`Environment`] commands run in.
pub struct Interpreter {
    registry: Registry,
    env: Environment,
}

impl Interpreter {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            env: Environment::new(),
        }
    }

    /// Decide builtin-vs-external for one argument vector and run it.
    ///
    /// An empty vector is a silent no-op. Exactly one [`Flow`] comes back
    /// in every case; recoverable failures have already been reported to
    /// the standard error stream by the time it does.
    pub fn dispatch(&mut self, argv: &[String]) -> Flow {
        self.dispatch_with_io(argv, &mut std::io::stdout(), &mut std::io::stderr())
    }

    /// [`Self::dispatch`] with caller-supplied output sinks.
    fn dispatch_with_io(
        &mut self,
        argv: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Flow {
        let Some((name, rest)) = argv.split_first() else {
            return Flow::Continue;
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        if let Some(cmd) = self.registry.lookup(name, &args) {
            debug!("dispatching builtin {name}");
            return cmd.invoke(&self.registry, stdout, stderr, &mut self.env);
        }

        debug!("dispatching external {name}");
        match ExternalCommand::resolve(&self.env, name, &args) {
            Some(cmd) => cmd.run(stderr, &self.env),
            None => {
                let _ = writeln!(stderr, "{SHELL_NAME}: command not found: {name}");
                Flow::Continue
            }
        }
    }

    /// Run the read-eval loop until `input` ends or a command requests
    /// termination.
    ///
    /// Each iteration reads one line, tokenizes it and dispatches the
    /// result; the line and its argument vector are dropped before the
    /// next prompt, whichever path the iteration took.
    pub fn run(&mut self, input: &mut dyn LineReader) -> Result<StopReason> {
        loop {
            let Some(line) = input.read_line(PROMPT)? else {
                debug!("input exhausted");
                return Ok(StopReason::EndOfInput);
            };
            let argv = lexer::split_line(&line);
            match self.dispatch(&argv) {
                Flow::Continue => {}
                Flow::Terminate => return Ok(StopReason::ExitRequested),
            }
        }
    }
}

impl Default for Interpreter {
    /// An interpreter with the standard builtin set.
    fn default() -> Self {
        Self::new(Registry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_adapters::MemLines;
    use crate::test_support::lock_current_dir;

    #[test]
    fn empty_input_stops_with_end_of_input() {
        let mut sh = Interpreter::default();
        let mut input = MemLines::new(Vec::<String>::new());
        let reason = sh.run(&mut input).unwrap();
        assert_eq!(reason, StopReason::EndOfInput);
    }

    #[test]
    fn exit_line_stops_with_exit_requested() {
        let mut sh = Interpreter::default();
        let mut input = MemLines::new(["exit"]);
        let reason = sh.run(&mut input).unwrap();
        assert_eq!(reason, StopReason::ExitRequested);
    }

    #[test]
    fn exit_with_trailing_arguments_still_stops() {
        let mut sh = Interpreter::default();
        let mut input = MemLines::new(["exit now"]);
        let reason = sh.run(&mut input).unwrap();
        assert_eq!(reason, StopReason::ExitRequested);
    }

    #[test]
    fn blank_lines_keep_the_loop_running() {
        let mut sh = Interpreter::default();
        let mut input = MemLines::new(["", "   \t  ", "exit"]);
        let reason = sh.run(&mut input).unwrap();
        assert_eq!(reason, StopReason::ExitRequested);
    }

    #[test]
    fn input_ending_without_exit_is_end_of_input() {
        let mut sh = Interpreter::default();
        let mut input = MemLines::new(["", "  \t "]);
        let reason = sh.run(&mut input).unwrap();
        assert_eq!(reason, StopReason::EndOfInput);
    }

    #[test]
    fn empty_argv_is_a_silent_no_op() {
        let mut sh = Interpreter::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let flow = sh.dispatch_with_io(&[], &mut out, &mut err);

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn all_delimiter_line_dispatches_silently() {
        let mut sh = Interpreter::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let argv = lexer::split_line("   \t  ");
        let flow = sh.dispatch_with_io(&argv, &mut out, &mut err);

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn unknown_commands_are_reported_and_continue() {
        let mut sh = Interpreter::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let argv = lexer::split_line("definitely-not-installed-anywhere --with args");
        let flow = sh.dispatch_with_io(&argv, &mut out, &mut err);

        assert_eq!(flow, Flow::Continue);
        let msg = String::from_utf8(err).unwrap();
        assert!(
            msg.contains("command not found: definitely-not-installed-anywhere"),
            "unexpected diagnostic: {msg}"
        );
    }

    #[test]
    fn external_exit_codes_do_not_reach_the_loop() {
        let _lock = lock_current_dir();
        let mut sh = Interpreter::default();

        for line in ["true", "false"] {
            let (mut out, mut err) = (Vec::new(), Vec::new());
            let argv = lexer::split_line(line);
            let flow = sh.dispatch_with_io(&argv, &mut out, &mut err);
            assert_eq!(flow, Flow::Continue);
            assert!(err.is_empty(), "unexpected diagnostic: {}", String::from_utf8_lossy(&err));
        }
    }

    #[test]
    fn builtin_output_goes_to_the_given_sink() {
        let mut sh = Interpreter::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let argv = lexer::split_line("help");
        let flow = sh.dispatch_with_io(&argv, &mut out, &mut err);

        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("built in"), "unexpected help output: {text}");
    }
}
