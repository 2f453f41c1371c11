use std::env as stdenv;
use std::path::PathBuf;

/// The shell's view of its process environment.
///
/// Tracks the working directory commands run in; the `cd` builtin updates
/// it together with the real process working directory. Environment
/// variables are read straight from the process and never modified, so
/// child processes inherit them untouched.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { current_dir }
    }

    /// Read a variable from the live process environment.
    pub fn get_var(&self, key: &str) -> Option<String> {
        stdenv::var(key).ok()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn reads_from_process_env() {
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
        assert_eq!(env.get_var("SOME_RANDOM_ENV_VAR_12345"), None);
    }

    #[test]
    fn captures_an_existing_working_directory() {
        let env = Environment::new();
        assert!(env.current_dir.exists());
    }
}
