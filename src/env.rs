use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env as stdenv;
use std::sync::LazyLock;

static VAR_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\w+)").unwrap());

/// Mutable, user-level state of a shell session.
///
/// The environment contains:
/// - `vars`: variables available for `$NAME` expansion, on top of the process environment.
/// - `current_dir`: the virtual directory commands resolve relative paths against.
/// - `should_exit`: a flag the read loop checks to know when to terminate.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Variables set by the embedding program through [`Environment::set_var`];
    /// no shell command writes them. Lookups fall back to the process
    /// environment.
    pub vars: HashMap<String, String>,
    /// Normalized path of the current directory, `""` for the file root.
    pub current_dir: String,
    /// When set to true, indicates that the interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    /// Start at the file root with no session variables of its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a variable.
    ///
    /// Looks up the key in `self.vars` first, falling back to `std::env::var`.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .cloned()
            .or_else(|| stdenv::var(key).ok())
    }

    /// Set or override a variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Replace every `$NAME` in `line` with its value.
    ///
    /// References to unset variables are left as they are.
    pub fn expand(&self, line: &str) -> String {
        VAR_REF
            .replace_all(line, |caps: &Captures| {
                self.get_var(&caps[1])
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use crate::env::Environment;

    #[test]
    fn test_env_set_and_get_var() {
        let mut env = Environment::new();

        // initially absent
        assert_eq!(env.get_var("SOME_RANDOM_ENV_VAR_12345"), None);

        env.set_var("KEY", "VALUE");

        assert_eq!(env.get_var("KEY"), Some("VALUE".to_string()));
    }

    #[test]
    fn test_env_reads_from_process_env() {
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
    }

    #[test]
    fn test_expand_known_and_unknown_vars() {
        let mut env = Environment::new();
        env.set_var("DIR", "plots/pt");
        assert_eq!(env.expand("ls $DIR/*"), "ls plots/pt/*");
        assert_eq!(
            env.expand("cd $SOME_RANDOM_ENV_VAR_12345"),
            "cd $SOME_RANDOM_ENV_VAR_12345"
        );
        assert_eq!(env.expand("ls $DIR $DIR"), "ls plots/pt plots/pt");
    }

    #[test]
    fn test_new_starts_at_root() {
        let env = Environment::new();
        assert_eq!(env.current_dir, "");
        assert!(!env.should_exit);
    }
}
