use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Interactive shell for exploring serial-link robot models.
#[derive(Parser, Debug, Clone)]
#[command(name = "robsh", about = "Interactive robot model shell", version)]
pub struct Cli {
    /// Script to run before the first prompt.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Graphics backend used once plotting is activated.
    #[arg(short = 'b', long)]
    pub backend: Option<String>,

    /// Terminal color scheme.
    #[arg(short = 'c', long = "color", value_enum, default_value = "neutral")]
    pub color: ColorScheme,

    /// Ask for confirmation before exiting the shell.
    #[arg(short = 'x', long = "confirmexit")]
    pub confirm_exit: bool,

    /// Input prompt text.
    #[arg(short = 'p', long, default_value = ">>> ")]
    pub prompt: String,

    /// Result prefix template; `{}` is replaced with the execution count.
    #[arg(short = 'r', long = "resultprefix")]
    pub result_prefix: Option<String>,

    /// Do not echo the value of assignments.
    #[arg(short = 'a', long = "noshowassign")]
    pub no_show_assign: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Neutral,
    Lightbg,
    Nocolor,
    Linux,
}

/// Parsed launcher configuration. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub script: Option<PathBuf>,
    pub backend: Option<String>,
    pub color: ColorScheme,
    pub confirm_exit: bool,
    pub prompt: String,
    pub result_prefix: Option<String>,
    pub show_assignments: bool,
}

impl Cli {
    pub fn into_config(self) -> ShellConfig {
        ShellConfig {
            script: self.script,
            backend: self.backend,
            color: self.color,
            confirm_exit: self.confirm_exit,
            prompt: self.prompt,
            result_prefix: self.result_prefix,
            show_assignments: !self.no_show_assign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(args: &[&str]) -> ShellConfig {
        Cli::try_parse_from(args)
            .unwrap_or_else(|e| panic!("unable to parse {:?}: {}", args, e))
            .into_config()
    }

    #[test]
    fn test_defaults() {
        let config = config(&["robsh"]);

        assert_eq!(config.script, None);
        assert_eq!(config.backend, None);
        assert_eq!(config.color, ColorScheme::Neutral);
        assert_eq!(config.confirm_exit, false);
        assert_eq!(config.prompt, ">>> ");
        assert_eq!(config.result_prefix, None);
        assert_eq!(config.show_assignments, true);
    }

    #[test]
    fn test_prompt_flag_taken_verbatim() {
        assert_eq!(config(&["robsh", "-p", "rob> "]).prompt, "rob> ");
        assert_eq!(config(&["robsh", "--prompt", ": "]).prompt, ": ");
    }

    #[test]
    fn test_all_flags() {
        let config = config(&[
            "robsh",
            "demo.rsh",
            "-b",
            "svg",
            "--color",
            "linux",
            "-x",
            "--resultprefix",
            "Result {}: ",
            "--noshowassign",
        ]);

        assert_eq!(config.script, Some(PathBuf::from("demo.rsh")));
        assert_eq!(config.backend, Some("svg".to_string()));
        assert_eq!(config.color, ColorScheme::Linux);
        assert_eq!(config.confirm_exit, true);
        assert_eq!(config.result_prefix, Some("Result {}: ".to_string()));
        assert_eq!(config.show_assignments, false);
    }

    #[test]
    fn test_unknown_color_scheme_is_a_usage_error() {
        assert!(Cli::try_parse_from(["robsh", "--color", "solarized"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_a_usage_error() {
        assert!(Cli::try_parse_from(["robsh", "--frobnicate"]).is_err());
    }
}
