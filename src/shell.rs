use anyhow::Result;
use rustyline::{error::ReadlineError, history::DefaultHistory, Config, Editor};

use crate::banner;
use crate::cli::{Cli, ColorScheme, ShellConfig};
use crate::env::{Environment, Value};
use crate::eval::{eval, EvalError, Evaluated};
use crate::prompt::PromptStyle;
use crate::script;

/// Launches the interactive session: preloads the environment, prints the
/// banner, runs the preload statements, then hands control to the readline
/// loop. Does not return until the session ends.
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config();

    let env = Environment::preload(&config)?;
    let statements = script::preload_statements(config.script.as_deref())?;

    let paint = banner::select(config.color);
    banner::print(paint.as_ref(), config.show_assignments);

    let mut session = Session::new(&config, env);
    session.preload(&statements);
    session.run_interactive(config.color)
}

pub struct Session {
    env: Environment,
    prompts: PromptStyle,
    show_assignments: bool,
    confirm_exit: bool,
    count: usize,
}

impl Session {
    pub fn new(config: &ShellConfig, env: Environment) -> Self {
        Self {
            env,
            prompts: PromptStyle::from_config(config),
            show_assignments: config.show_assignments,
            confirm_exit: config.confirm_exit,
            count: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Evaluates one top-level statement. Every non-empty statement, failed
    /// ones included, consumes one execution-counter slot. Returns the echo
    /// text when the display policy says to show the result: bare-expression
    /// results always, assignment results only when assignment echoing is
    /// on, `None` values never.
    pub fn execute<'text>(
        &mut self,
        line: &'text str,
    ) -> Result<Option<String>, EvalError<'text>> {
        let evaluated = match eval(line, &mut self.env) {
            Ok(Evaluated::Empty) => return Ok(None),
            Ok(evaluated) => {
                self.count += 1;
                evaluated
            }
            Err(e) => {
                self.count += 1;
                return Err(e);
            }
        };

        match evaluated {
            Evaluated::Value(value) => Ok(self.echo(value)),
            Evaluated::Assigned(value) if self.show_assignments => Ok(self.echo(value)),
            Evaluated::Assigned(_) => Ok(None),
            // Already handled by the early return above.
            Evaluated::Empty => Ok(None),
        }
    }

    // The prefix reads the counter at display time, after the statement
    // consumed its slot.
    fn echo(&self, value: Value) -> Option<String> {
        match value {
            Value::None => None,
            value => Some(format!(
                "{}{}",
                self.prompts.result_prefix(self.count),
                value.render(&self.env.format)
            )),
        }
    }

    /// Runs the preload statements in order, exactly once, before the first
    /// prompt.
    pub fn preload(&mut self, statements: &[String]) {
        for statement in statements {
            match self.execute(statement) {
                Ok(Some(output)) => println!("{}", output),
                Ok(None) => (),
                Err(e) => eprintln!("*** {:?}", e),
            }
        }
    }

    pub fn run_interactive(&mut self, color: ColorScheme) -> Result<()> {
        let mut editor: Editor<(), DefaultHistory> = Editor::with_config(
            Config::builder()
                .color_mode(match color {
                    ColorScheme::Nocolor => rustyline::ColorMode::Disabled,
                    _ => rustyline::ColorMode::Enabled,
                })
                .auto_add_history(true)
                .build(),
        )?;

        loop {
            match editor.readline(self.prompts.input_prompt()) {
                Ok(line) => match self.execute(&line) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => (),
                    Err(e) => eprintln!("*** {:?}", e),
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    if self.confirm_quit(&mut editor)? {
                        break;
                    }
                }
                Err(err) => {
                    eprintln!("Unexpected Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn confirm_quit(&self, editor: &mut Editor<(), DefaultHistory>) -> Result<bool> {
        if !self.confirm_exit {
            return Ok(true);
        }

        match editor.readline("Really exit ([y]/n)? ") {
            Ok(line) => Ok(!line.trim().eq_ignore_ascii_case("n")),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(true),
            Err(err) => Err(err.into()),
        }
    }
}
