use std::collections::HashMap;
use std::f64::consts::PI;

use anyhow::{Context, Result};

use crate::cli::ShellConfig;
use crate::models::{self, RobotModel};

/// Numeric display configuration, passed explicitly into every rendering
/// call instead of living in process-global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumFormat {
    pub width: usize,
    pub precision: usize,
    /// magnitudes below this render as zero
    pub suppress: f64,
}

impl Default for NumFormat {
    fn default() -> Self {
        Self {
            width: 8,
            precision: 4,
            suppress: 1e-10,
        }
    }
}

impl NumFormat {
    /// Fixed-width column rendering, for tables.
    pub fn num(&self, v: f64) -> String {
        format!(
            "{:>width$.precision$}",
            self.suppressed(v),
            width = self.width,
            precision = self.precision
        )
    }

    /// Unpadded rendering, for echoed scalar results.
    pub fn scalar(&self, v: f64) -> String {
        format!("{:.precision$}", self.suppressed(v), precision = self.precision)
    }

    fn suppressed(&self, v: f64) -> f64 {
        match v.abs() < self.suppress {
            true => 0.0,
            false => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Ion,
    Ioff,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Ion => "ion",
            Builtin::Ioff => "ioff",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num(f64),
    Str(String),
    Robot(RobotModel),
    Plot,
    Builtin(Builtin),
    None,
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::Robot(_) => "robot model",
            Value::Plot => "plot interface",
            Value::Builtin(_) => "built-in function",
            Value::None => "none",
        }
    }

    pub fn render(&self, format: &NumFormat) -> String {
        match self {
            Value::Num(v) => format.scalar(*v),
            Value::Str(s) => s.clone(),
            Value::Robot(model) => model.render(format),
            Value::Plot => "<plot interface>".to_string(),
            Value::Builtin(b) => format!("<built-in function {}>", b.name()),
            Value::None => String::new(),
        }
    }
}

/// The session's top-level namespace plus the display and plotting state
/// the evaluator reads.
pub struct Environment {
    vars: HashMap<String, Value>,
    pub format: NumFormat,
    pub backend: Option<String>,
    pub interactive_plotting: bool,
}

impl Environment {
    /// Builds the namespace the interactive session starts with. A failing
    /// model constructor is fatal: the shell must not start over a broken
    /// namespace.
    pub fn preload(config: &ShellConfig) -> Result<Self> {
        let mut vars = HashMap::new();

        let puma = models::puma560().context("unable to preload the puma model")?;
        let panda = models::panda().context("unable to preload the panda model")?;

        vars.insert("puma".to_string(), Value::Robot(puma));
        vars.insert("panda".to_string(), Value::Robot(panda));
        vars.insert("plt".to_string(), Value::Plot);
        vars.insert("pi".to_string(), Value::Num(PI));

        Ok(Self {
            vars,
            format: NumFormat::default(),
            backend: config.backend.clone(),
            interactive_plotting: false,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }
}
