use crate::env::{Builtin, Environment, Value};
use crate::lex::{lex, LexError};
use crate::parse::{parse, Expr, ParseError, Stmt};

#[derive(Debug, PartialEq)]
pub enum EvalError<'text> {
    LexError(LexError),
    ParseError(ParseError),
    UndefinedVariable(&'text str),
    UnknownAttr {
        kind: &'static str,
        attr: &'text str,
    },
    NotCallable(&'static str),
    UnexpectedArgs {
        name: &'static str,
        got: usize,
    },
    TypeMismatch {
        op: &'static str,
        kind: &'static str,
    },
    DivisionByZero,
}

/// Result of evaluating one top-level statement. The session's display
/// policy decides which of these are echoed.
#[derive(Debug, PartialEq)]
pub enum Evaluated {
    Empty,
    Value(Value),
    Assigned(Value),
}

pub fn eval<'text>(
    text: &'text str,
    env: &mut Environment,
) -> Result<Evaluated, EvalError<'text>> {
    let tokens = lex(text)?;

    if tokens.is_empty() {
        return Ok(Evaluated::Empty);
    }

    match parse(&tokens)? {
        Stmt::Assign { name, expr } => {
            let value = eval_expr(&expr, env)?;
            env.set(name, value.clone());
            Ok(Evaluated::Assigned(value))
        }
        Stmt::Expr(expr) => Ok(Evaluated::Value(eval_expr(&expr, env)?)),
    }
}

fn eval_expr<'text>(
    expr: &Expr<'text>,
    env: &mut Environment,
) -> Result<Value, EvalError<'text>> {
    match expr {
        Expr::Num(num) => Ok(Value::Num(*num)),

        Expr::Var(name) => match env.get(*name) {
            Some(value) => Ok(value.clone()),
            None => Err(EvalError::UndefinedVariable(*name)),
        },

        Expr::Attr(expr, attr) => {
            let value = eval_expr(expr, env)?;
            eval_attr(value, *attr, env)
        }

        Expr::Call(callee, args) => {
            let callee = eval_expr(callee, env)?;
            eval_call(callee, args, env)
        }

        Expr::Neg(expr) => match eval_expr(expr, env)? {
            Value::Num(v) => Ok(Value::Num(-v)),
            value => Err(EvalError::TypeMismatch {
                op: "-",
                kind: value.kind(),
            }),
        },

        Expr::Add(lhs, rhs) => eval_arith(lhs, rhs, env, "+", |a, b| Ok(a + b)),
        Expr::Sub(lhs, rhs) => eval_arith(lhs, rhs, env, "-", |a, b| Ok(a - b)),
        Expr::Mul(lhs, rhs) => eval_arith(lhs, rhs, env, "*", |a, b| Ok(a * b)),
        Expr::Div(lhs, rhs) => eval_arith(lhs, rhs, env, "/", |a, b| match b == 0.0 {
            true => Err(EvalError::DivisionByZero),
            false => Ok(a / b),
        }),
    }
}

fn eval_attr<'text>(
    value: Value,
    attr: &'text str,
    env: &Environment,
) -> Result<Value, EvalError<'text>> {
    match (&value, attr) {
        (Value::Robot(model), "name") => Ok(Value::Str(model.name.clone())),
        (Value::Robot(model), "manufacturer") => Ok(Value::Str(model.manufacturer.clone())),
        (Value::Robot(model), "n") => Ok(Value::Num(model.n() as f64)),
        (Value::Robot(model), "structure") => Ok(Value::Str(model.structure())),

        (Value::Plot, "ion") => Ok(Value::Builtin(Builtin::Ion)),
        (Value::Plot, "ioff") => Ok(Value::Builtin(Builtin::Ioff)),
        (Value::Plot, "backend") => Ok(Value::Str(
            env.backend.clone().unwrap_or_else(|| "default".to_string()),
        )),

        _ => Err(EvalError::UnknownAttr {
            kind: value.kind(),
            attr,
        }),
    }
}

fn eval_call<'text>(
    callee: Value,
    args: &[Expr<'text>],
    env: &mut Environment,
) -> Result<Value, EvalError<'text>> {
    let Value::Builtin(builtin) = callee else {
        return Err(EvalError::NotCallable(callee.kind()));
    };

    if !args.is_empty() {
        return Err(EvalError::UnexpectedArgs {
            name: builtin.name(),
            got: args.len(),
        });
    }

    match builtin {
        Builtin::Ion => env.interactive_plotting = true,
        Builtin::Ioff => env.interactive_plotting = false,
    }

    Ok(Value::None)
}

fn eval_arith<'text>(
    lhs: &Expr<'text>,
    rhs: &Expr<'text>,
    env: &mut Environment,
    op: &'static str,
    apply: impl Fn(f64, f64) -> Result<f64, EvalError<'text>>,
) -> Result<Value, EvalError<'text>> {
    let lhs = eval_num(lhs, env, op)?;
    let rhs = eval_num(rhs, env, op)?;
    Ok(Value::Num(apply(lhs, rhs)?))
}

fn eval_num<'text>(
    expr: &Expr<'text>,
    env: &mut Environment,
    op: &'static str,
) -> Result<f64, EvalError<'text>> {
    match eval_expr(expr, env)? {
        Value::Num(v) => Ok(v),
        value => Err(EvalError::TypeMismatch {
            op,
            kind: value.kind(),
        }),
    }
}

impl<'text> From<LexError> for EvalError<'text> {
    fn from(value: LexError) -> Self {
        EvalError::LexError(value)
    }
}

impl<'text> From<ParseError> for EvalError<'text> {
    fn from(value: ParseError) -> Self {
        EvalError::ParseError(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ColorScheme, ShellConfig};
    use pretty_assertions::assert_eq;

    fn env() -> Environment {
        Environment::preload(&ShellConfig {
            script: None,
            backend: None,
            color: ColorScheme::Nocolor,
            confirm_exit: false,
            prompt: ">>> ".to_string(),
            result_prefix: None,
            show_assignments: true,
        })
        .expect("unable to preload environment")
    }

    macro_rules! check_num {
        ($env:expr, $src:expr, $expected:expr) => {
            match eval($src, $env) {
                Ok(Evaluated::Value(Value::Num(v))) | Ok(Evaluated::Assigned(Value::Num(v))) => {
                    assert_eq!(v, $expected, "{}", $src)
                }
                other => assert!(false, "unable to eval {}: {:?}", $src, other),
            }
        };
    }

    #[test]
    fn test_arithmetic() {
        let mut env = env();

        check_num!(&mut env, "1 + 2 * 3", 7.0);
        check_num!(&mut env, "(1 + 2) * 3", 9.0);
        check_num!(&mut env, "-2 - -3", 1.0);
        check_num!(&mut env, "7 / 2", 3.5);
    }

    #[test]
    fn test_assignment_updates_namespace() {
        let mut env = env();

        check_num!(&mut env, "reach = 0.5 + 0.25", 0.75);
        check_num!(&mut env, "reach * 2", 1.5);
    }

    #[test]
    fn test_model_attrs() {
        let mut env = env();

        check_num!(&mut env, "puma.n", 6.0);
        check_num!(&mut env, "puma.n + panda.n", 13.0);

        assert_eq!(
            eval("puma.structure", &mut env),
            Ok(Evaluated::Value(Value::Str("RRRRRR".to_string())))
        );
        assert_eq!(
            eval("puma.name", &mut env),
            Ok(Evaluated::Value(Value::Str("Puma 560".to_string())))
        );
    }

    #[test]
    fn test_plot_activation() {
        let mut env = env();
        assert_eq!(env.interactive_plotting, false);

        assert_eq!(
            eval("plt.ion()", &mut env),
            Ok(Evaluated::Value(Value::None))
        );
        assert_eq!(env.interactive_plotting, true);

        assert_eq!(
            eval("plt.ioff()", &mut env),
            Ok(Evaluated::Value(Value::None))
        );
        assert_eq!(env.interactive_plotting, false);
    }

    #[test]
    fn test_empty_input() {
        let mut env = env();

        assert_eq!(eval("", &mut env), Ok(Evaluated::Empty));
        assert_eq!(eval("   # comment only\n", &mut env), Ok(Evaluated::Empty));
    }

    #[test]
    fn test_errors() {
        let mut env = env();

        assert_eq!(
            eval("undefined_thing", &mut env),
            Err(EvalError::UndefinedVariable("undefined_thing"))
        );
        assert_eq!(eval("1 / 0", &mut env), Err(EvalError::DivisionByZero));
        assert_eq!(
            eval("puma.mass", &mut env),
            Err(EvalError::UnknownAttr {
                kind: "robot model",
                attr: "mass"
            })
        );
        assert_eq!(
            eval("puma()", &mut env),
            Err(EvalError::NotCallable("robot model"))
        );
        assert_eq!(
            eval("plt.ion(1)", &mut env),
            Err(EvalError::UnexpectedArgs { name: "ion", got: 1 })
        );
        assert_eq!(
            eval("puma + 1", &mut env),
            Err(EvalError::TypeMismatch {
                op: "+",
                kind: "robot model"
            })
        );
    }
}
