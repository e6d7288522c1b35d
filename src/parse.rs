use crate::lex::Token;

// <stmt> ::= <ident> = <expr>
//          | <expr>

// <expr> ::= <term> {(+ | -) <term>}*
// <term> ::= <unary> {(* | /) <unary>}*
// <unary> ::= - <unary> | <postfix>
// <postfix> ::= <primary> {. <ident> | ( <args> )}*
// <args> ::= <expr> {, <expr>}* | nothing
// <primary> ::= <num> | <ident> | ( <expr> )

// reach = 2 * (puma.n + 0.5)
// puma.structure
// plt.ion()

#[derive(Debug, PartialEq)]
pub enum ParseError {
    SyntaxError(usize, &'static str),
    Expected(Token<'static>, usize),
    ExpectedIdent(usize),
    TrailingTokens(usize),
}

#[derive(Debug, PartialEq)]
pub enum Stmt<'text> {
    Assign { name: &'text str, expr: Expr<'text> },
    Expr(Expr<'text>),
}

#[derive(Debug, PartialEq)]
pub enum Expr<'text> {
    Num(f64),
    Var(&'text str),
    Attr(Box<Expr<'text>>, &'text str),
    Call(Box<Expr<'text>>, Vec<Expr<'text>>),
    Neg(Box<Expr<'text>>),
    Add(Box<Expr<'text>>, Box<Expr<'text>>),
    Sub(Box<Expr<'text>>, Box<Expr<'text>>),
    Mul(Box<Expr<'text>>, Box<Expr<'text>>),
    Div(Box<Expr<'text>>, Box<Expr<'text>>),
}

pub fn parse<'text>(tokens: &[Token<'text>]) -> Result<Stmt<'text>, ParseError> {
    let (stmt, pos) = parse_stmt(tokens, 0)?;

    if pos != tokens.len() {
        return Err(ParseError::TrailingTokens(pos));
    }

    Ok(stmt)
}

fn parse_stmt<'text>(
    tokens: &[Token<'text>],
    pos: usize,
) -> Result<(Stmt<'text>, usize), ParseError> {
    if let (Some(Token::Ident(name)), Some(Token::Symbol("="))) =
        (tokens.get(pos), tokens.get(pos + 1))
    {
        let (expr, pos) = parse_expr(tokens, pos + 2)?;
        return Ok((Stmt::Assign { name, expr }, pos));
    }

    let (expr, pos) = parse_expr(tokens, pos)?;
    Ok((Stmt::Expr(expr), pos))
}

fn parse_expr<'text>(
    tokens: &[Token<'text>],
    pos: usize,
) -> Result<(Expr<'text>, usize), ParseError> {
    let (mut lhs, mut pos) = parse_term(tokens, pos)?;

    while let Some(token) = tokens.get(pos) {
        match token {
            Token::Symbol("+") => {
                let (rhs, next_pos) = parse_term(tokens, pos + 1)?;
                pos = next_pos;
                lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
            }
            Token::Symbol("-") => {
                let (rhs, next_pos) = parse_term(tokens, pos + 1)?;
                pos = next_pos;
                lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
            }
            _ => break,
        }
    }

    Ok((lhs, pos))
}

fn parse_term<'text>(
    tokens: &[Token<'text>],
    pos: usize,
) -> Result<(Expr<'text>, usize), ParseError> {
    let (mut lhs, mut pos) = parse_unary(tokens, pos)?;

    while let Some(token) = tokens.get(pos) {
        match token {
            Token::Symbol("*") => {
                let (rhs, next_pos) = parse_unary(tokens, pos + 1)?;
                pos = next_pos;
                lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
            }
            Token::Symbol("/") => {
                let (rhs, next_pos) = parse_unary(tokens, pos + 1)?;
                pos = next_pos;
                lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
            }
            _ => break,
        }
    }

    Ok((lhs, pos))
}

fn parse_unary<'text>(
    tokens: &[Token<'text>],
    pos: usize,
) -> Result<(Expr<'text>, usize), ParseError> {
    if let Some(Token::Symbol("-")) = tokens.get(pos) {
        let (expr, pos) = parse_unary(tokens, pos + 1)?;
        return Ok((Expr::Neg(Box::new(expr)), pos));
    }

    parse_postfix(tokens, pos)
}

fn parse_postfix<'text>(
    tokens: &[Token<'text>],
    pos: usize,
) -> Result<(Expr<'text>, usize), ParseError> {
    let (mut expr, mut pos) = parse_primary(tokens, pos)?;

    loop {
        match tokens.get(pos) {
            Some(Token::Symbol(".")) => {
                let Some(Token::Ident(attr)) = tokens.get(pos + 1) else {
                    return Err(ParseError::ExpectedIdent(pos + 1));
                };
                expr = Expr::Attr(Box::new(expr), attr);
                pos += 2;
            }
            Some(Token::Symbol("(")) => {
                let (args, next_pos) = parse_args(tokens, pos + 1)?;
                expr = Expr::Call(Box::new(expr), args);
                pos = next_pos;
            }
            _ => break,
        }
    }

    Ok((expr, pos))
}

fn parse_args<'text>(
    tokens: &[Token<'text>],
    mut pos: usize,
) -> Result<(Vec<Expr<'text>>, usize), ParseError> {
    let mut args = vec![];

    if let Some(Token::Symbol(")")) = tokens.get(pos) {
        return Ok((args, pos + 1));
    }

    loop {
        let (arg, next_pos) = parse_expr(tokens, pos)?;
        args.push(arg);
        pos = next_pos;

        match tokens.get(pos) {
            Some(Token::Symbol(",")) => pos += 1,
            Some(Token::Symbol(")")) => return Ok((args, pos + 1)),
            _ => return Err(ParseError::Expected(Token::Symbol(")"), pos)),
        }
    }
}

fn parse_primary<'text>(
    tokens: &[Token<'text>],
    pos: usize,
) -> Result<(Expr<'text>, usize), ParseError> {
    match tokens.get(pos) {
        Some(Token::Num(num)) => Ok((Expr::Num(*num), pos + 1)),
        Some(Token::Ident(name)) => Ok((Expr::Var(name), pos + 1)),
        Some(Token::Symbol("(")) => {
            let (expr, pos) = parse_expr(tokens, pos + 1)?;

            let Some(Token::Symbol(")")) = tokens.get(pos) else {
                return Err(ParseError::Expected(Token::Symbol(")"), pos));
            };

            Ok((expr, pos + 1))
        }
        _ => Err(ParseError::SyntaxError(pos, "cannot parse expression")),
    }
}
