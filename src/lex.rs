use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, PartialEq)]
pub enum Token<'text> {
    Ident(&'text str),
    Num(f64),
    Symbol(&'static str),
}

lazy_static! {
    static ref IDENT_REGEX: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap();
    static ref NUM_REGEX: Regex = Regex::new(r"^\d+(\.\d+)?([eE][+-]?\d+)?").unwrap();
}

#[derive(Debug, PartialEq)]
pub enum LexError {
    InvalidToken { pos: usize },
    InvalidNumber { pos: usize },
}

pub fn lex(text: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = vec![];
    let mut pos = 0;

    loop {
        while let Some(" ") | Some("\t") | Some("\n") | Some("\r") = text.get(pos..pos + 1) {
            pos += 1;
        }

        // line comment runs to the end of the line
        if let Some("#") = text.get(pos..pos + 1) {
            pos = match text[pos..].find('\n') {
                Some(offset) => pos + offset,
                None => text.len(),
            };
            continue;
        }

        if pos >= text.len() {
            break;
        }

        let (token, next_pos) = lex_token(text, pos)?;
        tokens.push(token);
        pos = next_pos;
    }

    Ok(tokens)
}

fn lex_token(text: &str, pos: usize) -> Result<(Token, usize), LexError> {
    if let Some((token, next_pos)) = lex_num(text, pos)? {
        return Ok((token, next_pos));
    }

    lex_ident(text, pos)
        .or(lex_symbol(text, pos, "="))
        .or(lex_symbol(text, pos, "("))
        .or(lex_symbol(text, pos, ")"))
        .or(lex_symbol(text, pos, "+"))
        .or(lex_symbol(text, pos, "-"))
        .or(lex_symbol(text, pos, "*"))
        .or(lex_symbol(text, pos, "/"))
        .or(lex_symbol(text, pos, "."))
        .or(lex_symbol(text, pos, ","))
        .ok_or(LexError::InvalidToken { pos })
}

fn lex_ident(text: &str, pos: usize) -> Option<(Token, usize)> {
    let (token, pos) = lex_with_pattern(text, pos, &IDENT_REGEX)?;
    Some((Token::Ident(token), pos))
}

fn lex_num(text: &str, pos: usize) -> Result<Option<(Token, usize)>, LexError> {
    match lex_with_pattern(text, pos, &NUM_REGEX) {
        Some((token, next_pos)) => {
            let num = token
                .parse::<f64>()
                .map_err(|_| LexError::InvalidNumber { pos })?;
            Ok(Some((Token::Num(num), next_pos)))
        }
        None => Ok(None),
    }
}

fn lex_with_pattern<'text>(
    text: &'text str,
    pos: usize,
    pat: &Regex,
) -> Option<(&'text str, usize)> {
    if let Some(slice) = text.get(pos..text.len()) {
        if let Some(m) = pat.find(slice) {
            assert!(
                m.start() == 0,
                "put caret ^ to match the text from the `pos` (text is sliced to start from pos)"
            );
            return Some((m.as_str(), pos + m.end()));
        }
    }

    None
}

fn lex_symbol(text: &str, pos: usize, symbol: &'static str) -> Option<(Token<'static>, usize)> {
    if let Some(substr) = text.get(pos..) {
        if substr.starts_with(symbol) {
            return Some((Token::Symbol(symbol), pos + symbol.len()));
        }
    }

    None
}
