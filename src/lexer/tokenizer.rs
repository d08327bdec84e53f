use super::*;
use super::scanner::{bump, is_forbidden_unquoted, peek_second, peek_third, skip_whitespace_and_comments};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, HoconError> {
    skip_whitespace_and_comments(lexer);
    lexer.token_line = lexer.line;
    lexer.token_column = lexer.column + 1;

    match lexer.peek {
        Some('\n') => tokenize_symbol(lexer, Token::Newline),
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some('[') => tokenize_symbol(lexer, Token::LBracket),
        Some(']') => tokenize_symbol(lexer, Token::RBracket),
        Some(':') => tokenize_symbol(lexer, Token::Colon),
        Some('=') => tokenize_symbol(lexer, Token::Equals),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some('+') => tokenize_plus_equals(lexer),
        Some('$') => tokenize_substitution(lexer),
        Some('"') => tokenize_string(lexer),
        Some(ch) if is_forbidden_unquoted(ch) => tokenize_unexpected_char(lexer, ch),
        Some(_) => tokenize_unquoted(lexer),
        None => Ok(Token::Eof),
    }
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, HoconError> {
    bump(lexer);
    Ok(token)
}

fn tokenize_plus_equals(lexer: &mut Lexer) -> Result<Token, HoconError> {
    if peek_second(lexer) == Some('=') {
        bump(lexer);
        bump(lexer);
        Ok(Token::PlusEquals)
    } else {
        tokenize_unexpected_char(lexer, '+')
    }
}

fn tokenize_string(lexer: &mut Lexer) -> Result<Token, HoconError> {
    if peek_second(lexer) == Some('"') && peek_third(lexer) == Some('"') {
        return tokenize_triple_quoted(lexer);
    }
    read_quoted(lexer).map(Token::Quoted)
}

/// Read a `"..."` literal starting at the opening quote, decoding escapes.
fn read_quoted(lexer: &mut Lexer) -> Result<String, HoconError> {
    let (line, column) = (lexer.line, lexer.column + 1);
    bump(lexer); // opening quote
    let mut content = String::new();

    loop {
        match bump(lexer) {
            Some('"') => return Ok(content),
            Some('\\') => content.push(read_escape(lexer)?),
            Some('\n') | None => {
                return Err(HoconError::UnclosedString {
                    quote: '"',
                    line,
                    column,
                    hint: Some("Quoted strings end on the same line; use \"\"\" for multi-line text".into()),
                    code: Some(103),
                });
            }
            Some(ch) => content.push(ch),
        }
    }
}

fn read_escape(lexer: &mut Lexer) -> Result<char, HoconError> {
    let escaped = match bump(lexer) {
        Some('n') => '\n',
        Some('t') => '\t',
        Some('r') => '\r',
        Some('b') => '\u{8}',
        Some('f') => '\u{c}',
        Some('"') => '"',
        Some('\\') => '\\',
        Some('/') => '/',
        Some('u') => {
            let mut hex = String::new();
            for _ in 0..4 {
                match bump(lexer) {
                    Some(h) if h.is_ascii_hexdigit() => hex.push(h),
                    _ => return Err(bad_escape(lexer, format!("\\u{}", hex))),
                }
            }
            let code = u32::from_str_radix(&hex, 16).map_err(|_| bad_escape(lexer, format!("\\u{}", hex)))?;
            char::from_u32(code).ok_or_else(|| bad_escape(lexer, format!("\\u{}", hex)))?
        }
        Some(other) => return Err(bad_escape(lexer, format!("\\{}", other))),
        None => {
            return Err(HoconError::UnclosedString {
                quote: '"',
                line: lexer.line,
                column: lexer.column,
                hint: Some("Trailing backslash in string".into()),
                code: Some(103),
            });
        }
    };
    Ok(escaped)
}

fn bad_escape(lexer: &Lexer, sequence: String) -> HoconError {
    HoconError::SyntaxError {
        message: format!("Invalid escape sequence '{}'", sequence),
        line: lexer.line,
        column: lexer.column,
        hint: Some("Supported escapes: \\n \\t \\r \\b \\f \\\" \\\\ \\/ \\uXXXX".into()),
        code: Some(105),
    }
}

fn tokenize_triple_quoted(lexer: &mut Lexer) -> Result<Token, HoconError> {
    let (line, column) = (lexer.line, lexer.column + 1);
    for _ in 0..3 {
        bump(lexer);
    }

    let mut content = String::new();
    loop {
        match bump(lexer) {
            Some('"') if lexer.peek == Some('"') && peek_second(lexer) == Some('"') => {
                bump(lexer);
                bump(lexer);
                // Extra quotes past the closing three belong to the content
                while lexer.peek == Some('"') {
                    content.push('"');
                    bump(lexer);
                }
                return Ok(Token::Quoted(content));
            }
            Some(ch) => content.push(ch),
            None => {
                return Err(HoconError::UnclosedString {
                    quote: '"',
                    line,
                    column,
                    hint: Some("Triple-quoted string not closed".into()),
                    code: Some(103),
                });
            }
        }
    }
}

fn tokenize_unquoted(lexer: &mut Lexer) -> Result<Token, HoconError> {
    let mut text = String::new();

    while let Some(ch) = lexer.peek {
        if is_forbidden_unquoted(ch) || (ch == '/' && peek_second(lexer) == Some('/')) {
            break;
        }
        text.push(ch);
        bump(lexer);
    }

    Ok(Token::Unquoted(text))
}

/// `${path}` or `${?path}`; path segments split on '.', quoted segments kept whole.
fn tokenize_substitution(lexer: &mut Lexer) -> Result<Token, HoconError> {
    let (line, column) = (lexer.line, lexer.column + 1);
    bump(lexer); // consume '$'

    if lexer.peek != Some('{') {
        return Err(HoconError::SyntaxError {
            message: "Expected '{' after '$'".into(),
            line,
            column,
            hint: Some("Substitutions are written ${path} or ${?path}".into()),
            code: Some(106),
        });
    }
    bump(lexer);

    let optional = if lexer.peek == Some('?') {
        bump(lexer);
        true
    } else {
        false
    };

    let mut path = Vec::new();
    let mut segment = String::new();
    let mut quoted_segment = false;

    loop {
        match lexer.peek {
            Some('}') => {
                bump(lexer);
                break;
            }
            Some('"') => {
                segment.push_str(&read_quoted(lexer)?);
                quoted_segment = true;
            }
            Some('.') => {
                bump(lexer);
                push_path_segment(&mut path, &mut segment, &mut quoted_segment, line, column)?;
            }
            Some(' ') | Some('\t') => {
                bump(lexer);
            }
            Some('\n') | None => {
                return Err(HoconError::UnexpectedEof {
                    message: "Substitution not closed".into(),
                    line,
                    column,
                    hint: Some("Add the closing '}'".into()),
                    code: Some(107),
                });
            }
            Some(ch) if is_forbidden_unquoted(ch) => {
                bump(lexer);
                return Err(HoconError::UnexpectedCharacter {
                    character: ch,
                    line: lexer.line,
                    column: lexer.column,
                    hint: Some("Quote path segments that contain special characters".into()),
                    code: Some(104),
                });
            }
            Some(ch) => {
                segment.push(ch);
                bump(lexer);
            }
        }
    }
    push_path_segment(&mut path, &mut segment, &mut quoted_segment, line, column)?;

    Ok(Token::Substitution { path, optional })
}

fn push_path_segment(
    path: &mut Vec<String>,
    segment: &mut String,
    quoted: &mut bool,
    line: usize,
    column: usize,
) -> Result<(), HoconError> {
    if segment.is_empty() && !*quoted {
        return Err(HoconError::SyntaxError {
            message: "Empty path segment in substitution".into(),
            line,
            column,
            hint: Some("Paths look like ${a.b.c}".into()),
            code: Some(108),
        });
    }
    path.push(std::mem::take(segment));
    *quoted = false;
    Ok(())
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> Result<Token, HoconError> {
    bump(lexer);
    Err(HoconError::UnexpectedCharacter {
        character: ch,
        line: lexer.line,
        column: lexer.column,
        hint: Some("Quote the value if it contains special characters".into()),
        code: Some(104),
    })
}
