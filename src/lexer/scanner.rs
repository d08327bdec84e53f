use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Look one character past `peek` without consuming anything
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Look two characters past `peek`
pub(super) fn peek_third(lexer: &Lexer) -> Option<char> {
    let mut it = lexer.input.clone();
    it.next();
    it.next()
}

/// Skip whitespace and comments, remembering the whitespace run that
/// directly precedes the next token. Newlines are left for the tokenizer.
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) {
    lexer.whitespace.clear();
    while let Some(c) = lexer.peek {
        match c {
            '\n' => break,
            '#' => skip_comment(lexer),
            '/' if peek_second(lexer) == Some('/') => skip_comment(lexer),
            c if c.is_whitespace() || c == '\u{feff}' => {
                lexer.whitespace.push(c);
                bump(lexer);
            }
            _ => break,
        }
    }
}

fn skip_comment(lexer: &mut Lexer) {
    // Up to, not including, the newline
    while let Some(ch) = lexer.peek {
        if ch == '\n' {
            break;
        }
        bump(lexer);
    }
}

/// Characters that may not appear in an unquoted string.
pub(super) fn is_forbidden_unquoted(c: char) -> bool {
    matches!(
        c,
        '$' | '"' | '{' | '}' | '[' | ']' | ':' | '=' | ',' | '+' | '#' | '`' | '^' | '?' | '!'
            | '@' | '*' | '&' | '\\'
    ) || c.is_whitespace()
        || c == '\u{feff}'
}
