// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;
use crate::HoconError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    Unquoted(String),
    Quoted(String),
    Substitution { path: Vec<String>, optional: bool },

    // --- structure ---
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Equals,
    PlusEquals,
    Comma,

    // --- layout ---
    Newline,
    Eof,
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
    // whitespace skipped right before the last token
    whitespace: String,
    token_line: usize,
    token_column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
            whitespace: String::new(),
            token_line: 1,
            token_column: 1,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Whitespace (spaces, tabs) that preceded the last returned token.
    /// Comments are not part of it.
    pub fn whitespace(&self) -> &str {
        &self.whitespace
    }

    /// Line and column where the last returned token starts.
    pub fn token_start(&self) -> (usize, usize) {
        (self.token_line, self.token_column)
    }

    pub fn next_token(&mut self) -> Result<Token, HoconError> {
        tokenizer::next_token(self)
    }
}
