use crate::lexer::{Lexer, Token};
use crate::HoconError;
use crate::ast::{Object, Root, Substitution, Value};
use crate::include::{IncludeSpec, Includer};
use crate::merge;

mod document;
mod value;

/// HOCON parser. Produces a `Root` whose substitutions are still pending;
/// every `include` directive is handed to the `Includer`.
pub struct Parser<'a, 'i> {
    lexer: Lexer<'a>,
    peek: Option<Token>,
    // whitespace in front of `peek` and where `peek` starts
    peek_space: String,
    peek_pos: (usize, usize),
    includer: &'i mut dyn Includer,
    substitutions: Vec<Substitution>,
}

impl<'a, 'i> Parser<'a, 'i> {
    pub fn new(input: &'a str, includer: &'i mut dyn Includer) -> Result<Self, HoconError> {
        let mut lexer = Lexer::new(input);
        let peek = Some(lexer.next_token()?);
        let peek_space = lexer.whitespace().to_string();
        let peek_pos = lexer.token_start();
        Ok(Self {
            lexer,
            peek,
            peek_space,
            peek_pos,
            includer,
            substitutions: Vec::new(),
        })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, HoconError> {
        let curr = self.peek.take().ok_or(HoconError::UnexpectedEof {
            message: "Unexpected end of input".into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: None,
            code: Some(201),
        })?;
        if curr != Token::Eof {
            self.peek = Some(self.lexer.next_token()?);
            self.peek_space = self.lexer.whitespace().to_string();
            self.peek_pos = self.lexer.token_start();
        } else {
            self.peek = Some(Token::Eof);
            self.peek_space.clear();
        }
        Ok(curr)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek.as_ref()
    }

    pub(crate) fn peek_space(&self) -> &str {
        &self.peek_space
    }

    /// Whether whitespace separates the previous token from `peek`.
    pub(crate) fn peek_is_spaced(&self) -> bool {
        !self.peek_space.is_empty()
    }

    pub(crate) fn expect(&mut self, expected: Token) -> Result<Token, HoconError> {
        let (line, column) = self.peek_pos;
        let token = self.bump()?;
        if token != expected {
            return Err(HoconError::SyntaxError {
                message: format!("Expected {:?}, got {:?}", expected, token),
                line,
                column,
                hint: Some("Check your syntax".into()),
                code: Some(202),
            });
        }
        Ok(token)
    }

    pub(crate) fn line(&self) -> usize {
        self.peek_pos.0
    }

    pub(crate) fn column(&self) -> usize {
        self.peek_pos.1
    }

    /// Skip newline and comma separators.
    pub(crate) fn skip_separators(&mut self) -> Result<(), HoconError> {
        while matches!(self.peek(), Some(Token::Newline) | Some(Token::Comma)) {
            self.bump()?;
        }
        Ok(())
    }

    pub(crate) fn skip_newlines(&mut self) -> Result<(), HoconError> {
        while let Some(Token::Newline) = self.peek() {
            self.bump()?;
        }
        Ok(())
    }

    /// Register a placeholder; the same substitution goes into the pending list.
    pub(crate) fn new_substitution(
        &mut self,
        path: Vec<String>,
        optional: bool,
        (line, column): (usize, usize),
    ) -> Value {
        let sub = Substitution::new(path, optional, line, column);
        self.substitutions.push(sub.clone());
        Value::Substitution(sub)
    }

    /// Run the include callback and merge its result into `target`.
    /// Its substitutions go after the ones collected so far.
    pub(crate) fn include_into(&mut self, target: &mut Object, spec: IncludeSpec) -> Result<(), HoconError> {
        let (line, column) = self.peek_pos;
        let included = self.includer.include(&spec)?;
        match included.value {
            Value::Object(obj) => merge::merge(target, obj),
            other => {
                return Err(HoconError::SyntaxError {
                    message: format!("Included '{}' is {}, not an object", spec.pattern, other.kind()),
                    line,
                    column,
                    hint: Some("Included files must contain an object".into()),
                    code: Some(216),
                });
            }
        }
        self.substitutions.extend(included.substitutions);
        Ok(())
    }

    pub fn parse_root(mut self) -> Result<Root, HoconError> {
        let value = document::parse_root(&mut self)?;
        Ok(Root::new(value, self.substitutions))
    }
}

/// Parse `input`, routing includes through `includer`.
pub fn parse(input: &str, includer: &mut dyn Includer) -> Result<Root, HoconError> {
    Parser::new(input, includer)?.parse_root()
}

#[cfg(test)]
mod tests;
