use thiserror::Error;

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h))
}

fn code_suffix(code: &Option<u32>) -> String {
    code.map_or(String::new(), |c| format!(" Code: {}", c))
}

/// The main error type for HOCON lexing, parsing, include and substitution resolution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoconError {
    #[error("[HOCON] Syntax Error at {line}:{column}: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[HOCON] Invalid Token '{token}' at {line}:{column}{}{}", hint_suffix(.hint), code_suffix(.code))]
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[HOCON] Unexpected EOF at {line}:{column}: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Raised when a string literal is not closed.
    #[error("[HOCON] Unclosed string starting with '{quote}' at {line}:{column}{}{}", hint_suffix(.hint), code_suffix(.code))]
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Raised for characters that cannot start any token.
    #[error("[HOCON] Unexpected character '{character}' at {line}:{column}{}{}", hint_suffix(.hint), code_suffix(.code))]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// A typed accessor was called on a value of another kind.
    #[error("[HOCON] Type Mismatch: expected {expected}, found {found}{}", code_suffix(.code))]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        code: Option<u32>,
    },

    /// A value could not be converted to the requested Rust type.
    #[error("[HOCON] Type Error: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[HOCON] Path '{path}' not found in configuration{}", code_suffix(.code))]
    PathNotFound { path: String, code: Option<u32> },

    /// A file matched (or named) by the load could not be read.
    #[error("[HOCON] File Error '{path}': {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Include pattern expansion failed outright (bad pattern or unreadable directory).
    #[error("[HOCON] Glob Error '{pattern}': {message}{}", code_suffix(.code))]
    GlobError {
        message: String,
        pattern: String,
        code: Option<u32>,
    },

    #[error("[HOCON] Include cycle: '{path}' is already being included{}", code_suffix(.code))]
    IncludeCycle { path: String, code: Option<u32> },

    #[error("[HOCON] Unresolved substitution ${{{path}}} at {line}:{column}{}{}", hint_suffix(.hint), code_suffix(.code))]
    UnresolvedSubstitution {
        path: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[HOCON] Substitution cycle through ${{{path}}}{}", code_suffix(.code))]
    SubstitutionCycle { path: String, code: Option<u32> },

    #[error("[HOCON] Cannot concatenate {left} with {right}{}", code_suffix(.code))]
    ConcatMismatch {
        left: &'static str,
        right: &'static str,
        code: Option<u32>,
    },

    /// A pending substitution or concatenation reached a stage that needs a resolved tree.
    #[error("[HOCON] Unresolved value: {message}{}", code_suffix(.code))]
    Unresolved { message: String, code: Option<u32> },

    #[error("[HOCON] JSON Error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for HoconError {
    fn from(err: serde_json::Error) -> Self {
        HoconError::Json(err.to_string())
    }
}

impl HoconError {
    /// Numeric diagnostic code, if the variant carries one.
    pub fn code(&self) -> Option<u32> {
        match self {
            HoconError::SyntaxError { code, .. }
            | HoconError::InvalidToken { code, .. }
            | HoconError::UnexpectedEof { code, .. }
            | HoconError::UnclosedString { code, .. }
            | HoconError::UnexpectedCharacter { code, .. }
            | HoconError::TypeMismatch { code, .. }
            | HoconError::TypeError { code, .. }
            | HoconError::PathNotFound { code, .. }
            | HoconError::FileError { code, .. }
            | HoconError::GlobError { code, .. }
            | HoconError::IncludeCycle { code, .. }
            | HoconError::UnresolvedSubstitution { code, .. }
            | HoconError::SubstitutionCycle { code, .. }
            | HoconError::ConcatMismatch { code, .. }
            | HoconError::Unresolved { code, .. } => *code,
            HoconError::Json(_) => None,
        }
    }
}
