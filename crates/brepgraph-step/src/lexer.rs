//! Part 21 (STEP physical file format) lexer.
//!
//! Tokenizes STEP files according to ISO 10303-21. Handles:
//! - Keywords, including user-defined `!NAME` keywords and the hyphenated
//!   `ISO-10303-21` / `END-ISO-10303-21` markers
//! - Entity references (e.g., `#123`)
//! - Strings with `''` escapes
//! - Reals and integers
//! - Enumerations (e.g., `.T.`, `.UNSPECIFIED.`)
//! - Punctuation and `/* ... */` comments

use crate::error::StepError;

/// A token in a STEP file.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Keyword or identifier, upper-cased.
    Keyword(String),
    /// Entity reference (`#123` becomes `EntityRef(123)`).
    EntityRef(u64),
    /// String literal (contents without quotes).
    String(String),
    /// Real number.
    Real(f64),
    /// Integer number.
    Integer(i64),
    /// Enumeration (`.T.` becomes `Enum("T")`).
    Enum(String),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `=`
    Equals,
    /// `*` (derived value marker).
    Asterisk,
    /// `$` (null value marker).
    Dollar,
}

/// Position in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

/// A token with the position where it starts.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    /// The token.
    pub token: Token,
    /// Start position.
    pub pos: Position,
}

/// Lexer for Part 21 STEP files.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Result<Vec<SpannedToken>, StepError> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token()? {
            tokens.push(tok);
        }
        Ok(tokens)
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<SpannedToken>, StepError> {
        self.skip_whitespace_and_comments()?;

        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        let pos = self.position();

        let token = match ch {
            b'(' | b')' | b',' | b';' | b'=' | b'*' | b'$' => {
                self.advance();
                match ch {
                    b'(' => Token::LParen,
                    b')' => Token::RParen,
                    b',' => Token::Comma,
                    b';' => Token::Semicolon,
                    b'=' => Token::Equals,
                    b'*' => Token::Asterisk,
                    _ => Token::Dollar,
                }
            }
            b'#' => self.read_entity_ref(pos)?,
            b'\'' => self.read_string(pos)?,
            b'.' => self.read_enum(pos)?,
            b'-' | b'+' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit() || c == b'.') => {
                self.read_number(pos)?
            }
            b'0'..=b'9' => self.read_number(pos)?,
            b'!' => {
                self.advance();
                self.read_keyword()
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.read_keyword(),
            _ => {
                return Err(StepError::lexer(
                    pos.line,
                    pos.col,
                    format!("unexpected character: '{}'", ch as char),
                ));
            }
        };

        Ok(Some(SpannedToken { token, pos }))
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            col: self.col,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consume bytes while `pred` holds, appending them to `out`.
    fn take_while(&mut self, out: &mut String, pred: impl Fn(u8) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            out.push(ch as char);
            self.advance();
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), StepError> {
        loop {
            while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
                self.advance();
            }

            if self.peek() == Some(b'/') && self.peek_at(1) == Some(b'*') {
                let start = self.position();
                self.advance();
                self.advance();
                loop {
                    match (self.peek(), self.peek_at(1)) {
                        (Some(b'*'), Some(b'/')) => {
                            self.advance();
                            self.advance();
                            break;
                        }
                        (Some(_), _) => {
                            self.advance();
                        }
                        (None, _) => {
                            return Err(StepError::lexer(start.line, start.col, "unterminated comment"));
                        }
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    fn read_entity_ref(&mut self, start: Position) -> Result<Token, StepError> {
        self.advance();

        let mut digits = String::new();
        self.take_while(&mut digits, |c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(StepError::lexer(start.line, start.col, "expected digits after '#'"));
        }

        digits
            .parse()
            .map(Token::EntityRef)
            .map_err(|_| StepError::lexer(start.line, start.col, format!("invalid entity ID: {digits}")))
    }

    fn read_string(&mut self, start: Position) -> Result<Token, StepError> {
        self.advance();

        let mut content = Vec::new();
        loop {
            match self.advance() {
                None => return Err(StepError::lexer(start.line, start.col, "unterminated string")),
                Some(b'\'') if self.peek() == Some(b'\'') => {
                    content.push(b'\'');
                    self.advance();
                }
                Some(b'\'') => break,
                Some(ch) => content.push(ch),
            }
        }

        Ok(Token::String(String::from_utf8_lossy(&content).into_owned()))
    }

    fn read_enum(&mut self, start: Position) -> Result<Token, StepError> {
        self.advance();

        let mut name = String::new();
        self.take_while(&mut name, |c| c.is_ascii_alphanumeric() || c == b'_');
        if self.advance() != Some(b'.') {
            return Err(StepError::lexer(start.line, start.col, "unterminated enumeration"));
        }
        if name.is_empty() {
            return Err(StepError::lexer(start.line, start.col, "empty enumeration"));
        }

        Ok(Token::Enum(name.to_ascii_uppercase()))
    }

    fn read_number(&mut self, start: Position) -> Result<Token, StepError> {
        let mut text = String::new();
        let mut is_real = false;

        if let Some(sign @ (b'-' | b'+')) = self.peek() {
            text.push(sign as char);
            self.advance();
        }
        self.take_while(&mut text, |c| c.is_ascii_digit());

        // Part 21 writes reals with a trailing point ("1."), so a point
        // always belongs to the number here.
        if self.peek() == Some(b'.') {
            is_real = true;
            text.push('.');
            self.advance();
            self.take_while(&mut text, |c| c.is_ascii_digit());
        }

        if let Some(e @ (b'E' | b'e')) = self.peek() {
            is_real = true;
            text.push(e as char);
            self.advance();
            if let Some(sign @ (b'-' | b'+')) = self.peek() {
                text.push(sign as char);
                self.advance();
            }
            self.take_while(&mut text, |c| c.is_ascii_digit());
        }

        if is_real {
            // Rust's float parser rejects "1." and ".5" forms.
            let normalized = normalize_real(&text);
            normalized
                .parse()
                .map(Token::Real)
                .map_err(|_| StepError::lexer(start.line, start.col, format!("invalid real number: {text}")))
        } else {
            text.parse()
                .map(Token::Integer)
                .map_err(|_| StepError::lexer(start.line, start.col, format!("invalid integer: {text}")))
        }
    }

    fn read_keyword(&mut self) -> Token {
        let mut name = String::new();
        self.take_while(&mut name, |c| c.is_ascii_alphanumeric() || c == b'_' || c == b'-');
        Token::Keyword(name.to_ascii_uppercase())
    }
}

/// Pad bare points with zeros: `1.` to `1.0`, `-.5` to `-0.5`, `1.E3` to `1.0E3`.
fn normalize_real(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '.' {
            if !prev.is_some_and(|p| p.is_ascii_digit()) {
                out.push('0');
            }
            out.push('.');
            if !chars.peek().is_some_and(|n| n.is_ascii_digit()) {
                out.push('0');
            }
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input.as_bytes())
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|st| st.token)
            .collect()
    }

    #[test]
    fn test_entity_ref() {
        assert_eq!(tokenize("#123"), vec![Token::EntityRef(123)]);
        assert!(Lexer::new(b"#").tokenize().is_err());
    }

    #[test]
    fn test_string() {
        assert_eq!(tokenize("'hello'"), vec![Token::String("hello".into())]);
        assert_eq!(tokenize("'it''s'"), vec![Token::String("it's".into())]);
        assert_eq!(tokenize("''"), vec![Token::String(String::new())]);
    }

    #[test]
    fn test_enum() {
        assert_eq!(tokenize(".T."), vec![Token::Enum("T".into())]);
        assert_eq!(tokenize(".unspecified."), vec![Token::Enum("UNSPECIFIED".into())]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokenize("42"), vec![Token::Integer(42)]);
        assert_eq!(tokenize("-7"), vec![Token::Integer(-7)]);
        assert_eq!(tokenize("3.25"), vec![Token::Real(3.25)]);
        assert_eq!(tokenize("-1.5E-10"), vec![Token::Real(-1.5e-10)]);
        assert_eq!(tokenize("10."), vec![Token::Real(10.0)]);
        assert_eq!(tokenize("1.E3"), vec![Token::Real(1000.0)]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(tokenize("EDGE_CURVE"), vec![Token::Keyword("EDGE_CURVE".into())]);
        assert_eq!(tokenize("data"), vec![Token::Keyword("DATA".into())]);
        assert_eq!(tokenize("END-ISO-10303-21"), vec![Token::Keyword("END-ISO-10303-21".into())]);
        assert_eq!(tokenize("!VENDOR_THING"), vec![Token::Keyword("VENDOR_THING".into())]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokenize("()=,;*$"),
            vec![
                Token::LParen,
                Token::RParen,
                Token::Equals,
                Token::Comma,
                Token::Semicolon,
                Token::Asterisk,
                Token::Dollar,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(tokenize("/* comment */ #1"), vec![Token::EntityRef(1)]);
        assert_eq!(tokenize("#1 /* inline */ #2"), vec![Token::EntityRef(1), Token::EntityRef(2)]);
        assert!(Lexer::new(b"#1 /* open").tokenize().is_err());
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new(b"#1 =\n  EDGE_LOOP").tokenize().unwrap();
        assert_eq!(tokens[2].pos, Position { line: 2, col: 3 });
    }

    #[test]
    fn test_bad_character() {
        let err = Lexer::new(b"#1 = @").tokenize().unwrap_err();
        assert!(matches!(err, StepError::Lexer { line: 1, col: 6, .. }));
    }

    #[test]
    fn test_complete_entity() {
        assert_eq!(
            tokenize("#7 = ORIENTED_EDGE('', *, *, #5, .F.);"),
            vec![
                Token::EntityRef(7),
                Token::Equals,
                Token::Keyword("ORIENTED_EDGE".into()),
                Token::LParen,
                Token::String(String::new()),
                Token::Comma,
                Token::Asterisk,
                Token::Comma,
                Token::Asterisk,
                Token::Comma,
                Token::EntityRef(5),
                Token::Comma,
                Token::Enum("F".into()),
                Token::RParen,
                Token::Semicolon,
            ]
        );
    }
}
