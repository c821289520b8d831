//! Part 21 parser: builds a raw entity table from tokens.
//!
//! Entities are kept uninterpreted: an id, a type name, and nested argument
//! values. Complex instances (`#1 = (A(..) B(..));`) keep one typed value
//! per component.

use std::collections::BTreeMap;

use crate::error::StepError;
use crate::lexer::{Lexer, SpannedToken, Token};

/// A single argument value in a STEP entity.
#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    /// Entity reference (`#123`).
    EntityRef(u64),
    /// String literal.
    String(String),
    /// Real number.
    Real(f64),
    /// Integer number.
    Integer(i64),
    /// Enumeration (`.T.`).
    Enum(String),
    /// Parenthesized list.
    List(Vec<StepValue>),
    /// Derived value (`*`).
    Derived,
    /// Null value (`$`).
    Null,
    /// `TYPE_NAME(args)`: a typed parameter or a complex-instance component.
    Typed {
        /// The type name.
        type_name: String,
        /// Arguments.
        args: Vec<StepValue>,
    },
}

impl StepValue {
    /// The referenced entity id, if this is a reference.
    pub fn as_entity_ref(&self) -> Option<u64> {
        match self {
            StepValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Numeric value; integers widen to reals.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            StepValue::Real(v) => Some(*v),
            StepValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            StepValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// String contents.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            StepValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Enumeration name without dots.
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            StepValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// List items.
    pub fn as_list(&self) -> Option<&[StepValue]> {
        match self {
            StepValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// Type name and arguments of a typed value.
    pub fn as_typed(&self) -> Option<(&str, &[StepValue])> {
        match self {
            StepValue::Typed { type_name, args } => Some((type_name, args)),
            _ => None,
        }
    }

    /// Whether this is `$`.
    pub fn is_null(&self) -> bool {
        matches!(self, StepValue::Null)
    }

    /// Whether this is `*`.
    pub fn is_derived(&self) -> bool {
        matches!(self, StepValue::Derived)
    }
}

/// A parsed STEP entity instance.
#[derive(Debug, Clone, PartialEq)]
pub struct StepEntity {
    /// Entity ID (from `#123`); zero for header entities.
    pub id: u64,
    /// Entity type name. For complex instances, the component names joined
    /// by spaces.
    pub type_name: String,
    /// Constructor arguments. For complex instances, one
    /// [`StepValue::Typed`] per component.
    pub args: Vec<StepValue>,
    /// Whether this is a complex instance.
    pub complex: bool,
}

impl StepEntity {
    /// `(type_name, args)` of each component; a simple instance has one.
    pub fn components(&self) -> Vec<(&str, &[StepValue])> {
        if self.complex {
            self.args.iter().filter_map(StepValue::as_typed).collect()
        } else {
            vec![(self.type_name.as_str(), self.args.as_slice())]
        }
    }

    /// Whether the instance is, or has a component, of type `name`.
    pub fn has_type(&self, name: &str) -> bool {
        self.components().iter().any(|(t, _)| *t == name)
    }
}

/// The parsed content of a STEP file.
#[derive(Debug, Clone, Default)]
pub struct StepFile {
    /// Header section entities.
    pub header: Vec<StepEntity>,
    /// Data section entities in ascending id order.
    pub entities: BTreeMap<u64, StepEntity>,
}

impl StepFile {
    /// Get an entity by ID.
    pub fn get(&self, id: u64) -> Option<&StepEntity> {
        self.entities.get(&id)
    }

    /// Get an entity by ID, returning an error if not found.
    pub fn require(&self, id: u64) -> Result<&StepEntity, StepError> {
        self.entities.get(&id).ok_or(StepError::MissingEntity(id))
    }

    /// All entities of a given simple type, in ascending id order.
    pub fn entities_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a StepEntity> + 'a {
        self.entities.values().filter(move |e| e.type_name == type_name)
    }
}

/// Parser for Part 21 STEP files.
pub struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    /// Parse a STEP file from bytes.
    pub fn parse(input: &[u8]) -> Result<StepFile, StepError> {
        let tokens = Lexer::new(input).tokenize()?;
        let mut parser = Parser { tokens, pos: 0 };
        parser.parse_file()
    }

    fn parse_file(&mut self) -> Result<StepFile, StepError> {
        let mut file = StepFile::default();

        self.expect_keyword("ISO-10303-21")?;
        self.expect_token(&Token::Semicolon)?;

        while !self.is_at_end() {
            if self.check_keyword("HEADER") {
                self.advance();
                self.expect_token(&Token::Semicolon)?;
                file.header = self.parse_header_section()?;
                self.expect_keyword("ENDSEC")?;
                self.expect_token(&Token::Semicolon)?;
            } else if self.check_keyword("DATA") {
                self.advance();
                // DATA may carry a parameter list in later editions.
                if self.check_token(&Token::LParen) {
                    self.parse_args(None)?;
                }
                self.expect_token(&Token::Semicolon)?;
                for entity in self.parse_data_section()? {
                    let id = entity.id;
                    if file.entities.insert(id, entity).is_some() {
                        return Err(StepError::parser(Some(id), "duplicate entity id"));
                    }
                }
                self.expect_keyword("ENDSEC")?;
                self.expect_token(&Token::Semicolon)?;
            } else if self.check_keyword("END-ISO-10303-21") {
                self.advance();
                self.expect_token(&Token::Semicolon)?;
                break;
            } else {
                return Err(self.unexpected(None, "section keyword"));
            }
        }

        Ok(file)
    }

    fn parse_header_section(&mut self) -> Result<Vec<StepEntity>, StepError> {
        let mut entities = Vec::new();
        while let Some(Token::Keyword(type_name)) = self.peek_token().cloned() {
            if type_name == "ENDSEC" {
                break;
            }
            self.advance();
            let args = self.parse_args(None)?;
            self.expect_token(&Token::Semicolon)?;
            entities.push(StepEntity {
                id: 0,
                type_name,
                args,
                complex: false,
            });
        }
        Ok(entities)
    }

    fn parse_data_section(&mut self) -> Result<Vec<StepEntity>, StepError> {
        let mut entities = Vec::new();
        while let Some(&Token::EntityRef(id)) = self.peek_token() {
            self.advance();
            self.expect_token(&Token::Equals)?;

            let entity = match self.peek_token().cloned() {
                Some(Token::Keyword(type_name)) => {
                    self.advance();
                    let args = self.parse_args(Some(id))?;
                    StepEntity {
                        id,
                        type_name,
                        args,
                        complex: false,
                    }
                }
                Some(Token::LParen) => self.parse_complex(id)?,
                _ => return Err(self.unexpected(Some(id), "type name")),
            };
            self.expect_token(&Token::Semicolon)?;
            entities.push(entity);
        }
        Ok(entities)
    }

    /// `( A(..) B(..) ... )`
    fn parse_complex(&mut self, id: u64) -> Result<StepEntity, StepError> {
        self.expect_token(&Token::LParen)?;
        let mut names = Vec::new();
        let mut args = Vec::new();
        while let Some(Token::Keyword(type_name)) = self.peek_token().cloned() {
            self.advance();
            let component_args = self.parse_args(Some(id))?;
            names.push(type_name.clone());
            args.push(StepValue::Typed {
                type_name,
                args: component_args,
            });
        }
        self.expect_token(&Token::RParen)?;

        if names.is_empty() {
            return Err(StepError::parser(Some(id), "complex instance without components"));
        }
        Ok(StepEntity {
            id,
            type_name: names.join(" "),
            args,
            complex: true,
        })
    }

    fn parse_args(&mut self, entity: Option<u64>) -> Result<Vec<StepValue>, StepError> {
        self.expect_token(&Token::LParen)?;
        let mut args = Vec::new();
        if !self.check_token(&Token::RParen) {
            args.push(self.parse_value(entity)?);
            while self.check_token(&Token::Comma) {
                self.advance();
                args.push(self.parse_value(entity)?);
            }
        }
        self.expect_token(&Token::RParen)?;
        Ok(args)
    }

    fn parse_value(&mut self, entity: Option<u64>) -> Result<StepValue, StepError> {
        let value = match self.peek_token().cloned() {
            Some(Token::EntityRef(id)) => StepValue::EntityRef(id),
            Some(Token::String(s)) => StepValue::String(s),
            Some(Token::Real(v)) => StepValue::Real(v),
            Some(Token::Integer(v)) => StepValue::Integer(v),
            Some(Token::Enum(s)) => StepValue::Enum(s),
            Some(Token::Asterisk) => StepValue::Derived,
            Some(Token::Dollar) => StepValue::Null,
            Some(Token::LParen) => return Ok(StepValue::List(self.parse_args(entity)?)),
            Some(Token::Keyword(type_name)) => {
                self.advance();
                let args = self.parse_args(entity)?;
                return Ok(StepValue::Typed { type_name, args });
            }
            _ => return Err(self.unexpected(entity, "value")),
        };
        self.advance();
        Ok(value)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check_token(&self, expected: &Token) -> bool {
        self.peek_token() == Some(expected)
    }

    fn check_keyword(&self, name: &str) -> bool {
        matches!(self.peek_token(), Some(Token::Keyword(k)) if k == name)
    }

    fn unexpected(&self, entity: Option<u64>, expected: &str) -> StepError {
        match self.tokens.get(self.pos) {
            Some(t) => StepError::parser(
                entity,
                format!("expected {expected}, got {:?} at line {}, column {}", t.token, t.pos.line, t.pos.col),
            ),
            None => StepError::parser(entity, format!("expected {expected}, got end of input")),
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<(), StepError> {
        if self.check_token(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(None, &format!("{expected:?}")))
        }
    }

    fn expect_keyword(&mut self, name: &str) -> Result<(), StepError> {
        if self.check_keyword(name) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(None, &format!("keyword '{name}'")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(data: &str) -> String {
        format!("ISO-10303-21;\nHEADER;\nFILE_DESCRIPTION((''), '2;1');\nENDSEC;\nDATA;\n{data}\nENDSEC;\nEND-ISO-10303-21;\n")
    }

    #[test]
    fn test_parse_simple() {
        let file = Parser::parse(wrap("#1 = VERTEX_POINT('origin', #2);\n#2 = CARTESIAN_POINT('', (0., 0., 1.5));").as_bytes()).unwrap();
        assert_eq!(file.header.len(), 1);
        assert_eq!(file.header[0].type_name, "FILE_DESCRIPTION");
        assert_eq!(file.entities.len(), 2);

        let v = file.get(1).unwrap();
        assert_eq!(v.type_name, "VERTEX_POINT");
        assert_eq!(v.args[0].as_string(), Some("origin"));
        assert_eq!(v.args[1].as_entity_ref(), Some(2));

        let coords = file.get(2).unwrap().args[1].as_list().unwrap();
        assert_eq!(coords.len(), 3);
        assert_eq!(coords[2].as_real(), Some(1.5));
    }

    #[test]
    fn test_parse_nested_list() {
        let file = Parser::parse(
            wrap("#1 = B_SPLINE_CURVE_WITH_KNOTS('', 3, (#2, #3, #4), .UNSPECIFIED., .F., .F., (4, 4), (0., 1.), .UNSPECIFIED.);")
                .as_bytes(),
        )
        .unwrap();
        let e = file.get(1).unwrap();
        assert_eq!(e.args.len(), 9);
        assert_eq!(e.args[1].as_integer(), Some(3));
        assert_eq!(e.args[2].as_list().unwrap()[0].as_entity_ref(), Some(2));
        assert_eq!(e.args[3].as_enum(), Some("UNSPECIFIED"));
        assert_eq!(e.args[4].as_enum(), Some("F"));
    }

    #[test]
    fn test_parse_null_derived_and_typed() {
        let file = Parser::parse(wrap("#1 = SOME_ENTITY($, *, LENGTH_MEASURE(2.5));").as_bytes()).unwrap();
        let e = file.get(1).unwrap();
        assert!(e.args[0].is_null());
        assert!(e.args[1].is_derived());
        let (name, args) = e.args[2].as_typed().unwrap();
        assert_eq!(name, "LENGTH_MEASURE");
        assert_eq!(args[0].as_real(), Some(2.5));
    }

    #[test]
    fn test_parse_complex_instance() {
        let file = Parser::parse(
            wrap("#5 = ( BOUNDED_CURVE() B_SPLINE_CURVE(2, (#1, #2, #3), .UNSPECIFIED., .F., .F.) RATIONAL_B_SPLINE_CURVE((1., 0.5, 1.)) );")
                .as_bytes(),
        )
        .unwrap();
        let e = file.get(5).unwrap();
        assert!(e.complex);
        assert_eq!(e.type_name, "BOUNDED_CURVE B_SPLINE_CURVE RATIONAL_B_SPLINE_CURVE");

        let parts = e.components();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], ("BOUNDED_CURVE", &[][..]));
        assert_eq!(parts[1].1.len(), 5);
        assert!(e.has_type("RATIONAL_B_SPLINE_CURVE"));
        assert!(!e.has_type("LINE"));
    }

    #[test]
    fn test_entities_of_type_in_id_order() {
        let file = Parser::parse(
            wrap("#30 = EDGE_LOOP('', ());\n#2 = DIRECTION('', (1., 0., 0.));\n#7 = EDGE_LOOP('', ());").as_bytes(),
        )
        .unwrap();
        let ids: Vec<u64> = file.entities_of_type("EDGE_LOOP").map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 30]);
    }

    #[test]
    fn test_duplicate_id() {
        let err = Parser::parse(wrap("#1 = LINE('', #2, #3);\n#1 = LINE('', #2, #3);").as_bytes()).unwrap_err();
        assert!(matches!(err, StepError::Parser { entity_id: Some(1), .. }));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = Parser::parse(wrap("#1 = LINE('', #2, #3)\n#2 = LINE('', #2, #3);").as_bytes()).unwrap_err();
        assert!(matches!(err, StepError::Parser { .. }));
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_missing_entity() {
        let file = Parser::parse(wrap("").as_bytes()).unwrap();
        assert!(matches!(file.require(9), Err(StepError::MissingEntity(9))));
    }
}
