use super::config::SelectionConfig;
use super::error::ParseError;
use super::eval::Selection;
use super::expr::{Comparator, Expr, PropertyField, TextField};
use super::token::{Keyword, Token, TokenStream};

/// Turns selection text into a [`Selection`].
///
/// The parser is a plain value: it holds only the settings that shape the
/// trees it builds, so one instance can parse any number of strings.
///
/// Operator binding, tightest first: `not`, then `and`/`or` (equal strength,
/// left-associative), then the prefix operators `around`, `byres` and
/// `bonded`, whose operand extends over any following `and`/`or` chain.
/// Parentheses reset the binding strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionParser {
    periodic: bool,
}

impl Default for SelectionParser {
    fn default() -> Self {
        Self::new(&SelectionConfig::default())
    }
}

impl SelectionParser {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            periodic: config.periodic,
        }
    }

    pub fn with_periodic(periodic: bool) -> Self {
        Self { periodic }
    }

    pub fn periodic(&self) -> bool {
        self.periodic
    }

    pub fn parse(&self, text: &str) -> Result<Selection, ParseError> {
        self.parse_expr(text).map(Selection::new)
    }

    /// Parses text into a bare expression tree.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on the first token that does not fit the
    /// grammar, including trailing tokens after a complete expression.
    pub fn parse_expr(&self, text: &str) -> Result<Expr, ParseError> {
        let mut state = ParseState {
            text,
            tokens: TokenStream::tokenize(text),
            periodic: self.periodic,
        };
        let expr = state.parse_expression(0)?;
        state.expect_end()?;
        Ok(expr)
    }
}

struct ParseState<'a> {
    text: &'a str,
    tokens: TokenStream,
    periodic: bool,
}

impl ParseState<'_> {
    fn error(&self, found: &Token, expected: &str) -> ParseError {
        ParseError::new(self.text, found.to_string(), expected)
    }

    fn parse_expression(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_subexpression()?;
        loop {
            let operator = match self.tokens.peek().keyword() {
                Some(keyword) if keyword.is_binary() => keyword,
                _ => break,
            };
            let precedence = operator.precedence().unwrap_or(0);
            if precedence < min_precedence {
                break;
            }
            self.tokens.consume();
            let rhs = self.parse_expression(precedence + 1)?;
            lhs = match operator {
                Keyword::And => lhs & rhs,
                _ => lhs | rhs,
            };
        }
        Ok(lhs)
    }

    fn parse_subexpression(&mut self) -> Result<Expr, ParseError> {
        let token = self.tokens.consume();
        let Some(keyword) = token.keyword() else {
            return Err(self.error(&token, "selection keyword"));
        };

        match keyword {
            Keyword::LParen => {
                let inner = self.parse_expression(0)?;
                self.expect(Keyword::RParen)?;
                Ok(inner)
            }
            Keyword::All => Ok(Expr::All),
            Keyword::Protein => Ok(Expr::Protein),
            Keyword::Backbone => Ok(Expr::Backbone),
            Keyword::Not => {
                let inner = self.parse_operand(keyword)?;
                Ok(!inner)
            }
            Keyword::ByRes => Ok(Expr::by_res(self.parse_operand(keyword)?)),
            Keyword::Bonded => Ok(Expr::bonded(self.parse_operand(keyword)?)),
            Keyword::Around => {
                let cutoff = self.parse_number()?;
                let inner = self.parse_operand(keyword)?;
                Ok(Expr::around(inner, cutoff, self.periodic))
            }
            Keyword::Point => {
                let cutoff = self.parse_number()?;
                let x = self.parse_number()?;
                let y = self.parse_number()?;
                let z = self.parse_number()?;
                Ok(Expr::Point {
                    x,
                    y,
                    z,
                    cutoff,
                    periodic: self.periodic,
                })
            }
            Keyword::Segid => self.parse_text_field(TextField::Segid),
            Keyword::Resname => self.parse_text_field(TextField::Resname),
            Keyword::Name => self.parse_text_field(TextField::Name),
            Keyword::Type => self.parse_text_field(TextField::Type),
            Keyword::Resid => self.parse_resid(),
            Keyword::ByNum => self.parse_bynum(),
            Keyword::Prop => self.parse_property(),
            Keyword::Atom => {
                let segid = self.parse_identifier()?;
                let resid = self.parse_integer()?;
                let name = self.parse_identifier()?;
                Ok(Expr::AtomExact { segid, resid, name })
            }
            Keyword::And | Keyword::Or | Keyword::RParen => {
                Err(self.error(&token, "selection keyword"))
            }
        }
    }

    fn parse_operand(&mut self, operator: Keyword) -> Result<Expr, ParseError> {
        self.parse_expression(operator.precedence().unwrap_or(0))
    }

    fn expect(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        let token = self.tokens.consume();
        if token.is_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(&token, &format!("'{}'", keyword.as_str())))
        }
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        match self.tokens.consume() {
            Token::End => Ok(()),
            token => Err(self.error(&token, "end of input")),
        }
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let token = self.tokens.consume();
        match &token {
            Token::Word(word) if !token.keyword().is_some_and(Keyword::is_reserved_value) => {
                Ok(word.clone())
            }
            _ => Err(self.error(&token, "identifier")),
        }
    }

    fn parse_text_field(&mut self, field: TextField) -> Result<Expr, ParseError> {
        let pattern = self.parse_identifier()?;
        Ok(Expr::StringField { field, pattern })
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        let token = self.tokens.consume();
        match &token {
            Token::Word(word) => match word.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(self.error(&token, "number")),
            },
            Token::End => Err(self.error(&token, "number")),
        }
    }

    fn parse_integer(&mut self) -> Result<isize, ParseError> {
        let token = self.tokens.consume();
        match &token {
            Token::Word(word) => word
                .parse::<isize>()
                .map_err(|_| self.error(&token, "integer")),
            Token::End => Err(self.error(&token, "integer")),
        }
    }

    fn parse_resid(&mut self) -> Result<Expr, ParseError> {
        let token = self.tokens.consume();
        let Token::Word(word) = &token else {
            return Err(self.error(&token, "residue number or range"));
        };
        if let Ok(lower) = word.parse::<isize>() {
            return Ok(Expr::resid(lower, None));
        }
        split_range(word)
            .and_then(|(lower, upper)| {
                Some((lower.parse::<isize>().ok()?, upper.parse::<isize>().ok()?))
            })
            .map(|(lower, upper)| Expr::resid(lower, Some(upper)))
            .ok_or_else(|| self.error(&token, "residue number or range"))
    }

    fn parse_bynum(&mut self) -> Result<Expr, ParseError> {
        const EXPECTED: &str = "atom number or range (numbers start at 1)";
        let token = self.tokens.consume();
        let Token::Word(word) = &token else {
            return Err(self.error(&token, EXPECTED));
        };
        let bounds = match split_range(word) {
            Some((lower, upper)) => lower
                .parse::<usize>()
                .ok()
                .zip(upper.parse::<usize>().ok())
                .map(|(lower, upper)| (lower, Some(upper))),
            None => word.parse::<usize>().ok().map(|lower| (lower, None)),
        };
        match bounds {
            Some((lower, upper)) if lower >= 1 => Ok(Expr::ByNumRange { lower, upper }),
            _ => Err(self.error(&token, EXPECTED)),
        }
    }

    fn parse_property(&mut self) -> Result<Expr, ParseError> {
        let mut token = self.tokens.consume();
        let abs = matches!(&token, Token::Word(word) if word == "abs");
        if abs {
            token = self.tokens.consume();
        }
        let field = match &token {
            Token::Word(word) => word.parse::<PropertyField>().ok(),
            Token::End => None,
        }
        .ok_or_else(|| self.error(&token, "property (x, y, z, mass or charge)"))?;

        let token = self.tokens.consume();
        let comparator = match &token {
            Token::Word(word) => word.parse::<Comparator>().ok(),
            Token::End => None,
        }
        .ok_or_else(|| self.error(&token, "comparison operator"))?;

        let value = self.parse_number()?;
        Ok(Expr::Property {
            field,
            comparator,
            value,
            abs,
        })
    }
}

/// Splits `lo:hi` or `lo-hi` into two unsigned digit runs.
fn split_range(word: &str) -> Option<(&str, &str)> {
    let (lower, upper) = word.split_once([':', '-'])?;
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    (is_digits(lower) && is_digits(upper)).then_some((lower, upper))
}
