use phf::{Map, phf_map};
use std::collections::VecDeque;
use std::fmt;

/// Reserved words of the selection language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    All,
    Not,
    And,
    Or,
    Around,
    Point,
    ByRes,
    Bonded,
    ByNum,
    Prop,
    Atom,
    LParen,
    RParen,
    Segid,
    Resid,
    Resname,
    Name,
    Type,
    Protein,
    Backbone,
}

static KEYWORDS: Map<&'static str, Keyword> = phf_map! {
    "all" => Keyword::All,
    "not" => Keyword::Not,
    "and" => Keyword::And,
    "or" => Keyword::Or,
    "around" => Keyword::Around,
    "point" => Keyword::Point,
    "byres" => Keyword::ByRes,
    "bonded" => Keyword::Bonded,
    "bynum" => Keyword::ByNum,
    "prop" => Keyword::Prop,
    "atom" => Keyword::Atom,
    "(" => Keyword::LParen,
    ")" => Keyword::RParen,
    "segid" => Keyword::Segid,
    "resid" => Keyword::Resid,
    "resname" => Keyword::Resname,
    "name" => Keyword::Name,
    "type" => Keyword::Type,
    "protein" => Keyword::Protein,
    "backbone" => Keyword::Backbone,
};

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        KEYWORDS.get(word).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::All => "all",
            Keyword::Not => "not",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Around => "around",
            Keyword::Point => "point",
            Keyword::ByRes => "byres",
            Keyword::Bonded => "bonded",
            Keyword::ByNum => "bynum",
            Keyword::Prop => "prop",
            Keyword::Atom => "atom",
            Keyword::LParen => "(",
            Keyword::RParen => ")",
            Keyword::Segid => "segid",
            Keyword::Resid => "resid",
            Keyword::Resname => "resname",
            Keyword::Name => "name",
            Keyword::Type => "type",
            Keyword::Protein => "protein",
            Keyword::Backbone => "backbone",
        }
    }

    /// Binding strength of operators; `None` for leaf keywords.
    pub fn precedence(self) -> Option<u8> {
        match self {
            Keyword::Around | Keyword::Point | Keyword::ByRes | Keyword::Bonded => Some(1),
            Keyword::And | Keyword::Or => Some(3),
            Keyword::Not => Some(5),
            _ => None,
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(self, Keyword::And | Keyword::Or)
    }

    /// Words that can never be the value of a `name`/`type`/`resname`/`segid`
    /// term, since the grammar would become ambiguous.
    pub fn is_reserved_value(self) -> bool {
        matches!(
            self,
            Keyword::LParen
                | Keyword::RParen
                | Keyword::And
                | Keyword::Or
                | Keyword::Not
                | Keyword::Segid
                | Keyword::Resid
                | Keyword::Resname
                | Keyword::Name
                | Keyword::Type
        )
    }
}

/// One element of the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    End,
}

impl Token {
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Word(word) => Keyword::from_word(word),
            Token::End => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => f.write_str(word),
            Token::End => f.write_str("end of input"),
        }
    }
}

static END: Token = Token::End;

/// Whitespace-separated words of a selection, terminated by [`Token::End`].
///
/// Consuming past the end keeps yielding [`Token::End`].
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    pub fn tokenize(text: &str) -> Self {
        let mut tokens: VecDeque<Token> = text
            .split_whitespace()
            .map(|word| Token::Word(word.to_string()))
            .collect();
        tokens.push_back(Token::End);
        Self { tokens }
    }

    pub fn peek(&self) -> &Token {
        self.tokens.front().unwrap_or(&END)
    }

    pub fn consume(&mut self) -> Token {
        match self.tokens.front() {
            Some(Token::End) | None => Token::End,
            Some(Token::Word(_)) => self.tokens.pop_front().unwrap_or(Token::End),
        }
    }

    pub fn is_at_end(&self) -> bool {
        *self.peek() == Token::End
    }
}
