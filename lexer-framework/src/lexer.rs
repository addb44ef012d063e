use crate::error::LexerError;
use crate::source::{CharSource, StringSource};
use crate::tokenizer::Tokenizer;
use common_framework::Token;
use regex::Regex;

/// Characters treated as whitespace unless configured otherwise.
pub const DEFAULT_WHITESPACE: &str = " \t\r\n";

/// Type tag of tokens produced by `add_string_type`.
pub const STRING: &str = "STRING";

/// A comment delimiter pair. Comment text never becomes a token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommentType {
    pub start: String,
    pub end: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nested: bool,
}

/// A quoted-string type. The whole string, delimiters included, becomes one
/// token tagged `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringType {
    pub name: String,
    pub delimiter: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub escape: Option<String>,
}

/// A literal symbol sequence, recognised anywhere inside a span.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    pub sequence: String,
    pub name: String,
}

/// A terminal described by a regular expression that must cover a whole span.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalPattern {
    pub pattern: String,
    pub name: String,
}

/// Lexer configuration.
///
/// A `Lexer` is a plain value describing how characters are grouped and
/// classified. It is validated and compiled each time a tokenizer is
/// created from it, so it can be reused for any number of sources.
///
/// ```ignore
/// let mut lexer = Lexer::new();
/// lexer
///     .add_comment_type("--", "\n")
///     .add_symbol("(", "PAR_OPEN")
///     .add_terminal("[a-z]+", "IDENT")
///     .add_keyword("define");
/// let tokens = lexer.tokenize("(define x")?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Lexer {
    whitespace: String,
    case_sensitive: bool,
    multi_type_tokens: bool,
    comment_types: Vec<CommentType>,
    string_types: Vec<StringType>,
    symbols: Vec<Symbol>,
    keywords: Vec<String>,
    terminals: Vec<TerminalPattern>,
}

impl Default for Lexer {
    fn default() -> Self {
        Self {
            whitespace: DEFAULT_WHITESPACE.to_string(),
            case_sensitive: true,
            multi_type_tokens: false,
            comment_types: Vec::new(),
            string_types: Vec::new(),
            symbols: Vec::new(),
            keywords: Vec::new(),
            terminals: Vec::new(),
        }
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the characters that separate tokens.
    pub fn set_whitespace(&mut self, chars: &str) -> &mut Self {
        self.whitespace = chars.to_string();
        self
    }

    /// Controls whether keywords are matched case-sensitively.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) -> &mut Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Controls whether a token may carry more than one type tag.
    ///
    /// When off, every token gets exactly one tag from the priority chain
    /// regex terminal, symbol, keyword. When on, all matching terminal
    /// patterns and keywords contribute a tag.
    pub fn set_multi_type_tokens(&mut self, multi_type: bool) -> &mut Self {
        self.multi_type_tokens = multi_type;
        self
    }

    pub fn add_comment_type(&mut self, start: &str, end: &str) -> &mut Self {
        self.push_comment_type(start, end, false)
    }

    /// Adds a comment type whose start sequence may appear nested inside it.
    pub fn add_nested_comment_type(&mut self, start: &str, end: &str) -> &mut Self {
        self.push_comment_type(start, end, true)
    }

    fn push_comment_type(&mut self, start: &str, end: &str, nested: bool) -> &mut Self {
        self.comment_types.push(CommentType {
            start: start.to_string(),
            end: end.to_string(),
            nested,
        });
        self
    }

    /// Adds a string type tagged `STRING`.
    pub fn add_string_type(&mut self, delimiter: &str, escape: Option<&str>) -> &mut Self {
        self.add_named_string_type(STRING, delimiter, escape)
    }

    pub fn add_named_string_type(
        &mut self,
        name: &str,
        delimiter: &str,
        escape: Option<&str>,
    ) -> &mut Self {
        self.string_types.push(StringType {
            name: name.to_string(),
            delimiter: delimiter.to_string(),
            escape: escape.map(str::to_string),
        });
        self
    }

    pub fn add_symbol(&mut self, sequence: &str, name: &str) -> &mut Self {
        self.symbols.push(Symbol {
            sequence: sequence.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// Adds a keyword. Its type tag is the keyword in upper case.
    pub fn add_keyword(&mut self, keyword: &str) -> &mut Self {
        self.keywords.push(keyword.to_string());
        self
    }

    /// Adds a terminal pattern in `regex` syntax, without delimiters.
    pub fn add_terminal(&mut self, pattern: &str, name: &str) -> &mut Self {
        self.terminals.push(TerminalPattern {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn whitespace(&self) -> &str {
        &self.whitespace
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn multi_type_tokens(&self) -> bool {
        self.multi_type_tokens
    }

    pub fn comment_types(&self) -> &[CommentType] {
        &self.comment_types
    }

    pub fn string_types(&self) -> &[StringType] {
        &self.string_types
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn terminals(&self) -> &[TerminalPattern] {
        &self.terminals
    }

    /// Validates the configuration and creates a tokenizer over `source`.
    pub fn tokenizer<S: CharSource>(&self, source: S) -> Result<Tokenizer<S>, LexerError> {
        Ok(Tokenizer::new(source, self.compile()?))
    }

    /// Tokenizes in-memory text in one go.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, LexerError> {
        Ok(self.tokenizer(StringSource::new(text))?.collect())
    }

    pub(crate) fn compile(&self) -> Result<TokenRules, LexerError> {
        let mut lookahead = 1;
        let mut require = |seq: &str, what: &'static str| {
            if seq.is_empty() {
                return Err(LexerError::EmptySequence { what });
            }
            lookahead = lookahead.max(seq.chars().count());
            Ok(())
        };

        for comment in &self.comment_types {
            require(&comment.start, "comment start sequence")?;
            require(&comment.end, "comment end sequence")?;
        }
        for string in &self.string_types {
            require(&string.delimiter, "string delimiter")?;
            if let Some(escape) = &string.escape {
                require(escape, "escape sequence")?;
            }
        }
        for symbol in &self.symbols {
            require(&symbol.sequence, "symbol")?;
        }
        if self.keywords.iter().any(String::is_empty) {
            return Err(LexerError::EmptySequence { what: "keyword" });
        }

        let terminals = self
            .terminals
            .iter()
            .map(|t| {
                Regex::new(&format!("^(?:{})$", t.pattern))
                    .map(|regex| (regex, t.name.clone()))
                    .map_err(|source| LexerError::InvalidPattern {
                        pattern: t.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TokenRules {
            whitespace: self.whitespace.chars().collect(),
            case_sensitive: self.case_sensitive,
            multi_type: self.multi_type_tokens,
            comments: self.comment_types.clone(),
            strings: self.string_types.clone(),
            symbols: self
                .symbols
                .iter()
                .map(|s| (s.sequence.chars().collect(), s.name.clone()))
                .collect(),
            keywords: self.keywords.clone(),
            terminals,
            lookahead,
        })
    }
}

/// A validated, compiled lexer configuration.
#[derive(Debug, Clone)]
pub(crate) struct TokenRules {
    pub whitespace: Vec<char>,
    pub case_sensitive: bool,
    pub multi_type: bool,
    pub comments: Vec<CommentType>,
    pub strings: Vec<StringType>,
    pub symbols: Vec<(Vec<char>, String)>,
    pub keywords: Vec<String>,
    pub terminals: Vec<(Regex, String)>,
    pub lookahead: usize,
}

impl TokenRules {
    pub fn is_whitespace(&self, ch: char) -> bool {
        self.whitespace.contains(&ch)
    }
}
