// splitscan - separator-driven text scanning.
// Copyright (C) 2025 The splitscan contributors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Syntax tokenization for C-like languages.
//!
//! [SyntaxTokenizer] is a [Classifier] that runs on top of the separator
//! scanner with a table of single-character separators.  The scanner hands it
//! runs of ordinary characters and individual separators, and it reassembles
//! them into higher-level [SyntaxToken]s:
//!
//! - quoted strings and character literals, with backslash escapes for the
//!   closing quote;
//! - numbers, including a decimal point (`3.14`);
//! - operators, merging two adjacent operator characters into one token when
//!   the combination is itself an operator (`<=`, `::`);
//! - braces, punctuation separators, keywords, and identifiers.
//!
//! Only one token is in progress at a time.  It is committed to the output
//! when a separator ends it or when the next token starts.

use std::{
    collections::HashSet,
    fmt::{Display, Formatter, Result as FmtResult},
    mem::take,
};

use log::debug;
use serde::Serialize;

use crate::scan::{Classification, Classifier, Scanner, SeparatorSet};

mod language;
pub use language::{DEFAULT_SEPARATORS, Language, UnknownLanguage};

/// The kind of a [SyntaxToken].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    /// No token is in progress.  Tokens of this kind are never output.
    #[default]
    None,
    String,
    Character,
    Number,
    Operator,
    /// Punctuation that is neither an operator nor a brace, such as `;`.
    Separator,
    /// One of `{`, `}`, `(`, `)`, `[`, or `]`.
    Braces,
    Keyword,
    Identifier,
}

impl SyntaxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::String => "String",
            Self::Character => "Character",
            Self::Number => "Number",
            Self::Operator => "Operator",
            Self::Separator => "Separator",
            Self::Braces => "Braces",
            Self::Keyword => "Keyword",
            Self::Identifier => "Identifier",
        }
    }
}

impl Display for SyntaxKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A token produced by [SyntaxTokenizer].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,

    /// The token's text.  For strings and characters, this omits the
    /// enclosing quotes but keeps any backslashes.
    pub value: String,
}

impl SyntaxToken {
    pub fn new(kind: SyntaxKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl Display for SyntaxToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}({:?})", self.kind, self.value)
    }
}

/// Separators, operators, and keywords for a language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTable {
    separators: SeparatorSet,
    operators: HashSet<String>,
    keywords: HashSet<String>,
}

impl SyntaxTable {
    pub fn new<O, K>(separators: SeparatorSet, operators: O, keywords: K) -> Self
    where
        O: IntoIterator,
        O::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            separators,
            operators: operators.into_iter().map(Into::into).collect(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn for_language(language: Language) -> Self {
        Self::new(
            SeparatorSet::from_static(language.separators()),
            language.operators().iter().copied(),
            language.keywords().iter().copied(),
        )
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    pub fn is_operator(&self, s: &str) -> bool {
        self.operators.contains(s)
    }

    pub fn is_keyword(&self, s: &str) -> bool {
        self.keywords.contains(s)
    }

    /// Returns the operators that [SyntaxTokenizer] can never produce with
    /// this table, in no particular order.
    ///
    /// The tokenizer builds an operator from at most two separators, each of
    /// which must itself be an operator, so an operator is reachable only if
    /// it is a separator or the concatenation of two operator separators.
    /// `.` never merges with its neighbors.
    pub fn unreachable_operators(&self) -> impl Iterator<Item = &str> {
        self.operators
            .iter()
            .map(String::as_str)
            .filter(|operator| !self.is_reachable(operator))
    }

    fn is_reachable(&self, operator: &str) -> bool {
        let merges = |s: &str| s != "." && self.separators.contains(s) && self.is_operator(s);
        if operator == "." {
            return self.separators.contains(".");
        }
        merges(operator)
            || (1..operator.len())
                .filter(|&index| operator.is_char_boundary(index))
                .any(|index| merges(&operator[..index]) && merges(&operator[index..]))
    }

    /// Replaces the separators.
    pub fn with_separators(self, separators: SeparatorSet) -> Self {
        Self { separators, ..self }
    }

    /// Adds `operators` to the operator table.
    pub fn with_operators<I>(mut self, operators: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.operators.extend(operators.into_iter().map(Into::into));
        self
    }

    /// Adds `keywords` to the keyword table.
    pub fn with_keywords<I>(mut self, keywords: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }
}

impl From<Language> for SyntaxTable {
    fn from(language: Language) -> Self {
        Self::for_language(language)
    }
}

/// Client extension points for [SyntaxTokenizer].
///
/// `()` implements this trait with the defaults.
pub trait SyntaxHooks {
    /// Decides whether a completed `token` is added to the output.
    fn accept_token(&mut self, token: &SyntaxToken) -> bool {
        let _ = token;
        true
    }

    /// Called for every piece of text the scanner classifies, after the
    /// tokenizer has processed it.
    fn on_token(&mut self, token: &str, is_separator: bool) {
        let _ = (token, is_separator);
    }
}

impl SyntaxHooks for () {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Literal {
    String,
    Character,
}

impl Literal {
    fn quote(&self) -> &'static str {
        match self {
            Self::String => "\"",
            Self::Character => "'",
        }
    }

    fn kind(&self) -> SyntaxKind {
        match self {
            Self::String => SyntaxKind::String,
            Self::Character => SyntaxKind::Character,
        }
    }
}

/// Returns true if `s` is a number: digits, optionally with decimal points,
/// optionally followed by `f`.
fn is_number(s: &str) -> bool {
    let digits = s.strip_suffix('f').unwrap_or(s);
    digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Returns true if `s` ends in an odd number of backslashes, so that a quote
/// following it is escaped.
fn ends_with_escape(s: &str) -> bool {
    s.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Tokenizes source code.  See the [module documentation](self).
pub struct SyntaxTokenizer<H = ()> {
    table: SyntaxTable,
    hooks: H,
    literal: Option<Literal>,
    current: SyntaxToken,
    tokens: Vec<SyntaxToken>,
}

impl SyntaxTokenizer {
    /// Returns a tokenizer for `language`'s built-in table.
    pub fn new(language: Language) -> Self {
        Self::with_table(SyntaxTable::for_language(language))
    }

    pub fn with_table(table: SyntaxTable) -> Self {
        Self::with_hooks(table, ())
    }
}

impl<H> SyntaxTokenizer<H>
where
    H: SyntaxHooks,
{
    pub fn with_hooks(table: SyntaxTable, hooks: H) -> Self {
        Self {
            table,
            hooks,
            literal: None,
            current: SyntaxToken::default(),
            tokens: Vec::new(),
        }
    }

    /// Returns the lexical table this tokenizer was created with.
    pub fn table(&self) -> &SyntaxTable {
        &self.table
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Gives access to the hooks between calls to [Self::tokenize], for
    /// example to reset state that they accumulate.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Returns the tokens completed so far.  The token in progress is not
    /// included until [SyntaxTokenizer::finish].
    pub fn tokens(&self) -> &[SyntaxToken] {
        &self.tokens
    }

    /// Scans `text` and feeds it through the tokenizer.  This may be called
    /// more than once; the state carries over between calls.
    pub fn tokenize(&mut self, text: &str) {
        let scanner = Scanner::new(self.table.separators.clone(), true);
        scanner.scan(text, self);
    }

    /// Completes the token in progress and returns all of the tokens.  A
    /// string or character literal that is still open is dropped.
    pub fn finish(mut self) -> Vec<SyntaxToken> {
        if let Some(literal) = self.literal {
            debug!(
                "dropping unterminated {} literal {:?}",
                literal.kind(),
                self.current.value
            );
        } else {
            self.flush();
        }
        self.tokens
    }

    fn flush(&mut self) {
        let token = take(&mut self.current);
        if token.kind != SyntaxKind::None
            && !token.value.is_empty()
            && self.hooks.accept_token(&token)
        {
            self.tokens.push(token);
        }
    }

    fn emit(&mut self, kind: SyntaxKind, value: &str) {
        self.flush();
        self.current = SyntaxToken::new(kind, value);
        self.flush();
    }

    fn open(&mut self, literal: Literal) {
        self.flush();
        self.literal = Some(literal);
        self.current.kind = literal.kind();
    }

    fn word(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        if let Some(literal) = self.literal {
            self.current.kind = literal.kind();
            self.current.value.push_str(word);
        } else if self.current.kind == SyntaxKind::Number
            && self.current.value.ends_with('.')
            && is_number(word)
        {
            self.current.value.push_str(word);
        } else {
            self.flush();
            let kind = if is_number(word) {
                SyntaxKind::Number
            } else if self.table.is_keyword(word) {
                SyntaxKind::Keyword
            } else {
                SyntaxKind::Identifier
            };
            self.current = SyntaxToken::new(kind, word);
        }
    }

    fn operator(&mut self, operator: &str) {
        if self.current.kind == SyntaxKind::Operator {
            let combined = format!("{}{operator}", self.current.value);
            if self.table.is_operator(&combined) {
                self.current.value = combined;
                self.flush();
                return;
            }
        }
        self.flush();
        self.current = SyntaxToken::new(SyntaxKind::Operator, operator);
    }

    fn separator(&mut self, separator: &str) {
        if let Some(literal) = self.literal {
            if separator == literal.quote() && !ends_with_escape(&self.current.value) {
                self.current.kind = literal.kind();
                self.literal = None;
                self.flush();
            } else {
                self.current.value.push_str(separator);
            }
            return;
        }

        match separator {
            "." if self.current.kind == SyntaxKind::Number => self.current.value.push('.'),
            "." => self.emit(SyntaxKind::Operator, "."),
            _ if self.table.is_operator(separator) => self.operator(separator),
            "{" | "}" | "(" | ")" | "[" | "]" => self.emit(SyntaxKind::Braces, separator),
            "\"" => self.open(Literal::String),
            "'" => self.open(Literal::Character),
            " " | "\n" | "\t" | "\r" => self.flush(),
            _ => self.emit(SyntaxKind::Separator, separator),
        }
    }
}

impl<H> Classifier for SyntaxTokenizer<H>
where
    H: SyntaxHooks,
{
    type Kind = SyntaxKind;

    fn classify(&mut self, token: &str, is_separator: bool) -> Classification<SyntaxKind> {
        if is_separator {
            self.separator(token);
        } else {
            self.word(token);
        }
        Classification::discard(self.current.kind)
    }

    fn on_token(
        &mut self,
        token: &str,
        is_separator: bool,
        _classification: &Classification<SyntaxKind>,
    ) {
        self.hooks.on_token(token, is_separator);
    }
}

/// Tokenizes `text` with `language`'s built-in table.
pub fn tokenize(text: &str, language: Language) -> Vec<SyntaxToken> {
    let mut tokenizer = SyntaxTokenizer::new(language);
    tokenizer.tokenize(text);
    tokenizer.finish()
}
