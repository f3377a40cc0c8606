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

//! Separator scanning.
//!
//! The scanner divides text into tokens at occurrences of configured
//! separator strings.  It works incrementally: each input character is
//! appended to a pending buffer, and as soon as the buffer ends with one of the
//! separators the text before the separator becomes a token and the separator
//! itself optionally becomes a second token.
//!
//! Every token is handed to a [Classifier], which assigns it a kind and
//! decides whether the scanner should keep it in its own output.  Classifiers
//! may keep arbitrary private state, so higher-level consumers such as
//! [crate::syntax::SyntaxTokenizer] and [crate::xml::XmlTreeBuilder] are
//! written purely as classifiers.  The scanner never looks at that state.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    ops::Deref,
};

use log::{debug, trace};
use serde::Serialize;
use thiserror::Error as ThisError;

/// A problem with the scanner's configuration.
#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A separator was the empty string.
    #[error("Separator {index} is the empty string.")]
    EmptySeparator {
        /// Index of the offending separator in the list.
        index: usize,
    },
}

/// An ordered list of non-empty separator strings.
///
/// Order matters: when more than one separator is a suffix of the pending
/// text, the one that comes first in the list wins, even if a later one is
/// longer.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SeparatorSet(Vec<String>);

impl SeparatorSet {
    /// Returns a set of the given `separators`, in the given order, or an
    /// error if any of them is empty.
    pub fn new<I, S>(separators: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let separators = separators
            .into_iter()
            .map(Into::into)
            .collect::<Vec<String>>();
        if let Some(index) = separators.iter().position(|s| s.is_empty()) {
            return Err(ConfigError::EmptySeparator { index });
        }
        Ok(Self(separators))
    }

    /// Returns a set with one single-character separator for each character
    /// in `chars`.
    pub fn from_chars(chars: &str) -> Self {
        Self(chars.chars().map(String::from).collect())
    }

    /// Builds a set from a built-in table.  The tables are checked by unit
    /// tests, so this only asserts in debug builds.
    pub(crate) fn from_static(separators: &[&str]) -> Self {
        debug_assert!(separators.iter().all(|s| !s.is_empty()));
        Self(separators.iter().map(|s| String::from(*s)).collect())
    }

    /// Returns the first separator, in list order, that `text` ends with.
    pub fn first_suffix_of(&self, text: &str) -> Option<&str> {
        self.0
            .iter()
            .map(String::as_str)
            .find(|separator| text.ends_with(separator))
    }

    /// Returns true if `s` is one of the separators.
    pub fn contains(&self, s: &str) -> bool {
        self.0.iter().any(|separator| separator == s)
    }
}

impl Deref for SeparatorSet {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for SeparatorSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Same as [SeparatorSet::new], for separators that are already owned.
impl TryFrom<Vec<String>> for SeparatorSet {
    type Error = ConfigError;

    fn try_from(separators: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(separators)
    }
}

/// A token kept by the scanner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token<K> {
    /// The token's text.  Never empty.
    pub value: String,

    /// The kind that the classifier assigned.
    pub kind: K,

    /// Byte offset of the start of the token in the scanned text.
    pub offset: usize,
}

/// A classifier's verdict on a single token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Classification<K> {
    /// The token's kind.
    pub kind: K,

    /// Whether to leave the token out of the scanner's output.
    ///
    /// Discarding only affects what [Scanner::scan] returns.  Anything the
    /// classifier did to its own state while classifying the token stands.
    pub discard: bool,
}

impl<K> Classification<K> {
    /// Returns a classification that keeps the token with the given `kind`.
    pub fn keep(kind: K) -> Self {
        Self {
            kind,
            discard: false,
        }
    }

    /// Returns a classification that drops the token from the scanner's
    /// output.
    pub fn discard(kind: K) -> Self {
        Self {
            kind,
            discard: true,
        }
    }
}

/// Assigns kinds to the tokens produced by a [Scanner].
pub trait Classifier {
    /// The kind of token this classifier produces.
    type Kind;

    /// Classifies `token`.  `is_separator` is true if `token` is one of the
    /// scanner's separators, false if it is the text between separators.
    ///
    /// The final token of a scan is always passed here, even if it is empty.
    fn classify(&mut self, token: &str, is_separator: bool) -> Classification<Self::Kind>;

    /// Decides whether the scanner should split at `candidate`, a separator
    /// that begins at byte `offset` in the input.  If this returns false, the
    /// separator's text stays in the pending buffer and becomes part of a
    /// later token.
    fn accept_separator(&mut self, offset: usize, candidate: &str) -> bool {
        let _ = (offset, candidate);
        true
    }

    /// Called after each call to [Classifier::classify], whether or not the
    /// token was discarded.
    fn on_token(
        &mut self,
        token: &str,
        is_separator: bool,
        classification: &Classification<Self::Kind>,
    ) {
        let _ = (token, is_separator, classification);
    }
}

impl<C> Classifier for &mut C
where
    C: Classifier + ?Sized,
{
    type Kind = C::Kind;

    fn classify(&mut self, token: &str, is_separator: bool) -> Classification<Self::Kind> {
        (**self).classify(token, is_separator)
    }

    fn accept_separator(&mut self, offset: usize, candidate: &str) -> bool {
        (**self).accept_separator(offset, candidate)
    }

    fn on_token(
        &mut self,
        token: &str,
        is_separator: bool,
        classification: &Classification<Self::Kind>,
    ) {
        (**self).on_token(token, is_separator, classification)
    }
}

/// A [Classifier] that calls a closure.  Returned by [from_fn].
#[derive(Clone)]
pub struct FnClassifier<F>(F);

/// Returns a [Classifier] that classifies each token by calling `f` with the
/// token and whether it is a separator.
pub fn from_fn<F, K>(f: F) -> FnClassifier<F>
where
    F: FnMut(&str, bool) -> Classification<K>,
{
    FnClassifier(f)
}

impl<F, K> Classifier for FnClassifier<F>
where
    F: FnMut(&str, bool) -> Classification<K>,
{
    type Kind = K;

    fn classify(&mut self, token: &str, is_separator: bool) -> Classification<K> {
        (self.0)(token, is_separator)
    }
}

/// Splits text at separators and feeds the pieces to a [Classifier].
#[derive(Clone, Debug)]
pub struct Scanner {
    separators: SeparatorSet,
    include_separators: bool,
}

impl Scanner {
    /// Returns a scanner that splits at `separators`.  If
    /// `include_separators` is true, the separators themselves are passed to
    /// the classifier (and may be kept in the output); otherwise they are
    /// dropped without being classified.
    pub fn new(separators: SeparatorSet, include_separators: bool) -> Self {
        Self {
            separators,
            include_separators,
        }
    }

    /// Returns the separators this scanner splits at, in priority order.
    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    /// Returns true if separators are classified and may appear in the
    /// output.
    pub fn include_separators(&self) -> bool {
        self.include_separators
    }

    /// Scans `text`, classifying each token with `classifier`, and returns
    /// the tokens that the classifier did not discard, in input order.
    pub fn scan<C>(&self, text: &str, classifier: &mut C) -> Vec<Token<C::Kind>>
    where
        C: Classifier + ?Sized,
    {
        debug!(
            "scanning {} bytes with {} separators",
            text.len(),
            self.separators.len()
        );

        let mut tokens = Vec::new();
        let mut pending = String::new();
        let mut start = 0;
        for (offset, c) in text.char_indices() {
            pending.push(c);
            let Some(separator) = self.separators.first_suffix_of(&pending) else {
                continue;
            };
            let token_len = pending.len() - separator.len();
            if !classifier.accept_separator(start + token_len, separator) {
                trace!("split at {} on {separator:?} vetoed", start + token_len);
                continue;
            }

            let (token, separator) = pending.split_at(token_len);
            if !token.is_empty() {
                Self::emit(&mut tokens, classifier, token, false, start);
            }
            if self.include_separators {
                Self::emit(&mut tokens, classifier, separator, true, start + token_len);
            }
            pending.clear();
            start = offset + c.len_utf8();
        }

        // The last token is classified even if it is empty.
        Self::emit(&mut tokens, classifier, &pending, false, start);
        tokens
    }

    fn emit<C>(
        tokens: &mut Vec<Token<C::Kind>>,
        classifier: &mut C,
        token: &str,
        is_separator: bool,
        offset: usize,
    ) where
        C: Classifier + ?Sized,
    {
        let classification = classifier.classify(token, is_separator);
        classifier.on_token(token, is_separator, &classification);
        if !classification.discard && !token.is_empty() {
            tokens.push(Token {
                value: String::from(token),
                kind: classification.kind,
                offset,
            });
        }
    }
}

/// Scans `text` at `separators` with `classifier`.  This is a shorthand for
/// [Scanner::scan] that validates a plain list of separators first.
pub fn scan<S, C>(
    text: &str,
    separators: &[S],
    include_separators: bool,
    classifier: &mut C,
) -> Result<Vec<Token<C::Kind>>, ConfigError>
where
    S: AsRef<str>,
    C: Classifier + ?Sized,
{
    let separators = SeparatorSet::new(separators.iter().map(|s| s.as_ref()))?;
    Ok(Scanner::new(separators, include_separators).scan(text, classifier))
}

/// Splits `text` at `separators` without classification and returns the
/// non-empty pieces, including the separators themselves if
/// `include_separators` is true.
pub fn split(text: &str, separators: &SeparatorSet, include_separators: bool) -> Vec<String> {
    Scanner::new(separators.clone(), include_separators)
        .scan(text, &mut from_fn(|_, _| Classification::keep(())))
        .into_iter()
        .map(|token| token.value)
        .collect()
}

/// Splits `text` at each of the characters in `separators`.
pub fn split_chars(text: &str, separators: &str, include_separators: bool) -> Vec<String> {
    split(text, &SeparatorSet::from_chars(separators), include_separators)
}
