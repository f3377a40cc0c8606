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

//! Settings for the tokenizer and the XML builder.
//!
//! Settings are usually read from a TOML file, for example:
//!
//! ```toml
//! [syntax]
//! language = "rust"
//! keywords = ["union"]
//!
//! [xml]
//! attribute_order = "declared"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::{
    scan::{ConfigError, SeparatorSet},
    syntax::{Language, SyntaxTable},
    xml::{AttributeOrder, XmlTreeBuilder},
};

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid syntax table: {0}")]
    Table(#[from] ConfigError),

    #[error("Operator {0:?} cannot be formed from the separators.")]
    UnreachableOperator(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub syntax: SyntaxSettings,
    pub xml: XmlSettings,
}

impl Settings {
    pub fn from_toml(s: &str) -> Result<Self, Error> {
        let settings: Self = toml::from_str(s)?;
        let table = settings.syntax.table()?;
        // Built-in operators may be unreachable with custom separators, but
        // operators named in the settings must be usable.
        if let Some(operator) = table
            .unreachable_operators()
            .find(|operator| settings.syntax.operators.iter().any(|o| o == *operator))
        {
            return Err(Error::UnreachableOperator(String::from(operator)));
        }
        Ok(settings)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntaxSettings {
    /// Language whose built-in table is the starting point.
    pub language: Language,

    /// Replaces the language's separators, if present.
    pub separators: Option<Vec<String>>,

    /// Operators added to the language's operators.  Each must be a
    /// separator or two adjacent operator separators.
    pub operators: Vec<String>,

    /// Keywords added to the language's keywords.
    pub keywords: Vec<String>,
}

impl SyntaxSettings {
    /// Returns the lexical table these settings describe.
    pub fn table(&self) -> Result<SyntaxTable, ConfigError> {
        let mut table = SyntaxTable::for_language(self.language)
            .with_operators(self.operators.iter().cloned())
            .with_keywords(self.keywords.iter().cloned());
        if let Some(separators) = &self.separators {
            table = table.with_separators(SeparatorSet::try_from(separators.clone())?);
        }
        Ok(table)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct XmlSettings {
    pub attribute_order: AttributeOrder,
}

impl XmlSettings {
    pub fn builder(&self) -> XmlTreeBuilder {
        XmlTreeBuilder::new().with_order(self.attribute_order)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        scan::ConfigError,
        syntax::{Language, SyntaxKind, SyntaxToken, SyntaxTokenizer},
        xml::AttributeOrder,
    };

    use super::{Error, Settings};

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.syntax.language, Language::C);
        assert_eq!(settings.xml.attribute_order, AttributeOrder::Reversed);
    }

    #[test]
    fn test_parse() {
        let settings = Settings::from_toml(
            r#"
[syntax]
language = "cpp"
keywords = ["override"]
operators = ["<-"]

[xml]
attribute_order = "declared"
"#,
        )
        .unwrap();
        assert_eq!(settings.syntax.language, Language::CPlusPlus);
        assert_eq!(settings.xml.attribute_order, AttributeOrder::Declared);

        let table = settings.syntax.table().unwrap();
        assert!(table.is_keyword("override"));
        assert!(table.is_keyword("class"));
        assert!(table.is_operator("<-"));

        let mut tokenizer = SyntaxTokenizer::with_table(table);
        tokenizer.tokenize("a<-b");
        assert_eq!(tokenizer.finish(), vec![
            SyntaxToken::new(SyntaxKind::Identifier, "a"),
            SyntaxToken::new(SyntaxKind::Operator, "<-"),
            SyntaxToken::new(SyntaxKind::Identifier, "b"),
        ]);
    }

    #[test]
    fn test_custom_separators() {
        let settings = Settings::from_toml(
            r#"
[syntax]
separators = [" ", ","]
"#,
        )
        .unwrap();
        let mut tokenizer = SyntaxTokenizer::with_table(settings.syntax.table().unwrap());
        tokenizer.tokenize("a+b, c");
        assert_eq!(tokenizer.finish(), vec![
            SyntaxToken::new(SyntaxKind::Identifier, "a+b"),
            SyntaxToken::new(SyntaxKind::Separator, ","),
            SyntaxToken::new(SyntaxKind::Identifier, "c"),
        ]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Settings::from_toml("[syntax]\nlanguage = \"cobol\"\n"),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            Settings::from_toml("[syntax]\nfrobnicate = true\n"),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            Settings::from_toml("[syntax]\nseparators = [\" \", \"\"]\n"),
            Err(Error::Table(ConfigError::EmptySeparator { index: 1 }))
        ));
        assert!(matches!(
            Settings::from_toml("[syntax]\noperators = [\"<=>\"]\n"),
            Err(Error::UnreachableOperator(operator)) if operator == "<=>"
        ));
        assert!(matches!(
            Settings::from_toml(
                "[syntax]\nseparators = [\" \", \"+\"]\noperators = [\"++\", \"+=\"]\n"
            ),
            Err(Error::UnreachableOperator(operator)) if operator == "+="
        ));
    }
}
