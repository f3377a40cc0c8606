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

//! Built-in lexical tables.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// A programming language with a built-in lexical table.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    C,
    #[serde(rename = "cpp")]
    CPlusPlus,
    Java,
    Python,
    #[serde(rename = "csharp")]
    CSharp,
    Rust,
    Go,
    Glsl,
    Hlsl,
    #[serde(rename = "javascript")]
    JavaScript,
    Lua,
}

#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
#[error("{0:?} is not a supported language.")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Returns the name used for this language in settings files and on the
    /// command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::CPlusPlus => "cpp",
            Self::Java => "java",
            Self::Python => "python",
            Self::CSharp => "csharp",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Glsl => "glsl",
            Self::Hlsl => "hlsl",
            Self::JavaScript => "javascript",
            Self::Lua => "lua",
        }
    }

    pub fn separators(&self) -> &'static [&'static str] {
        DEFAULT_SEPARATORS
    }

    pub fn operators(&self) -> &'static [&'static str] {
        match self {
            Self::C | Self::Glsl | Self::Hlsl => C_OPERATORS,
            Self::CPlusPlus | Self::CSharp | Self::Java => CPP_OPERATORS,
            Self::Python => PYTHON_OPERATORS,
            Self::Rust => RUST_OPERATORS,
            Self::Go => GO_OPERATORS,
            Self::JavaScript => JAVASCRIPT_OPERATORS,
            Self::Lua => LUA_OPERATORS,
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::C => C_KEYWORDS,
            Self::CPlusPlus => CPP_KEYWORDS,
            Self::Java => JAVA_KEYWORDS,
            Self::Python => PYTHON_KEYWORDS,
            Self::CSharp => CSHARP_KEYWORDS,
            Self::Rust => RUST_KEYWORDS,
            Self::Go => GO_KEYWORDS,
            Self::Glsl => GLSL_KEYWORDS,
            Self::Hlsl => HLSL_KEYWORDS,
            Self::JavaScript => JAVASCRIPT_KEYWORDS,
            Self::Lua => LUA_KEYWORDS,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let language = match lower.as_str() {
            "c++" | "cxx" => Self::CPlusPlus,
            "c#" | "cs" => Self::CSharp,
            "js" => Self::JavaScript,
            "py" => Self::Python,
            "rs" => Self::Rust,
            "golang" => Self::Go,
            other => enum_iterator::all::<Self>()
                .find(|language| language.as_str() == other)
                .ok_or_else(|| UnknownLanguage(String::from(s)))?,
        };
        Ok(language)
    }
}

/// Separators shared by every built-in language.  Each is a single character;
/// multi-character operators are reassembled by the tokenizer.
pub const DEFAULT_SEPARATORS: &[&str] = &[
    " ", "\n", "\r", "\t", ".", "!", ";", ":", "\\", "/", "+", "-", "*", "&", "%", "<", ">", "=",
    "(", ")", "{", "}", "[", "]", "\"", "'", ",", "|", "^", "?", "~",
];

const C_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "<", ">", "!", "?", ":", "~", "^", "&", "|", "->", "<=", ">=",
    "==", "!=", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|=", "&&", "||", "++", "--", "<<", ">>",
];

const CPP_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "<", ">", "!", "?", ":", "~", "^", "&", "|", "::", "->", "<=",
    ">=", "==", "!=", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|=", "&&", "||", "++", "--", "<<",
    ">>",
];

const PYTHON_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "<", ">", "!", ":", "~", "^", "&", "|", "**", "//", "->", "<=",
    ">=", "==", "!=", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|=", ":=", "<<", ">>",
];

const RUST_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "<", ">", "!", "?", ":", "^", "&", "|", "::", "->", "=>", "<=",
    ">=", "==", "!=", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|=", "&&", "||", "<<", ">>",
];

const GO_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "<", ">", "!", ":", "^", "&", "|", ":=", "<-", "<=", ">=", "==",
    "!=", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|=", "&&", "||", "++", "--", "<<", ">>", "&^",
];

const JAVASCRIPT_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "<", ">", "!", "?", ":", "~", "^", "&", "|", "=>", "<=", ">=",
    "==", "!=", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|=", "&&", "||", "??", "++", "--",
    "**", "<<", ">>",
];

const LUA_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "^", "&", "~", "|", "=", "<", ">", ":", "==", "~=", "<=", ">=",
    "<<", ">>", "//", "::",
];

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "auto", "bool", "break", "case", "catch", "char", "class", "const",
    "constexpr", "const_cast", "continue", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for",
    "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept",
    "nullptr", "operator", "private", "protected", "public", "register", "reinterpret_cast",
    "return", "short", "signed", "sizeof", "static", "static_assert", "static_cast", "struct",
    "switch", "template", "this", "throw", "true", "try", "typedef", "typeid", "typename",
    "union", "unsigned", "using", "virtual", "void", "volatile", "while",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

const GLSL_KEYWORDS: &[&str] = &[
    "attribute", "bool", "break", "bvec2", "bvec3", "bvec4", "const", "continue", "discard",
    "do", "else", "false", "float", "for", "highp", "if", "in", "inout", "int", "ivec2",
    "ivec3", "ivec4", "layout", "lowp", "mat2", "mat3", "mat4", "mediump", "out", "precision",
    "return", "sampler2D", "samplerCube", "struct", "true", "uniform", "varying", "vec2",
    "vec3", "vec4", "void", "while",
];

const HLSL_KEYWORDS: &[&str] = &[
    "bool", "break", "buffer", "cbuffer", "const", "continue", "discard", "do", "double", "else",
    "extern", "false", "float", "float2", "float3", "float4", "float4x4", "for", "half", "if",
    "in", "inline", "inout", "int", "matrix", "out", "register", "return", "sampler", "static",
    "struct", "switch", "Texture2D", "true", "typedef", "uint", "uniform", "vector", "void",
    "while",
];

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "return", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];
