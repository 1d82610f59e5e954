//! Supported languages and their execution-engine ids

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{engine_languages, languages};

/// Language id as understood by the execution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EngineLanguageId(pub u32);

/// A language identifier the engine has no mapping for
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}. Supported languages: {list}", list = languages::ALL.join(", "))]
pub struct UnsupportedLanguage(pub String);

/// Languages a submission may be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Java,
    Cpp,
    C,
    Go,
    Rust,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::Javascript,
        Language::Typescript,
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::C,
        Language::Go,
        Language::Rust,
    ];

    /// Resolve a client-supplied identifier (case-insensitive, common aliases accepted)
    pub fn resolve(language_id: &str) -> Result<Self, UnsupportedLanguage> {
        let normalized = language_id.trim().to_ascii_lowercase();
        match normalized.as_str() {
            languages::JAVASCRIPT | "js" | "node" => Ok(Self::Javascript),
            languages::TYPESCRIPT | "ts" => Ok(Self::Typescript),
            languages::PYTHON | "py" | "python3" => Ok(Self::Python),
            languages::JAVA => Ok(Self::Java),
            languages::CPP | "c++" => Ok(Self::Cpp),
            languages::C => Ok(Self::C),
            languages::GO | "golang" => Ok(Self::Go),
            languages::RUST | "rs" => Ok(Self::Rust),
            _ => Err(UnsupportedLanguage(language_id.to_string())),
        }
    }

    /// Canonical identifier, as stored on submissions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Javascript => languages::JAVASCRIPT,
            Self::Typescript => languages::TYPESCRIPT,
            Self::Python => languages::PYTHON,
            Self::Java => languages::JAVA,
            Self::Cpp => languages::CPP,
            Self::C => languages::C,
            Self::Go => languages::GO,
            Self::Rust => languages::RUST,
        }
    }

    pub fn engine_id(&self) -> EngineLanguageId {
        let id = match self {
            Self::Javascript => engine_languages::JAVASCRIPT,
            Self::Typescript => engine_languages::TYPESCRIPT,
            Self::Python => engine_languages::PYTHON,
            Self::Java => engine_languages::JAVA,
            Self::Cpp => engine_languages::CPP,
            Self::C => engine_languages::C,
            Self::Go => engine_languages::GO,
            Self::Rust => engine_languages::RUST,
        };
        EngineLanguageId(id)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
