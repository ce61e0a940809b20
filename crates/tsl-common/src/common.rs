//! Shared enums that several crates need without depending on each other.

use serde::{Deserialize, Serialize};

/// The configured language-feature target.
///
/// Only used by the engine to decide which characters are valid in an
/// identifier when a fix synthesizes a property name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScriptTarget {
    ES3,
    ES5,
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    ES2022,
    ES2023,
    #[default]
    ESNext,
}

impl ScriptTarget {
    /// Targets before ES2015 only accept identifier characters from the BMP.
    #[must_use]
    pub const fn supports_astral_identifiers(self) -> bool {
        !matches!(self, ScriptTarget::ES3 | ScriptTarget::ES5)
    }

    /// Parse a `tsconfig`-style target name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let target = match name.to_ascii_lowercase().as_str() {
            "es3" => ScriptTarget::ES3,
            "es5" => ScriptTarget::ES5,
            "es6" | "es2015" => ScriptTarget::ES2015,
            "es2016" => ScriptTarget::ES2016,
            "es2017" => ScriptTarget::ES2017,
            "es2018" => ScriptTarget::ES2018,
            "es2019" => ScriptTarget::ES2019,
            "es2020" => ScriptTarget::ES2020,
            "es2021" => ScriptTarget::ES2021,
            "es2022" => ScriptTarget::ES2022,
            "es2023" => ScriptTarget::ES2023,
            "esnext" => ScriptTarget::ESNext,
            _ => return None,
        };
        Some(target)
    }
}
