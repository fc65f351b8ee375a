//! Palavra normalizada usada como chave de cache e entrada das fontes.

use serde::{Deserialize, Serialize};

use crate::{WordscopeError, WordscopeResult};

/// Palavra canônica: sem espaços nas bordas, em minúsculas e nunca vazia.
///
/// Duas entradas que diferem apenas em caixa ou espaços ao redor
/// produzem o mesmo `NormalizedWord`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NormalizedWord(String);

impl NormalizedWord {
    /// Normaliza uma entrada bruta.
    ///
    /// Retorna [`WordscopeError::EmptyWord`] se nada sobrar após o trim.
    pub fn parse(raw: &str) -> WordscopeResult<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(WordscopeError::EmptyWord);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedWord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for NormalizedWord {
    type Err = WordscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NormalizedWord {
    type Error = WordscopeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NormalizedWord> for String {
    fn from(word: NormalizedWord) -> Self {
        word.0
    }
}
