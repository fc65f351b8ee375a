//! Registro agregado e resultados por categoria.

use serde::{Deserialize, Serialize};

use super::word::NormalizedWord;

/// Máximo de definições por palavra.
pub const MAX_DEFINITIONS: usize = 5;
/// Máximo de sinônimos e de antônimos (cada lista).
pub const MAX_THESAURUS: usize = 24;
/// Máximo de expressões idiomáticas.
pub const MAX_IDIOMS: usize = 20;
/// Máximo de termos relacionados.
pub const MAX_CONJUGATIONS: usize = 12;
/// Máximo de referências culturais.
pub const MAX_POPCULTURE: usize = 8;
/// Máximo de rimas.
pub const MAX_RHYMES: usize = 24;
/// Máximo de títulos por tipo de obra (filmes, músicas, livros).
pub const MAX_TITLES: usize = 10;

/// Categorias de dados lexicais, uma por fonte.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Definitions,
    Thesaurus,
    Idioms,
    Translations,
    Conjugations,
    PopCulture,
    Rhymes,
    Titles,
}

impl Category {
    /// Todas as categorias, na ordem do registro.
    pub const ALL: [Category; 8] = [
        Category::Definitions,
        Category::Thesaurus,
        Category::Idioms,
        Category::Translations,
        Category::Conjugations,
        Category::PopCulture,
        Category::Rhymes,
        Category::Titles,
    ];

    /// Resultado vazio da categoria (usado em qualquer falha da fonte).
    pub fn empty_result(self) -> CategoryResult {
        match self {
            Category::Definitions => CategoryResult::Definitions(Vec::new()),
            Category::Thesaurus => CategoryResult::Thesaurus {
                synonyms: Vec::new(),
                antonyms: Vec::new(),
            },
            Category::Idioms => CategoryResult::Idioms(Vec::new()),
            Category::Translations => CategoryResult::Translations(Vec::new()),
            Category::Conjugations => CategoryResult::Conjugations(Vec::new()),
            Category::PopCulture => CategoryResult::PopCulture(Vec::new()),
            Category::Rhymes => CategoryResult::Rhymes(Vec::new()),
            Category::Titles => CategoryResult::Titles(Titles::default()),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Definitions => write!(f, "definitions"),
            Category::Thesaurus => write!(f, "thesaurus"),
            Category::Idioms => write!(f, "idioms"),
            Category::Translations => write!(f, "translations"),
            Category::Conjugations => write!(f, "conjugations"),
            Category::PopCulture => write!(f, "popculture"),
            Category::Rhymes => write!(f, "rhymes"),
            Category::Titles => write!(f, "titles"),
        }
    }
}

/// Uma definição de dicionário.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Definition {
    pub text: String,
}

impl Definition {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Uma tradução para um idioma alvo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    /// Nome do idioma (ex.: "Spanish").
    pub lang: String,

    /// Texto traduzido.
    pub text: String,
}

impl Translation {
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            text: text.into(),
        }
    }
}

/// Obras cujo título contém a palavra, por tipo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Titles {
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub music: Vec<String>,
    #[serde(default)]
    pub books: Vec<String>,
}

impl Titles {
    pub fn is_empty(&self) -> bool {
        self.films.is_empty() && self.music.is_empty() && self.books.is_empty()
    }
}

/// Resultado normalizado de uma fonte.
///
/// Ausência de dados é sempre uma coleção vazia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryResult {
    Definitions(Vec<Definition>),
    Thesaurus {
        synonyms: Vec<String>,
        antonyms: Vec<String>,
    },
    Idioms(Vec<String>),
    Translations(Vec<Translation>),
    Conjugations(Vec<String>),
    PopCulture(Vec<String>),
    Rhymes(Vec<String>),
    Titles(Titles),
}

impl CategoryResult {
    /// Categoria à qual o resultado pertence.
    pub fn category(&self) -> Category {
        match self {
            CategoryResult::Definitions(_) => Category::Definitions,
            CategoryResult::Thesaurus { .. } => Category::Thesaurus,
            CategoryResult::Idioms(_) => Category::Idioms,
            CategoryResult::Translations(_) => Category::Translations,
            CategoryResult::Conjugations(_) => Category::Conjugations,
            CategoryResult::PopCulture(_) => Category::PopCulture,
            CategoryResult::Rhymes(_) => Category::Rhymes,
            CategoryResult::Titles(_) => Category::Titles,
        }
    }

    /// Verifica se o resultado não contém nenhum item.
    pub fn is_empty(&self) -> bool {
        match self {
            CategoryResult::Definitions(v) => v.is_empty(),
            CategoryResult::Thesaurus { synonyms, antonyms } => {
                synonyms.is_empty() && antonyms.is_empty()
            }
            CategoryResult::Translations(v) => v.is_empty(),
            CategoryResult::Idioms(v)
            | CategoryResult::Conjugations(v)
            | CategoryResult::PopCulture(v)
            | CategoryResult::Rhymes(v) => v.is_empty(),
            CategoryResult::Titles(titles) => titles.is_empty(),
        }
    }
}

/// Tudo o que se sabe sobre uma palavra.
///
/// Os nomes dos campos são o contrato JSON consumido pela interface.
/// `titles` só aparece quando a fonte de títulos trouxe algo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordRecord {
    pub word: NormalizedWord,
    pub definition: Vec<Definition>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub idioms: Vec<String>,
    pub translations: Vec<Translation>,
    pub conjugations: Vec<String>,
    pub popculture: Vec<String>,
    pub rhymes: Vec<String>,
    #[serde(default, skip_serializing_if = "Titles::is_empty")]
    pub titles: Titles,
}

impl WordRecord {
    /// Cria um registro com todas as categorias vazias.
    pub fn empty(word: NormalizedWord) -> Self {
        Self {
            word,
            definition: Vec::new(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            idioms: Vec::new(),
            translations: Vec::new(),
            conjugations: Vec::new(),
            popculture: Vec::new(),
            rhymes: Vec::new(),
            titles: Titles::default(),
        }
    }

    /// Grava o resultado de uma categoria no campo correspondente.
    pub fn apply(&mut self, result: CategoryResult) {
        match result {
            CategoryResult::Definitions(v) => self.definition = v,
            CategoryResult::Thesaurus { synonyms, antonyms } => {
                self.synonyms = synonyms;
                self.antonyms = antonyms;
            }
            CategoryResult::Idioms(v) => self.idioms = v,
            CategoryResult::Translations(v) => self.translations = v,
            CategoryResult::Conjugations(v) => self.conjugations = v,
            CategoryResult::PopCulture(v) => self.popculture = v,
            CategoryResult::Rhymes(v) => self.rhymes = v,
            CategoryResult::Titles(v) => self.titles = v,
        }
    }

    /// Verifica se nenhuma fonte trouxe dados.
    pub fn is_empty(&self) -> bool {
        self.definition.is_empty()
            && self.synonyms.is_empty()
            && self.antonyms.is_empty()
            && self.idioms.is_empty()
            && self.translations.is_empty()
            && self.conjugations.is_empty()
            && self.popculture.is_empty()
            && self.rhymes.is_empty()
            && self.titles.is_empty()
    }
}
