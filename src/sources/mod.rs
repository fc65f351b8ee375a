//! Fontes lexicais do Wordscope.
//!
//! Cada fonte encapsula um provedor remoto (dictionaryapi.dev, Datamuse,
//! MyMemory, Wikipedia e, opcionalmente, TMDB/MusicBrainz/OpenLibrary) e
//! devolve um [`CategoryResult`](crate::types::CategoryResult) da sua
//! categoria, vazio em qualquer falha.

mod base;
mod conjugations;
mod datamuse;
mod definitions;
mod idioms;
mod popculture;
mod rhymes;
mod thesaurus;
mod titles;
mod translations;

use std::sync::Arc;

pub use base::{build_http_client, HttpEndpoint, LexicalSource};
pub use conjugations::ConjugationsSource;
pub use datamuse::{parse_words, DatamuseWord, Relation};
pub use definitions::{parse_definitions, DefinitionsSource, DictionaryEntry};
pub use idioms::{humanize_phrase, IdiomsSource};
pub use popculture::{parse_titles, PopCultureSource, SearchResponse};
pub use rhymes::RhymesSource;
pub use thesaurus::ThesaurusSource;
pub use titles::{distinct_titles, TitlesSource};
pub use translations::{MyMemoryResponse, TranslationsSource};

use crate::types::config::{Config, SourceConfig};
use crate::WordscopeResult;

/// Cria as fontes habilitadas na configuração, na ordem do registro.
pub fn build_sources(config: &Config) -> WordscopeResult<Vec<Arc<dyn LexicalSource>>> {
    let client = build_http_client(&config.general.user_agent)?;
    let sources = &config.sources;
    let endpoint =
        |name: &str, source: &SourceConfig| HttpEndpoint::from_config(name, &client, source, sources);

    let mut built: Vec<Arc<dyn LexicalSource>> = Vec::new();

    if sources.definitions.enabled {
        built.push(Arc::new(DefinitionsSource::new(endpoint(
            "definitions",
            &sources.definitions,
        ))));
    }
    if sources.thesaurus.enabled {
        built.push(Arc::new(ThesaurusSource::new(endpoint(
            "thesaurus",
            &sources.thesaurus,
        ))));
    }
    if sources.idioms.enabled {
        built.push(Arc::new(IdiomsSource::new(endpoint("idioms", &sources.idioms))));
    }
    if sources.translations.source.enabled {
        built.push(Arc::new(TranslationsSource::new(
            endpoint("translations", &sources.translations.source),
            &sources.translations.source_language,
            sources.translations.languages.clone(),
        )));
    }
    if sources.conjugations.enabled {
        built.push(Arc::new(ConjugationsSource::new(endpoint(
            "conjugations",
            &sources.conjugations,
        ))));
    }
    if sources.popculture.enabled {
        built.push(Arc::new(PopCultureSource::new(endpoint(
            "popculture",
            &sources.popculture,
        ))));
    }
    if sources.rhymes.enabled {
        built.push(Arc::new(RhymesSource::new(endpoint("rhymes", &sources.rhymes))));
    }
    if sources.titles.enabled {
        let titles = &sources.titles;
        let provider = |name: &str, source: &SourceConfig| {
            source
                .enabled
                .then(|| endpoint(&format!("titles.{}", name), source))
        };

        let films = match titles.tmdb_key() {
            Some(key) => provider("films", &titles.films).map(|http| (http, key)),
            None => {
                tracing::debug!("No TMDB key configured, film titles disabled");
                None
            }
        };

        built.push(Arc::new(TitlesSource::new(
            films,
            provider("music", &titles.music),
            provider("books", &titles.books),
            titles.limit,
        )));
    }

    tracing::debug!(count = built.len(), "Lexical sources built");

    Ok(built)
}
