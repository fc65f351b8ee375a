//! Fonte de títulos de obras (TMDB, MusicBrainz, OpenLibrary).
//!
//! Os três catálogos são consultados em paralelo e falham de forma
//! independente. Filmes só são buscados quando há chave do TMDB.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;

use super::base::{HttpEndpoint, LexicalSource};
use crate::types::{Category, CategoryResult, NormalizedWord, Titles};
use crate::WordscopeResult;

/// Item com título opcional (MusicBrainz e OpenLibrary).
#[derive(Debug, Deserialize)]
pub struct TitledItem {
    #[serde(default)]
    pub title: Option<String>,
}

/// Resposta de `GET /ws/2/recording`.
#[derive(Debug, Deserialize)]
pub struct RecordingSearch {
    #[serde(default)]
    pub recordings: Vec<TitledItem>,
}

/// Resposta de `GET /search.json`.
#[derive(Debug, Deserialize)]
pub struct BookSearch {
    #[serde(default)]
    pub docs: Vec<TitledItem>,
}

/// Resposta de `/search/movie` e `/search/tv`.
///
/// Filmes trazem `title`, séries trazem `name`.
#[derive(Debug, Deserialize)]
pub struct TmdbSearch {
    #[serde(default)]
    pub results: Vec<TmdbItem>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Remove vazios e repetidos, mantendo a primeira ocorrência, até `limit`.
pub fn distinct_titles<I>(titles: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    titles
        .into_iter()
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty() && seen.insert(title.clone()))
        .take(limit)
        .collect()
}

/// Fonte de títulos de filmes, músicas e livros.
pub struct TitlesSource {
    films: Option<(HttpEndpoint, String)>,
    music: Option<HttpEndpoint>,
    books: Option<HttpEndpoint>,
    limit: usize,
}

impl TitlesSource {
    /// Cria a fonte. Catálogos ausentes ficam sempre vazios.
    pub fn new(
        films: Option<(HttpEndpoint, String)>,
        music: Option<HttpEndpoint>,
        books: Option<HttpEndpoint>,
        limit: usize,
    ) -> Self {
        Self {
            films,
            music,
            books,
            limit,
        }
    }

    async fn search_music(
        &self,
        http: &HttpEndpoint,
        word: &NormalizedWord,
    ) -> WordscopeResult<Vec<String>> {
        let query = format!("recording:{}", word);
        let limit = self.limit.to_string();
        let response: RecordingSearch = http
            .get_json(&[
                ("query", query.as_str()),
                ("fmt", "json"),
                ("limit", limit.as_str()),
            ])
            .await?;

        Ok(distinct_titles(
            response
                .recordings
                .into_iter()
                .take(self.limit)
                .filter_map(|r| r.title),
            self.limit,
        ))
    }

    async fn search_books(
        &self,
        http: &HttpEndpoint,
        word: &NormalizedWord,
    ) -> WordscopeResult<Vec<String>> {
        let limit = self.limit.to_string();
        let response: BookSearch = http
            .get_json(&[("title", word.as_str()), ("limit", limit.as_str())])
            .await?;

        // OpenLibrary repete edições; olha o dobro antes de deduplicar
        Ok(distinct_titles(
            response
                .docs
                .into_iter()
                .take(2 * self.limit)
                .filter_map(|d| d.title),
            self.limit,
        ))
    }

    async fn search_tmdb(
        &self,
        http: &HttpEndpoint,
        api_key: &str,
        kind: &str,
        word: &NormalizedWord,
    ) -> WordscopeResult<Vec<String>> {
        let url = http.url_with_segment(kind)?;
        let response: TmdbSearch = http
            .get_json_url(
                url,
                &[
                    ("query", word.as_str()),
                    ("include_adult", "false"),
                    ("page", "1"),
                    ("api_key", api_key),
                ],
            )
            .await?;

        Ok(response
            .results
            .into_iter()
            .take(self.limit)
            .filter_map(|item| item.title.or(item.name))
            .collect())
    }

    async fn search_films(&self, word: &NormalizedWord) -> Vec<String> {
        let Some((http, api_key)) = &self.films else {
            return Vec::new();
        };

        let (movies, tv) = tokio::join!(
            self.search_tmdb(http, api_key, "movie", word),
            self.search_tmdb(http, api_key, "tv", word),
        );

        let found = or_empty(http, "movie", movies)
            .into_iter()
            .chain(or_empty(http, "tv", tv));
        distinct_titles(found, self.limit)
    }
}

fn or_empty(http: &HttpEndpoint, kind: &str, result: WordscopeResult<Vec<String>>) -> Vec<String> {
    result.unwrap_or_else(|e| {
        tracing::debug!(source = http.name(), kind, error = %e, "Title search failed");
        Vec::new()
    })
}

#[async_trait]
impl LexicalSource for TitlesSource {
    fn name(&self) -> &str {
        "titles"
    }

    fn category(&self) -> Category {
        Category::Titles
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        let music = async {
            match &self.music {
                Some(http) => or_empty(http, "music", self.search_music(http, word).await),
                None => Vec::new(),
            }
        };
        let books = async {
            match &self.books {
                Some(http) => or_empty(http, "books", self.search_books(http, word).await),
                None => Vec::new(),
            }
        };

        let (films, music, books) = tokio::join!(self.search_films(word), music, books);

        Ok(CategoryResult::Titles(Titles {
            films,
            music,
            books,
        }))
    }
}
