//! Consultas compartilhadas à API Datamuse.
//!
//! Sinônimos, antônimos, expressões, termos relacionados e rimas usam o
//! mesmo endpoint `/words`, variando apenas o parâmetro de relação.

use serde::Deserialize;

use super::base::{take_non_empty, HttpEndpoint};
use crate::types::NormalizedWord;
use crate::WordscopeResult;

/// Relações Datamuse usadas pelas fontes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Synonym,
    Antonym,
    Phrase,
    Trigger,
    Rhyme,
}

impl Relation {
    /// Nome do parâmetro de query.
    pub fn param(self) -> &'static str {
        match self {
            Relation::Synonym => "rel_syn",
            Relation::Antonym => "rel_ant",
            Relation::Phrase => "rel_phr",
            Relation::Trigger => "rel_trg",
            Relation::Rhyme => "rel_rhy",
        }
    }
}

/// Item da resposta Datamuse.
#[derive(Debug, Deserialize)]
pub struct DatamuseWord {
    #[serde(default)]
    pub word: String,
}

/// Extrai até `limit` palavras da resposta.
pub fn parse_words(items: Vec<DatamuseWord>, limit: usize) -> Vec<String> {
    take_non_empty(items.into_iter().map(|item| item.word), limit)
}

/// Busca palavras relacionadas a `word` pela relação dada.
pub async fn related_words(
    http: &HttpEndpoint,
    relation: Relation,
    word: &NormalizedWord,
    limit: usize,
) -> WordscopeResult<Vec<String>> {
    let items: Vec<DatamuseWord> = http
        .get_json(&[(relation.param(), word.as_str())])
        .await?;
    Ok(parse_words(items, limit))
}
