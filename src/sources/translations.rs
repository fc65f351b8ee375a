//! Fonte de traduções (MyMemory).

use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::Value;

use super::base::{HttpEndpoint, LexicalSource};
use crate::types::config::TargetLanguage;
use crate::types::{Category, CategoryResult, NormalizedWord, Translation};
use crate::{WordscopeError, WordscopeResult};

/// Resposta do MyMemory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    #[serde(default)]
    pub response_data: Option<ResponseData>,

    /// Vem como número ou como string, dependendo do erro.
    #[serde(default)]
    pub response_status: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    #[serde(default)]
    pub translated_text: Option<String>,
}

impl MyMemoryResponse {
    /// Texto traduzido, se a resposta indicar sucesso.
    pub fn into_text(self) -> Option<String> {
        let status_ok = match &self.response_status {
            None => true,
            Some(Value::Number(n)) => n.as_u64() == Some(200),
            Some(Value::String(s)) => s.trim() == "200",
            Some(_) => false,
        };
        if !status_ok {
            return None;
        }

        self.response_data
            .and_then(|data| data.translated_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

/// Fonte de traduções.
///
/// Faz uma requisição por idioma alvo, todas em paralelo. Um idioma que
/// falha é omitido sem afetar os demais; a ordem segue a configuração.
pub struct TranslationsSource {
    http: HttpEndpoint,
    source_language: String,
    languages: Vec<TargetLanguage>,
}

impl TranslationsSource {
    pub fn new(http: HttpEndpoint, source_language: &str, languages: Vec<TargetLanguage>) -> Self {
        Self {
            http,
            source_language: source_language.to_string(),
            languages,
        }
    }

    async fn translate(
        &self,
        word: &NormalizedWord,
        target: &TargetLanguage,
    ) -> WordscopeResult<Translation> {
        let langpair = format!("{}|{}", self.source_language, target.code);
        let response: MyMemoryResponse = self
            .http
            .get_json(&[("q", word.as_str()), ("langpair", langpair.as_str())])
            .await?;

        response
            .into_text()
            .map(|text| Translation::new(target.name.clone(), text))
            .ok_or_else(|| {
                WordscopeError::SourceFailed(
                    self.http.name().to_string(),
                    format!("sem tradução para '{}'", target.code),
                )
            })
    }
}

#[async_trait]
impl LexicalSource for TranslationsSource {
    fn name(&self) -> &str {
        self.http.name()
    }

    fn category(&self) -> Category {
        Category::Translations
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        let attempts = join_all(
            self.languages
                .iter()
                .map(|target| self.translate(word, target)),
        )
        .await;

        let translations = attempts
            .into_iter()
            .zip(&self.languages)
            .filter_map(|(attempt, target)| match attempt {
                Ok(translation) => Some(translation),
                Err(e) => {
                    tracing::debug!(
                        source = self.name(),
                        lang = %target.code,
                        error = %e,
                        "Translation failed, omitting language"
                    );
                    None
                }
            })
            .collect();

        Ok(CategoryResult::Translations(translations))
    }
}
