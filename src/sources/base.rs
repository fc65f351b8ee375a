//! Trait base para fontes lexicais e cliente HTTP compartilhado.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::types::config::{SourceConfig, SourcesConfig};
use crate::types::{Category, CategoryResult, NormalizedWord};
use crate::{WordscopeError, WordscopeResult};

/// Trait para fontes de dados lexicais.
///
/// Cada fonte encapsula um provedor remoto e normaliza a resposta
/// no formato da sua categoria.
#[async_trait]
pub trait LexicalSource: Send + Sync {
    /// Retorna o nome da fonte.
    fn name(&self) -> &str;

    /// Categoria preenchida por esta fonte.
    fn category(&self) -> Category;

    /// Consulta o provedor, propagando qualquer falha.
    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult>;

    /// Consulta o provedor sem nunca falhar.
    ///
    /// Qualquer erro vira o resultado vazio da categoria.
    async fn fetch(&self, word: &NormalizedWord) -> CategoryResult {
        match self.try_fetch(word).await {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(
                    source = self.name(),
                    word = %word,
                    error = %e,
                    "Source failed, using empty result"
                );
                self.category().empty_result()
            }
        }
    }
}

/// Cria o cliente HTTP compartilhado por todas as fontes.
pub fn build_http_client(user_agent: &str) -> WordscopeResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Endpoint de um provedor com seu timeout.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    name: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpEndpoint {
    /// Cria um endpoint.
    pub fn new(
        name: impl Into<String>,
        client: reqwest::Client,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Cria endpoint a partir da configuração do TOML.
    pub fn from_config(
        name: &str,
        client: &reqwest::Client,
        source: &SourceConfig,
        sources: &SourcesConfig,
    ) -> Self {
        Self::new(
            name,
            client.clone(),
            source.endpoint.clone(),
            sources.timeout_for(source),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL do endpoint com `segment` anexado como último trecho do caminho.
    pub fn url_with_segment(&self, segment: &str) -> WordscopeResult<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            WordscopeError::SourceFailed(self.name.clone(), format!("URL inválida: {}", e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                WordscopeError::SourceFailed(
                    self.name.clone(),
                    "URL não aceita segmentos de caminho".to_string(),
                )
            })?
            .pop_if_empty()
            .push(segment);

        Ok(url)
    }

    /// GET no endpoint com query string, decodificando o corpo JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> WordscopeResult<T> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            WordscopeError::SourceFailed(self.name.clone(), format!("URL inválida: {}", e))
        })?;
        self.get_json_url(url, query).await
    }

    /// GET em uma URL já montada, decodificando o corpo JSON.
    ///
    /// Status fora de 2xx, corpo inválido e timeout viram erro.
    pub async fn get_json_url<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> WordscopeResult<T> {
        let request = async {
            let response = self.client.get(url).query(query).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(WordscopeError::SourceFailed(
                    self.name.clone(),
                    format!("HTTP {}", status),
                ));
            }

            let body = response.bytes().await?;
            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                WordscopeError::SourceFailed(
                    self.name.clone(),
                    format!("Falha ao parsear JSON: {}", e),
                )
            })?;
            Ok::<T, WordscopeError>(parsed)
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(WordscopeError::SourceTimeout(self.name.clone())),
        }
    }
}

/// Corta a resposta nos primeiros `limit` itens e descarta os vazios.
///
/// O corte vem antes do filtro: itens em branco do provedor ocupam vaga.
pub(crate) fn take_non_empty<I>(items: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    items
        .into_iter()
        .take(limit)
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
