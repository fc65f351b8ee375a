//! Tipos de erro do Wordscope.

use thiserror::Error;

/// Tipo de resultado padrão do Wordscope.
pub type WordscopeResult<T> = Result<T, WordscopeError>;

/// Erros possíveis no Wordscope.
#[derive(Error, Debug)]
pub enum WordscopeError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro HTTP: {0}")]
    Http(#[from] reqwest::Error),

    /// A palavra ficou vazia depois da normalização.
    #[error("Palavra vazia: informe uma palavra")]
    EmptyWord,

    #[error("Fonte '{0}' falhou: {1}")]
    SourceFailed(String, String),

    #[error("Timeout ao consultar '{0}'")]
    SourceTimeout(String),

    /// Falha fora da fronteira de erro de qualquer fonte.
    #[error("Falha na agregação: {0}")]
    Aggregation(String),

    #[error("Erro no servidor HTTP: {0}")]
    Server(String),
}

impl WordscopeError {
    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Indica se o erro foi causado pela entrada do usuário.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyWord)
    }
}
