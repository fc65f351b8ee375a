//! Implementação dos comandos CLI do Wordscope.

use std::path::{Path, PathBuf};

use crate::service::QueryService;
use crate::types::config::{Config, CONFIG_FILE_NAME};
use crate::WordscopeResult;

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> WordscopeResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Wordscope initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Check the configured sources: wordscope sources");
    println!("  2. Look up a word: wordscope lookup light --pretty");
    println!("  3. Start the HTTP API: wordscope serve");

    Ok(())
}

/// Consulta uma palavra e imprime o registro.
pub async fn lookup(word: &str, pretty: bool, config: &Config) -> WordscopeResult<()> {
    let service = QueryService::from_config(config)?;
    let record = service.query(word).await?;

    let output = if pretty {
        serde_json::to_string_pretty(record.as_ref())?
    } else {
        serde_json::to_string(record.as_ref())?
    };
    println!("{}", output);

    if record.is_empty() {
        tracing::warn!(word = %record.word, "No source returned data");
    }

    Ok(())
}

/// Inicia o servidor HTTP.
#[cfg(feature = "server")]
pub async fn serve(port: Option<u16>, host: Option<String>, config: &Config) -> WordscopeResult<()> {
    use std::sync::Arc;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    tracing::debug!(
        "Configuração carregada: cache={} palavras, ttl={}s, coalescência={}",
        config.cache.capacity,
        config.cache.ttl_secs,
        config.cache.coalesce_requests
    );

    let service = Arc::new(QueryService::from_config(config)?);
    crate::server::serve(service, &format!("{}:{}", host, port)).await
}

/// Sem o recurso `server`, avisa e sai.
#[cfg(not(feature = "server"))]
pub async fn serve(_port: Option<u16>, _host: Option<String>, _config: &Config) -> WordscopeResult<()> {
    eprintln!("Aviso: compilado sem o recurso 'server'. Recompile com --features server.");
    Ok(())
}

/// Mostra as fontes configuradas.
pub async fn sources(config: &Config) -> WordscopeResult<()> {
    println!("Fontes configuradas:\n");

    for (name, source) in config.sources.named() {
        let status_icon = if source.enabled { "✓" } else { "○" };
        let timeout = config.sources.timeout_for(source);

        if source.enabled {
            println!(
                "  {} {:<13} {} (timeout {}s)",
                status_icon,
                name,
                source.endpoint,
                timeout.as_secs()
            );
        } else {
            println!("  {} {:<13} desabilitado", status_icon, name);
        }
    }

    let titles = &config.sources.titles;
    if titles.enabled {
        println!("  ✓ titles        até {} por tipo", titles.limit);
        for (name, source) in titles.named() {
            let tmdb_missing = name == "films" && titles.tmdb_key().is_none();
            if !source.enabled {
                println!("      ○ {:<6} desabilitado", name);
            } else if tmdb_missing {
                println!("      ○ {:<6} sem chave TMDB (defina TMDB_API_KEY)", name);
            } else {
                println!("      ✓ {:<6} {}", name, source.endpoint);
            }
        }
    } else {
        println!("  ○ titles        desabilitado");
    }

    let languages: Vec<&str> = config
        .sources
        .translations
        .languages
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    println!();
    println!("Idiomas de tradução: {}", languages.join(", "));
    println!(
        "Cache: {} palavras, TTL {}s",
        config.cache.capacity, config.cache.ttl_secs
    );

    Ok(())
}

/// Diagnostica problemas de configuração.
pub async fn doctor(config_path: &Path) -> WordscopeResult<()> {
    println!("Diagnosticando configuração do Wordscope...\n");

    let mut warnings: Vec<String> = Vec::new();

    let config = if config_path.exists() {
        match Config::load(config_path) {
            Ok(config) => {
                println!("✓ Configuração carregada de {}", config_path.display());
                config
            }
            Err(e) => {
                println!("✗ Configuração inválida: {}", e);
                return Ok(());
            }
        }
    } else {
        warnings.push(format!(
            "{} não encontrado, usando padrões (execute 'wordscope init')",
            config_path.display()
        ));
        Config::default_config()
    };

    let named = config.sources.named();
    let total = named.len() + 1;
    let enabled = named.iter().filter(|(_, source)| source.enabled).count()
        + usize::from(config.sources.titles.enabled);
    if enabled == 0 {
        warnings.push("Todas as fontes estão desabilitadas; todo registro sairá vazio".to_string());
    }

    for (name, source) in config.sources.named() {
        if source.enabled && !source.endpoint.starts_with("https://") {
            warnings.push(format!("sources.{} não usa HTTPS: {}", name, source.endpoint));
        }
    }

    let titles = &config.sources.titles;
    if titles.enabled {
        if titles.films.enabled && titles.tmdb_key().is_none() {
            warnings.push(
                "sources.titles.films habilitado sem chave TMDB; filmes ficarão vazios".to_string(),
            );
        }
        for (name, source) in titles.named() {
            if source.enabled && !source.endpoint.starts_with("https://") {
                warnings.push(format!(
                    "sources.titles.{} não usa HTTPS: {}",
                    name, source.endpoint
                ));
            }
        }
    }

    if config.cache.ttl_secs == 0 {
        warnings.push("cache.ttl_secs = 0 desativa o cache na prática".to_string());
    }

    println!("✓ {} de {} fontes habilitadas", enabled, total);
    println!();

    if warnings.is_empty() {
        println!("✓ Tudo OK! Wordscope está pronto para uso.");
    } else {
        println!("Avisos:");
        for warning in warnings {
            println!("  ⚠ {}", warning);
        }
    }

    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("wordscope {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Definições, sinônimos, expressões, traduções e rimas em uma consulta");
}
