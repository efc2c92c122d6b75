use anyhow::{Context, Result, anyhow};
use std::time::Duration;

use crate::alert::DEFAULT_ALERT_DURATION;
use crate::http_client::DEFAULT_REQUEST_TIMEOUT;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Настройки клиента, собранные из окружения.
pub struct ClientConfig {
    /// Адрес бэкенда (`DB_IP`), всегда со схемой.
    pub base_url: String,
    /// Таймаут HTTP-запроса.
    pub request_timeout: Duration,
    /// Сколько алерт остаётся на экране.
    pub alert_duration: Duration,
    /// Уровень логирования по умолчанию.
    pub log_level: String,
}

impl ClientConfig {
    /// Читает настройки из переменных окружения процесса.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Читает настройки через произвольный источник `key -> value`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_ip = get_required(&lookup, "DB_IP").context("DB_IP is required")?;
        let request_timeout = parse_millis(
            &lookup,
            "SUBAK_REQUEST_TIMEOUT_MS",
            DEFAULT_REQUEST_TIMEOUT,
        )?;
        let alert_duration = parse_millis(&lookup, "SUBAK_ALERT_MS", DEFAULT_ALERT_DURATION)?;
        let log_level = resolve_log_level(&lookup);

        Ok(Self {
            base_url: normalize_server(db_ip),
            request_timeout,
            alert_duration,
            log_level,
        })
    }

    /// Уровень логирования без остальных настроек: нужен, когда `DB_IP`
    /// не задан, а ошибку всё равно надо залогировать.
    pub fn log_level_from_env() -> String {
        resolve_log_level(&|key: &str| std::env::var(key).ok())
    }
}

/// `LOG_LEVEL` важнее `RUST_LOG`.
fn resolve_log_level<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LOG_LEVEL")
        .or_else(|| lookup("RUST_LOG"))
        .map(|level| level.trim().to_string())
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// Добавляет `http://`, если схема не указана.
pub fn normalize_server(server: String) -> String {
    let server = server.trim().to_string();
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn get_required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_millis<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let millis = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting milliseconds"))?;

    if millis == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(Duration::from_millis(millis))
}
