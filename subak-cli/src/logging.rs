use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Ставит глобальный subscriber. Фильтр берётся только из `level`,
/// который уже выбран настройками (`LOG_LEVEL`, затем `RUST_LOG`).
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(level_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|err| {
        eprintln!("некорректный уровень логирования {level:?}: {err}, используется info");
        EnvFilter::new("info")
    })
}
