use std::fs;
use std::io;
use std::path::Path;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use subak_client::{
    AlertChannel, ClientConfig, DealType, Destination, HttpClient, MissingFields, Navigator,
    NewPostScreen, SessionStore, SubmitOutcome,
};
use tracing::info;

mod logging;

use logging::init_logging;

const TOKEN_FILE: &str = ".subak_token";

#[derive(Debug, Parser)]
#[command(name = "subak-cli", version, about = "CLI клиент для маркетплейса subak")]
struct Cli {
    /// Адрес бэкенда. По умолчанию берётся из DB_IP.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Создание объявления.
    NewPost {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Цена в вонах.
        #[arg(long, conflicts_with = "giveaway")]
        price: Option<String>,
        /// Отдать бесплатно (나눔하기).
        #[arg(long)]
        giveaway: bool,
        /// Сколько фото прикрепить.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
        images: u8,
    },
    /// Сохранение токена сессии.
    SaveToken {
        #[arg(long)]
        token: String,
    },
    /// Удаление сохранённого токена.
    ClearToken,
}

/// Навигатор для терминала: просто сообщает, куда перешли бы.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, destination: Destination) {
        println!("→ {}", destination.route_name());
    }

    fn go_back(&self) {
        println!("← back");
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match cli.server.clone() {
        Some(server) => {
            ClientConfig::from_lookup(config_lookup(server, |key| std::env::var(key).ok()))
        }
        None => ClientConfig::from_env(),
    };
    let log_level = match &config {
        Ok(config) => config.log_level.clone(),
        Err(_) => ClientConfig::log_level_from_env(),
    };
    init_logging(&log_level)?;

    match cli.command {
        Command::NewPost {
            title,
            content,
            price,
            giveaway,
            images,
        } => {
            let config = config.context("не удалось загрузить настройки")?;
            let session = load_session().context("не удалось прочитать .subak_token")?;
            new_post(&config, &session, title, content, price, giveaway, images).await?;
        }
        Command::SaveToken { token } => {
            let Some(token) = parse_token_content(&token) else {
                bail!("токен не может быть пустым");
            };
            fs::write(TOKEN_FILE, token).context("не удалось сохранить токен")?;
            println!("Токен сохранён");
        }
        Command::ClearToken => {
            if Path::new(TOKEN_FILE).exists() {
                fs::remove_file(TOKEN_FILE).context("не удалось удалить токен")?;
            }
            println!("Токен удалён");
        }
    }

    Ok(())
}

async fn new_post(
    config: &ClientConfig,
    session: &SessionStore,
    title: String,
    content: String,
    price: Option<String>,
    giveaway: bool,
    images: u8,
) -> Result<()> {
    let client = HttpClient::new(config.base_url.clone(), config.request_timeout)?;
    info!(server = %client.base_url(), "posting to backend");

    let screen = NewPostScreen::new(
        Arc::new(client),
        Arc::new(ConsoleNavigator),
        session,
        AlertChannel::new(config.alert_duration),
    );

    screen.set_title(title);
    screen.set_content(content);
    if let Some(price) = price {
        screen
            .set_price_text(&price)
            .context("некорректная цена")?;
    }
    if giveaway {
        screen.select_deal(DealType::Giveaway);
    }
    for _ in 0..images {
        screen.add_image().context("не удалось добавить фото")?;
    }

    let draft = screen.snapshot().draft;
    println!(
        "{} · ₩{} · 사진 {}",
        draft.deal_type().label(),
        draft.price(),
        draft.image_counter_label()
    );

    match screen.submit().await {
        SubmitOutcome::Navigated(_) => {
            println!("Объявление опубликовано");
            Ok(())
        }
        SubmitOutcome::Incomplete(missing) => bail!(describe_missing(missing)),
        SubmitOutcome::Failed(alert) => bail!(alert.message),
        SubmitOutcome::InFlight | SubmitOutcome::AlreadyNavigated => {
            bail!("объявление уже отправляется")
        }
    }
}

/// Источник настроек, где `--server` подменяет `DB_IP`.
fn config_lookup<F>(server: String, env: F) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |key| match key {
        "DB_IP" => Some(server.clone()),
        _ => env(key),
    }
}

fn describe_missing(missing: MissingFields) -> String {
    let mut lines = Vec::new();
    if missing.title {
        lines.push("제목을 적어주세요.");
    }
    if missing.content {
        lines.push("설명을 적어주세요.");
    }
    lines.join("\n")
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn load_session() -> io::Result<SessionStore> {
    let session = SessionStore::new();
    match load_token()? {
        Some(token) => {
            session.set_token(token);
            session.set_logined(true);
        }
        None => session.set_logined(false),
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lookup_prefers_server_flag() {
        let lookup = config_lookup("127.0.0.1:9999".to_string(), |key| match key {
            "DB_IP" => Some("10.0.0.1".to_string()),
            "LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        });

        let config = ClientConfig::from_lookup(lookup).expect("config must load");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn config_lookup_reads_other_keys_from_env() {
        let lookup = config_lookup("10.0.0.1".to_string(), |key| match key {
            "SUBAK_REQUEST_TIMEOUT_MS" => Some("500".to_string()),
            _ => None,
        });

        let config = ClientConfig::from_lookup(lookup).expect("config must load");
        assert_eq!(config.base_url, "http://10.0.0.1");
        assert_eq!(config.request_timeout, std::time::Duration::from_millis(500));
    }

    #[test]
    fn describe_missing_lists_each_field() {
        let both = describe_missing(MissingFields {
            title: true,
            content: true,
        });
        assert_eq!(both, "제목을 적어주세요.\n설명을 적어주세요.");

        let content_only = describe_missing(MissingFields {
            title: false,
            content: true,
        });
        assert_eq!(content_only, "설명을 적어주세요.");
    }

    #[test]
    fn parse_token_content_trims_whitespace() {
        let token = parse_token_content("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_content_rejects_blank() {
        assert!(parse_token_content("   ").is_none());
    }

    #[test]
    fn new_post_rejects_price_with_giveaway() {
        let result = Cli::try_parse_from([
            "subak-cli",
            "new-post",
            "--title",
            "t",
            "--content",
            "c",
            "--price",
            "100",
            "--giveaway",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn new_post_limits_images() {
        let result = Cli::try_parse_from(["subak-cli", "new-post", "--images", "11"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["subak-cli", "new-post", "--images", "10"])
            .expect("10 images are allowed");
        match cli.command {
            Command::NewPost { images, title, .. } => {
                assert_eq!(images, 10);
                assert!(title.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn server_flag_is_global() {
        let cli = Cli::try_parse_from(["subak-cli", "clear-token", "--server", "10.0.2.2:8080"])
            .expect("global flag after subcommand");
        assert_eq!(cli.server.as_deref(), Some("10.0.2.2:8080"));
    }
}
