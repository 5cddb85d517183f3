use aac_core::Fault;
use aac_core::Settings;
use aac_players::CharacterResponse;
use aac_players::PlayerRepository;
use actix_web::HttpResponse;
use actix_web::web;
use std::sync::Arc;
use std::time::Duration;
use tokio_postgres::Client;

/// One bounded TCP dial against the game server's login port. Timeouts and
/// refusals both read as offline; the probe never retries and never errors.
pub async fn probe(host: &str, port: u16, timeout: Duration) -> bool {
    tokio::time::timeout(timeout, tokio::net::TcpStream::connect((host, port)))
        .await
        .map(|dial| dial.is_ok())
        .unwrap_or(false)
}

#[derive(Debug, serde::Serialize)]
pub struct StatusResponse {
    pub online: bool,
    pub players_online: usize,
}

pub async fn server_status(
    db: web::Data<Arc<Client>>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, Fault> {
    let online = probe(
        &settings.game_host,
        settings.game_port,
        settings.probe_timeout,
    )
    .await;
    let players_online = db.online_players().await?.len();
    Ok(HttpResponse::Ok().json(StatusResponse {
        online,
        players_online,
    }))
}

pub async fn online_players(db: web::Data<Arc<Client>>) -> Result<HttpResponse, Fault> {
    let characters = db.online_players().await?;
    let body: Vec<CharacterResponse> = characters.iter().map(CharacterResponse::of).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_reports_offline_for_closed_ports() {
        // nothing listens on a freshly bound-then-dropped port
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        assert!(!probe("127.0.0.1", port, Duration::from_secs(2)).await);
    }
    #[tokio::test]
    async fn probe_reports_online_for_listening_ports() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(probe("127.0.0.1", port, Duration::from_secs(2)).await);
    }
    #[tokio::test]
    async fn probe_is_bounded_by_the_timeout() {
        // a non-routable address forces the timeout path
        let start = std::time::Instant::now();
        assert!(!probe("10.255.255.1", 7171, Duration::from_millis(200)).await);
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
