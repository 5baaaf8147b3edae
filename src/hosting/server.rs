use super::*;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use std::time::Instant;

pub struct Server;

impl Server {
    /// Binds `BIND_ADDR` (default `0.0.0.0:3001`) and serves until killed.
    pub async fn run() -> Result<(), std::io::Error> {
        let lobby = web::Data::new(Lobby::default());
        let start = web::Data::new(Instant::now());
        let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        log::info!("serving on {}", bind);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(lobby.clone())
                .app_data(start.clone())
                .route("/", web::get().to(root))
                .route("/health", web::get().to(health))
                .route("/play", web::get().to(play))
        })
        .workers(4)
        .bind(bind)?
        .run()
        .await
    }
}

async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/health", "/play"],
    }))
}

async fn health(lobby: web::Data<Lobby>, start: web::Data<Instant>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "rooms": lobby.count().await,
        "uptime_secs": start.elapsed().as_secs(),
    }))
}

async fn play(lobby: web::Data<Lobby>, body: web::Payload, req: HttpRequest) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            Connection::spawn(lobby.into_inner(), session, stream);
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
