//! Hosting server binary.
//!
//! Serves the room lobby over HTTP and upgrades `/play` requests into
//! WebSocket sessions for real-time games.

use roboxo::*;

#[tokio::main]
async fn main() {
    log();
    kys();
    hosting::Server::run().await.unwrap();
}
