//! Local play binary: you against the house, no network.
//!
//! Drives the same room actor the server runs, with the second seat filled
//! by an in-process player. You hold the first seat and mark X.

use clap::Parser;
use roboxo::board::Symbol;
use roboxo::gameroom::*;
use roboxo::*;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

#[derive(Parser)]
#[command(version, about = "play the computer in the terminal")]
struct Args {
    /// face a random mover instead of the perfect one
    #[arg(long)]
    easy: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    kys();
    let you = ID::default();
    let (tx, mut rx) = unbounded_channel();
    let mut room = Room::open(RoomCode::random(), you, tx, false);
    match args.easy {
        true => room.seat_actor(Box::new(Novice::default())),
        false => room.seat_cpu(),
    }
    let signals = room.signals();
    let (done_tx, done_rx) = oneshot::channel();
    tokio::spawn(room.run(done_tx));
    tokio::spawn(async move {
        let mut player = Human::new(Symbol::X);
        while let Some(ref event) = rx.recv().await {
            if let Some(command) = player.react(event).await {
                if signals.send(Signal::Command { contact: you, command }).is_err() {
                    break;
                }
            }
        }
    });
    let _ = done_rx.await;
}
