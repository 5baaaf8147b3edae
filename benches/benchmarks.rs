criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        searching_the_opening,
        searching_a_midgame,
        searching_an_endgame,
        scanning_for_lines,
        replaying_a_session,
}

fn searching_the_opening(c: &mut criterion::Criterion) {
    c.bench_function("search the empty board", |b| {
        b.iter(|| Minimax::best_move(Game::root()))
    });
}

fn searching_a_midgame(c: &mut criterion::Criterion) {
    let game = Game::try_from("X.. .O. ..X").unwrap();
    c.bench_function("search a midgame position", |b| {
        b.iter(|| Minimax::best_move(game))
    });
}

fn searching_an_endgame(c: &mut criterion::Criterion) {
    let game = Game::try_from("XOX OO. X.X").unwrap();
    c.bench_function("search an endgame position", |b| {
        b.iter(|| Minimax::best_move(game))
    });
}

fn scanning_for_lines(c: &mut criterion::Criterion) {
    let board = Board::try_from("XOX OXO O.X").unwrap();
    c.bench_function("evaluate a board for lines", |b| {
        b.iter(|| Outcome::from(&board))
    });
}

fn replaying_a_session(c: &mut criterion::Criterion) {
    let (x, o) = (ID::default(), ID::default());
    c.bench_function("replay a five-move session", |b| {
        b.iter(|| {
            let mut session = Session::new(x);
            session.join(o).unwrap();
            for (contact, index) in [(x, 0), (o, 3), (x, 1), (o, 4), (x, 2)] {
                session.apply_move(contact, index).unwrap();
            }
            session
        })
    });
}

use roboxo::board::Board;
use roboxo::board::Outcome;
use roboxo::gameplay::Game;
use roboxo::gameplay::Session;
use roboxo::search::Minimax;
use roboxo::ID;
