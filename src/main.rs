use std::io::{self, Write};

use sanmove::Game;

fn main() {
    // Initialize tracing (structured logging).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sanmove=info".into()),
        )
        .init();

    tracing::info!("sanmove v{} interactive board", env!("CARGO_PKG_VERSION"));

    let mut game = Game::new();
    println!("{}", game.position());
    println!("enter moves (e4, Nf3, exd5, 0-0, e8=Q, ...), 'undo' or 'quit'");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{} > ", game.active_color());
        io::stdout().flush().expect("stdout");

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("stdin error: {e}");
                break;
            }
        }

        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "undo" => match game.undo() {
                Some(mv) => {
                    println!("took back '{mv}'");
                    println!("{}", game.position());
                }
                None => println!("nothing to undo"),
            },
            input => match game.apply(input) {
                Ok(pos) => println!("{pos}"),
                Err(e) => println!("{e}"),
            },
        }
    }
}
