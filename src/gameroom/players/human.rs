use crate::board::Board;
use crate::board::Symbol;
use crate::gameroom::*;
use colored::Colorize;
use dialoguer::Input;
use dialoguer::Select;

/// Terminal-driven player for local play. Renders every snapshot and turns
/// prompts into commands. The room still has the final say on every command,
/// but input is pre-validated against the last board so typos never leave
/// the prompt.
pub struct Human(Symbol);

impl Human {
    pub fn new(symbol: Symbol) -> Self {
        Self(symbol)
    }
}

impl Default for Human {
    fn default() -> Self {
        Self(Symbol::X)
    }
}

#[async_trait::async_trait]
impl Player for Human {
    async fn react(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Created { code, .. } => {
                println!("room {}, waiting for an opponent", code.to_string().bold());
                None
            }
            Event::Joined { code, .. } => {
                println!("joined room {}", code.to_string().bold());
                None
            }
            Event::Started { board, turn }
            | Event::Moved { board, turn, .. }
            | Event::Reset { board, turn } => {
                self.render(board);
                match *turn == self.0 {
                    true => Some(Command::Move(self.claim(board))),
                    false => {
                        println!("{} is thinking...", turn);
                        None
                    }
                }
            }
            Event::Over { board, outcome } => {
                self.render(board);
                match outcome.winner() {
                    Some(winner) if winner == self.0 => println!("{}", "you win".green().bold()),
                    Some(_) => println!("{}", "you lose".red().bold()),
                    None => println!("{}", "draw".yellow().bold()),
                }
                self.carry_on()
            }
            Event::Left { message } => {
                println!("{}", message.red());
                None
            }
            Event::Rejected(error) => {
                println!("{}", error.to_string().red());
                None
            }
        }
    }
}

impl Human {
    fn render(&self, board: &Board) {
        println!();
        for row in 0..3 {
            let cells = (0..3)
                .map(|col| {
                    let index = row * 3 + col;
                    match board.get(index).symbol() {
                        Some(Symbol::X) => "X".red().bold().to_string(),
                        Some(Symbol::O) => "O".blue().bold().to_string(),
                        None => index.to_string().dimmed().to_string(),
                    }
                })
                .collect::<Vec<String>>();
            println!(" {}", cells.join(" | "));
            if row < 2 {
                println!("---+---+---");
            }
        }
        println!();
    }

    fn claim(&self, board: &Board) -> usize {
        Input::new()
            .with_prompt(format!("your move ({})", self.0))
            .report(false)
            .validate_with(|i: &String| -> Result<(), &str> {
                match i.trim().parse::<usize>() {
                    Ok(index) if index < crate::CELLS => Ok(()),
                    _ => Err("enter a cell number, 0 through 8"),
                }
            })
            .validate_with(|i: &String| -> Result<(), &str> {
                match board.get(i.trim().parse::<usize>().unwrap()).is_empty() {
                    true => Ok(()),
                    false => Err("that cell is taken"),
                }
            })
            .interact()
            .unwrap()
            .trim()
            .parse::<usize>()
            .unwrap()
    }

    fn carry_on(&self) -> Option<Command> {
        let choice = Select::new()
            .with_prompt("play again?")
            .report(false)
            .items(&["Rematch", "Leave"])
            .default(0)
            .interact()
            .unwrap();
        match choice {
            0 => Some(Command::Reset),
            _ => Some(Command::Leave),
        }
    }
}
