//! Line-oriented driver: one command per stdin line, one JSON snapshot per
//! command on stdout. Useful for scripting and for frontends in other
//! processes.

use rust_block_game::game::Game;
use std::io::{self, BufRead, Write};

/// Commands understood by the headless driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Down,
    Rotate,
    RotateCcw,
    Spawn,
    Fill,
    Reset,
    Show,
    Quit,
}

impl Command {
    pub fn parse(word: &str) -> Option<Self> {
        let command = match word.trim().to_ascii_lowercase().as_str() {
            "left" => Command::Left,
            "right" => Command::Right,
            "down" => Command::Down,
            "rotate" | "up" => Command::Rotate,
            "rotate_ccw" => Command::RotateCcw,
            "spawn" => Command::Spawn,
            "fill" => Command::Fill,
            "reset" => Command::Reset,
            "show" => Command::Show,
            "quit" | "exit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    /// Forward the command to the controller
    pub fn apply(self, game: &mut Game) {
        match self {
            Command::Left => {
                game.move_left();
            }
            Command::Right => {
                game.move_right();
            }
            Command::Down => {
                game.move_down();
            }
            Command::Rotate => {
                game.rotate();
            }
            Command::RotateCcw => {
                game.rotate_ccw();
            }
            Command::Spawn => game.spawn_test_mino(),
            Command::Fill => game.test_fill(),
            Command::Reset => game.reset(),
            Command::Show | Command::Quit => {}
        }
    }
}

/// Run commands from `input` until EOF or `quit`
pub fn run<R: BufRead, W: Write>(game: &mut Game, input: R, mut output: W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = Command::parse(&line) else {
            tracing::warn!("Unknown command: {:?}", line.trim());
            let error = serde_json::json!({
                "error": format!("unknown command: {}", line.trim()),
            });
            writeln!(output, "{}", error)?;
            continue;
        };
        if command == Command::Quit {
            break;
        }

        command.apply(game);
        serde_json::to_writer(&mut output, &game.snapshot()).map_err(io::Error::other)?;
        writeln!(output)?;
        output.flush()?;
    }
    Ok(())
}
