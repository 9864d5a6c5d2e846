//! Terminal frontend for the Overlook Hotel text adventure.
//!
//! All game logic lives in `overlook-core`; this binary renders the
//! observable session state and forwards menu selections back into it.
//! Choices are picked by menu number or label; `r` restarts, `q` quits.

use std::io::{self, BufRead, Write};

use overlook_core::{GameSession, Selection, Snapshot};

const TITLE: &str = "THE SHINING - Text Adventure";
const SUBTITLE: &str = "Survive the horrors of the Overlook Hotel";

const DEFEAT_BANNER: &str = r#"
    +----------------------------------+
    |                                  |
    |            R . I . P             |
    |                                  |
    |     You have become part of      |
    |       the hotel's history        |
    |                                  |
    |           Forever...             |
    |                                  |
    +----------------------------------+"#;

const VICTORY_BANNER: &str = r#"
    +----------------------------------+
    |                                  |
    |            SUCCESS !             |
    |                                  |
    |     You escaped the Overlook     |
    |          Hotel's curse!          |
    |                                  |
    |      The nightmare is over       |
    |                                  |
    +----------------------------------+"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = GameSession::new();

    println!("{TITLE}");
    println!("{SUBTITLE}");
    render(&session.snapshot()?);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            prompt(&mut stdout)?;
            continue;
        }

        match input {
            "q" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "r" | "restart" => {
                session.reset();
                render(&session.snapshot()?);
            }
            _ => match session.dispatch(parse_selection(input)) {
                Ok(report) => {
                    println!();
                    for line in &report.lines {
                        println!("> {line}");
                    }
                    let snapshot = session.snapshot()?;
                    if snapshot.game_over {
                        println!("\nGAME OVER{DEFEAT_BANNER}");
                        println!("\nType r to try again, or q to quit.");
                    } else if snapshot.victory {
                        println!("\nVICTORY!{VICTORY_BANNER}");
                        println!("\nType r to play again, or q to quit.");
                    } else {
                        render(&snapshot);
                    }
                }
                Err(e) => println!("[!] {e}"),
            },
        }
        prompt(&mut stdout)?;
    }

    Ok(())
}

/// Map "1"-style input to a zero-based menu index, anything else to a label.
fn parse_selection(input: &str) -> Selection {
    match input.parse::<usize>() {
        Ok(n) if n >= 1 => Selection::Index(n - 1),
        _ => Selection::Label(input.to_string()),
    }
}

fn prompt(stdout: &mut io::Stdout) -> io::Result<()> {
    print!("? ");
    stdout.flush()
}

fn render(snapshot: &Snapshot) {
    println!();
    println!("=== {} ===", snapshot.room_name);
    println!("{}", snapshot.description);
    println!("{}", snapshot.art);
    println!();
    println!("Health: {}%   Sanity: {}%", snapshot.health, snapshot.sanity);
    if !snapshot.inventory.is_empty() {
        println!("Inventory: {}", snapshot.inventory.join(", "));
    }
    println!();
    for line in &snapshot.story {
        println!("> {line}");
    }
    println!();
    println!("What do you do?");
    for (i, choice) in snapshot.choices.iter().enumerate() {
        println!("  {}) {}", i + 1, choice);
    }
    println!("  (number or label; r restarts, q quits)");
}
