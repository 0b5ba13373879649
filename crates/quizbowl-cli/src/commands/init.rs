use std::path::Path;

use anyhow::{Context, Result};

const SAMPLE_CONFIG: &str = r#"# quizbowl configuration

# Question bank used when none is given on the command line.
default_bank = "banks/starter.quiz"

# Directory where session transcripts are written after each game.
# transcript_dir = "transcripts"

# Fixed shuffle seed, for reproducible sessions.
# shuffle_seed = 42
"#;

const STARTER_BANK: &str = "4
TF 10
The Rust compiler is named rustc.
true
MC 15
Which planet is known as the Red Planet?
4
Venus
Mars
Jupiter
Saturn
B
SA 20
What is the capital of France?
Paris
TF 5
Water boils at 90 degrees Celsius at sea level.
false
";

pub fn execute() -> Result<()> {
    let config_path = Path::new("quizbowl.toml");
    if config_path.exists() {
        println!("quizbowl.toml already exists, skipping");
    } else {
        std::fs::write(config_path, SAMPLE_CONFIG).context("failed to write quizbowl.toml")?;
        println!("Created quizbowl.toml");
    }

    std::fs::create_dir_all("banks").context("failed to create banks directory")?;

    let bank_path = Path::new("banks/starter.quiz");
    if bank_path.exists() {
        println!("banks/starter.quiz already exists, skipping");
    } else {
        std::fs::write(bank_path, STARTER_BANK).context("failed to write banks/starter.quiz")?;
        println!("Created banks/starter.quiz");
    }

    println!("\nNext steps:");
    println!("  1. Check the starter bank: quizbowl validate banks/starter.quiz");
    println!("  2. Play it: quizbowl play");
    println!("  3. Write your own bank and point default_bank at it");

    Ok(())
}
