use std::path::PathBuf;

use anyhow::Result;

use quizbowl_core::parser;

pub fn execute(banks: &[PathBuf]) -> Result<()> {
    let mut total_warnings = 0;

    for path in banks {
        let bank = parser::load_bank(path)?;
        println!(
            "{}: {} questions (declared {})",
            path.display(),
            bank.actual_count(),
            bank.declared_count
        );

        for warning in parser::validate_bank(&bank) {
            total_warnings += 1;
            match warning.question {
                Some(n) => println!("  [question {n}] WARNING: {}", warning.message),
                None => println!("  WARNING: {}", warning.message),
            }
        }
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
