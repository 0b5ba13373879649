//! End-to-end game sessions driven through stdin.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use quizbowl_core::transcript::Transcript;
use tempfile::TempDir;

/// A play command isolated from the ambient environment: cwd and HOME both
/// point at the temp dir so neither `./quizbowl.toml` nor a user config is
/// found, and `RUST_LOG` is cleared so no log lines land in stdout.
fn play_in(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizbowl").unwrap();
    cmd.current_dir(dir.path());
    cmd.env("HOME", dir.path());
    cmd.env_remove("RUST_LOG");
    cmd.arg("play");
    cmd
}

fn write_bank(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const ONE_TRUE_FALSE: &str = "1\nTF 10\nThe sky is blue.\ntrue\n";

#[test]
fn full_session_with_flags() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "one.quiz", ONE_TRUE_FALSE);

    play_in(&dir)
        .arg(&bank)
        .args(["--name", "Ada Lovelace", "--questions", "1"])
        .write_stdin("true\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Points: 10"))
        .stdout(predicate::str::contains(
            "Question: The sky is blue. (true/false)",
        ))
        .stdout(predicate::str::contains("Correct! You get 10 points."))
        .stdout(predicate::str::contains("Ada Lovelace, your game is over!"))
        .stdout(predicate::str::contains("Your final score is 10 points."))
        .stdout(predicate::str::contains("Better Luck Next Time!"));
}

#[test]
fn interactive_prompts_walk_the_start_sequence() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "one.quiz", ONE_TRUE_FALSE);

    let stdin = format!("Ada\nLovelace\n{}\n1\ntrue\n", bank.display());
    play_in(&dir)
        .write_stdin(stdin)
        .assert()
        .success()
        .stdout(predicate::str::contains("What is your first name? "))
        .stdout(predicate::str::contains("What is your last name? "))
        .stdout(predicate::str::contains("What file stores your questions? "))
        .stdout(predicate::str::contains(
            "How many questions would you like (out of 1)? ",
        ))
        .stdout(predicate::str::contains("Ada Lovelace, your game is over!"));
}

#[test]
fn selection_retries_on_bad_input() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "one.quiz", ONE_TRUE_FALSE);

    play_in(&dir)
        .arg(&bank)
        .args(["--name", "Ada"])
        .write_stdin("abc\n9\n1\ntrue\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorry, that is not valid."))
        .stdout(predicate::str::contains("Sorry, that is too many."))
        .stdout(predicate::str::contains("Ada, your game is over!"));
}

#[test]
fn skip_scores_zero() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "one.quiz", ONE_TRUE_FALSE);

    play_in(&dir)
        .arg(&bank)
        .args(["--name", "Ada", "--questions", "1"])
        .write_stdin("skip\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You have elected to skip that question.",
        ))
        .stdout(predicate::str::contains("Your final score is 0 points."));
}

#[test]
fn incorrect_answer_reveals_key_and_deducts() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(
        &dir,
        "mc.quiz",
        "1\nMC 15\nWhich planet is known as the Red Planet?\n4\nVenus\nMars\nJupiter\nSaturn\nB\n",
    );

    play_in(&dir)
        .arg(&bank)
        .args(["--name", "Ada", "--questions", "1"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("A) Venus"))
        .stdout(predicate::str::contains("B) Mars"))
        .stdout(predicate::str::contains(
            "Incorrect, the answer was B. You lose 15 points.",
        ))
        .stdout(predicate::str::contains("Your final score is -15 points."));
}

#[test]
fn count_mismatch_warns_but_plays() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "short.quiz", "3\nTF 10\nOnly one.\ntrue\n");

    play_in(&dir)
        .arg(&bank)
        .args(["--name", "Ada", "--questions", "1"])
        .write_stdin("true\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning: Expected 3 questions, but found 1.",
        ))
        .stdout(predicate::str::contains("Your final score is 10 points."));
}

#[test]
fn unplayable_bank_is_refused() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "broken.quiz", "1\nMC 5\nPick.\n0\nA\n");

    play_in(&dir)
        .arg(&bank)
        .args(["--name", "Ada", "--questions", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not playable"))
        .stderr(predicate::str::contains(
            "multiple-choice question has no choices",
        ));
}

#[test]
fn transcript_records_the_session() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "one.quiz", ONE_TRUE_FALSE);
    let transcript_path = dir.path().join("runs/session.json");

    play_in(&dir)
        .arg(&bank)
        .args(["--name", "Ada Lovelace", "--questions", "1"])
        .arg("--transcript")
        .arg(&transcript_path)
        .write_stdin("true\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Transcript saved to:"));

    let transcript = Transcript::load_json(&transcript_path).unwrap();
    assert_eq!(transcript.selection, 1);
    assert_eq!(transcript.player.full_name(), "Ada Lovelace");
    assert_eq!(transcript.outcomes.len(), 1);
    assert_eq!(transcript.stats.final_score, 10);
    assert_eq!(transcript.bank.actual_count, 1);
}

#[test]
fn equal_seeds_replay_the_same_session() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(
        &dir,
        "three.quiz",
        "3\nTF 10\nFirst.\ntrue\nTF 5\nSecond.\nfalse\nSA 20\nThird?\nword\n",
    );

    let run = || {
        play_in(&dir)
            .arg(&bank)
            .args(["--name", "Ada", "--questions", "3", "--seed", "7"])
            .write_stdin("skip\nskip\nskip\n")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn debug_logging_reports_the_resolved_session() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "one.quiz", ONE_TRUE_FALSE);

    play_in(&dir)
        .env("RUST_LOG", "quizbowl::commands=debug")
        .arg(&bank)
        .args(["--name", "Ada", "--questions", "1"])
        .write_stdin("true\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("playing 1 of 1 questions from"));
}

#[test]
fn stdin_ending_mid_game_keeps_the_partial_score() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(
        &dir,
        "two.quiz",
        "2\nTF 10\nFirst statement.\ntrue\nTF 10\nSecond statement.\ntrue\n",
    );

    play_in(&dir)
        .arg(&bank)
        .args(["--name", "Ada", "--questions", "2"])
        .write_stdin("true\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct! You get 10 points."))
        .stdout(predicate::str::contains("Your final score is 10 points."))
        .stdout(predicate::str::contains("Better Luck Next Time!"));
}
