use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    // Keep a user's bf.toml and BF_* settings out of the tests.
    cmd.env("BF_CONFIG", "/nonexistent/bf.toml")
        .env_remove("BF_MAX_STEPS")
        .env_remove("BF_OVERSIZED")
        .env_remove("BF_COLOR")
        .env_remove("BF_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

fn program_file(content: &[u8]) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    tf.write_all(content).unwrap();
    tf
}

#[test]
fn increments_then_outputs_raw_byte() {
    let tf = program_file(b"++.");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(vec![2u8])
        .stderr(predicate::str::is_empty());
}

#[test]
fn echoes_one_input_byte() {
    let tf = program_file(b",.");
    cargo_bin()
        .arg(tf.path())
        .write_stdin(vec![0x41u8])
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn cat_program_copies_stdin() {
    let tf = program_file(b",[.,]");
    cargo_bin()
        .arg(tf.path())
        .write_stdin("hello, tape")
        .assert()
        .success()
        .stdout("hello, tape");
}

#[test]
fn transfer_loop_terminates() {
    // Prints cell 1 after the loop so the final state is observable.
    let tf = program_file(b"+[->+<]>.");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(vec![1u8]);
}

#[test]
fn hello_world_with_comments() {
    let tf = program_file(
        b"Hello World program\n\
          ++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.\n",
    );
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout("Hello World!\n");
}

#[test]
fn lone_close_bracket_on_zero_cell_succeeds() {
    let tf = program_file(b"]");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn lone_open_bracket_is_unmatched() {
    let tf = program_file(b"[");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unmatched left brace"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn close_bracket_without_partner_on_nonzero_cell_fails() {
    let tf = program_file(b"+]");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unmatched right brace"));
}

#[test]
fn moving_left_first_is_fatal() {
    let tf = program_file(b"<");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Went left beyond end of tape")
                .and(predicate::str::contains("^")),
        );
}

#[test]
fn moving_right_off_the_tape_is_fatal() {
    let tf = program_file(&vec![b'>'; 65536]);
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Went right beyond end of tape"));
}

#[test]
fn output_before_error_is_kept() {
    let tf = program_file(b"+++.<");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stdout(vec![3u8])
        .stderr(predicate::str::contains("at instruction 4"));
}
