#![allow(dead_code)]

use assert_cmd::Command;

pub fn minaret_command() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("minaret"))
}
