//! Conversation groups server binary.
//! Run with: cargo run --bin conversation-groups-server

use std::process::ExitCode;

use conversation_groups::start_server;

fn main() -> ExitCode {
    start_server::run()
}
