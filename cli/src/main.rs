//! The `floppyforge` binary: builds and extracts the OS floppy disk images

mod args;
mod commands;
mod prompter;
mod tree;

use clap::Command;
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("floppyforge")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(commands::create::command())
        .subcommand(commands::copy::command())
        .subcommand(commands::build_floppy::command())
        .subcommand(commands::compile_os::command())
        .subcommand(commands::interactive::command())
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = cli().get_matches();
    let result = match matches.subcommand() {
        Some(("create", sub)) => commands::create::run(sub),
        Some(("copy", sub)) => commands::copy::run(sub),
        Some(("build-floppy", sub)) => commands::build_floppy::run(sub),
        Some(("compile-os", sub)) => commands::compile_os::run(sub),
        Some(("interactive", sub)) => commands::interactive::run(sub),
        _ => unreachable!("a subcommand is required"),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::cli;

    #[test]
    fn command_definition_is_consistent() {
        cli().debug_assert();
    }
}
