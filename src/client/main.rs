/**
 * taskgate Console Client
 *
 * Usage:
 *
 * - `taskgate-client` - interactive menu
 * - `taskgate-client auto [OUT_FILE]` - register, log in, list tasks and
 *   save them as JSON (default `tasks.json`)
 *
 * The server URL comes from `TASKGATE_URL` (default `http://127.0.0.1:5000`).
 */

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use taskgate::client::{run_auto, run_menu, TaskgateClient};
use taskgate::shared::{AppConfig, Credentials};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(io::stderr)
        .init();

    let command = parse_command(std::env::args().skip(1))?;
    let config = AppConfig::from_env()?;
    tracing::info!("Using server {}", config.server_url());
    let client = TaskgateClient::new(config)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match command {
        Command::Auto(out_file) => {
            let username = read_line(&mut input, &mut output, "Username (e.g. juan): ")?;
            let password = rpassword::prompt_password("Password: ")?;
            let credentials = Credentials::new(username.trim(), password);
            run_auto(&client, &credentials, &out_file, &mut output)?;
            writeln!(output, "Done.")?;
        }
        Command::Menu => run_menu(&client, &mut input, &mut output, || {
            rpassword::prompt_password("Password: ")
        })?,
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Menu,
    Auto(PathBuf),
}

fn parse_command(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    match args.next().as_deref() {
        None => Ok(Command::Menu),
        Some("auto") => Ok(Command::Auto(PathBuf::from(
            args.next().unwrap_or_else(|| "tasks.json".to_string()),
        ))),
        Some(other) => Err(format!(
            "Unknown command '{}'. Usage: taskgate-client [auto [OUT_FILE]]",
            other
        )),
    }
}

fn read_line(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> io::Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
