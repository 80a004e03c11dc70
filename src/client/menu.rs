//! Console flows
//!
//! `run_menu` is the interactive menu; `run_auto` is the scripted
//! register → login → list → save flow. Both take their input and output as
//! parameters so they can run against in-memory buffers. Passwords come from
//! a separate reader so the binary can prompt without echo.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::client::api::{ClientError, TaskgateClient};
use crate::shared::{Credentials, TaskListResponse};

const MENU: &str = "\nOptions:\n\
1) Register\n\
2) Login\n\
3) List tasks (HTTP Basic)\n\
4) List tasks (session cookie)\n\
5) Logout\n\
6) Exit";

/// Run the interactive menu until the user picks Exit or input ends
///
/// Server rejections and connection failures are printed and the menu
/// continues; only console I/O errors end it early. `read_password` is
/// called whenever a password is needed and prompts on its own.
pub fn run_menu<R, W, P>(
    client: &TaskgateClient,
    input: &mut R,
    output: &mut W,
    mut read_password: P,
) -> Result<(), ClientError>
where
    R: BufRead,
    W: Write,
    P: FnMut() -> io::Result<String>,
{
    loop {
        writeln!(output, "{}", MENU)?;
        let Some(choice) = prompt(input, output, "Choose: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(credentials) = read_credentials(input, output, &mut read_password)? else {
                    return Ok(());
                };
                match client.register(&credentials) {
                    Ok(body) => writeln!(output, "201 {}", body.message)?,
                    Err(e) => report(output, &e)?,
                }
            }
            "2" => {
                let Some(credentials) = read_credentials(input, output, &mut read_password)? else {
                    return Ok(());
                };
                match client.login(&credentials) {
                    Ok(body) => writeln!(output, "200 {}", body.message)?,
                    Err(e) => report(output, &e)?,
                }
            }
            "3" => {
                let Some(credentials) = read_credentials(input, output, &mut read_password)? else {
                    return Ok(());
                };
                match client.tasks_with_basic(&credentials) {
                    Ok(list) => print_tasks(output, &list)?,
                    Err(e) => report(output, &e)?,
                }
            }
            "4" => match client.tasks_with_session() {
                Ok(list) => print_tasks(output, &list)?,
                Err(e) => report(output, &e)?,
            },
            "5" => match client.logout() {
                Ok(body) => writeln!(output, "200 {}", body.message)?,
                Err(e) => report(output, &e)?,
            },
            "6" => return Ok(()),
            _ => writeln!(output, "Invalid option.")?,
        }
    }
}

/// Register (an existing account is fine), log in, list tasks and save them as JSON
///
/// Tasks are fetched with the session cookie when the server runs in
/// session mode and with HTTP Basic credentials otherwise.
pub fn run_auto<W: Write>(
    client: &TaskgateClient,
    credentials: &Credentials,
    out_file: &Path,
    output: &mut W,
) -> Result<TaskListResponse, ClientError> {
    match client.register(credentials) {
        Ok(body) => writeln!(output, "Register: 201 {}", body.message)?,
        Err(ClientError::Server { status: 409, message }) => {
            writeln!(output, "Register: 409 {}", message)?
        }
        Err(e) => return Err(e),
    }

    let login = client.login(credentials)?;
    writeln!(output, "Login: 200 {}", login.message)?;

    let index = client.index()?;
    let list = match index.get("auth_mode").and_then(|m| m.as_str()) {
        Some("session") => client.tasks_with_session()?,
        _ => client.tasks_with_basic(credentials)?,
    };
    writeln!(output, "GET /tasks: 200 ({} tasks)", list.tasks.len())?;

    std::fs::write(out_file, serde_json::to_string_pretty(&list)?)?;
    writeln!(output, "Tasks saved to {}", out_file.display())?;

    Ok(list)
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>, ClientError> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn read_credentials<R, W, P>(
    input: &mut R,
    output: &mut W,
    read_password: &mut P,
) -> Result<Option<Credentials>, ClientError>
where
    R: BufRead,
    W: Write,
    P: FnMut() -> io::Result<String>,
{
    let Some(username) = prompt(input, output, "Username: ")? else {
        return Ok(None);
    };
    let password = read_password()?;
    Ok(Some(Credentials::new(username.trim(), password)))
}

fn print_tasks<W: Write>(output: &mut W, list: &TaskListResponse) -> Result<(), ClientError> {
    writeln!(output, "Tasks for {}:", list.username)?;
    for task in &list.tasks {
        let mark = if task.done { "x" } else { " " };
        writeln!(output, "  [{}] {}", mark, task.title)?;
    }
    Ok(())
}

fn report<W: Write>(output: &mut W, err: &ClientError) -> Result<(), ClientError> {
    match err {
        ClientError::Server { status, message } => writeln!(output, "Error {}: {}", status, message)?,
        other => writeln!(output, "Error: {}", other)?,
    }
    Ok(())
}
