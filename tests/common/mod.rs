//! An in-process beanstalkd stand-in answering `list-tubes`, `stats-tube` and `quit`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

pub struct FakeBeanstalkd {
    pub port: u16,
    handle: JoinHandle<anyhow::Result<Vec<String>>>,
}

impl FakeBeanstalkd {
    /// Serves a single client. `tubes` maps tube names to their raw `stats-tube` payload.
    pub fn spawn(tubes: &[(&str, String)]) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();

        let names: Vec<String> = tubes.iter().map(|(name, _)| name.to_string()).collect();
        let stats: HashMap<String, String> = tubes
            .iter()
            .map(|(name, payload)| (name.to_string(), payload.clone()))
            .collect();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept()?;
            serve(stream, &names, &stats)
        });

        Ok(FakeBeanstalkd { port, handle })
    }

    /// Waits for the client to go away and returns every command it sent.
    pub fn commands(self) -> anyhow::Result<Vec<String>> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("fake beanstalkd panicked"))?
    }
}

fn serve(
    stream: TcpStream,
    names: &[String],
    stats: &HashMap<String, String>,
) -> anyhow::Result<Vec<String>> {
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    let mut commands = Vec::new();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim_end().to_owned();
        commands.push(command.clone());

        match command.split_once(' ') {
            None if command == "list-tubes" => {
                let mut data = String::from("---\n");
                for name in names {
                    data.push_str(&format!("- {name}\n"));
                }
                write_block(&mut writer, &data)?;
            }
            None if command == "quit" => break,
            Some(("stats-tube", tube)) => match stats.get(tube) {
                Some(payload) => write_block(&mut writer, payload)?,
                None => writer.write_all(b"NOT_FOUND\r\n")?,
            },
            _ => writer.write_all(b"UNKNOWN_COMMAND\r\n")?,
        }
    }

    Ok(commands)
}

fn write_block(writer: &mut TcpStream, data: &str) -> std::io::Result<()> {
    write!(writer, "OK {}\r\n{}\r\n", data.len(), data)?;
    writer.flush()
}

pub fn tube_stats(name: &str, ready: u64) -> String {
    format!(
        "---\nname: {name}\ncurrent-jobs-urgent: 0\ncurrent-jobs-ready: {ready}\n\
         current-jobs-reserved: 1\ncurrent-jobs-delayed: 2\ncurrent-jobs-buried: 0\n\
         total-jobs: 500\ncurrent-using: 1\ncurrent-waiting: 0\ncurrent-watching: 1\n\
         pause: 0\ncmd-delete: 480\ncmd-pause-tube: 0\npause-time-left: 0\n"
    )
}

/// A port nothing listens on.
pub fn closed_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
