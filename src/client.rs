//! A minimal beanstalkd client speaking just enough of the text protocol for the check.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;

use crate::error::{ConnectionError, ProtocolError};
use crate::stats::{decode_stats, parse_tube_list, QueueStats};

/// Largest data block accepted from the server. Tube lists and stats are a few KiB at most.
const MAX_DATA_LEN: usize = 1024 * 1024;

/// Everything the check needs from a queue server.
pub trait QueueServer {
    /// Names of all tubes, in the order the server lists them.
    fn list_tubes(&mut self) -> Result<Vec<String>, ProtocolError>;

    fn stats_tube(&mut self, name: &str) -> Result<QueueStats, ProtocolError>;
}

/// A session with a beanstalkd server. Sends `quit` when dropped.
pub struct Connection<S: Read + Write = TcpStream> {
    stream: BufReader<S>,
    closed: bool,
}

impl Connection<TcpStream> {
    pub fn connect(host: &str, port: u16) -> Result<Self, ConnectionError> {
        let addr = format!("{host}:{port}");
        tracing::debug!(%addr, "connecting to beanstalkd");

        let stream = TcpStream::connect((host, port)).map_err(|source| ConnectionError {
            addr: addr.clone(),
            source,
        })?;

        Ok(Connection::from_stream(stream))
    }
}

impl<S: Read + Write> Connection<S> {
    pub fn from_stream(stream: S) -> Self {
        Connection {
            stream: BufReader::new(stream),
            closed: false,
        }
    }

    fn send_quit(&mut self) -> Result<(), ProtocolError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let stream = self.stream.get_mut();
        stream.write_all(b"quit\r\n")?;
        stream.flush()?;
        Ok(())
    }

    fn send(&mut self, command: &str) -> Result<(), ProtocolError> {
        tracing::trace!(command, "sending");
        let stream = self.stream.get_mut();
        stream.write_all(command.as_bytes())?;
        stream.write_all(b"\r\n")?;
        stream.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ProtocolError> {
        let mut line = String::new();
        if self.stream.read_line(&mut line)? == 0 {
            return Err(ProtocolError::Closed);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_owned())
    }

    /// Sends `command` and returns the data block of its `OK <bytes>` response.
    fn request_data(&mut self, command: &str) -> Result<Vec<u8>, ProtocolError> {
        self.send(command)?;

        let line = self.read_line()?;
        let unexpected = || ProtocolError::UnexpectedResponse {
            command: command.to_owned(),
            line: line.clone(),
        };

        let len: usize = match line.split_once(' ') {
            Some(("OK", len)) => match len.parse() {
                Ok(len) if len <= MAX_DATA_LEN => len,
                _ => return Err(unexpected()),
            },
            _ if line == "NOT_FOUND" => {
                let tube = command.split_once(' ').map(|(_, t)| t).unwrap_or_default();
                return Err(ProtocolError::NotFound(tube.to_owned()));
            }
            _ => return Err(unexpected()),
        };

        // the data block is followed by a trailing "\r\n"
        let mut data = vec![0; len + 2];
        self.stream.read_exact(&mut data)?;
        if !data.ends_with(b"\r\n") {
            return Err(ProtocolError::decode(
                "response",
                "data block not terminated by CRLF",
                &data,
            ));
        }
        data.truncate(len);

        tracing::trace!(command, bytes = len, "received data block");
        Ok(data)
    }
}

impl<S: Read + Write> QueueServer for Connection<S> {
    fn list_tubes(&mut self) -> Result<Vec<String>, ProtocolError> {
        let data = self.request_data("list-tubes")?;
        parse_tube_list(&data)
    }

    fn stats_tube(&mut self, name: &str) -> Result<QueueStats, ProtocolError> {
        let data = self.request_data(&format!("stats-tube {name}"))?;
        decode_stats(&data)
    }
}

impl<S: Read + Write> Drop for Connection<S> {
    fn drop(&mut self) {
        if let Err(err) = self.send_quit() {
            tracing::debug!(%err, "failed to send quit");
        }
    }
}
