use core_input::ByteSource;
use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

/// Byte-level terminal I/O: timed reads come from [`ByteSource`], frames go
/// out through one `write_bytes` call.
pub trait TerminalIo: ByteSource {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()>;
}

/// Stdin/stdout terminal.
///
/// A pump thread owns stdin and forwards bytes over a channel so reads can
/// carry a deadline (`recv_timeout`). The thread holds no editor state and
/// exits when stdin closes or the receiver is dropped.
pub struct StdTerminal {
    rx: Receiver<io::Result<u8>>,
    out: io::Stdout,
}

impl StdTerminal {
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = bounded::<io::Result<u8>>(1024);
        thread::Builder::new()
            .name("bric-stdin".into())
            .spawn(move || {
                let stdin = io::stdin();
                let mut lock = stdin.lock();
                let mut buf = [0u8; 256];
                loop {
                    match lock.read(&mut buf) {
                        Ok(0) => {
                            let _ = tx.send(Err(io::Error::from(io::ErrorKind::UnexpectedEof)));
                            break;
                        }
                        Ok(n) => {
                            if buf[..n].iter().any(|b| tx.send(Ok(*b)).is_err()) {
                                break;
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            let _ = tx.send(Err(e));
                            break;
                        }
                    }
                }
                tracing::debug!(target: "runtime", "stdin_pump_exit");
            })?;
        Ok(Self {
            rx,
            out: io::stdout(),
        })
    }
}

impl ByteSource for StdTerminal {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        let msg = match timeout {
            None => self
                .rx
                .recv()
                .map_err(|_| io::Error::from(io::ErrorKind::BrokenPipe))?,
            Some(t) => match self.rx.recv_timeout(t) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(io::Error::from(io::ErrorKind::BrokenPipe));
                }
            },
        };
        msg.map(Some)
    }
}

impl TerminalIo for StdTerminal {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut lock = self.out.lock();
        lock.write_all(buf)?;
        lock.flush()
    }
}
