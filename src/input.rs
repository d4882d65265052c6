use std::{
    io::{self, BufRead, Read},
    sync::mpsc,
    thread,
};

use tracing::{debug, warn};

enum Event {
    Line(Vec<u8>),
    Closed,
    Interrupted,
}

/// Stdin read on a background thread so Ctrl-C can cut a pending read short.
/// An interrupt reads as end of input, which the session treats as quitting.
pub struct InterruptibleStdin {
    events: mpsc::Receiver<Event>,
    buffer: Vec<u8>,
    position: usize,
    done: bool,
}

impl InterruptibleStdin {
    pub fn spawn() -> io::Result<Self> {
        let (sender, events) = mpsc::channel();

        let lines = sender.clone();
        thread::Builder::new()
            .name("stdin".to_string())
            .spawn(move || read_lines(lines))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        thread::Builder::new()
            .name("ctrl-c".to_string())
            .spawn(move || {
                match runtime.block_on(tokio::signal::ctrl_c()) {
                    Ok(()) => {
                        debug!("Interrupted");
                        let _ = sender.send(Event::Interrupted);
                    }
                    Err(err) => warn!("Unable to listen for Ctrl-C: {}", err),
                }
            })?;

        Ok(Self::from_events(events))
    }

    fn from_events(events: mpsc::Receiver<Event>) -> Self {
        Self {
            events,
            buffer: Vec::new(),
            position: 0,
            done: false,
        }
    }
}

fn read_lines(sender: mpsc::Sender<Event>) {
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    loop {
        let mut line = Vec::new();
        let event = match stdin.read_until(b'\n', &mut line) {
            Ok(0) => Event::Closed,
            Ok(_) => Event::Line(line),
            Err(err) => {
                warn!("Failed to read stdin: {}", err);
                Event::Closed
            }
        };

        let closed = matches!(event, Event::Closed);
        if sender.send(event).is_err() || closed {
            break;
        }
    }
}

impl Read for InterruptibleStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let amount = available.len().min(buf.len());
        buf[..amount].copy_from_slice(&available[..amount]);
        self.consume(amount);
        Ok(amount)
    }
}

impl BufRead for InterruptibleStdin {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.position >= self.buffer.len() && !self.done {
            self.position = 0;
            match self.events.recv() {
                Ok(Event::Line(line)) => self.buffer = line,
                Ok(Event::Closed | Event::Interrupted) | Err(_) => {
                    self.buffer.clear();
                    self.done = true;
                }
            }
        }
        Ok(&self.buffer[self.position..])
    }

    fn consume(&mut self, amount: usize) {
        self.position = (self.position + amount).min(self.buffer.len());
    }
}
