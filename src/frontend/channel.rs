//! [`EventSource`] fed through an [`mpsc`] channel.
//!
//! Toolkit callbacks (GTK gesture controllers, the window close request)
//! push events into the [`Sender`](mpsc::Sender); the frame loop drains the
//! receiver once per frame.  When every sender is gone the source reports a
//! single [`InputEvent::Quit`].

use crate::event::InputEvent;
use crate::traits::EventSource;
use log::info;
use std::convert::Infallible;
use std::sync::mpsc;

pub struct ChannelSource {
    rx: mpsc::Receiver<InputEvent>,
    disconnected: bool,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<InputEvent>) -> Self {
        Self {
            rx,
            disconnected: false,
        }
    }

    /// A connected sender/source pair.
    pub fn pair() -> (mpsc::Sender<InputEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl EventSource for ChannelSource {
    type Error = Infallible;

    fn poll(&mut self) -> Result<Vec<InputEvent>, Infallible> {
        let mut events = Vec::new();
        if self.disconnected {
            return Ok(events);
        }
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    info!("all event senders closed");
                    self.disconnected = true;
                    events.push(InputEvent::Quit);
                    break;
                }
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let (tx, mut src) = ChannelSource::pair();
        tx.send(InputEvent::PointerDown { x: 1.0, y: 2.0 }).unwrap();
        tx.send(InputEvent::PointerUp).unwrap();
        assert_eq!(
            src.poll().unwrap(),
            vec![InputEvent::PointerDown { x: 1.0, y: 2.0 }, InputEvent::PointerUp]
        );
        assert!(src.poll().unwrap().is_empty());
    }

    #[test]
    fn disconnect_yields_one_quit() {
        let (tx, mut src) = ChannelSource::pair();
        tx.send(InputEvent::PointerUp).unwrap();
        drop(tx);
        assert_eq!(
            src.poll().unwrap(),
            vec![InputEvent::PointerUp, InputEvent::Quit]
        );
        assert!(src.poll().unwrap().is_empty());
    }
}
