use std::sync::mpsc::{channel, Receiver, Sender};

use super::FlushEvent;

/// Hands flushes over to whoever is listening.
#[derive(Clone)]
pub struct FlushSender {
    sender: Sender<FlushEvent>,
}

impl FlushSender {
    /// Returns `false` once the listening side has gone away.
    pub fn push(&self, event: FlushEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

pub struct FlushReceiver {
    receiver: Receiver<FlushEvent>,
}

impl IntoIterator for FlushReceiver {
    type Item = FlushEvent;
    type IntoIter = ::std::sync::mpsc::IntoIter<FlushEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.receiver.into_iter()
    }
}

pub fn flush_channel() -> (FlushSender, FlushReceiver) {
    let (sender, receiver) = channel();
    (FlushSender { sender }, FlushReceiver { receiver })
}
