use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

/// Coupled sender/receiver pair. Keeping both halves in one struct means the
/// owner can hand out send handles while it alone drains the receive side.
#[derive(Debug)]
pub struct Channel<T> {
    tx: UnboundedSender<T>,
    rx: UnboundedReceiver<T>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl<T> Channel<T> {
    pub fn tx(&self) -> &UnboundedSender<T> {
        &self.tx
    }

    pub fn rx(&mut self) -> &mut UnboundedReceiver<T> {
        &mut self.rx
    }

    /// Clones off an independent send handle.
    pub fn fork(&self) -> UnboundedSender<T> {
        self.tx.clone()
    }
}
