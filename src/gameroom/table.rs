use super::Event;
use crate::Seat;
use crate::SEATS;
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedSender;

/// Transport side of a room's seats: where each participant's events go,
/// which seats belong to remote connections, and which of those have gone
/// quiet. Seat bookkeeping lives here so the session can stay a pure state
/// machine with no channels in it.
#[derive(Debug, Default)]
pub struct Table {
    senders: [Option<UnboundedSender<Event>>; SEATS],
    remote: HashSet<Seat>,
    disconnected: HashSet<Seat>,
}

impl Table {
    /// Binds a seat to an event sink. Remote seats participate in the
    /// grace-period accounting; local actors do not.
    pub fn sit(&mut self, seat: Seat, sender: UnboundedSender<Event>, remote: bool) {
        self.senders[seat] = Some(sender);
        self.disconnected.remove(&seat);
        match remote {
            true => self.remote.insert(seat),
            false => self.remote.remove(&seat),
        };
    }
    /// Clears a seat entirely; its actor's inbox closes with it.
    pub fn vacate(&mut self, seat: Seat) {
        self.senders[seat] = None;
        self.remote.remove(&seat);
        self.disconnected.remove(&seat);
    }
    /// Marks a seat as gone quiet without giving it up.
    pub fn disconnect(&mut self, seat: Seat) {
        self.disconnected.insert(seat);
    }
    pub fn is_disconnected(&self, seat: Seat) -> bool {
        self.disconnected.contains(&seat)
    }
    /// First seat waiting on a reconnection, if any.
    pub fn reclaimable(&self) -> Option<Seat> {
        (0..SEATS).find(|seat| self.senders[*seat].is_some() && self.is_disconnected(*seat))
    }
    /// Remote seats currently bound, connected or not.
    pub fn remotes_seated(&self) -> usize {
        self.remote
            .iter()
            .filter(|seat| self.senders[**seat].is_some())
            .count()
    }
    /// Remote seats currently bound and live.
    pub fn remotes_connected(&self) -> usize {
        self.remote
            .iter()
            .filter(|seat| self.senders[**seat].is_some() && !self.is_disconnected(**seat))
            .count()
    }
    fn sender(&self, seat: Seat) -> Option<&UnboundedSender<Event>> {
        self.senders.get(seat).and_then(|s| s.as_ref())
    }
    /// Sends an event to a specific seat.
    pub fn unicast(&self, seat: Seat, event: Event) {
        log::debug!("[table] unicast to seat {}: {}", seat, event);
        match self.sender(seat).map(|inbox| inbox.send(event)) {
            Some(Ok(())) => {}
            Some(Err(e)) => log::warn!("[table] unicast to seat {} failed: {:?}", seat, e),
            None => log::warn!("[table] unicast to seat {}: nobody there", seat),
        }
    }
    /// Sends an event to every bound seat.
    pub fn broadcast(&self, event: Event) {
        log::debug!("[table] broadcast: {}", event);
        self.senders.iter().enumerate().for_each(|(seat, sender)| {
            if let Some(inbox) = sender {
                match inbox.send(event.clone()) {
                    Ok(()) => {}
                    Err(e) => log::warn!("[table] broadcast to seat {} failed: {:?}", seat, e),
                }
            }
        });
    }
    /// Sends an event to every bound seat but one.
    pub fn broadcast_except(&self, spare: Seat, event: Event) {
        log::debug!("[table] broadcast past seat {}: {}", spare, event);
        self.senders.iter().enumerate().for_each(|(seat, sender)| {
            if seat != spare {
                if let Some(inbox) = sender {
                    match inbox.send(event.clone()) {
                        Ok(()) => {}
                        Err(e) => log::warn!("[table] broadcast to seat {} failed: {:?}", seat, e),
                    }
                }
            }
        });
    }
}
