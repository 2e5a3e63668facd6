//! Update feeds.
//!
//! Every accepted join or action publishes one payload-free [`GameUpdate`].
//! A feed holds at most one pending update: several updates published
//! before the consumer looks collapse into one. Subscribers re-read the game
//! state when woken.

use tokio::sync::watch;
use tracing::{debug, instrument};

/// Signal that the game changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameUpdate;

/// Receiving end of an update feed.
///
/// The feed closes when the game completes. An update published by the
/// completing action is still delivered before the close is observed.
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<()>,
}

impl Subscription {
    fn new(receiver: watch::Receiver<()>) -> Self {
        Self { receiver }
    }

    /// Waits for the next update.
    ///
    /// Returns `None` once the feed is closed and drained.
    pub async fn recv(&mut self) -> Option<GameUpdate> {
        self.receiver.changed().await.ok().map(|()| GameUpdate)
    }

    /// Takes a pending update without waiting.
    pub fn try_recv(&mut self) -> Option<GameUpdate> {
        self.receiver
            .borrow_and_update()
            .has_changed()
            .then_some(GameUpdate)
    }

    /// True once the game has completed and no further updates will come.
    pub fn is_closed(&self) -> bool {
        self.receiver.has_changed().is_err()
    }
}

/// Publishing side shared by all subscriptions of one game.
#[derive(Debug)]
pub(crate) struct UpdateFeed {
    sender: Option<watch::Sender<()>>,
}

impl UpdateFeed {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(());
        Self {
            sender: Some(sender),
        }
    }

    /// New subscription that sees updates published from now on.
    pub(crate) fn subscribe(&self) -> Subscription {
        match &self.sender {
            Some(sender) => Subscription::new(sender.subscribe()),
            None => {
                let (_, receiver) = watch::channel(());
                Subscription::new(receiver)
            }
        }
    }

    /// Wakes every live subscription.
    #[instrument(skip(self))]
    pub(crate) fn publish(&self) {
        if let Some(sender) = &self.sender {
            sender.send_replace(());
            debug!(subscribers = sender.receiver_count(), "Published game update");
        }
    }

    /// Closes every subscription. Idempotent.
    pub(crate) fn close(&mut self) {
        if self.sender.take().is_some() {
            debug!("Closed update feeds");
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.sender.is_none()
    }
}
