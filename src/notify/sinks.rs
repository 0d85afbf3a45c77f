//! Notification sinks
//!
//! [`LogNotifier`] writes events to the log. [`ChannelNotifier`] hands them
//! to a background task over a bounded channel so the login path never waits
//! on delivery.

use log::{info, warn};
use std::future::Future;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use super::event::LoginEvent;
use crate::error::NotifyError;

/// Dispatches a login event to an external channel.
pub trait NotifyLoginEvent {
    fn notify(&self, event: &LoginEvent) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotifyLoginEvent for LogNotifier {
    async fn notify(&self, event: &LoginEvent) -> Result<(), NotifyError> {
        info!("{}", event);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<LoginEvent>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiving end of its channel.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<LoginEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl NotifyLoginEvent for ChannelNotifier {
    async fn notify(&self, event: &LoginEvent) -> Result<(), NotifyError> {
        self.tx.try_send(event.clone()).map_err(|e| match e {
            TrySendError::Full(_) => NotifyError::ChannelFull,
            TrySendError::Closed(_) => NotifyError::ChannelClosed,
        })
    }
}

/// Spawns the task that delivers queued login alerts.
pub fn drain_alerts(mut rx: mpsc::Receiver<LoginEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if event.is_success() {
                info!("[alert] {}", event);
            } else {
                warn!("[alert] {}", event);
            }
        }
        info!("Login alert channel closed");
    })
}
