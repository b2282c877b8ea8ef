//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker disconnected; restart the application".to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn queued_command_leaves_status_alone() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut status = "Ready".to_string();

        dispatch_backend_command(&cmd_tx, BackendCommand::Load, &mut status);

        assert_eq!(status, "Ready");
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Load)));
    }

    #[test]
    fn full_or_closed_queue_is_reported_in_status() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&cmd_tx, BackendCommand::Load, &mut status);
        dispatch_backend_command(&cmd_tx, BackendCommand::Load, &mut status);
        assert!(status.contains("full"));

        drop(cmd_rx);
        dispatch_backend_command(&cmd_tx, BackendCommand::Load, &mut status);
        assert!(status.contains("disconnected"));
    }
}
