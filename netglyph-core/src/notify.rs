/*!
 * Desktop notifications
 * Fire-and-forget notify-send for actions that change system state
 */

use tracing::debug;

use crate::config::NotificationConfig;
use crate::runner::CommandRunner;

const PROGRAM: &str = "notify-send";
const ICON: &str = "network-wireless";

pub struct Notifier<'a, R> {
    runner: &'a R,
    config: &'a NotificationConfig,
}

impl<'a, R: CommandRunner> Notifier<'a, R> {
    pub fn new(runner: &'a R, config: &'a NotificationConfig) -> Self {
        Self { runner, config }
    }

    pub fn info(&self, summary: &str, body: &str) {
        self.send(summary, body, "normal");
    }

    pub fn error(&self, summary: &str, body: &str) {
        self.send(summary, body, "critical");
    }

    fn send(&self, summary: &str, body: &str, urgency: &str) {
        if !self.config.enabled {
            debug!("Notifications disabled, dropping: {}", summary);
            return;
        }

        let args = [
            "-a",
            self.config.app_name.as_str(),
            "-i",
            ICON,
            "-u",
            urgency,
            summary,
            body,
        ]
        .map(String::from);

        // A missing notification daemon must never fail the command.
        if let Err(e) = self.runner.spawn_detached(PROGRAM, &args) {
            debug!("Notification not sent: {}", e);
        }
    }
}
