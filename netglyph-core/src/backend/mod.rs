pub mod iwd;
pub mod nm;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Palette;
use crate::error::{Error, Result};
use crate::runner::CommandRunner;
use crate::signal::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Nm,
    Iwctl,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Radio {
    On,
    Off,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub ssid: String,
    /// Percent, 0..=100
    pub signal: Option<u8>,
}

/// Snapshot of the WiFi subsystem taken for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiState {
    pub tool: Tool,
    pub radio: Radio,
    pub connection: Option<Connection>,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Nm => "nm",
            Tool::Iwctl => "iwctl",
            Tool::None => "none",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Radio {
    pub fn as_str(self) -> &'static str {
        match self {
            Radio::On => "on",
            Radio::Off => "off",
            Radio::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Radio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WifiState {
    pub fn offline(tool: Tool) -> Self {
        Self {
            tool,
            radio: Radio::Unknown,
            connection: None,
        }
    }

    pub fn connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn ssid(&self) -> Option<&str> {
        self.connection.as_ref().map(|c| c.ssid.as_str())
    }

    pub fn signal(&self) -> Option<u8> {
        self.connection.as_ref().and_then(|c| c.signal)
    }

    pub fn tier(&self) -> Tier {
        match &self.connection {
            Some(conn) => Tier::from_signal(conn.signal),
            None => Tier::Disconnected,
        }
    }

    pub fn icon(&self) -> &'static str {
        self.tier().icon()
    }

    pub fn color<'a>(&self, palette: &'a Palette) -> &'a str {
        self.tier().color(palette)
    }

    /// Short bar label.
    pub fn text(&self) -> String {
        match (&self.connection, self.radio) {
            (Some(conn), _) => conn.ssid.clone(),
            (None, Radio::Off) => "WiFi off".to_string(),
            (None, _) => "Disconnected".to_string(),
        }
    }
}

/// NetworkManager wins over iwd when both are present. Either backend only
/// counts while its daemon is up.
pub async fn detect<R: CommandRunner>(runner: &R) -> Tool {
    if runner.is_installed(nm::PROGRAM) && nm::is_running(runner).await {
        Tool::Nm
    } else if runner.is_installed(iwd::PROGRAM) && runner.is_daemon_running(iwd::DAEMON) {
        Tool::Iwctl
    } else {
        Tool::None
    }
}

/// Read the current state. Backend failures degrade to a disconnected
/// snapshot instead of surfacing.
pub async fn probe<R: CommandRunner>(runner: &R, tool: Tool) -> WifiState {
    match try_probe(runner, tool).await {
        Ok(state) => state,
        Err(e) => {
            warn!("Failed to query {}: {}", tool, e);
            WifiState::offline(tool)
        }
    }
}

async fn try_probe<R: CommandRunner>(runner: &R, tool: Tool) -> Result<WifiState> {
    match tool {
        Tool::Nm => {
            if let Some(conn) = nm::active_connection(runner).await? {
                return Ok(WifiState {
                    tool,
                    radio: Radio::On,
                    connection: Some(conn),
                });
            }
            let radio = nm::radio(runner).await.unwrap_or_else(|e| {
                debug!("Radio state unavailable: {}", e);
                Radio::Unknown
            });
            Ok(WifiState {
                tool,
                radio,
                connection: None,
            })
        }
        Tool::Iwctl => {
            let device = iwd::station_device(runner).await?;
            if !device.powered {
                return Ok(WifiState {
                    tool,
                    radio: Radio::Off,
                    connection: None,
                });
            }
            Ok(WifiState {
                tool,
                radio: Radio::On,
                connection: iwd::station_connection(runner, &device.name).await?,
            })
        }
        Tool::None => Ok(WifiState::offline(tool)),
    }
}

/// Flip the radio and return the state it was switched to.
pub async fn toggle<R: CommandRunner>(runner: &R, tool: Tool) -> Result<Radio> {
    match tool {
        Tool::Nm => {
            let enable = nm::radio(runner).await? != Radio::On;
            nm::set_radio(runner, enable).await?;
            Ok(if enable { Radio::On } else { Radio::Off })
        }
        Tool::Iwctl => {
            let device = iwd::station_device(runner).await?;
            let enable = !device.powered;
            iwd::set_powered(runner, &device.name, enable).await?;
            Ok(if enable { Radio::On } else { Radio::Off })
        }
        Tool::None => Err(Error::NoBackend),
    }
}

/// Interactive network picker for the backend.
pub fn picker<R: CommandRunner>(runner: &R, tool: Tool) -> Result<Vec<String>> {
    match tool {
        Tool::Nm => Ok(vec!["nmtui".to_string(), "connect".to_string()]),
        Tool::Iwctl if runner.is_installed("impala") => Ok(vec!["impala".to_string()]),
        Tool::Iwctl => Ok(vec![iwd::PROGRAM.to_string()]),
        Tool::None => Err(Error::NoBackend),
    }
}
