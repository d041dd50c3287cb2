/*!
 * NetworkManager backend
 * Queries and radio control through nmcli terse output
 */

use tracing::debug;

use super::{Connection, Radio};
use crate::error::{Error, Result};
use crate::runner::CommandRunner;

pub const PROGRAM: &str = "nmcli";

/// Label for an active network that does not broadcast its SSID.
pub const HIDDEN_SSID: &str = "Hidden network";

const ACTIVE_WIFI_ARGS: &[&str] = &[
    "-t",
    "-f",
    "ACTIVE,SSID,SIGNAL",
    "device",
    "wifi",
    "list",
    "--rescan",
    "no",
];

/// True when the NetworkManager daemon answers.
pub async fn is_running<R: CommandRunner>(runner: &R) -> bool {
    match runner.output(PROGRAM, &["-t", "-f", "RUNNING", "general"]).await {
        Ok(out) => out.trim() == "running",
        Err(e) => {
            debug!("NetworkManager not usable: {}", e);
            false
        }
    }
}

pub async fn active_connection<R: CommandRunner>(runner: &R) -> Result<Option<Connection>> {
    let out = runner.output(PROGRAM, ACTIVE_WIFI_ARGS).await?;
    parse_active(&out)
}

pub async fn radio<R: CommandRunner>(runner: &R) -> Result<Radio> {
    let out = runner.output(PROGRAM, &["-t", "radio", "wifi"]).await?;
    match out.trim() {
        "enabled" => Ok(Radio::On),
        "disabled" => Ok(Radio::Off),
        other => Err(Error::parse(PROGRAM, format!("radio state {other:?}"))),
    }
}

pub async fn set_radio<R: CommandRunner>(runner: &R, on: bool) -> Result<()> {
    let state = if on { "on" } else { "off" };
    runner.output(PROGRAM, &["radio", "wifi", state]).await?;
    Ok(())
}

/// Find the `ACTIVE=yes` row in `ACTIVE,SSID,SIGNAL` terse output.
pub fn parse_active(output: &str) -> Result<Option<Connection>> {
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let fields = split_terse(line);
        if fields.len() != 3 {
            return Err(Error::parse(PROGRAM, format!("row {line:?}")));
        }
        if fields[0] != "yes" {
            continue;
        }
        let signal = fields[2].trim().parse::<u8>().ok().map(|s| s.min(100));
        let ssid = match fields[1].as_str() {
            "" => HIDDEN_SSID.to_string(),
            ssid => ssid.to_string(),
        };
        return Ok(Some(Connection {
            ssid,
            signal,
        }));
    }
    Ok(None)
}

/// Split one terse row on unescaped `:`, resolving `\:` and `\\`.
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = vec![String::new()];
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let (Some(next), Some(field)) = (chars.next(), fields.last_mut()) {
                    field.push(next);
                }
            }
            ':' => fields.push(String::new()),
            _ => {
                if let Some(field) = fields.last_mut() {
                    field.push(c);
                }
            }
        }
    }
    fields
}
