/*!
 * iwd backend
 * Queries and radio control through iwctl table output
 */

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::Connection;
use crate::error::{Error, Result};
use crate::runner::CommandRunner;
use crate::signal::dbm_to_percent;

pub const PROGRAM: &str = "iwctl";

/// Process name of the iwd daemon that iwctl talks to.
pub const DAEMON: &str = "iwd";

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("constant regex pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub powered: bool,
}

/// iwctl colours its tables even when stdout is not a terminal.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

pub async fn station_device<R: CommandRunner>(runner: &R) -> Result<Device> {
    let out = runner.output(PROGRAM, &["device", "list"]).await?;
    parse_devices(&strip_ansi(&out))
}

pub async fn station_connection<R: CommandRunner>(
    runner: &R,
    device: &str,
) -> Result<Option<Connection>> {
    let out = runner.output(PROGRAM, &["station", device, "show"]).await?;
    Ok(parse_station(&strip_ansi(&out)))
}

pub async fn set_powered<R: CommandRunner>(runner: &R, device: &str, on: bool) -> Result<()> {
    let state = if on { "on" } else { "off" };
    runner
        .output(PROGRAM, &["device", device, "set-property", "Powered", state])
        .await?;
    Ok(())
}

/// Pick the station-mode row out of `iwctl device list`.
pub fn parse_devices(table: &str) -> Result<Device> {
    let mut lines = table.lines();

    let header: Vec<&str> = lines
        .by_ref()
        .map(|l| l.split_whitespace().collect::<Vec<_>>())
        .find(|cols| cols.contains(&"Name") && cols.contains(&"Powered"))
        .ok_or_else(|| Error::parse(PROGRAM, "device list has no header"))?;

    let column = |name: &str| header.iter().position(|c| *c == name);
    let (name_at, powered_at) = match (column("Name"), column("Powered")) {
        (Some(n), Some(p)) => (n, p),
        _ => return Err(Error::parse(PROGRAM, "device list header")),
    };
    let mode_at = column("Mode");

    let mut fallback = None;
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('-') {
            continue;
        }
        let cols: Vec<&str> = trimmed.split_whitespace().collect();
        if cols.len() < header.len() {
            continue;
        }
        let device = Device {
            name: cols[name_at].to_string(),
            powered: cols[powered_at] == "on",
        };
        match mode_at.map(|m| cols[m]) {
            Some("station") | None => return Ok(device),
            Some(_) => {
                fallback.get_or_insert(device);
            }
        }
    }

    fallback.ok_or(Error::NoDevice)
}

/// Read the connection out of `iwctl station <dev> show`.
pub fn parse_station(table: &str) -> Option<Connection> {
    let mut state = None;
    let mut ssid = None;
    let mut rssi = None;
    let mut average_rssi = None;

    for line in table.lines() {
        let line = line.trim().trim_start_matches('*').trim_start();
        if let Some(value) = property(line, "State") {
            state = Some(value);
        } else if let Some(value) = property(line, "Connected network") {
            ssid = Some(value);
        } else if let Some(value) = property(line, "RSSI") {
            rssi = parse_dbm(value);
        } else if let Some(value) = property(line, "AverageRSSI") {
            average_rssi = parse_dbm(value);
        }
    }

    if state != Some("connected") {
        return None;
    }
    let ssid = ssid?;

    Some(Connection {
        ssid: ssid.to_string(),
        signal: rssi.or(average_rssi).map(dbm_to_percent),
    })
}

fn property<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(key)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

fn parse_dbm(value: &str) -> Option<i32> {
    value.split_whitespace().next()?.parse().ok()
}
