/*!
 * Output formatting
 * Multi-line report and JSON snapshot for bar widgets
 */

use netglyph_core::config::Palette;
use netglyph_core::{Radio, Tier, Tool, WifiState};
use serde::Serialize;

#[derive(Serialize)]
struct Snapshot<'a> {
    tool: Tool,
    connected: bool,
    ssid: Option<&'a str>,
    signal: Option<u8>,
    tier: Tier,
    icon: &'static str,
    color: &'a str,
    text: String,
    radio: Radio,
}

pub fn status(state: &WifiState) -> String {
    let signal = state
        .signal()
        .map(|s| format!("{s}%"))
        .unwrap_or_else(|| "-".to_string());

    [
        format!("Tool: {}", state.tool),
        format!("Connected: {}", state.connected()),
        format!("SSID: {}", state.ssid().unwrap_or("-")),
        format!("Signal: {signal}"),
        format!("Tier: {}", state.tier()),
        format!("Radio: {}", state.radio),
    ]
    .join("\n")
}

pub fn json(state: &WifiState, palette: &Palette) -> serde_json::Result<String> {
    serde_json::to_string(&Snapshot {
        tool: state.tool,
        connected: state.connected(),
        ssid: state.ssid(),
        signal: state.signal(),
        tier: state.tier(),
        icon: state.icon(),
        color: state.color(palette),
        text: state.text(),
        radio: state.radio,
    })
}
