use anyhow::Result;
use netglyph_core::backend::{self, Radio, Tool, WifiState};
use netglyph_core::{launcher, CommandRunner, Config, Error, Notifier};
use tracing::{debug, warn};

use crate::render;
use crate::Commands;

const SUMMARY: &str = "WiFi";

pub struct App<R> {
    runner: R,
    config: Config,
}

impl<R: CommandRunner> App<R> {
    pub fn new(runner: R, config: Config) -> Self {
        Self { runner, config }
    }

    /// Execute one command. Returns the line(s) to print, if any.
    pub async fn run(&self, command: Commands) -> Result<Option<String>> {
        let tool = backend::detect(&self.runner).await;
        debug!("Backend: {}", tool);

        let output = match command {
            Commands::Tool => tool.to_string(),
            Commands::Connected => self.probe(tool).await.connected().to_string(),
            Commands::Color => self
                .probe(tool)
                .await
                .color(&self.config.palette)
                .to_string(),
            Commands::Icon => self.probe(tool).await.icon().to_string(),
            Commands::Text => self.probe(tool).await.text(),
            Commands::Status => render::status(&self.probe(tool).await),
            Commands::Json => render::json(&self.probe(tool).await, &self.config.palette)?,
            Commands::Toggle => {
                self.toggle(tool).await;
                return Ok(None);
            }
            Commands::Open => {
                self.open(tool);
                return Ok(None);
            }
        };

        Ok(Some(output))
    }

    async fn probe(&self, tool: Tool) -> WifiState {
        backend::probe(&self.runner, tool).await
    }

    fn notifier(&self) -> Notifier<'_, R> {
        Notifier::new(&self.runner, &self.config.notifications)
    }

    async fn toggle(&self, tool: Tool) {
        match backend::toggle(&self.runner, tool).await {
            Ok(Radio::On) => self.notifier().info(SUMMARY, "WiFi enabled"),
            Ok(_) => self.notifier().info(SUMMARY, "WiFi disabled"),
            Err(Error::NoBackend) => self
                .notifier()
                .error(SUMMARY, "No WiFi tool available (NetworkManager or iwd)"),
            Err(e) => {
                warn!("Toggle failed: {}", e);
                self.notifier().error("WiFi toggle failed", &e.to_string());
            }
        }
    }

    fn open(&self, tool: Tool) {
        let result = backend::picker(&self.runner, tool)
            .and_then(|program| launcher::launch(&self.runner, &self.config.launcher, &program));

        if let Err(e) = result {
            warn!("Cannot open network picker: {}", e);
            self.notifier()
                .error(SUMMARY, &format!("Cannot open network picker: {e}"));
        }
    }
}
