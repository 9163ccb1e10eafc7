use std::cell::RefCell;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Result;
use shoji_config::EventMessage;

use crate::app::dispatch::{dispatch_event, Dispatch};
use crate::config::{self, CompiledConfig};
use crate::core::Session;
use crate::platform::StdioHost;

pub mod command;
pub mod dispatch;
pub mod effects;

pub struct App {}

impl App {
    /// Load the configuration, then service events from stdin on the one
    /// control thread until the stream ends or a quit binding fires.
    pub fn run(config_path: Option<PathBuf>) -> Result<()> {
        let file = config::load(config_path.as_deref())?;
        let compiled = config::compile(file)?;
        tracing::info!(
            "Config loaded: {} tags, {} key bindings, {} button bindings, {} layouts, {} rules",
            compiled.tags.len(),
            compiled.bindings.keys.len(),
            compiled.bindings.buttons.len(),
            compiled.layouts.len(),
            compiled.rules.len()
        );

        let CompiledConfig {
            valid_tags,
            settings,
            bindings,
            layouts,
            rules,
            ..
        } = compiled;
        let session = RefCell::new(Session::new(layouts, rules, valid_tags, &settings));
        let mut host = StdioHost::new();

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event: EventMessage = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Ignoring malformed event: {}", e);
                    continue;
                }
            };
            if dispatch_event(&event, &bindings, &session, &mut host) == Dispatch::Quit {
                tracing::info!("Quit requested");
                break;
            }
        }

        Ok(())
    }
}
