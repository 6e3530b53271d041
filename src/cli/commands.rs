//! Command handlers for the `lettrics` binary.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::LettricsConfig;
use crate::error::Result;
use crate::generation::Generator;
use crate::history::{FileHistoryStore, HistoryItem, HistoryStore};
use crate::server;
use crate::types::{GenerationRequest, GenerationResult, ToolKind};

use super::{GenerateArgs, ServeArgs};

pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    let mut config = LettricsConfig::load()?;
    if let Some(bind) = args.bind {
        config.set_bind(bind);
    }
    let bind = config.bind();
    let generator = Generator::from_config(Arc::new(config))?;
    server::serve(bind, generator).await
}

pub async fn handle_generate(args: GenerateArgs) -> Result<()> {
    let config = Arc::new(LettricsConfig::load()?);
    let generator = Generator::from_config(config.clone())?;

    let mut request = GenerationRequest::new(args.tool);
    if let Some(topic) = args.topic {
        request = request.with_topic(topic);
    }
    for (key, value) in args.params {
        request = request.with_param(key, value);
    }

    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };
    let outcome = generator.generate_cancellable(&request, &cancel).await;
    watcher.abort();
    let outcome = outcome?;

    if let Some(cause) = outcome.cause() {
        eprintln!("Remote generation unavailable ({cause}); showing the offline template.");
    }
    println!("{}", outcome.content());

    if !args.no_save {
        let store = FileHistoryStore::from_config(&config);
        let result = GenerationResult::new(&request, outcome.content());
        let item = store.append(HistoryItem::from_result(&result))?;
        debug!(id = item.id, path = %store.path().display(), "saved to history");
        eprintln!("Saved as #{}", item.id);
    }
    Ok(())
}

pub fn handle_history_list(tool: Option<ToolKind>) -> Result<()> {
    let config = LettricsConfig::load()?;
    let items = FileHistoryStore::from_config(&config).list(tool)?;
    if items.is_empty() {
        println!("No saved items.");
        return Ok(());
    }
    for item in items {
        println!(
            "{:>14}  {:<11}  {}  {}",
            item.id,
            item.tool.as_str(),
            item.timestamp.format("%Y-%m-%d %H:%M"),
            item.topic
        );
    }
    Ok(())
}

pub fn handle_history_remove(id: u64) -> Result<()> {
    let config = LettricsConfig::load()?;
    if FileHistoryStore::from_config(&config).remove(id)? {
        println!("Removed #{id}");
    } else {
        println!("No item #{id}");
    }
    Ok(())
}
