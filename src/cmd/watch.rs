use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use postcache::{PostCache, Result};
use std::sync::mpsc;
use std::time::Duration;

/// Block forever, letting the cache pick up each debounced batch of changes.
pub fn watch(cache: &PostCache, timeout: Duration) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let tick_rate = None;

    let mut debouncer = new_debouncer(timeout, tick_rate, move |res: DebounceEventResult| {
        // The receiver lives until `watch` returns.
        let _ = tx.send(res);
    })?;

    debouncer
        .watcher()
        .watch(cache.post_dir(), RecursiveMode::Recursive)?;
    log::info!("watching {}", cache.post_dir().display());

    for res in rx {
        match res {
            Ok(events) => {
                for event in &events {
                    log::debug!("event: {}", event.path.display());
                }

                let before = cache.refresh_count();
                let docs = cache.get_all();
                if cache.refresh_count() == before {
                    continue;
                }

                log::info!("{} posts:", docs.len());
                for doc in docs.iter() {
                    log::info!("  {}: {}", doc.id, doc.title);
                }
            }
            Err(errors) => log::warn!("watch error: {:?}", errors),
        }
    }

    Ok(())
}
