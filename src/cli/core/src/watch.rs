/* src/cli/core/src/watch.rs */

use std::time::{Duration, Instant};

use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::signal;
use trellis_plugin::{ConfigDataCache, get_config_data};

use crate::config::Project;
use crate::inspect::print_pages;
use crate::ui::{self, CYAN, DIM, GREEN, RED, RESET};

fn setup_watcher() -> Result<(RecommendedWatcher, tokio::sync::mpsc::Receiver<()>)> {
  let (tx, rx) = tokio::sync::mpsc::channel(16);
  let watcher = RecommendedWatcher::new(
    move |res: std::result::Result<notify::Event, notify::Error>| {
      if res.is_ok() {
        let _ = tx.blocking_send(());
      }
    },
    notify::Config::default(),
  )?;
  Ok((watcher, rx))
}

async fn resolve(project: &Project, cache: &ConfigDataCache, force_reload: bool) {
  let started = Instant::now();
  match get_config_data(cache, &project.root_dir, true, force_reload, &project.options).await {
    Ok(data) => {
      print_pages(&data);
      println!(
        "  {GREEN}[trellis]{RESET} {} pages resolved ({:.1}ms)",
        data.page_configs_data.len(),
        started.elapsed().as_secs_f64() * 1000.0
      );
    }
    Err(e) => println!("  {RED}[trellis]{RESET} {e}"),
  }
}

/// Re-resolve page configs on every change below the user root or an extension.
pub async fn run_watch(project: &Project, cache: &ConfigDataCache) -> Result<()> {
  ui::banner("watch");
  resolve(project, cache, false).await;

  let (mut watcher, mut watcher_rx) = setup_watcher()?;
  for dir in project.watched_dirs() {
    if dir.exists() {
      watcher.watch(dir, RecursiveMode::Recursive)?;
      ui::detail(&format!("{DIM}watching {}{RESET}", dir.display()));
    } else {
      ui::warn(&format!("{} does not exist, not watching it", dir.display()));
    }
  }

  loop {
    tokio::select! {
      _ = signal::ctrl_c() => {
        println!();
        println!("  {DIM}shutting down...{RESET}");
        break;
      }
      Some(()) = watcher_rx.recv() => {
        // Debounce: wait 300ms, drain pending events
        tokio::time::sleep(Duration::from_millis(300)).await;
        while watcher_rx.try_recv().is_ok() {}
        println!("  {CYAN}[trellis]{RESET} change detected, resolving...");
        resolve(project, cache, true).await;
      }
    }
  }

  Ok(())
}
