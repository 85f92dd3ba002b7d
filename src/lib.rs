// src/lib.rs
pub mod api;
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod util;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::application::{MemoQuery, ReminderScanner};
use crate::cli::args::{Args, Command};
use crate::domain::{Alarm, Memo, MemoDraft, MemoKind, Reminder};
use crate::infrastructure::{ApiClient, Config, MediaStore, SqliteStore};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting timenotes with arguments");

    match args.command {
        Command::Serve { port, data_dir } => {
            let config = Config::resolve(args.backend_url, port, data_dir);
            debug!(?config, "Resolved server configuration");

            // Initialize infrastructure
            let store = SqliteStore::new(config.db_path())?;
            let media = MediaStore::new(config.uploads_dir())?;
            let state = AppState::new(store, media);

            api::serve(config.port, state).await
        }
        command => {
            let config = Config::resolve(args.backend_url, None, None);
            let client = ApiClient::new(&config.backend_url);
            run_client_command(&client, command).await
        }
    }
}

async fn run_client_command(client: &ApiClient, command: Command) -> Result<()> {
    match command {
        Command::List {
            search,
            filter,
            sort,
        } => {
            let memos = client.list_memos().await.context("Failed to fetch memos")?;
            let query = MemoQuery {
                search,
                filter,
                sort,
            };
            let shown = query.apply(&memos);
            for memo in &shown {
                println!(
                    "{}  {:<30}  {:<18}  {}",
                    memo.id,
                    memo.title,
                    format_alarm(&memo.alarm),
                    util::text::preview(&memo.content)
                );
            }
            println!("{} of {} memos", shown.len(), memos.len());
            Ok(())
        }

        Command::Show { id, json } => {
            let memo = client.get_memo(&id).await.context("Failed to fetch memo")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&memo)?);
            } else {
                print_memo(&memo);
            }
            Ok(())
        }

        Command::Add {
            title,
            content,
            image,
            alarm,
        } => {
            let mut draft = MemoDraft::new(title, content);
            if let Some(path) = image {
                let bytes = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("Failed to read image {}", path.display()))?;
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .context("Image path has no filename")?;
                let uploaded = client
                    .upload_image(name, bytes)
                    .await
                    .context("Failed to upload image")?;
                info!(filename = %uploaded.filename, "Uploaded image");
                draft.image = Some(uploaded.filename);
                draft.kind = MemoKind::Image;
            }
            if let Some(time) = alarm {
                draft.alarm = Alarm::at(time);
            }
            let memo = client
                .create_memo(&draft)
                .await
                .context("Failed to create memo")?;
            println!("Created memo {}", memo.id);
            Ok(())
        }

        Command::Delete { id } => {
            client
                .delete_memo(&id)
                .await
                .context("Failed to delete memo")?;
            println!("Deleted memo {id}");
            Ok(())
        }

        Command::ToggleAlarm { id } => {
            let memo = client
                .toggle_alarm(&id)
                .await
                .context("Failed to toggle alarm")?;
            println!(
                "Alarm for \"{}\" is now {}",
                memo.title,
                if memo.alarm.enabled { "enabled" } else { "disabled" }
            );
            Ok(())
        }

        Command::Watch { interval } => watch(client, interval).await,

        Command::Serve { .. } => unreachable!("Serve is handled in run"),
    }
}

/// Poll the memo list on a fixed period and raise a reminder for each alarm
/// entering the due window. Reminders live in the session's open list until
/// Ctrl-C ends the watch.
async fn watch(client: &ApiClient, interval_secs: u64) -> Result<()> {
    let mut scanner = ReminderScanner::new();
    let mut open: Vec<Reminder> = Vec::new();
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));

    info!(interval_secs, "Watching for due alarms (Ctrl-C to stop)");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Fetch first, then scan: the scan itself never performs I/O.
                match client.list_memos().await {
                    Ok(memos) => {
                        for reminder in scanner.scan(&memos, Utc::now()) {
                            info!(memo_id = %reminder.memo_id, "Reminder due");
                            println!(
                                "⏰ {}  (alarm at {})",
                                reminder.message,
                                reminder.fire_time.with_timezone(&chrono::Local).format("%H:%M:%S")
                            );
                            open.push(reminder);
                        }
                    }
                    Err(e) => warn!(error = %e, "Failed to fetch memos, retrying next tick"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(open_reminders = open.len(), "Stopping watch");
                return Ok(());
            }
        }
    }
}

fn print_memo(memo: &Memo) {
    println!("id:       {}", memo.id);
    println!("title:    {}", memo.title);
    if let Some(image) = &memo.image {
        println!("image:    {image}");
    }
    let alarm = format_alarm(&memo.alarm);
    if !alarm.is_empty() {
        println!("alarm:    {alarm}");
    }
    println!("created:  {}", memo.created_at.to_rfc3339());
    println!("updated:  {}", memo.updated_at.to_rfc3339());
    if !memo.content.is_empty() {
        println!("\n{}", memo.content);
    }
}

fn format_alarm(alarm: &Alarm) -> String {
    match (alarm.enabled, alarm.time) {
        (true, Some(t)) => format!(
            "⏰ {}",
            t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
        ),
        (true, None) => "⏰ unscheduled".to_string(),
        (false, _) => String::new(),
    }
}

#[cfg(test)]
/// must be public to be used from integration tests
mod tests {
    use crate::util::testing;
    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
