use basket::components::time_picker::TimePicker;
use basket::config::{BasketConfig, default_config_path};
use basket::core::day::{DaySelection, is_today};
use basket::core::store::TaskStore;
use basket::core::task::NewTask;
use basket::reflection::anthropic::AnthropicClient;
use basket::reflection::{ReflectionPanel, Reflector, keyring};

/// Value following `flag` on the command line, if any.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = basket::logging::init("basket-reflect") {
        eprintln!("Logging unavailable: {}", e);
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--set-key") {
        let Some(key) = flag_value(&args, "--set-key") else {
            return Err("--set-key needs the API key as its argument".into());
        };
        keyring::store_api_key(&key).await?;
        println!("API key stored in the keyring.");
        return Ok(());
    }

    let config = BasketConfig::load(&default_config_path())?;
    basket::set_debug_logging(config.debug_logging);

    let selection = DaySelection::default();
    let day = selection.selected();
    let mut store = TaskStore::new();

    // Sample day: morning reading (done, with a memo), deep work, exercise
    let reading = store.create_task(NewTask::new("Morning reading", day, "07:30").until("08:30"))?;
    store.create_task(NewTask::new("Deep work", day, "09:30").until("11:30"))?;
    store.create_task(NewTask::new("Exercise", day, "18:00").until("19:00"))?;
    store.toggle_complete(reading.id)?;
    store.add_memo(reading.id, "Chapter three of that book was fascinating")?;

    // Planning bucket at --start, or the configured default start
    let mut picker = TimePicker::default();
    picker.open_or(flag_value(&args, "--start").as_deref(), config.default_start());
    if let Some(start) = picker.confirm() {
        store.create_task(NewTask::new("Plan tomorrow", day, start))?;
    }

    println!("=== {} ({}) ===\n", day, if is_today(day) { "today" } else { "other day" });
    for task in selection.tasks(&store) {
        let end = task
            .end_time
            .map(|e| e.format(" - %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "[{}] {}{}  {}",
            if task.is_completed { "x" } else { " " },
            task.start_time.format("%H:%M"),
            end,
            task.title
        );
        for memo in &task.memos {
            println!("        * {}", memo.content);
        }
    }

    let api_key = match keyring::load_api_key().await {
        Ok(key) => key,
        Err(e) => {
            log::warn!("Could not read API key: {}", e);
            None
        }
    };

    let reflector = Reflector::new(AnthropicClient::new(&config.reflection), api_key);
    let tasks: Vec<_> = selection.tasks(&store).into_iter().cloned().collect();

    let mut panel = ReflectionPanel::default();
    println!("\nReflecting...");
    panel.run(&reflector, &tasks).await;
    if let Some(text) = panel.text() {
        println!("\n{}", text);
    }

    Ok(())
}
