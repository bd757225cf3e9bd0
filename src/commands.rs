//! Command handlers: glue between the CLI surface and the thread store.

use anyhow::Context;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use threads::clock::{Clock, SystemClock};
use threads::config;
use threads::export;
use threads::resource::ResourceKind;
use threads::store::ThreadStore;
use threads::thread::Thread;
use threads::ui::{self, ThreadRow, theme};

pub fn open_store(database: Option<PathBuf>) -> anyhow::Result<ThreadStore> {
    let file_config = config::load_config(None)?;
    let (db_path, backup_dir) = config::resolve_paths(database, file_config.as_ref());
    tracing::debug!("opening thread database at {}", db_path.display());
    Ok(ThreadStore::open(&db_path, &backup_dir)?)
}

pub fn run_new(store: &ThreadStore, question: &str, deep: bool, tags: &[String]) -> anyhow::Result<()> {
    let thread_id = store.create_thread(question)?;
    apply_tags(store, thread_id, deep, tags)?;
    ui::success(&format!("Created new thread (#{}): \"{}\"", thread_id, question));
    Ok(())
}

pub fn run_attach(store: &mut ThreadStore, content: &str, deep: bool, tags: &[String]) -> anyhow::Result<()> {
    let content = if content.trim().is_empty() {
        clipboard_paste()
            .context("No content passed and clipboard empty.")?
            .trim()
            .to_string()
    } else {
        content.to_string()
    };
    if content.is_empty() {
        anyhow::bail!("No content passed and clipboard empty.");
    }

    let Some(thread_id) = pick_thread(store)? else {
        return Ok(());
    };

    let kind = ResourceKind::classify(&content);
    store.attach_resource(thread_id, &content, kind)?;
    apply_tags(store, thread_id, deep, tags)?;
    ui::success(&format!("Attached resource to thread #{}", thread_id));
    Ok(())
}

pub fn run_ls(store: &ThreadStore, limit: usize, include_archived: bool) -> anyhow::Result<()> {
    let threads = store.list_threads(limit, include_archived)?;
    if threads.is_empty() {
        println!("{}", ui::dim("No threads found."));
        return Ok(());
    }

    let now = SystemClock.now();
    let mut rows = Vec::with_capacity(threads.len());
    for summary in &threads {
        let tags = store.tags_for_thread(summary.id)?;
        rows.push(ThreadRow::new(summary, &tags, now));
    }

    ui::header("Threads (by last active)");
    println!("{}", ui::thread_table(&rows));
    Ok(())
}

pub fn run_view(store: &ThreadStore, id: i64) -> anyhow::Result<()> {
    let Some(thread) = store.get_thread(id)? else {
        ui::error(&format!("Thread #{} not found.", id));
        return Ok(());
    };

    // Viewing counts as activity
    store.touch_thread(thread.id)?;
    print_thread_detail(store, &thread)
}

pub fn run_current(store: &ThreadStore, include_archived: bool) -> anyhow::Result<()> {
    let Some(thread) = store.most_recent_thread(include_archived)? else {
        let msg = if include_archived {
            "No threads yet."
        } else {
            "No active threads. Try --all to include archived threads."
        };
        println!("{}", ui::dim(msg));
        return Ok(());
    };

    store.touch_thread(thread.id)?;
    print_thread_detail(store, &thread)
}

pub fn run_archive(store: &ThreadStore, id: i64) -> anyhow::Result<()> {
    let Some(thread) = store.get_thread(id)? else {
        ui::error(&format!("Thread #{} not found.", id));
        return Ok(());
    };
    if thread.is_archived {
        ui::warn(&format!("Thread #{} is already archived.", id));
        return Ok(());
    }

    if store.archive_thread(id)? {
        ui::success(&format!("Thread #{} has been archived.", id));
    } else {
        ui::error(&format!("Could not archive thread #{}.", id));
    }
    Ok(())
}

pub fn run_unarchive(store: &ThreadStore, id: i64) -> anyhow::Result<()> {
    let Some(thread) = store.get_thread(id)? else {
        ui::error(&format!("Thread #{} not found.", id));
        return Ok(());
    };
    if !thread.is_archived {
        ui::warn(&format!("Thread #{} is already active (not archived).", id));
        return Ok(());
    }

    if store.unarchive_thread(id)? {
        ui::success(&format!("Thread #{} has been unarchived.", id));
    } else {
        ui::error(&format!("Could not unarchive thread #{}.", id));
    }
    Ok(())
}

pub fn run_export(store: &ThreadStore, id: i64) -> anyhow::Result<()> {
    let Some(thread) = store.get_thread(id)? else {
        ui::error(&format!("Thread #{} not found.", id));
        return Ok(());
    };
    let resources = store.resources_for_thread(id)?;
    let tags = store.tags_for_thread(id)?;

    let rendered = export::render_thread(&thread, &tags, &resources);
    clipboard_copy(&rendered)?;

    ui::success(&format!("Thread #{} has been exported to clipboard.", id));
    println!("{}", ui::dim("Preview:"));
    println!("{}", rendered);
    Ok(())
}

fn apply_tags(store: &ThreadStore, thread_id: i64, deep: bool, tags: &[String]) -> anyhow::Result<()> {
    for tag in tags {
        store.add_tag(thread_id, tag)?;
    }
    if deep {
        store.add_tag(thread_id, "deep")?;
    }
    Ok(())
}

/// Interactive picker over the last 5 active threads, with an escape
/// hatch for creating a new one. Returns None when the user backs out.
fn pick_thread(store: &ThreadStore) -> anyhow::Result<Option<i64>> {
    let term = console::Term::stdout();
    let now = SystemClock.now();
    let recent = store.last_n_threads(5, false)?;

    ui::header("Recent Threads");
    for (i, brief) in recent.iter().enumerate() {
        let tags = store.tags_for_thread(brief.id)?;
        let tags_str = if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(", "))
        };
        println!(
            "  {}. (#{}) {}{} {}",
            i + 1,
            brief.id,
            format!("\"{}\"", brief.question).style(theme().question.clone()),
            tags_str.style(theme().tag.clone()),
            ui::dim(&format!("{} ago", ui::time_since(now, brief.last_active)))
        );
    }
    println!("  n. New thread");
    println!();

    let choice = prompt(&term, "Select a thread or 'n' to create new", "1")?;

    if choice.eq_ignore_ascii_case("n") {
        let question = prompt(&term, "Enter a new thread question/title", "")?;
        if question.trim().is_empty() {
            ui::error("No question specified.");
            return Ok(None);
        }
        let id = store.create_thread(&question)?;
        ui::success(&format!("Created new thread (#{}): \"{}\"", id, question));
        return Ok(Some(id));
    }

    let Ok(idx) = choice.parse::<usize>() else {
        ui::error("Invalid input.");
        return Ok(None);
    };
    if idx < 1 || idx > recent.len() {
        ui::error("Invalid choice.");
        return Ok(None);
    }
    Ok(Some(recent[idx - 1].id))
}

fn prompt(term: &console::Term, text: &str, default: &str) -> anyhow::Result<String> {
    if default.is_empty() {
        term.write_str(&format!("{}: ", text))?;
    } else {
        term.write_str(&format!("{} [{}]: ", text, default))?;
    }
    let line = term.read_line()?;
    let line = line.trim();
    Ok(if line.is_empty() { default.to_string() } else { line.to_string() })
}

fn print_thread_detail(store: &ThreadStore, thread: &Thread) -> anyhow::Result<()> {
    let resources = store.resources_for_thread(thread.id)?;
    let tags = store.tags_for_thread(thread.id)?;

    let status = if thread.is_archived { " ARCHIVED" } else { "" };
    println!(
        "{}: \"{}\"{}",
        format!("Thread #{}", thread.id).style(theme().header.clone()),
        thread.question,
        status.style(theme().warn.clone())
    );
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", ").style(theme().tag.clone()));
    }
    println!("Created: {}", ui::dim(&ui::format_timestamp(thread.created_at)));
    println!("Last Active: {}\n", ui::dim("just updated"));

    if resources.is_empty() {
        println!("{}", ui::dim("No resources found for this thread."));
        return Ok(());
    }

    println!("{}", ui::dim("Resources:"));
    for (idx, resource) in resources.iter().enumerate() {
        println!("  {}) [{}] {}", idx + 1, resource.kind, resource.content);
    }
    Ok(())
}

fn clipboard_copy(text: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}

fn clipboard_paste() -> anyhow::Result<String> {
    let mut clipboard = arboard::Clipboard::new()?;
    Ok(clipboard.get_text()?)
}
