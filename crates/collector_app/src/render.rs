//! Plain-terminal presentation of the view model.

use collector_core::{AppViewModel, ExportOutcome, LifecycleView, TableView};

pub(crate) fn print_welcome() {
    println!("Instagram comment collector");
    println!("{}", help_text());
}

pub(crate) fn help_text() -> String {
    [
        "commands:",
        "  url <post url>        set the post to collect from",
        "  author <username>     set the post author",
        "  login <id>            set the Instagram login id",
        "  password <secret>     set the Instagram password",
        "  followers on|off      toggle the follower check",
        "  start                 submit the collection job",
        "  filter all|followers|others",
        "  search <term>         filter rows by username or content",
        "  sort username|time|follower",
        "  page <n>              jump to a table page",
        "  export                save the Excel export",
        "  reset                 discard the task and start over",
        "  quit                  exit",
    ]
    .join("\n")
}

pub(crate) fn render(view: &AppViewModel) {
    println!();
    render_form(view);
    render_lifecycle(&view.lifecycle);
    render_export(view.last_export.as_ref());
}

fn render_form(view: &AppViewModel) {
    let form = &view.form;
    println!(
        "form: url={} author={} login={} password={} followers={}",
        field(&form.post_url),
        field(&form.post_author),
        field(&form.instagram_id),
        if form.password_present { "set" } else { "(empty)" },
        if form.check_followers { "on" } else { "off" },
    );
    if let Some(error) = &view.form_error {
        println!("  ! {error}");
    }
}

fn render_lifecycle(lifecycle: &LifecycleView) {
    match lifecycle {
        LifecycleView::Idle => println!("status: idle"),
        LifecycleView::Submitting => println!("status: submitting..."),
        LifecycleView::Running {
            phase,
            message,
            progress,
            comments_count,
            loading_result,
        } => {
            println!(
                "status: {} [{progress:>3}%] {} comments  {}",
                phase, comments_count, message
            );
            if *loading_result {
                println!("  loading result...");
            }
        }
        LifecycleView::Succeeded {
            total_comments,
            follower_count,
            non_follower_count,
            notice,
            table,
        } => {
            println!(
                "status: completed  {total_comments} comments ({follower_count} followers, {non_follower_count} others)"
            );
            if let Some(notice) = notice {
                println!("  ! {notice}");
            }
            if let Some(table) = table {
                render_table(table);
            }
        }
        LifecycleView::Failed { error } => println!("status: failed  {error}"),
    }
}

fn render_table(table: &TableView) {
    println!(
        "table: page {}/{}  {} matched",
        table.page,
        table.total_pages.max(1),
        table.total_matched
    );
    if table.rows.is_empty() {
        println!("  (no comments match)");
        return;
    }
    for row in &table.rows {
        let follower = match row.follower {
            Some(true) => "follower",
            Some(false) => "other",
            None => "unknown",
        };
        let reply = if row.is_reply { " reply" } else { "" };
        println!(
            "  {:<20} {:<19} {:<8}{} {}",
            truncate(&row.username, 20),
            row.timestamp.as_deref().unwrap_or("-"),
            follower,
            reply,
            truncate(&row.content, 60),
        );
    }
}

fn render_export(outcome: Option<&ExportOutcome>) {
    match outcome {
        Some(ExportOutcome::Saved { path }) => println!("export: saved to {path}"),
        Some(ExportOutcome::Failed { error }) => println!("export: failed  {error}"),
        None => {}
    }
}

fn field(value: &str) -> &str {
    if value.is_empty() {
        "(empty)"
    } else {
        value
    }
}

/// Shortens long cell text on a character boundary.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
