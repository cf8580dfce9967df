use std::io::{self, BufRead};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use collector_client::{ClientConfig, ClientHandle};
use collector_core::{update, AppState, Filter, Msg, SortKey, TaskState};
use collector_logging::collector_info;

use crate::effects::EffectRunner;
use crate::persistence;
use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    Core(Msg),
    Quit,
}

pub fn run() -> io::Result<()> {
    let work_dir = std::env::current_dir()?;
    let export_dir = work_dir.join("exports");

    let mut config = ClientConfig::default_with_export_dir(export_dir);
    // Export filenames carry the user's local date, as a browser download
    // would.
    config.today = Arc::new(|| chrono::Local::now().date_naive());
    let client =
        ClientHandle::new(config).map_err(|err| io::Error::other(err.to_string()))?;

    let (msg_tx, msg_rx) = mpsc::channel::<AppMsg>();
    let runner = EffectRunner::new(client, msg_tx.clone());
    spawn_stdin_reader(msg_tx);

    let mut state = AppState::with_form(persistence::load_form(&work_dir));
    render::print_welcome();
    render::render(&state.view());

    for msg in msg_rx {
        let msg = match msg {
            AppMsg::Core(msg) => msg,
            AppMsg::Quit => break,
        };
        // The submission worked: keep its non-secret fields as the next
        // session's defaults.
        if matches!(msg, Msg::SubmitAccepted { .. })
            && matches!(state.task(), TaskState::Submitting)
        {
            persistence::save_form(&work_dir, state.form());
        }
        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);
        if state.consume_dirty() {
            render::render(&state.view());
        }
    }

    collector_info!("collector_app exiting");
    Ok(())
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Ok(msg) => {
                    let quit = matches!(msg, AppMsg::Quit);
                    if msg_tx.send(msg).is_err() || quit {
                        return;
                    }
                }
                Err(feedback) => println!("{feedback}"),
            }
        }
        let _ = msg_tx.send(AppMsg::Quit);
    });
}

/// One line of user input, mapped to a message. `Err` carries feedback to
/// print (usage or help text).
pub(crate) fn parse_command(line: &str) -> Result<AppMsg, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let core = |msg: Msg| Ok(AppMsg::Core(msg));
    match verb {
        "" => core(Msg::NoOp),
        "url" => core(Msg::PostUrlChanged(rest.to_string())),
        "author" => core(Msg::PostAuthorChanged(rest.to_string())),
        "login" => core(Msg::LoginIdChanged(rest.to_string())),
        "password" => core(Msg::PasswordChanged(rest.to_string())),
        "followers" => match rest {
            "on" => core(Msg::CheckFollowersToggled(true)),
            "off" => core(Msg::CheckFollowersToggled(false)),
            _ => Err("usage: followers on|off".to_string()),
        },
        "start" => core(Msg::SubmitClicked),
        "filter" => match rest {
            "all" => core(Msg::FilterChanged(Filter::All)),
            "followers" => core(Msg::FilterChanged(Filter::FollowerOnly)),
            "others" => core(Msg::FilterChanged(Filter::NonFollowerOnly)),
            _ => Err("usage: filter all|followers|others".to_string()),
        },
        "search" => core(Msg::SearchChanged(rest.to_string())),
        "sort" => match rest {
            "username" => core(Msg::SortClicked(SortKey::Username)),
            "time" => core(Msg::SortClicked(SortKey::Timestamp)),
            "follower" => core(Msg::SortClicked(SortKey::FollowerFlag)),
            _ => Err("usage: sort username|time|follower".to_string()),
        },
        "page" => match rest.parse::<usize>() {
            Ok(page) if page >= 1 => core(Msg::PageChanged(page)),
            _ => Err("usage: page <number>".to_string()),
        },
        "export" => core(Msg::ExportClicked),
        "reset" => core(Msg::ResetClicked),
        "quit" | "exit" => Ok(AppMsg::Quit),
        "help" => Err(render::help_text()),
        other => Err(format!("unknown command {other:?}; type 'help'")),
    }
}
