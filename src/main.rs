//! webinput -- command-line front end for the host input engine.
//!
//! Each subcommand maps to one request the web control panel can make.
//! Exit status: 0 on success, 1 when the host action reported failure,
//! 2 on usage or configuration errors.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use webinput::{
    parse_wire, to_wire, ButtonStore, Config, ExecutionResult, HostActions, KeySequence,
    MouseButton,
};

#[derive(Parser)]
#[command(name = "webinput", version)]
#[command(about = "Trigger host keystrokes, paste and mouse actions")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/webinput/config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the detected platform, paste chord and backend
    Info,
    /// List configured buttons
    Buttons,
    /// Play a key sequence, e.g. '[["ctrl","down"],["a","press"],["ctrl","up"]]'
    Run { sequence: String },
    /// Play the sequence bound to a button id
    Button { id: String },
    /// Copy text to the clipboard and paste it
    Paste { text: String },
    /// Move the pointer by a relative offset
    Move {
        #[arg(allow_hyphen_values = true)]
        dx: i32,
        #[arg(allow_hyphen_values = true)]
        dy: i32,
    },
    /// Click a mouse button
    Click {
        #[arg(default_value = "left")]
        button: MouseButton,
    },
}

/// A subcommand whose arguments have been validated, ready to run against
/// the host.
enum Request {
    Info,
    Buttons,
    Sequence(KeySequence),
    Button(String),
    Paste(String),
    Move(i32, i32),
    Click(MouseButton),
}

impl TryFrom<Command> for Request {
    type Error = serde_json::Error;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        Ok(match command {
            Command::Info => Request::Info,
            Command::Buttons => Request::Buttons,
            Command::Run { sequence } => Request::Sequence(parse_wire(&sequence)?),
            Command::Button { id } => Request::Button(id),
            Command::Paste { text } => Request::Paste(text),
            Command::Move { dx, dy } => Request::Move(dx, dy),
            Command::Click { button } => Request::Click(button),
        })
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let request = match Request::try_from(cli.command) {
        Ok(request) => request,
        Err(e) => {
            log::error!("invalid key sequence: {e}");
            return ExitCode::from(2);
        }
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("config: {e}");
            return ExitCode::from(2);
        }
    };

    let mut host = HostActions::from_config(&config);

    let result = match request {
        Request::Info => {
            print_info(&host);
            return ExitCode::SUCCESS;
        }
        Request::Buttons => {
            print_buttons(host.buttons());
            return ExitCode::SUCCESS;
        }
        Request::Sequence(sequence) => host.execute_sequence(&sequence),
        Request::Button(id) => host.press_button(&id),
        Request::Paste(text) => host.execute_paste(&text),
        Request::Move(dx, dy) => host.move_mouse(dx, dy),
        Request::Click(button) => host.click_mouse(button),
    };

    report(result)
}

fn report(result: ExecutionResult) -> ExitCode {
    match serde_json::to_string(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("could not render result: {e}"),
    }
    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_info(host: &HostActions) {
    let profile = host.profile();
    let delays = profile.delays();
    println!("webinput v{}", env!("CARGO_PKG_VERSION"));
    println!("os:               {}", profile.os());
    println!("primary modifier: {}", profile.primary_modifier_key());
    match to_wire(&profile.paste_sequence()) {
        Ok(wire) => println!("paste sequence:   {wire}"),
        Err(e) => log::warn!("could not render paste sequence: {e}"),
    }
    println!(
        "delays (ms):      down={} press={} up={}",
        delays.down.as_millis(),
        delays.press.as_millis(),
        delays.up.as_millis()
    );
    match host.backend_error() {
        None => println!("backend:          ready"),
        Some(e) => println!("backend:          {e}"),
    }
}

fn print_buttons(store: &dyn ButtonStore) {
    for button in store.buttons() {
        let wire = to_wire(&button.key_sequence).unwrap_or_default();
        println!("{:<14} {:<20} {wire}", button.id, button.name);
    }
}
