//! Line-oriented driver standing in for the UI
//!
//! `Shell` keeps one session per screen and turns text commands into
//! session operations; `run_demo` walks the whole flow on a real clock.

use anyhow::{bail, Context, Result};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::{App, Stage};
use crate::call::{format_duration, CallSession};
use crate::catalog::{demo_contacts, demo_effects, filter_effects, EffectTab};
use crate::forms::SignInForm;
use crate::recording::RecordingSession;
use crate::room::RoomSession;
use crate::timer::TickEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Go(String),
    Greet,
    SignIn { email: String, password: String },
    Library(String),
    Effects { tab: EffectTab, search: String },
    Apply(String),
    Record(RecordCommand),
    Call(CallCommand),
    Room(RoomCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCommand {
    Start,
    Stop,
    Save(String),
    Discard,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallCommand {
    Start(Option<String>),
    Mute,
    End,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomCommand {
    Create { name: String, password: Option<String> },
    Join(String),
    Leave,
    Mute(String),
    Voice(String),
    Status,
}

pub const HELP: &str = "\
commands:
  go <path>                      navigate (/library, /voice-clone, ...)
  greet                          show the home greeting
  signin <email> <password>
  library [search]               list saved takes as JSON
  effects [tab] [search]         tab: all|favorites|character|effect|creator|meme
  apply <effect-id>
  record start|stop|save [name]|discard|status
  call start [contact-id]|mute|end|status
  room create <name> [password]|join <code>|leave|mute <member>|voice <id>|status
  quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };
        let rest: Vec<&str> = words.collect();

        let cmd = match (head, rest.as_slice()) {
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            ("go", [path]) => Command::Go(path.to_string()),
            ("greet", []) => Command::Greet,
            ("signin", [email, password]) => Command::SignIn {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("library", term) => Command::Library(term.join(" ")),
            ("effects", args) => {
                let (tab, search) = match args.split_first() {
                    Some((first, tail)) => match EffectTab::parse(first) {
                        Some(tab) => (tab, tail.join(" ")),
                        None => (EffectTab::All, args.join(" ")),
                    },
                    None => (EffectTab::All, String::new()),
                };
                Command::Effects { tab, search }
            }
            ("apply", [id]) => Command::Apply(id.to_string()),
            ("record", [sub, args @ ..]) => Command::Record(match (*sub, args) {
                ("start", []) => RecordCommand::Start,
                ("stop", []) => RecordCommand::Stop,
                // Name is kept exactly as typed after "save "
                ("save", _) => RecordCommand::Save(save_name(line)),
                ("discard", []) => RecordCommand::Discard,
                ("status", []) => RecordCommand::Status,
                _ => bail!("usage: record start|stop|save [name]|discard|status"),
            }),
            ("call", [sub, args @ ..]) => Command::Call(match (*sub, args) {
                ("start", []) => CallCommand::Start(None),
                ("start", [contact]) => CallCommand::Start(Some(contact.to_string())),
                ("mute", []) => CallCommand::Mute,
                ("end", []) => CallCommand::End,
                ("status", []) => CallCommand::Status,
                _ => bail!("usage: call start [contact-id]|mute|end|status"),
            }),
            ("room", [sub, args @ ..]) => Command::Room(match (*sub, args) {
                ("create", [name]) => RoomCommand::Create {
                    name: name.to_string(),
                    password: None,
                },
                ("create", [name, password]) => RoomCommand::Create {
                    name: name.to_string(),
                    password: Some(password.to_string()),
                },
                ("join", []) => RoomCommand::Join(String::new()),
                ("join", [code]) => RoomCommand::Join(code.to_string()),
                ("leave", []) => RoomCommand::Leave,
                ("mute", [member]) => RoomCommand::Mute(member.to_string()),
                ("voice", [id]) => RoomCommand::Voice(id.to_string()),
                ("status", []) => RoomCommand::Status,
                _ => bail!("usage: room create <name> [password]|join <code>|leave|mute <member>|voice <id>|status"),
            }),
            _ => bail!("unknown command: {} (try `help`)", line.trim()),
        };

        Ok(cmd)
    }
}

/// Everything after `record save` and one separating whitespace char, untouched
fn save_name(line: &str) -> String {
    let line = line.trim_start();
    let after_record = line["record".len()..].trim_start();
    let after_save = &after_record["save".len()..];

    let mut chars = after_save.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str().to_string(),
        _ => after_save.to_string(),
    }
}

/// One session per screen, created on first use
pub struct Shell {
    app: App,
    recording: Option<RecordingSession>,
    call: Option<CallSession>,
    room: RoomSession,
}

impl Shell {
    pub fn new(app: App) -> Self {
        let room = app.noise_room();
        Self {
            app,
            recording: None,
            call: None,
            room,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run one command. Returns the text to show, or None on quit.
    pub async fn execute(&mut self, cmd: Command) -> Result<Option<String>> {
        let out = match cmd {
            Command::Quit => return Ok(None),
            Command::Help => HELP.to_string(),
            Command::Go(path) => format!("at {}", self.app.navigate(&path)),
            Command::Greet => self.app.greeting(),
            Command::SignIn { email, password } => {
                match self.app.sign_in(&SignInForm::new(email, password)) {
                    Ok(()) => "signed in".to_string(),
                    Err(e) => e.to_string(),
                }
            }
            Command::Library(term) if term.is_empty() => self.app.library().to_json().await?,
            Command::Library(term) => {
                serde_json::to_string_pretty(&self.app.library().search(&term).await)
                    .context("Failed to render library")?
            }
            Command::Effects { tab, search } => {
                let effects = demo_effects();
                filter_effects(&effects, tab, &search)
                    .iter()
                    .map(|e| format!("{:>3}  {}", e.id, e.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Apply(id) => match self.app.apply_effect(&id) {
                Some(effect) => format!("applied {}", effect.name),
                None => format!("no effect with id {}", id),
            },
            Command::Record(cmd) => self.record(cmd).await,
            Command::Call(cmd) => self.call(cmd).await,
            Command::Room(cmd) => self.room(cmd)?,
        };
        Ok(Some(out))
    }

    async fn record(&mut self, cmd: RecordCommand) -> String {
        let rec = self.recording.get_or_insert_with(|| {
            let (rec, events) = self.app.voice_clone();
            tokio::spawn(print_ticks("rec", events));
            rec
        });

        match cmd {
            RecordCommand::Start => ok_or_ignored(rec.start().await, "recording"),
            RecordCommand::Stop => match rec.stop().await {
                Some(candidate) => format!(
                    "stopped at {}, `record save <name>` to keep",
                    format_duration(candidate.duration_secs)
                ),
                None => "nothing kept".to_string(),
            },
            RecordCommand::Save(name) => match rec.save(&name).await {
                Some(artifact) => format!(
                    "saved \"{}\" ({})",
                    artifact.name,
                    format_duration(artifact.duration_secs)
                ),
                None => "no take to save".to_string(),
            },
            RecordCommand::Discard => ok_or_ignored(rec.discard().await, "discarded"),
            RecordCommand::Status => format!(
                "{:?} {}",
                rec.status().await,
                format_duration(rec.elapsed_secs().await)
            ),
        }
    }

    async fn call(&mut self, cmd: CallCommand) -> String {
        match cmd {
            CallCommand::Start(contact_id) => {
                if self.call.is_some() {
                    return "already in a call".to_string();
                }
                let contact = match contact_id {
                    Some(id) => match demo_contacts().into_iter().find(|c| c.id == id) {
                        Some(c) => Some(c),
                        None => return format!("no contact {}", id),
                    },
                    None => None,
                };
                let (call, events) = self.app.prank_call(contact).await;
                tokio::spawn(print_ticks("call", events));
                call.start().await;
                let call = self.call.insert(call);
                format!(
                    "calling {}",
                    call.contact().map_or("unknown number", |c| c.name.as_str())
                )
            }
            CallCommand::Mute => match &self.call {
                Some(call) => {
                    if call.toggle_mute().await {
                        "muted".to_string()
                    } else {
                        "unmuted".to_string()
                    }
                }
                None => "no active call".to_string(),
            },
            CallCommand::End => match self.call.take() {
                // Session is dropped here, taking its timer with it
                Some(call) => match call.end().await {
                    Some(secs) => format!("call ended ({})", format_duration(secs)),
                    None => "call was not active".to_string(),
                },
                None => "no active call".to_string(),
            },
            CallCommand::Status => match &self.call {
                Some(call) => format!(
                    "{:?} {} muted={}",
                    call.status().await,
                    format_duration(call.elapsed_secs().await),
                    call.is_muted().await
                ),
                None => "no active call".to_string(),
            },
        }
    }

    fn room(&mut self, cmd: RoomCommand) -> Result<String> {
        let out = match cmd {
            RoomCommand::Create { name, password } => {
                match self.room.create_room(&name, password.as_deref()) {
                    Ok(id) => format!("created room {}", id),
                    Err(e) => e.to_string(),
                }
            }
            RoomCommand::Join(code) => {
                self.room.join_room(&code);
                format!("joined {}", code)
            }
            RoomCommand::Leave => ok_or_ignored(self.room.leave_room(), "left room"),
            RoomCommand::Mute(member) => match self.room.toggle_mute(&member) {
                Some(true) => format!("{} muted", member),
                Some(false) => format!("{} unmuted", member),
                None => format!("no member {}", member),
            },
            RoomCommand::Voice(id) => ok_or_ignored(self.room.select_voice(&id), "voice set"),
            RoomCommand::Status => serde_json::to_string_pretty(&self.room.joined())
                .context("Failed to render room")?,
        };
        Ok(out)
    }
}

fn ok_or_ignored(done: bool, msg: &str) -> String {
    if done {
        msg.to_string()
    } else {
        "ignored".to_string()
    }
}

async fn print_ticks(label: &'static str, mut events: mpsc::UnboundedReceiver<TickEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            TickEvent::Tick(secs) => println!("[{}] {}", label, format_duration(secs)),
            TickEvent::CeilingReached(secs) => println!(
                "[{}] limit reached at {}, `record save <name>` to keep",
                label,
                format_duration(secs)
            ),
        }
    }
}

/// Interactive loop over stdin
pub async fn run_shell(app: App) -> Result<()> {
    let mut shell = Shell::new(app);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match Command::parse(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match shell.execute(cmd).await {
            Ok(Some(out)) => println!("{}", out),
            Ok(None) => break,
            Err(e) => warn!("Command failed: {:#}", e),
        }
    }

    Ok(())
}

/// Scripted walk through every screen on the real clock
pub async fn run_demo(mut app: App) -> Result<()> {
    app.show_splash();
    app.wait_for_stage(Stage::SignIn).await;
    info!("Splash finished");

    app.sign_in(&SignInForm::new("guest@example.com", "demo"))?;
    info!("{}", app.greeting());

    app.apply_effect("1");

    let mut shell = Shell::new(app);
    let script: &[(&str, u64)] = &[
        ("record start", 4),
        ("record stop", 0),
        ("record save Demo Take", 0),
        ("call start c4", 3),
        ("call mute", 0),
        ("call end", 0),
        ("room create Late-Night secret", 0),
        ("room mute Alex", 0),
        ("room leave", 0),
        ("library demo", 0),
    ];

    for (line, wait_secs) in script {
        println!("> {}", line);
        if let Some(out) = shell.execute(Command::parse(line)?).await? {
            println!("{}", out);
        }
        if *wait_secs > 0 {
            tokio::time::sleep(Duration::from_millis(wait_secs * 1000 + 100)).await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_save_keeps_name_verbatim() {
        assert_eq!(
            Command::parse("record save My  Take ").unwrap(),
            Command::Record(RecordCommand::Save("My  Take ".to_string()))
        );
        assert_eq!(
            Command::parse("record save").unwrap(),
            Command::Record(RecordCommand::Save(String::new()))
        );
    }

    #[test]
    fn test_parse_record_save_after_tab() {
        assert_eq!(
            Command::parse("record save\tName").unwrap(),
            Command::Record(RecordCommand::Save("Name".to_string()))
        );
        assert_eq!(
            Command::parse("record save\t Name").unwrap(),
            Command::Record(RecordCommand::Save(" Name".to_string()))
        );
    }

    #[test]
    fn test_parse_library_search_term() {
        assert_eq!(Command::parse("library").unwrap(), Command::Library(String::new()));
        assert_eq!(
            Command::parse("library  evening take").unwrap(),
            Command::Library("evening take".to_string())
        );
    }

    #[test]
    fn test_parse_room_join_without_code() {
        assert_eq!(
            Command::parse("room join").unwrap(),
            Command::Room(RoomCommand::Join(String::new()))
        );
    }

    #[test]
    fn test_parse_effects_tab_and_search() {
        assert_eq!(
            Command::parse("effects favorites chip").unwrap(),
            Command::Effects {
                tab: EffectTab::Favorites,
                search: "chip".to_string()
            }
        );
        assert_eq!(
            Command::parse("effects deep voice").unwrap(),
            Command::Effects {
                tab: EffectTab::All,
                search: "deep voice".to_string()
            }
        );
    }

    #[test]
    fn test_parse_room_create_with_password() {
        assert_eq!(
            Command::parse("room create Squad pw").unwrap(),
            Command::Room(RoomCommand::Create {
                name: "Squad".to_string(),
                password: Some("pw".to_string())
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_bad_usage() {
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("record").is_err());
        assert!(Command::parse("call start a b").is_err());
        assert!(Command::parse("   ").is_err());
    }
}
