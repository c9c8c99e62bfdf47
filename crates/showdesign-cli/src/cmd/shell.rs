use crate::render;
use anyhow::{bail, Context};
use showdesign_core::{
    config::Config,
    draft::{DraftId, SceneId},
    field::Field,
    generate::RandomGenerator,
    repository::{DraftRepository, Upsert},
    session::{Session, ViewKind},
    store::{FileStore, KvStore},
    ShowDesignError,
};
use std::io::{BufRead, Write};
use std::path::Path;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login(String),
    Logout,
    New,
    Edit(DraftId),
    Show,
    Next,
    Prev,
    Set(Field, String),
    Clear(Field),
    SuggestTitle,
    SuggestNarrative,
    SceneAdd,
    SceneEdit(SceneId, String),
    SceneRemove(SceneId),
    Sign(bool),
    Submit,
    Cancel,
    Help,
}

/// One line of input, after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank,
    Quit,
    Run(Command),
}

/// Split off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

/// Parse one input line. Blank lines and `#` comments are [`Line::Blank`].
fn parse(line: &str) -> anyhow::Result<Line> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Blank);
    }
    let (word, rest) = split_word(line);
    let rest = rest.trim_end();

    let command = match word.to_lowercase().as_str() {
        "login" | "register" => {
            if rest.is_empty() {
                bail!("usage: login <email>");
            }
            Command::Login(rest.to_string())
        }
        "logout" => Command::Logout,
        "new" => Command::New,
        "edit" => Command::Edit(parse_id(rest, "edit <id>")?),
        "show" | "list" => Command::Show,
        "next" => Command::Next,
        "prev" | "previous" | "back" => Command::Prev,
        "set" => {
            let (name, value) = split_word(rest);
            if name.is_empty() {
                bail!("usage: set <field> <value>");
            }
            Command::Set(name.parse()?, value.replace("\\n", "\n"))
        }
        "clear" => Command::Clear(rest.parse()?),
        "suggest" => match rest {
            "title" => Command::SuggestTitle,
            "narrative" => Command::SuggestNarrative,
            _ => bail!("usage: suggest title | suggest narrative"),
        },
        "scene" => {
            let (action, args) = split_word(rest);
            match action {
                "add" => Command::SceneAdd,
                "edit" => {
                    let (id, text) = split_word(args);
                    Command::SceneEdit(parse_id(id, "scene edit <id> <text>")?, text.to_string())
                }
                "rm" | "remove" => Command::SceneRemove(parse_id(args, "scene rm <id>")?),
                _ => bail!("usage: scene add | scene edit <id> <text> | scene rm <id>"),
            }
        }
        "sign" | "agree" => Command::Sign(true),
        "unsign" => Command::Sign(false),
        "submit" => Command::Submit,
        "cancel" | "exit" => Command::Cancel,
        "help" | "?" => Command::Help,
        "quit" => return Ok(Line::Quit),
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Line::Run(command))
}

fn parse_id(s: &str, usage: &str) -> anyhow::Result<i64> {
    s.trim()
        .parse()
        .with_context(|| format!("usage: {usage}"))
}

fn help(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Auth => "login <email> | register <email> | quit",
        ViewKind::Dashboard => "new | edit <id> | list | logout | quit",
        ViewKind::Wizard => {
            "next | prev | show | set <field> <value> | clear <field> | suggest title | \
             suggest narrative | scene add | scene edit <id> <text> | scene rm <id> | \
             sign | unsign | submit | cancel | quit"
        }
    }
}

// ---------------------------------------------------------------------------
// Session loop
// ---------------------------------------------------------------------------

enum Reply {
    Render,
    Note(String),
    NoteAndRender(String),
}

pub fn run(root: &Path) -> anyhow::Result<()> {
    let cfg = Config::load_or_default(root).context("failed to load config")?;
    let repo = DraftRepository::new(FileStore::for_root(root), cfg.storage_key.clone())
        .with_lock_enforcement(cfg.lock_signed_drafts);
    let generator = RandomGenerator::new(cfg.title_candidates.clone());
    let mut session =
        Session::open(repo, Box::new(generator)).context("failed to load drafts")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    drive(&mut session, stdin.lock(), stdout.lock())
}

/// Feed `input` line by line into the session, writing views and replies to `out`.
fn drive<S: KvStore, R: BufRead, W: Write>(
    session: &mut Session<S>,
    input: R,
    mut out: W,
) -> anyhow::Result<()> {
    write!(out, "{}", view_text(session))?;
    prompt(&mut out, session)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse(&line) {
            Ok(Line::Quit) => break,
            Ok(Line::Run(command)) => command,
            Ok(Line::Blank) => {
                prompt(&mut out, session)?;
                continue;
            }
            Err(e) => {
                writeln!(out, "error: {e:#}")?;
                prompt(&mut out, session)?;
                continue;
            }
        };

        match apply(session, command) {
            Ok(Reply::Render) => write!(out, "{}", view_text(session))?,
            Ok(Reply::Note(note)) => writeln!(out, "{note}")?,
            Ok(Reply::NoteAndRender(note)) => {
                writeln!(out, "{note}")?;
                write!(out, "{}", view_text(session))?;
            }
            Err(e @ ShowDesignError::NotSigned) => writeln!(out, "notice: {e}")?,
            Err(e) => writeln!(out, "error: {e}")?,
        }
        prompt(&mut out, session)?;
    }

    writeln!(out)?;
    if session.view() == ViewKind::Wizard {
        writeln!(out, "Unsaved changes discarded.")?;
    }
    writeln!(out, "Goodbye.")?;
    out.flush()?;
    Ok(())
}

fn apply<S: KvStore>(
    session: &mut Session<S>,
    command: Command,
) -> showdesign_core::Result<Reply> {
    let reply = match command {
        Command::Login(identifier) => {
            session.login(&identifier)?;
            Reply::Render
        }
        Command::Logout => {
            session.logout()?;
            Reply::Render
        }
        Command::New => {
            session.start_new()?;
            Reply::Render
        }
        Command::Edit(id) => {
            session.edit(id)?;
            Reply::Render
        }
        Command::Show => Reply::Render,
        Command::Next => {
            session.wizard_mut()?.next();
            Reply::Render
        }
        Command::Prev => {
            session.wizard_mut()?.previous();
            Reply::Render
        }
        Command::Set(field, value) => {
            session.wizard_mut()?.set_field(field, &value)?;
            Reply::Note(format!("{} updated.", field.label()))
        }
        Command::Clear(field) => {
            session.wizard_mut()?.clear_field(field);
            Reply::Note(format!("{} cleared.", field.label()))
        }
        Command::SuggestTitle => Reply::Note(format!("Title: {}", session.suggest_title()?)),
        Command::SuggestNarrative => {
            Reply::Note(format!("Narrative:\n{}", session.suggest_narrative()?))
        }
        Command::SceneAdd => {
            let id = session.wizard_mut()?.add_scene();
            Reply::NoteAndRender(format!("Added scene [{id}]."))
        }
        Command::SceneEdit(id, text) => {
            session.wizard_mut()?.update_scene(id, text)?;
            Reply::Render
        }
        Command::SceneRemove(id) => {
            session.wizard_mut()?.remove_scene(id)?;
            Reply::Render
        }
        Command::Sign(signed) => {
            session.wizard_mut()?.set_signed(signed);
            Reply::Note(if signed {
                "Agreement signed.".to_string()
            } else {
                "Agreement withdrawn.".to_string()
            })
        }
        Command::Submit => {
            let note = match session.save_and_return()? {
                Upsert::Appended => "Design submitted.",
                Upsert::Replaced => "Design updated.",
            };
            Reply::NoteAndRender(note.to_string())
        }
        Command::Cancel => {
            session.cancel_and_return()?;
            Reply::Render
        }
        Command::Help => Reply::Note(help(session.view()).to_string()),
    };
    Ok(reply)
}

fn view_text<S: KvStore>(session: &Session<S>) -> String {
    match (session.view(), session.wizard()) {
        (ViewKind::Wizard, Some(w)) => render::wizard_view(w),
        (ViewKind::Dashboard, _) => {
            render::dashboard_view(&session.greeting().unwrap_or_default(), &session.cards())
        }
        _ => render::auth_view(),
    }
}

fn prompt<S: KvStore, W: Write>(out: &mut W, session: &Session<S>) -> anyhow::Result<()> {
    write!(out, "\n{}> ", session.view())?;
    out.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
