//! services/client/src/commands.rs
//!
//! Executes parsed commands against the application state. Output goes to any
//! `Write` so the same handlers serve the terminal and the tests.

use crate::cli::{Command, CommunityCommand, FilterArgs, ProfileArgs, ProfileCommand};
use crate::error::ClientError;
use crate::render;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use schemes_connect_core::assistant::QUICK_QUESTIONS;
use schemes_connect_core::compare::CompareError;
use schemes_connect_core::{
    catalog, CategoryFilter, Capture, Comparison, ConversationFlow, Forum, Language,
    LoginForm, ProfileDraft, RecommendationState, RegistrationForm, SchemeDirectory, VoiceInput,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub async fn run<W: Write>(state: &AppState, command: Command, out: &mut W) -> Result<(), ClientError> {
    match command {
        Command::Health => health(state, out).await,
        Command::Profile { action } => match action {
            ProfileCommand::Show => show_profile(state, out),
            ProfileCommand::Save(args) => save_profile(state, &args, out).await,
            ProfileCommand::Clear => {
                state.store.clear_profile()?;
                writeln!(out, "Profile cleared.")?;
                Ok(())
            }
        },
        Command::Login { email, password } => login(state, LoginForm { email, password }, out),
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => register(
            state,
            RegistrationForm {
                name,
                email,
                password,
                confirm_password,
            },
            out,
        ),
        Command::Logout => {
            state.store.logout()?;
            writeln!(out, "Logged out. Your saved profile was cleared.")?;
            Ok(())
        }
        Command::Whoami => whoami(state, out),
        Command::Recommend(filter) => recommend(state, &filter, out).await,
        Command::Schemes(filter) => schemes(state, &filter, out).await,
        Command::Compare { ids } => compare(&ids, out),
        Command::Ask {
            question,
            language,
            no_voice,
            audio,
        } => ask(state, &question.join(" "), language, no_voice, audio, out).await,
        Command::Chat { language, no_voice } => {
            let stdin = std::io::stdin();
            chat(state, language, no_voice, stdin.lock(), out).await
        }
        Command::Community { action } => match action {
            CommunityCommand::List(filter) => community_list(&Forum::seeded(Utc::now()), &filter, out),
            CommunityCommand::Post {
                title,
                content,
                category,
            } => community_post(&title, &content, &category, out),
            CommunityCommand::Like { number } => community_like(number, out),
            CommunityCommand::Comment { number, text } => community_comment(number, &text, out),
        },
    }
}

//=========================================================================================
// Health, Profile and Auth
//=========================================================================================

pub async fn health<W: Write>(state: &AppState, out: &mut W) -> Result<(), ClientError> {
    let status = state.health.check_health().await?;
    writeln!(out, "Backend {} is {}", state.config.api_base_url, status.status)?;
    Ok(())
}

pub fn show_profile<W: Write>(state: &AppState, out: &mut W) -> Result<(), ClientError> {
    match state.store.load_profile() {
        Some(draft) => {
            write!(out, "{}", render::profile(&draft))?;
            report_missing(&draft, out)?;
        }
        None => writeln!(out, "No profile saved.")?,
    }
    Ok(())
}

/// Saves the updated draft, then optionally requests recommendations for it.
pub async fn save_profile<W: Write>(
    state: &AppState,
    args: &ProfileArgs,
    out: &mut W,
) -> Result<(), ClientError> {
    let draft = args.apply(state.store.load_profile().unwrap_or_default());
    state.store.save_profile(&draft)?;
    info!(complete = draft.is_complete(), "Profile saved");
    writeln!(out, "Profile saved.")?;
    report_missing(&draft, out)?;

    if args.recommend {
        recommend_for(state, &draft, &FilterArgs::default(), out).await?;
    }
    Ok(())
}

fn report_missing<W: Write>(draft: &ProfileDraft, out: &mut W) -> Result<(), ClientError> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        writeln!(out, "Still missing: {}", names.join(", "))?;
    }
    Ok(())
}

pub fn login<W: Write>(state: &AppState, form: LoginForm, out: &mut W) -> Result<(), ClientError> {
    let session = form.validate()?;
    state.store.save_auth(&session)?;
    writeln!(out, "Welcome back, {}!", session.name)?;
    Ok(())
}

pub fn register<W: Write>(
    state: &AppState,
    form: RegistrationForm,
    out: &mut W,
) -> Result<(), ClientError> {
    let session = form.validate()?;
    state.store.save_auth(&session)?;
    writeln!(out, "Account created. Welcome, {}!", session.name)?;
    Ok(())
}

pub fn whoami<W: Write>(state: &AppState, out: &mut W) -> Result<(), ClientError> {
    match state.store.load_auth().filter(|auth| auth.is_logged_in) {
        Some(auth) => writeln!(out, "{} <{}>", auth.name, auth.email)?,
        None => writeln!(out, "Not logged in.")?,
    }
    Ok(())
}

//=========================================================================================
// Schemes
//=========================================================================================

pub async fn recommend<W: Write>(
    state: &AppState,
    filter: &FilterArgs,
    out: &mut W,
) -> Result<(), ClientError> {
    let draft = state.store.load_profile().ok_or(ClientError::NoProfile)?;
    recommend_for(state, &draft, filter, out).await
}

async fn recommend_for<W: Write>(
    state: &AppState,
    draft: &ProfileDraft,
    filter: &FilterArgs,
    out: &mut W,
) -> Result<(), ClientError> {
    let mut flow = state.recommendation_flow();
    if let Some(notice) = flow.request(draft).await? {
        writeln!(out, "{}", render::notice(&notice))?;
    }
    if let RecommendationState::Loaded { .. } = flow.state() {
        list_schemes(flow.directory(), filter, out)?;
    }
    Ok(())
}

/// Recommendations for a complete saved profile, the catalog otherwise.
pub async fn schemes<W: Write>(
    state: &AppState,
    filter: &FilterArgs,
    out: &mut W,
) -> Result<(), ClientError> {
    match state.store.load_profile().filter(ProfileDraft::is_complete) {
        Some(draft) => recommend_for(state, &draft, filter, out).await,
        None => {
            writeln!(out, "No complete profile saved; showing the scheme catalog.")?;
            list_schemes(&SchemeDirectory::new(catalog::schemes()), filter, out)
        }
    }
}

fn list_schemes<W: Write>(
    directory: &SchemeDirectory,
    filter: &FilterArgs,
    out: &mut W,
) -> Result<(), ClientError> {
    let category = CategoryFilter::parse(&filter.category);
    let shown = directory.filter(filter.search.trim(), &category);
    writeln!(out, "{}", directory.summary(shown.len()))?;
    for scheme in shown {
        write!(out, "\n{}", render::scheme(scheme))?;
    }
    Ok(())
}

pub fn compare<W: Write>(ids: &[u32], out: &mut W) -> Result<(), ClientError> {
    let mut selection = Comparison::new();
    for &id in ids {
        let scheme = catalog::find(id).ok_or(CompareError::UnknownScheme(id))?;
        selection.toggle(&scheme)?;
    }
    let table = selection.table()?;
    write!(out, "{}", render::comparison(&table))?;
    Ok(())
}

//=========================================================================================
// Assistant
//=========================================================================================

pub async fn ask<W: Write>(
    state: &AppState,
    question: &str,
    language: Option<Language>,
    no_voice: bool,
    audio: Option<PathBuf>,
    out: &mut W,
) -> Result<(), ClientError> {
    let mut flow = state.conversation(language, no_voice.then_some(false));
    let question = match audio {
        Some(path) => {
            let mut voice_input = state.voice_input();
            match capture_question(&mut voice_input, &path, out).await? {
                Some(text) => text,
                None => return Ok(()),
            }
        }
        None => question.to_string(),
    };

    ask_once(&mut flow, &question, out).await?;
    flow.finish_speaking().await;
    Ok(())
}

async fn ask_once<W: Write>(
    flow: &mut ConversationFlow,
    question: &str,
    out: &mut W,
) -> Result<(), ClientError> {
    let text = match flow.send(question).await {
        Some(reply) => render::reply(reply),
        None => return Ok(()),
    };
    writeln!(out, "{}", text)?;
    if let Some(notice) = flow.take_notice() {
        writeln!(out, "({})", notice)?;
    }
    Ok(())
}

/// Reads a recording and turns it into question text, if there is any.
async fn capture_question<W: Write>(
    voice_input: &mut VoiceInput,
    path: &Path,
    out: &mut W,
) -> Result<Option<String>, ClientError> {
    // Without a provider the recording is never opened.
    let audio = if voice_input.is_available() {
        tokio::fs::read(path).await?
    } else {
        Vec::new()
    };
    match voice_input.transcribe(&audio).await? {
        Capture::Transcript(text) if !text.is_empty() => {
            writeln!(out, "You said: {}", text)?;
            Ok(Some(text))
        }
        Capture::Transcript(_) => {
            writeln!(out, "No speech was recognised.")?;
            Ok(None)
        }
        Capture::Unsupported(notice) => {
            writeln!(out, "{}", notice)?;
            Ok(None)
        }
        Capture::Disabled => Ok(None),
    }
}

/// A line typed into the interactive assistant.
#[derive(Debug, PartialEq, Eq)]
enum ChatInput<'a> {
    Quit,
    Help,
    Language(&'a str),
    Voice(&'a str),
    Audio(&'a str),
    Unknown(&'a str),
    Question(&'a str),
}

impl<'a> ChatInput<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return ChatInput::Question(line);
        };
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(name, arg)| (name, arg.trim()))
            .unwrap_or((command, ""));
        match name {
            "quit" | "exit" => ChatInput::Quit,
            "help" => ChatInput::Help,
            "lang" => ChatInput::Language(arg),
            "voice" => ChatInput::Voice(arg),
            "audio" => ChatInput::Audio(arg),
            _ => ChatInput::Unknown(name),
        }
    }
}

const CHAT_HELP: &str =
    "Commands: /lang <en|hi|mr>, /voice <on|off>, /audio <file>, /help, /quit";

pub async fn chat<R: BufRead, W: Write>(
    state: &AppState,
    language: Option<Language>,
    no_voice: bool,
    input: R,
    out: &mut W,
) -> Result<(), ClientError> {
    let mut flow = state.conversation(language, no_voice.then_some(false));
    let mut voice_input = state.voice_input();

    writeln!(out, "SchemesConnect assistant. {}", CHAT_HELP)?;
    writeln!(out, "Try asking:")?;
    for question in QUICK_QUESTIONS {
        writeln!(out, "  - {}", question)?;
    }
    prompt(&flow, out)?;

    for line in input.lines() {
        let line = line?;
        match ChatInput::parse(&line) {
            ChatInput::Quit => break,
            ChatInput::Help => writeln!(out, "{}", CHAT_HELP)?,
            ChatInput::Language(code) => match code.parse::<Language>() {
                Ok(language) => {
                    flow.set_language(language);
                    writeln!(out, "Language set to {}.", language)?;
                }
                Err(e) => writeln!(out, "{} (use en, hi or mr)", e)?,
            },
            ChatInput::Voice(setting) => match setting {
                "on" => {
                    flow.set_voice_enabled(true);
                    writeln!(out, "Voice replies on.")?;
                }
                "off" => {
                    flow.set_voice_enabled(false);
                    writeln!(out, "Voice replies off.")?;
                }
                _ => writeln!(
                    out,
                    "Voice replies are {}. Use /voice on or /voice off.",
                    if flow.voice_enabled() { "on" } else { "off" }
                )?,
            },
            ChatInput::Audio(path) => {
                match capture_question(&mut voice_input, Path::new(path), out).await {
                    Ok(Some(question)) => ask_once(&mut flow, &question, out).await?,
                    Ok(None) => {}
                    Err(e) => {
                        warn!("Voice capture failed: {}", e);
                        writeln!(out, "Could not use that recording: {}", e)?;
                    }
                }
            }
            ChatInput::Unknown(name) => writeln!(out, "Unknown command /{}. {}", name, CHAT_HELP)?,
            ChatInput::Question(question) => ask_once(&mut flow, question, out).await?,
        }
        prompt(&flow, out)?;
    }

    flow.finish_speaking().await;
    writeln!(out)?;
    Ok(())
}

fn prompt<W: Write>(flow: &ConversationFlow, out: &mut W) -> Result<(), ClientError> {
    write!(out, "\n[{}] {} > ", flow.language(), flow.language().placeholder())?;
    out.flush()?;
    Ok(())
}

//=========================================================================================
// Community
//=========================================================================================

pub fn community_list<W: Write>(
    forum: &Forum,
    filter: &FilterArgs,
    out: &mut W,
) -> Result<(), ClientError> {
    let now = Utc::now();
    let posts = forum.filter(filter.search.trim(), &CategoryFilter::parse(&filter.category));
    if posts.is_empty() {
        writeln!(out, "No discussions match.")?;
    }
    for post in posts {
        let number = forum.number_of(post.id).unwrap_or_default();
        writeln!(out, "#{} {}", number, render::post(post, now))?;
    }
    Ok(())
}

/// Posts live only for this session, so the new post is shown on top of the
/// sample discussions and then discarded.
pub fn community_post<W: Write>(
    title: &str,
    content: &str,
    category: &str,
    out: &mut W,
) -> Result<(), ClientError> {
    let now = Utc::now();
    let mut forum = Forum::seeded(now);
    forum.create_post(title, content, category, now)?;
    writeln!(out, "Post created (not saved between sessions).\n")?;
    community_list(&forum, &FilterArgs::default(), out)
}

pub fn community_like<W: Write>(number: usize, out: &mut W) -> Result<(), ClientError> {
    let now = Utc::now();
    let mut forum = Forum::seeded(now);
    let id = forum.id_numbered(number)?;
    let likes = forum.like(id)?;
    info!(number, likes, "Post liked");
    writeln!(out, "Liked post #{} ({} likes, not saved between sessions).\n", number, likes)?;
    show_post(&forum, number, now, out)
}

/// Blank comments are ignored, matching the forum's rules.
pub fn community_comment<W: Write>(number: usize, text: &str, out: &mut W) -> Result<(), ClientError> {
    let now = Utc::now();
    let mut forum = Forum::seeded(now);
    let id = forum.id_numbered(number)?;
    if forum.add_comment(id, text, now)?.is_some() {
        writeln!(out, "Comment added (not saved between sessions).\n")?;
    } else {
        writeln!(out, "Comment is empty; nothing added.\n")?;
    }
    show_post(&forum, number, now, out)
}

fn show_post<W: Write>(
    forum: &Forum,
    number: usize,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<(), ClientError> {
    if let Some(post) = forum.posts().get(number - 1) {
        writeln!(out, "#{} {}", number, render::post(post, now))?;
    }
    Ok(())
}
