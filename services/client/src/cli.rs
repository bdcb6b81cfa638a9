//! services/client/src/cli.rs
//!
//! Command-line surface of the `schemes-connect` binary.

use clap::{Args, Parser, Subcommand};
use schemes_connect_core::{Language, ProfileDraft};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "schemes-connect",
    version,
    about = "Find government welfare schemes and ask questions about them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the backend is reachable
    Health,
    /// Show, update or clear the saved profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
    /// Log in (stored locally; no server-side check)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a local account session
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long = "confirm")]
        confirm_password: String,
    },
    /// Log out and forget the saved profile
    Logout,
    /// Show who is logged in
    Whoami,
    /// Request recommendations for the saved profile
    Recommend(FilterArgs),
    /// Browse schemes: recommendations when a profile is saved, else the catalog
    Schemes(FilterArgs),
    /// Compare two or three catalog schemes side by side
    Compare {
        /// Scheme ids, e.g. `101 301`
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u32>,
    },
    /// Ask a single question
    Ask {
        #[arg(required_unless_present = "audio", num_args = 1..)]
        question: Vec<String>,
        #[arg(long)]
        language: Option<Language>,
        #[arg(long)]
        no_voice: bool,
        /// Ask by voice: a WAV file or raw 16-bit mono PCM
        #[arg(long)]
        audio: Option<PathBuf>,
    },
    /// Interactive assistant (`/lang <en|hi|mr>`, `/voice on|off`, `/audio <file>`, `/quit`)
    Chat {
        #[arg(long)]
        language: Option<Language>,
        #[arg(long)]
        no_voice: bool,
    },
    /// Browse the community forum
    Community {
        #[command(subcommand)]
        action: CommunityCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show,
    /// Update the saved profile; fields not given keep their saved value
    Save(ProfileArgs),
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum CommunityCommand {
    List(FilterArgs),
    /// Draft a post and preview the forum with it on top
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: String,
    },
    /// Like a post by its number in the listing and preview the result
    Like { number: usize },
    /// Comment on a post by its number in the listing and preview the result
    Comment {
        number: usize,
        #[arg(long)]
        text: String,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    #[arg(long, default_value = "")]
    pub search: String,
    /// Exact category, or `all`
    #[arg(long, default_value = "all")]
    pub category: String,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    /// Male | Female | Other | Prefer not to say
    #[arg(long)]
    pub gender: Option<String>,
    /// Below 2.5L | 2.5L - 5L | 5L - 10L | Above 10L
    #[arg(long)]
    pub income: Option<String>,
    #[arg(long)]
    pub occupation: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// General | OBC | SC | ST | EWS | Other
    #[arg(long = "caste")]
    pub caste_category: Option<String>,
    /// Yes | No
    #[arg(long)]
    pub disability: Option<String>,
    /// Request recommendations right after saving
    #[arg(long)]
    pub recommend: bool,
}

impl ProfileArgs {
    /// Overlays the given fields onto `draft`.
    pub fn apply(&self, mut draft: ProfileDraft) -> ProfileDraft {
        if let Some(name) = &self.name {
            draft.full_name = Some(name.clone());
        }
        let overlay = [
            (&self.age, &mut draft.age),
            (&self.gender, &mut draft.gender),
            (&self.income, &mut draft.income),
            (&self.occupation, &mut draft.occupation),
            (&self.location, &mut draft.location),
            (&self.caste_category, &mut draft.caste_category),
            (&self.disability, &mut draft.disability),
        ];
        for (given, field) in overlay {
            if let Some(value) = given {
                *field = value.clone();
            }
        }
        draft
    }
}
