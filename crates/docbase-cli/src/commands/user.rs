//! User document CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use validator::Validate;

use crate::output::{self, OutputFormat};
use docbase_core::error::AppError;
use docbase_core::types::{ContinuationToken, ETag, SortSpec};
use docbase_database::repositories::UserRepository;
use docbase_entity::{Document, User};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Add a user
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Show a user by id
    Get {
        /// Document id
        id: String,
    },
    /// List users one page at a time
    List {
        /// Field to sort by
        #[arg(long, default_value = "createdAt")]
        sort: String,
        /// Sort order (asc or desc)
        #[arg(long, default_value = "desc")]
        order: String,
        /// Page size
        #[arg(long)]
        page_size: Option<u32>,
        /// Continuation token from a previous page
        #[arg(long)]
        token: Option<String>,
        /// Follow continuation tokens until exhausted
        #[arg(long)]
        all: bool,
    },
    /// Update a user's fields
    Update {
        /// Document id
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// Expected concurrency token
        #[arg(long)]
        etag: Option<String>,
    },
    /// Delete a user
    Delete {
        /// Document id
        id: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    /// Document id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Created at
    pub created: String,
    /// Modified at
    pub modified: String,
    /// Concurrency token
    pub etag: String,
}

impl From<&Document<User>> for UserRow {
    fn from(doc: &Document<User>) -> Self {
        let stamp = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default()
        };
        Self {
            id: doc.id.clone(),
            name: doc.payload.name.clone(),
            email: doc.payload.email.clone(),
            created: stamp(doc.created_at),
            modified: stamp(doc.modified_at),
            etag: doc.etag.as_ref().map(ToString::to_string).unwrap_or_default(),
        }
    }
}

fn validate(user: &User) -> Result<(), AppError> {
    user.validate()
        .map_err(|e| AppError::validation(format!("Invalid user: {e}")))
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;
    let users = UserRepository::users(store.clone(), &config.store);

    let result = run(&args.command, &users, format).await;
    store.close().await;
    result
}

async fn run(
    command: &UserCommand,
    users: &UserRepository,
    format: OutputFormat,
) -> Result<(), AppError> {
    match command {
        UserCommand::Add { name, email, id } => {
            let user = User::new(name.clone(), email.clone());
            validate(&user)?;
            let draft = match id {
                Some(id) => Document::with_id(id.clone(), user),
                None => Document::new(user),
            };
            let doc = users.add(draft, None).await?;
            output::print_item(&UserRow::from(&doc), format);
            output::print_success(&format!("User '{}' added", doc.id));
        }
        UserCommand::Get { id } => match users.get_by_id(id).await? {
            Some(doc) => output::print_item(&UserRow::from(&doc), format),
            None => output::print_warning(&format!("User '{id}' not found")),
        },
        UserCommand::List {
            sort,
            order,
            page_size,
            token,
            all,
        } => {
            let sort = SortSpec::parse(sort, order)?;
            let mut continuation = token.as_deref().and_then(ContinuationToken::from_client);
            let mut rows = Vec::new();

            loop {
                let page = users
                    .get_page(&sort, continuation.as_ref(), *page_size)
                    .await?;
                rows.extend(page.items.iter().map(UserRow::from));
                continuation = page.continuation;
                if !*all || continuation.is_none() {
                    break;
                }
            }

            output::print_list(&rows, format);
            if let Some(token) = &continuation {
                output::print_kv("Next page token", token.as_str());
            }
        }
        UserCommand::Update {
            id,
            name,
            email,
            etag,
        } => {
            let Some(mut doc) = users.get_by_id(id).await? else {
                output::print_warning(&format!("User '{id}' not found"));
                return Ok(());
            };
            if let Some(name) = name {
                doc.payload.name = name.clone();
            }
            if let Some(email) = email {
                doc.payload.email = email.clone();
            }
            if let Some(etag) = etag {
                doc.etag = Some(ETag::new(etag.as_str()));
            }
            validate(&doc.payload)?;

            match users.update(doc).await? {
                Some(doc) => {
                    output::print_item(&UserRow::from(&doc), format);
                    output::print_success(&format!("User '{id}' updated"));
                }
                None => output::print_warning(&format!("User '{id}' not found")),
            }
        }
        UserCommand::Delete { id } => {
            if users.delete(id).await? {
                output::print_success(&format!("User '{id}' deleted"));
            } else {
                output::print_warning(&format!("User '{id}' not found"));
            }
        }
    }

    Ok(())
}
