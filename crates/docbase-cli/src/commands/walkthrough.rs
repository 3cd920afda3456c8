//! Narrated end-to-end lifecycle against the configured store.

use std::sync::Arc;

use clap::Args;

use super::user::UserRow;
use crate::output::{self, OutputFormat};
use docbase_core::error::AppError;
use docbase_core::traits::DocumentStore;
use docbase_core::types::{ContinuationToken, SortSpec};
use docbase_database::MemoryDocumentStore;
use docbase_database::repositories::UserRepository;
use docbase_entity::{Document, Principal, User};

/// Number of extra users seeded for the paging step.
const PAGING_SEED: usize = 5;

/// Arguments for the walkthrough command
#[derive(Debug, Args)]
pub struct WalkthroughArgs {
    /// Use an in-memory store regardless of configuration
    #[arg(long)]
    pub memory: bool,

    /// Wait for confirmation between steps
    #[arg(long)]
    pub pause: bool,

    /// Page size for the paging step
    #[arg(long, default_value_t = 2)]
    pub page_size: u32,
}

struct Narrator {
    step: usize,
    pause: bool,
}

impl Narrator {
    /// Announce the next step. Returns `false` when the user stops.
    fn next(&mut self, title: &str) -> Result<bool, AppError> {
        if self.pause && self.step > 0 {
            let proceed = dialoguer::Confirm::new()
                .with_prompt("Continue?")
                .default(true)
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
            if !proceed {
                println!("Stopped.");
                return Ok(false);
            }
        }
        self.step += 1;
        println!();
        println!("── Step {}: {title}", self.step);
        Ok(true)
    }
}

/// Execute the walkthrough
pub async fn execute(
    args: &WalkthroughArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let store: Arc<dyn DocumentStore> = if args.memory {
        Arc::new(MemoryDocumentStore::new())
    } else {
        super::open_store(&config).await?
    };
    output::print_kv("Store", store.backend_name());
    output::print_kv("Collection", &config.store.collection);

    let users = UserRepository::users(Arc::clone(&store), &config.store);
    let mut narrator = Narrator {
        step: 0,
        pause: args.pause,
    };

    let result = run(&users, &mut narrator, args.page_size, format).await;
    store.close().await;
    result
}

async fn run(
    users: &UserRepository,
    narrator: &mut Narrator,
    page_size: u32,
    format: OutputFormat,
) -> Result<(), AppError> {
    let author = Principal::new("walkthrough", "Walkthrough").with_email("walkthrough@example.com");

    if !narrator.next("Add a user")? {
        return Ok(());
    }
    let added = users
        .add(
            Document::new(User::new("John Doe", "johndoe@example.com")),
            Some(author.clone()),
        )
        .await?;
    output::print_item(&UserRow::from(&added), format);
    let id = added.id.clone();

    if !narrator.next("Read it back by id")? {
        return Ok(());
    }
    let fetched = users
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{id}' vanished")))?;
    output::print_item(&UserRow::from(&fetched), format);

    if !narrator.next("Update the email")? {
        return Ok(());
    }
    let stale = fetched.clone();
    let mut edit = fetched;
    edit.payload.email = "john.doe@example.com".to_string();
    let updated = users
        .update(edit)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{id}' vanished")))?;
    output::print_item(&UserRow::from(&updated), format);

    if !narrator.next("Update again with the stale etag")? {
        return Ok(());
    }
    let mut conflicting = stale;
    conflicting.payload.name = "Johnny Doe".to_string();
    match users.update(conflicting).await {
        Err(e) if e.is_conflict() => output::print_success(&format!("Rejected as expected: {e}")),
        Err(e) => return Err(e),
        Ok(_) => output::print_warning("Stale update was accepted"),
    }

    if !narrator.next("Page through users")? {
        return Ok(());
    }
    let mut seeded = Vec::with_capacity(PAGING_SEED);
    for i in 0..PAGING_SEED {
        let sample = users
            .add(
                Document::new(User::new(
                    format!("Sample User {i}"),
                    format!("sample{i}@example.com"),
                )),
                Some(author.clone()),
            )
            .await?;
        seeded.push(sample.id);
    }
    let paged = page_through(users, page_size, format).await;

    for sample_id in &seeded {
        users.delete(sample_id).await?;
    }
    output::print_kv("Samples removed", &seeded.len().to_string());
    paged?;

    if !narrator.next("Delete the user")? {
        return Ok(());
    }
    let deleted = users.delete(&id).await?;
    output::print_kv("Deleted", &deleted.to_string());

    if !narrator.next("Read the deleted user")? {
        return Ok(());
    }
    match users.get_by_id(&id).await? {
        Some(_) => output::print_warning(&format!("User '{id}' is still present")),
        None => output::print_success(&format!("User '{id}' is gone")),
    }

    Ok(())
}

async fn page_through(
    users: &UserRepository,
    page_size: u32,
    format: OutputFormat,
) -> Result<(), AppError> {
    let sort = SortSpec::parse("name", "asc")?;
    let mut continuation: Option<ContinuationToken> = None;
    let mut page_number = 0;
    loop {
        let page = users
            .get_page(&sort, continuation.as_ref(), Some(page_size))
            .await?;
        page_number += 1;
        output::print_kv(&format!("Page {page_number}"), &format!("{} users", page.items.len()));
        let rows: Vec<UserRow> = page.items.iter().map(UserRow::from).collect();
        output::print_list(&rows, format);
        continuation = page.continuation;
        if continuation.is_none() {
            return Ok(());
        }
    }
}
