//! The wipe run: authenticate, resolve, collect, confirm, wipe

use crate::api::{RateLimiters, SlackClient, SlackError};
use crate::auth::redact_token;
use crate::config::WipeConfig;
use crate::ui::{self, summary};
use crate::wipe::{TeamSession, WipeMode};
use anyhow::{Context, Result, bail};
use colored::*;
use log::{debug, info, warn};

pub async fn run_wipe(config: WipeConfig) -> Result<()> {
    let client = SlackClient::with_base_url(
        config.api_url.as_str(),
        config.team.token.as_str(),
        RateLimiters::new(),
    )?;
    run_with_client(client, &config).await
}

/// Run against an already configured client
pub async fn run_with_client(client: SlackClient, config: &WipeConfig) -> Result<()> {
    let mut session = match TeamSession::connect(client, config.team.clone()).await {
        Ok(session) => session,
        Err(err) => {
            if is_token_rejected(&err) {
                warn!(
                    "Slack rejected token {} from {}; use a valid user token (xoxp-)",
                    redact_token(&config.team.token),
                    config.token_source
                );
            }
            return Err(err);
        }
    };
    info!(
        "Using {} in {} as {}",
        session.channel.display_name(),
        session.identity.team,
        session.identity.user
    );

    if config.wipe_messages {
        wipe_messages(&mut session, config).await?;
    }
    if config.wipe_files {
        wipe_files(&mut session, config).await?;
    }

    for (tier, stats) in session.client().rate_limiters().stats() {
        debug!(
            "{}: {} calls, {} waited for a token ({:.1}s in total, {:.0}% immediate)",
            tier,
            stats.requests_made,
            stats.requests_delayed,
            stats.total_wait.as_secs_f64(),
            stats.immediate_rate() * 100.0
        );
    }
    Ok(())
}

async fn wipe_messages(session: &mut TeamSession, config: &WipeConfig) -> Result<()> {
    session.fetch_messages(config.source, config.threads).await?;
    let count = session.user_messages.len();
    info!("fetched {} own messages ({} total)", count, session.messages.len());

    if config.dry_run {
        println!("{} {} messages would be wiped", "dry run:".yellow(), count);
        summary::print_messages(&session.user_messages);
        return Ok(());
    }
    if count == 0 {
        println!("No messages to wipe");
        return Ok(());
    }

    let verb = match config.mode {
        WipeMode::Delete => "wipe",
        WipeMode::Redact => "redact",
    };
    require_approval(&format!("{} all {} messages?", verb, count), config.auto_approve)?;

    let report = session
        .wipe_user_messages(config.mode, config.replacement_char, config.concurrency)
        .await;
    summary::print_report("messages", &report);
    report.into_result().context("wipe messages")?;
    info!("wiped messages");
    Ok(())
}

async fn wipe_files(session: &mut TeamSession, config: &WipeConfig) -> Result<()> {
    session.fetch_files().await?;
    let count = session.user_files.len();
    info!("fetched {} own files", count);

    if config.dry_run {
        println!("{} {} files would be wiped", "dry run:".yellow(), count);
        summary::print_files(&session.user_files);
        return Ok(());
    }
    if count == 0 {
        println!("No files to wipe");
        return Ok(());
    }

    require_approval(&format!("wipe all {} files?", count), config.auto_approve)?;

    let report = session.wipe_user_files(config.concurrency).await;
    summary::print_report("files", &report);
    report.into_result().context("wipe files")?;
    info!("wiped files");
    Ok(())
}

fn is_token_rejected(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<SlackError>())
        .any(SlackError::is_auth_error)
}

fn require_approval(prompt: &str, auto_approve: bool) -> Result<()> {
    confirm(prompt, auto_approve, ui::approval_prompt)
}

fn confirm(prompt: &str, auto_approve: bool, ask: impl FnOnce(&str) -> Result<bool>) -> Result<()> {
    if auto_approve {
        debug!("Auto-approved: {}", prompt);
        return Ok(());
    }
    if !ask(prompt)? {
        bail!("aborted");
    }
    Ok(())
}
