//! Operator interface.
//!
//! # Data Flow
//! ```text
//! args.rs ──► --action given ──► one run_action, exit
//!        └──► otherwise ──► menu.rs (render, parse_choice)
//!                              │
//!                  prompt.rs (stdin lines) ──► run_action ──► "Press Enter"
//! ```

pub mod args;
pub mod menu;
pub mod prompt;

pub use args::Args;
pub use menu::{parse_choice, MenuEntry};
pub use prompt::{parse_count, parse_wallet_count, Prompt};

use tokio::io::AsyncBufRead;

use crate::actions::{run_action, Action, ActionContext};
use crate::wallets::WalletStore;

/// Menu loop until Exit, end of input or shutdown.
pub async fn interactive<R: AsyncBufRead + Unpin>(
    ctx: &mut ActionContext,
    store: &mut WalletStore,
    prompt: &mut Prompt<R>,
) -> std::io::Result<()> {
    let Some(answer) = ask(ctx, prompt, "Max transactions per wallet", ctx.max_transactions).await?
    else {
        return Ok(());
    };
    ctx.max_transactions = parse_count(&answer, ctx.max_transactions);

    loop {
        println!("{}", menu::render(ctx.max_transactions));

        let Some(choice) = ask(ctx, prompt, "Choose an option", "").await? else {
            return Ok(());
        };

        let action = match parse_choice(&choice) {
            Some(MenuEntry::Run(action)) => action,
            Some(MenuEntry::SetTransactionCount) => {
                let Some(answer) =
                    ask(ctx, prompt, "Max transactions per wallet", ctx.max_transactions).await?
                else {
                    return Ok(());
                };
                ctx.max_transactions = parse_count(&answer, ctx.max_transactions);
                tracing::info!(max_transactions = ctx.max_transactions, "Updated");
                continue;
            }
            Some(MenuEntry::Exit) => return Ok(()),
            None => {
                println!("Invalid choice '{}'", choice);
                continue;
            }
        };

        let generate = if action == Action::GeneratedFaucet {
            let Some(answer) = ask(ctx, prompt, "Wallets to generate (0 to skip)", 0).await?
            else {
                return Ok(());
            };
            parse_wallet_count(&answer)
        } else {
            0
        };

        match run_action(action, ctx, store, generate).await {
            Ok(report) => println!("{}: {}", action, report),
            Err(e) => tracing::error!(action = action.label(), error = %e, "Action failed"),
        }
        if ctx.shutdown.is_triggered() {
            return Ok(());
        }

        if ask(ctx, prompt, "Press Enter to continue", "").await?.is_none() {
            return Ok(());
        }
    }
}

/// Prompt, giving up when shutdown fires first.
async fn ask<R: AsyncBufRead + Unpin>(
    ctx: &ActionContext,
    prompt: &mut Prompt<R>,
    question: &str,
    default: impl ToString,
) -> std::io::Result<Option<String>> {
    let default = default.to_string();
    tokio::select! {
        _ = ctx.shutdown.wait() => Ok(None),
        answer = prompt.ask(question, &default) => answer,
    }
}
