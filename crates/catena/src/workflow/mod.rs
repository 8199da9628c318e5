//! Provisioning workflow
//!
//! A menu-driven state machine. Each [`State`] is handled by one method that
//! talks to the operator through the [`Console`] and returns the next state.
//! All mutation goes through the [`Registry`] or the [`Keystore`]; the
//! workflow only holds what the operator selected.
//!
//! Failures are alerted and control returns to the nearest enclosing menu:
//! [`State::BlockchainSelected`] for node and export failures, otherwise
//! [`State::MainMenu`]. Console failures end the workflow.

mod account;
mod blockchain;
mod cloud;
pub mod error;
pub mod menu;
mod node;

#[cfg(test)]
mod testing;

pub use error::{Result, WorkflowError};

use blockchain::BlockchainDraft;
use menu::{MainAction, Snapshot, available_actions};

use crate::tui::Console;
use catena_bundle::BundleCodec;
use catena_core::{Blockchain, Cloud, Node};
use catena_keystore::Keystore;
use catena_registry::Registry;
use serde::Serialize;

/// Workflow states
#[derive(Debug, Clone)]
pub enum State {
    MainMenu,
    CloudCreation,
    CloudList(Vec<Cloud>),
    BlockchainCreation(BlockchainDraft),
    BlockchainList(Vec<Blockchain>),
    BlockchainSelected(Blockchain),
    NodeList(Blockchain),
    NodeSelected(Blockchain, Node),
    NodeCreation(Blockchain),
    Exporting(Blockchain),
    Importing(Snapshot),
    AccountCreation,
    AccountList(Vec<String>),
    Exit,
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::MainMenu => "main_menu",
            State::CloudCreation => "cloud_creation",
            State::CloudList(_) => "cloud_list",
            State::BlockchainCreation(_) => "blockchain_creation",
            State::BlockchainList(_) => "blockchain_list",
            State::BlockchainSelected(_) => "blockchain_selected",
            State::NodeList(_) => "node_list",
            State::NodeSelected(..) => "node_selected",
            State::NodeCreation(_) => "node_creation",
            State::Exporting(_) => "exporting",
            State::Importing(_) => "importing",
            State::AccountCreation => "account_creation",
            State::AccountList(_) => "account_list",
            State::Exit => "exit",
        }
    }

    /// Menu to return to when handling this state fails
    fn fallback(&self) -> State {
        match self {
            State::NodeList(blockchain)
            | State::NodeSelected(blockchain, _)
            | State::NodeCreation(blockchain)
            | State::Exporting(blockchain) => State::BlockchainSelected(blockchain.clone()),
            _ => State::MainMenu,
        }
    }
}

/// Drives the operator through the provisioning states
pub struct Workflow<'a> {
    registry: &'a dyn Registry,
    keystore: &'a Keystore,
    codec: &'a BundleCodec,
    console: &'a mut dyn Console,
}

impl<'a> Workflow<'a> {
    pub fn new(
        registry: &'a dyn Registry,
        keystore: &'a Keystore,
        codec: &'a BundleCodec,
        console: &'a mut dyn Console,
    ) -> Self {
        Self {
            registry,
            keystore,
            codec,
            console,
        }
    }

    /// Run from the main menu until the operator leaves it
    pub async fn run(&mut self) -> Result<()> {
        let mut state = State::MainMenu;
        while !matches!(state, State::Exit) {
            state = self.step(state).await?;
        }
        tracing::info!("Workflow finished");
        Ok(())
    }

    /// Handle one state and return the next one
    pub async fn step(&mut self, state: State) -> Result<State> {
        tracing::debug!(state = state.name(), "Entering state");
        let fallback = state.fallback();

        let result = match state {
            State::MainMenu => self.main_menu().await,
            State::CloudCreation => self.create_cloud().await,
            State::CloudList(clouds) => self.list_clouds(clouds),
            State::BlockchainCreation(draft) => self.create_blockchain(draft).await,
            State::BlockchainList(blockchains) => self.list_blockchains(blockchains).await,
            State::BlockchainSelected(blockchain) => self.blockchain_selected(blockchain).await,
            State::NodeList(blockchain) => self.list_nodes(blockchain).await,
            State::NodeSelected(blockchain, node) => self.node_selected(blockchain, node).await,
            State::NodeCreation(blockchain) => self.create_node(blockchain).await,
            State::Exporting(blockchain) => self.export_blockchain(blockchain).await,
            State::Importing(snapshot) => self.import_blockchain(snapshot).await,
            State::AccountCreation => self.create_account().await,
            State::AccountList(addresses) => self.list_accounts(addresses).await,
            State::Exit => Ok(State::Exit),
        };

        match result {
            Err(e) if !e.is_fatal() => {
                tracing::error!(next = fallback.name(), "{}", e);
                self.console.alert(&e.to_string())?;
                Ok(fallback)
            }
            other => other,
        }
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            clouds: self.registry.list_clouds().await?,
            blockchains: self.registry.list_blockchains().await?,
            addresses: self.keystore.list_addresses().await?,
        })
    }

    async fn main_menu(&mut self) -> Result<State> {
        let snapshot = match self.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) if !e.is_fatal() => {
                tracing::error!("Failed to load the main menu: {}", e);
                self.console.alert(&e.to_string())?;
                return Ok(if self.console.confirm("Try again?")? {
                    State::MainMenu
                } else {
                    State::Exit
                });
            }
            Err(e) => return Err(e),
        };

        let actions = available_actions(&snapshot);
        let Some(action) = self.choose("Choose an action", &actions, |a| a.label().to_string())?
        else {
            return Ok(State::Exit);
        };

        tracing::debug!(?action, "Main menu");
        Ok(match action {
            MainAction::ListBlockchains => State::BlockchainList(snapshot.blockchains),
            MainAction::CreateBlockchain => {
                State::BlockchainCreation(BlockchainDraft::new(&snapshot))
            }
            MainAction::ListClouds => State::CloudList(snapshot.clouds),
            MainAction::CreateCloud => State::CloudCreation,
            MainAction::ImportBlockchain => State::Importing(snapshot),
            MainAction::CreateAccount => State::AccountCreation,
            MainAction::ListAccounts => State::AccountList(snapshot.addresses),
        })
    }

    /// Let the operator pick one of `items`. `None` when dismissed.
    fn choose<T: Clone>(
        &mut self,
        title: &str,
        items: &[T],
        label: impl Fn(&T) -> String,
    ) -> Result<Option<T>> {
        let labels: Vec<String> = items.iter().map(label).collect();
        Ok(self
            .console
            .menu(title, &labels)?
            .and_then(|index| items.get(index).cloned()))
    }

    /// Prompt until `validate` accepts the answer. `None` when dismissed.
    fn ask_validated(
        &mut self,
        title: &str,
        default: &str,
        validate: impl Fn(&str) -> Result<String>,
    ) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.console.prompt(title, default)? else {
                return Ok(None);
            };
            match validate(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e @ WorkflowError::Validation(_)) => self.console.alert(&e.to_string())?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Prompt until a non-blank answer is given
    fn ask_required(&mut self, title: &str, default: &str) -> Result<Option<String>> {
        self.ask_validated(title, default, |answer| require_value(title, answer))
    }
}

/// Trimmed `answer`, rejecting blank input
pub fn require_value(what: &str, answer: &str) -> Result<String> {
    let value = answer.trim();
    if value.is_empty() {
        return Err(WorkflowError::Validation(format!(
            "A value is required: {}",
            what
        )));
    }
    Ok(value.to_string())
}

fn pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
