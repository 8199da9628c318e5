//! Blockchain creation, selection, export and import

use super::menu::{BlockchainAction, Snapshot};
use super::{Result, State, Workflow, WorkflowError, pretty_json, require_value};
use catena_bundle::{Bundle, BundleCodec};
use catena_core::{Blockchain, Cloud, Enode, ModelError, Node};
use catena_registry::{Backends, BlockchainRequest, NewBlockchain};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Questions asked while creating a blockchain, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStep {
    Name,
    Cloud,
    Backend,
    ChainType,
    MiningAccount,
    ControllerFlavour,
    Network,
    Jumpbox,
    JumpboxKeyFile,
}

impl CreationStep {
    pub const ALL: [CreationStep; 9] = [
        CreationStep::Name,
        CreationStep::Cloud,
        CreationStep::Backend,
        CreationStep::ChainType,
        CreationStep::MiningAccount,
        CreationStep::ControllerFlavour,
        CreationStep::Network,
        CreationStep::Jumpbox,
        CreationStep::JumpboxKeyFile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CreationStep::Name => "Blockchain name",
            CreationStep::Cloud => "Choose cloud",
            CreationStep::Backend => "Choose a blockchain backend",
            CreationStep::ChainType => "Choose a blockchain type",
            CreationStep::MiningAccount => "Enter the account to which mining rewards will be sent",
            CreationStep::ControllerFlavour => "Choose a flavour for the controller",
            CreationStep::Network => "Choose a network for the blockchain",
            CreationStep::Jumpbox => "Choose a jumpbox",
            CreationStep::JumpboxKeyFile => "Enter the jumpbox key file",
        }
    }

    /// Check an answer to this step
    pub fn validate(self, answer: &str) -> Result<String> {
        let value = require_value(self.label(), answer)?;
        if self == CreationStep::JumpboxKeyFile && !Path::new(&value).is_file() {
            return Err(WorkflowError::Validation(format!(
                "Jumpbox key file not found: {}",
                value
            )));
        }
        Ok(value)
    }

    fn apply(self, new: &mut NewBlockchain, value: String) {
        match self {
            CreationStep::Name => new.name = value,
            CreationStep::Cloud => new.cloud_id = value,
            CreationStep::Backend => new.backend = value,
            CreationStep::ChainType => new.chain_type = value,
            CreationStep::MiningAccount => new.mining_account = value,
            CreationStep::ControllerFlavour => new.controller_flavour = value,
            CreationStep::Network => new.network = value,
            CreationStep::Jumpbox => new.jumpbox = value,
            CreationStep::JumpboxKeyFile => new.jumpbox_keyfile = PathBuf::from(value),
        }
    }
}

/// A blockchain being created, with the values known before asking
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockchainDraft {
    pub clouds: Vec<Cloud>,
    /// Local accounts, the first one is offered as mining account
    pub addresses: Vec<String>,
    pub backend: Option<String>,
    pub chain_type: Option<String>,
    pub network_id: Option<u64>,
    pub genesis: Option<Value>,
    pub external_bootnodes: Option<Vec<String>>,
}

impl BlockchainDraft {
    pub fn new(snapshot: &Snapshot) -> Self {
        Self {
            clouds: snapshot.clouds.clone(),
            addresses: snapshot.addresses.clone(),
            ..Default::default()
        }
    }

    /// Draft recreating the blockchain captured in `bundle`
    pub fn from_bundle(snapshot: &Snapshot, bundle: Bundle) -> Self {
        let genesis = bundle.genesis();
        let manifest = bundle.chain_config;
        Self {
            backend: Some(manifest.backend).filter(|b| !b.trim().is_empty()),
            chain_type: Some(manifest.chain_type).filter(|t| !t.trim().is_empty()),
            network_id: manifest.network_id,
            genesis,
            external_bootnodes: Some(bundle.external_bootnodes),
            ..Self::new(snapshot)
        }
    }

    /// Steps still to be asked. Pre-filled backend and chain type are skipped.
    pub fn steps(&self) -> Vec<CreationStep> {
        CreationStep::ALL
            .into_iter()
            .filter(|step| match step {
                CreationStep::Backend => self.backend.is_none(),
                CreationStep::ChainType => self.chain_type.is_none(),
                _ => true,
            })
            .collect()
    }
}

impl Workflow<'_> {
    pub(super) async fn create_blockchain(&mut self, draft: BlockchainDraft) -> Result<State> {
        if draft.clouds.is_empty() {
            return Err(WorkflowError::NoCloud);
        }
        let steps = draft.steps();
        // An imported bundle already fixes backend and chain type
        let backends = if steps
            .iter()
            .any(|step| matches!(step, CreationStep::Backend | CreationStep::ChainType))
        {
            self.registry.backends_info().await?
        } else {
            Backends::new()
        };

        let mut new = NewBlockchain {
            backend: draft.backend.clone().unwrap_or_default(),
            chain_type: draft.chain_type.clone().unwrap_or_default(),
            genesis: draft.genesis.clone(),
            network_id: draft.network_id,
            external_bootnodes: draft.external_bootnodes.clone(),
            ..Default::default()
        };

        for step in steps {
            let Some(value) = self.ask_step(step, &draft, &new, &backends).await? else {
                tracing::info!(?step, "Blockchain creation abandoned");
                return Ok(State::MainMenu);
            };
            step.apply(&mut new, value);
        }

        let name = new.name.clone();
        let request = BlockchainRequest::build(new).await?;
        self.registry.create_blockchain(&request).await?;

        self.console
            .alert(&format!("Blockchain '{}' has been requested.", name))?;
        Ok(State::MainMenu)
    }

    /// Ask one creation step until it gets a valid answer. `None` when dismissed.
    async fn ask_step(
        &mut self,
        step: CreationStep,
        draft: &BlockchainDraft,
        new: &NewBlockchain,
        backends: &Backends,
    ) -> Result<Option<String>> {
        let title = step.label();

        loop {
            let answer = match step {
                CreationStep::Name | CreationStep::JumpboxKeyFile => {
                    self.console.prompt(title, "")?
                }
                CreationStep::Cloud => self
                    .choose(title, &draft.clouds, Cloud::label)?
                    .map(|cloud| cloud.id),
                CreationStep::Backend => {
                    let names: Vec<String> = backends.keys().cloned().collect();
                    self.choose(title, &names, String::clone)?
                }
                CreationStep::ChainType => {
                    let info = backends
                        .get(&new.backend)
                        .ok_or_else(|| WorkflowError::UnknownBackend(new.backend.clone()))?;
                    self.choose(title, &info.chain_types, String::clone)?
                }
                CreationStep::MiningAccount => {
                    let default = draft.addresses.first().map(String::as_str).unwrap_or("");
                    self.console.prompt(title, default)?
                }
                CreationStep::ControllerFlavour => {
                    let flavours = self.registry.node_flavours(&new.cloud_id).await?;
                    self.choose(title, &flavours, String::clone)?
                }
                CreationStep::Network => {
                    let networks = self.registry.networks(&new.cloud_id).await?;
                    self.choose(title, &networks, String::clone)?
                }
                CreationStep::Jumpbox => {
                    let instances = self.registry.instances(&new.cloud_id).await?;
                    self.choose(title, &instances, String::clone)?
                }
            };

            let Some(answer) = answer else {
                return Ok(None);
            };
            match step.validate(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e @ WorkflowError::Validation(_)) => self.console.alert(&e.to_string())?,
                Err(e) => return Err(e),
            }
        }
    }

    pub(super) async fn list_blockchains(&mut self, blockchains: Vec<Blockchain>) -> Result<State> {
        let Some(choice) = self.choose("Choose a blockchain", &blockchains, Blockchain::label)?
        else {
            return Ok(State::MainMenu);
        };

        let blockchain = self.registry.get_blockchain(&choice.id).await?;
        Ok(State::BlockchainSelected(blockchain))
    }

    pub(super) async fn blockchain_selected(&mut self, blockchain: Blockchain) -> Result<State> {
        let Some(action) = self.choose("Choose an action", &BlockchainAction::ALL, |a| {
            a.label().to_string()
        })?
        else {
            return Ok(State::MainMenu);
        };

        match action {
            BlockchainAction::AddNode => Ok(State::NodeCreation(blockchain)),
            BlockchainAction::RemoveBlockchain => self.remove_blockchain(blockchain).await,
            BlockchainAction::Export => Ok(State::Exporting(blockchain)),
            BlockchainAction::ListNodes => Ok(State::NodeList(blockchain)),
            BlockchainAction::Info => {
                self.console.alert(&pretty_json(&blockchain)?)?;
                Ok(State::BlockchainSelected(blockchain))
            }
        }
    }

    async fn remove_blockchain(&mut self, blockchain: Blockchain) -> Result<State> {
        let question = format!(
            "Are you sure that you want to remove the blockchain '{}'?",
            blockchain.id
        );
        if !self.console.confirm(&question)? {
            tracing::debug!(id = %blockchain.id, "Blockchain removal declined");
            return Ok(State::BlockchainSelected(blockchain));
        }

        let result = self.registry.remove_blockchain(&blockchain).await?;
        let mut message = format!("Blockchain '{}' has been removed.", blockchain.label());
        if !result.is_null() {
            message.push_str("\n\n");
            message.push_str(&pretty_json(&result)?);
        }
        self.console.alert(&message)?;
        Ok(State::MainMenu)
    }

    pub(super) async fn export_blockchain(&mut self, blockchain: Blockchain) -> Result<State> {
        let Some(path) = self.ask_required("Enter a path for the export", "")? else {
            return Ok(State::BlockchainSelected(blockchain));
        };
        let destination = PathBuf::from(path);
        BundleCodec::check_destination(&destination)?;

        let nodes = self.registry.list_nodes(&blockchain).await?;
        let items: Vec<String> = nodes.iter().map(Node::label).collect();
        let Some(selected) = self
            .console
            .checklist("Select all externally available nodes", &items)?
        else {
            return Ok(State::BlockchainSelected(blockchain));
        };

        let mut bootnodes = Vec::new();
        for index in selected {
            let Some(listed) = nodes.get(index) else {
                continue;
            };
            let node = self.registry.get_node(&blockchain, &listed.id).await?;
            let node_id = node
                .eth_node_id()
                .ok_or_else(|| WorkflowError::MissingNodeId(node.label()))?;
            let node_id = Enode::validate_node_id(node_id)?;

            let Some(enode) = self.ask_enode(&node, node_id)? else {
                return Ok(State::BlockchainSelected(blockchain));
            };
            bootnodes.push(enode.to_string());
        }

        let bundle = Bundle::from_blockchain(&blockchain, bootnodes);
        self.codec
            .export(&blockchain.name, &bundle, &destination)
            .await?;

        self.console.alert(&format!(
            "Config and scripts written to {}",
            destination.display()
        ))?;
        Ok(State::BlockchainSelected(blockchain))
    }

    /// Ask for the external IP of `node` until it parses
    fn ask_enode(&mut self, node: &Node, node_id: &str) -> Result<Option<Enode>> {
        let title = format!("Enter externally available ip for: {}", node.label());

        loop {
            let Some(ip) = self.console.prompt(&title, "")? else {
                return Ok(None);
            };
            match Enode::from_parts(node_id, &ip) {
                Ok(enode) => return Ok(Some(enode)),
                Err(e @ ModelError::InvalidIp(_)) => self.console.alert(&e.to_string())?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub(super) async fn import_blockchain(&mut self, snapshot: Snapshot) -> Result<State> {
        let Some(path) = self.ask_required("Enter the path with the config", "")? else {
            return Ok(State::MainMenu);
        };

        let bundle = self.codec.import(Path::new(&path)).await?;
        Ok(State::BlockchainCreation(BlockchainDraft::from_bundle(
            &snapshot, bundle,
        )))
    }
}
