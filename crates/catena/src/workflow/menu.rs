//! Main menu derivation

use catena_core::{Blockchain, Cloud};

/// Registry and keystore contents captured once per main menu render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub clouds: Vec<Cloud>,
    pub blockchains: Vec<Blockchain>,
    pub addresses: Vec<String>,
}

/// Actions offered by the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    ListBlockchains,
    CreateBlockchain,
    ListClouds,
    CreateCloud,
    ImportBlockchain,
    CreateAccount,
    ListAccounts,
}

impl MainAction {
    pub fn label(self) -> &'static str {
        match self {
            MainAction::ListBlockchains => "List blockchains",
            MainAction::CreateBlockchain => "Create a new blockchain",
            MainAction::ListClouds => "List clouds",
            MainAction::CreateCloud => "Create a new cloud",
            MainAction::ImportBlockchain => "Create a new blockchain from existing config",
            MainAction::CreateAccount => "Create a new account",
            MainAction::ListAccounts => "List accounts",
        }
    }
}

/// Main menu actions for `snapshot`, in display order.
///
/// Listing actions only appear when there is something to list, and a
/// blockchain can only be created once a cloud exists.
pub fn available_actions(snapshot: &Snapshot) -> Vec<MainAction> {
    let mut actions = Vec::new();

    if !snapshot.blockchains.is_empty() {
        actions.push(MainAction::ListBlockchains);
    }
    if !snapshot.clouds.is_empty() {
        actions.push(MainAction::CreateBlockchain);
        actions.push(MainAction::ListClouds);
    }
    actions.push(MainAction::CreateCloud);
    actions.push(MainAction::ImportBlockchain);
    actions.push(MainAction::CreateAccount);
    if !snapshot.addresses.is_empty() {
        actions.push(MainAction::ListAccounts);
    }

    actions
}

/// Actions for a selected blockchain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockchainAction {
    AddNode,
    RemoveBlockchain,
    Export,
    ListNodes,
    Info,
}

impl BlockchainAction {
    pub const ALL: [BlockchainAction; 5] = [
        BlockchainAction::AddNode,
        BlockchainAction::RemoveBlockchain,
        BlockchainAction::Export,
        BlockchainAction::ListNodes,
        BlockchainAction::Info,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BlockchainAction::AddNode => "Add node",
            BlockchainAction::RemoveBlockchain => "Remove blockchain",
            BlockchainAction::Export => "Export config and scripts",
            BlockchainAction::ListNodes => "List nodes",
            BlockchainAction::Info => "Info",
        }
    }
}

/// Actions for a selected node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    RemoveNode,
    Info,
}

impl NodeAction {
    pub fn label(self) -> &'static str {
        match self {
            NodeAction::RemoveNode => "Remove node",
            NodeAction::Info => "Info",
        }
    }
}

/// Actions for `node`. The controller node can never be removed.
pub fn node_actions(node: &catena_core::Node) -> Vec<NodeAction> {
    if node.is_controller() {
        vec![NodeAction::Info]
    } else {
        vec![NodeAction::RemoveNode, NodeAction::Info]
    }
}
