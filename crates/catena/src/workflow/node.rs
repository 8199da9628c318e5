//! Node listing, creation and removal

use super::menu::{NodeAction, node_actions};
use super::{Result, State, Workflow, WorkflowError, pretty_json};
use catena_core::{Blockchain, Node};
use catena_registry::NodeRequest;

/// Proposed name for a new node: `<blockchain>_<type>_<n>`, where `n` starts
/// at the current node count and is bumped past names already in use.
pub fn recommended_node_name(blockchain: &str, node_type: &str, nodes: &[Node]) -> String {
    let mut count = nodes.len();
    loop {
        let name = format!("{}_{}_{}", blockchain, node_type, count);
        if !nodes.iter().any(|node| node.name == name) {
            return name;
        }
        count += 1;
    }
}

impl Workflow<'_> {
    pub(super) async fn list_nodes(&mut self, blockchain: Blockchain) -> Result<State> {
        let nodes = self.registry.list_nodes(&blockchain).await?;
        if nodes.is_empty() {
            self.console.alert("No nodes.")?;
            return Ok(State::BlockchainSelected(blockchain));
        }

        let Some(choice) = self.choose("Choose a node", &nodes, Node::label)? else {
            return Ok(State::BlockchainSelected(blockchain));
        };

        let node = self.registry.get_node(&blockchain, &choice.id).await?;
        Ok(State::NodeSelected(blockchain, node))
    }

    pub(super) async fn node_selected(&mut self, blockchain: Blockchain, node: Node) -> Result<State> {
        let actions = node_actions(&node);
        let Some(action) = self.choose("Choose an action", &actions, |a| a.label().to_string())?
        else {
            return Ok(State::NodeList(blockchain));
        };

        match action {
            NodeAction::Info => {
                self.console.alert(&pretty_json(&node)?)?;
                Ok(State::NodeSelected(blockchain, node))
            }
            NodeAction::RemoveNode => self.remove_node(blockchain, node).await,
        }
    }

    async fn remove_node(&mut self, blockchain: Blockchain, node: Node) -> Result<State> {
        let question = format!(
            "Are you sure that you want to remove the node '{}' from blockchain '{}'?",
            node.id, blockchain.id
        );
        if !self.console.confirm(&question)? {
            tracing::debug!(node = %node.id, "Node removal declined");
            return Ok(State::NodeSelected(blockchain, node));
        }

        self.registry.remove_node(&blockchain, &node).await?;
        self.console
            .alert(&format!("Node '{}' has been removed.", node.label()))?;
        Ok(State::BlockchainSelected(blockchain))
    }

    pub(super) async fn create_node(&mut self, blockchain: Blockchain) -> Result<State> {
        let backends = self.registry.backends_info().await?;
        let info = backends
            .get(&blockchain.backend)
            .ok_or_else(|| WorkflowError::UnknownBackend(blockchain.backend.clone()))?;

        let Some(node_type) = self.choose("Choose a node type", &info.node_types, String::clone)?
        else {
            return Ok(State::BlockchainSelected(blockchain));
        };

        let flavours = self.registry.node_flavours(&blockchain.cloud_id).await?;
        let Some(flavour) = self.choose("Choose a flavour", &flavours, String::clone)? else {
            return Ok(State::BlockchainSelected(blockchain));
        };

        let nodes = self.registry.list_nodes(&blockchain).await?;
        let recommended = recommended_node_name(&blockchain.name, &node_type, &nodes);
        let Some(name) = self.ask_required("Enter a name for the new node", &recommended)? else {
            return Ok(State::BlockchainSelected(blockchain));
        };

        let request = NodeRequest {
            node_type,
            flavour,
            name,
        };
        self.registry.add_node(&blockchain, &request).await?;

        self.console
            .alert(&format!("Node '{}' has been requested.", request.name))?;
        Ok(State::BlockchainSelected(blockchain))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    fn named(name: &str) -> Node {
        Node {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_recommended_node_name() {
        assert_eq!(recommended_node_name("net", "miner", &[]), "net_miner_0");
        assert_eq!(
            recommended_node_name("net", "miner", &[named("net_controller_0")]),
            "net_miner_1"
        );
    }

    #[test]
    fn test_recommended_node_name_skips_used_names() {
        let nodes = vec![
            named("net_controller_0"),
            named("net_miner_2"),
            named("net_miner_3"),
        ];
        assert_eq!(recommended_node_name("net", "miner", &nodes), "net_miner_4");
    }

    #[tokio::test]
    async fn test_controller_offers_only_info() {
        let harness = Harness::new();
        let registry = FakeRegistry::with_blockchain();
        let mut console = ScriptedConsole::new([
            Reply::Select(0), // List blockchains
            Reply::Select(0), // testnet
            Reply::Select(3), // List nodes
            Reply::Select(0), // controller
        ]);

        harness.run(&registry, &mut console).await.unwrap();

        assert_eq!(console.menus[3].1, vec!["net_controller_0 (n-1)", "net_miner_1 (n-2)"]);
        assert_eq!(console.menus[4].1, vec!["Info"]);
        assert_eq!(registry.count("remove_node"), 0);
    }

    #[tokio::test]
    async fn test_remove_node_confirmed() {
        let harness = Harness::new();
        let registry = FakeRegistry::with_blockchain();
        let mut console = ScriptedConsole::new([
            Reply::Select(0), // List blockchains
            Reply::Select(0), // testnet
            Reply::Select(3), // List nodes
            Reply::Select(1), // miner
            Reply::Select(0), // Remove node
            Reply::Confirm(true),
        ]);

        harness.run(&registry, &mut console).await.unwrap();

        assert_eq!(console.menus[4].1, vec!["Remove node", "Info"]);
        assert_eq!(registry.count("remove_node"), 1);
        assert_eq!(registry.count("remove_node n-2"), 1);
        assert!(console.alerts[0].contains("removed"));
    }

    #[tokio::test]
    async fn test_remove_node_declined() {
        let harness = Harness::new();
        let registry = FakeRegistry::with_blockchain();
        let mut console = ScriptedConsole::new([
            Reply::Select(0), // List blockchains
            Reply::Select(0), // testnet
            Reply::Select(3), // List nodes
            Reply::Select(1), // miner
            Reply::Select(0), // Remove node
            Reply::Confirm(false),
        ]);

        harness.run(&registry, &mut console).await.unwrap();

        assert_eq!(registry.count("remove_node"), 0);
        assert!(console.alerts.is_empty());
        // Declining goes back to the same node menu
        assert_eq!(console.menus[5].1, console.menus[4].1);
    }

    #[tokio::test]
    async fn test_add_node() {
        let harness = Harness::new();
        let registry = FakeRegistry::with_blockchain();
        let mut console = ScriptedConsole::new([
            Reply::Select(0), // List blockchains
            Reply::Select(0), // testnet
            Reply::Select(0), // Add node
            Reply::Select(1), // bootnode
            Reply::Select(0), // flavour
            Reply::text("testnet_bootnode_2"),
        ]);

        harness.run(&registry, &mut console).await.unwrap();

        assert_eq!(console.menus[3].1, vec!["miner", "bootnode"]);
        assert_eq!(
            console.prompts[0],
            (
                "Enter a name for the new node".to_string(),
                "testnet_bootnode_2".to_string()
            )
        );

        let added = registry.added_nodes.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].node_type, "bootnode");
        assert_eq!(added[0].flavour, "m1.small");
        assert_eq!(added[0].name, "testnet_bootnode_2");
    }

    #[tokio::test]
    async fn test_node_failure_returns_to_blockchain_menu() {
        let harness = Harness::new();
        let mut registry = FakeRegistry::with_blockchain();
        registry.backends.clear();
        let mut console = ScriptedConsole::new([
            Reply::Select(0), // List blockchains
            Reply::Select(0), // testnet
            Reply::Select(0), // Add node
        ]);

        harness.run(&registry, &mut console).await.unwrap();

        assert!(console.alerts[0].contains("Unknown blockchain backend: ethereum"));
        assert_eq!(console.menus[3].1, console.menus[2].1);
        assert_eq!(registry.count("add_node"), 0);
    }
}
