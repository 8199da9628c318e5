//! Deployment scripts shipped inside a bundle
//!
//! Scripts are rendered from fixed templates, so identical inputs always
//! produce byte-identical files.

use crate::error::Result;
use crate::manifest::Bundle;
use tera::{Context, Tera};

pub const RUN_NODE_SCRIPT: &str = "run-geth.sh";
pub const ATTACH_SCRIPT: &str = "attach-geth.sh";
pub const GUI_CLIENT_SCRIPT: &str = "run-mist.sh";

const HEADER: &str = r#"#!/bin/bash
set -e # Exit on error

datadir="{{ node_data_root }}/{{ dir_name }}"
ipc="$datadir/geth.ipc"

"#;

const REQUIRE_IPC: &str = r#"if [ ! -S "$ipc" ]
then
    whiptail --title "Error" --msgbox "'run-geth.sh' must run before this script!" 8 78
    exit 1
fi
"#;

const RUN_NODE: &str = r#"cd "$(dirname "$0")"

parameters=""

if (whiptail --title "MetaMask" --yesno "Do you want to use MetaMask?" 8 78) then
    metamask_id=$(whiptail --inputbox "Enter MetaMask's Chrome extension id.\n\nTo find the id, open Chrome, navigate to Preferences -> More tools -> Extensions and enable 'Developer mode'" 11 78 --title "MetaMask" 3>&1 1>&2 2>&3)
    parameters="--rpccorsdomain chrome-extension://$metamask_id"
fi

geth --datadir "$datadir" init genesis.json
geth --datadir "$datadir"{% if network_id is defined %} --networkid {{ network_id }}{% endif %}{% if bootnodes %} --bootnodes {{ bootnodes | join(sep=",") }}{% endif %} --rpc $parameters
"#;

const ATTACH: &str = r#"geth attach "ipc://$ipc"
"#;

const GUI_CLIENT: &str = r#"mist --rpc "$ipc"
"#;

/// Settings that shape the generated scripts
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptOptions {
    /// Root of the node data directories, expanded by the shell
    pub node_data_root: String,

    /// Emit the GUI client script
    pub gui_client: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            node_data_root: "$HOME/.catena/ethereum".to_string(),
            gui_client: true,
        }
    }
}

/// A rendered script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub file_name: &'static str,
    pub content: String,
}

/// Render the script set for a blockchain named `name`
pub fn render_scripts(options: &ScriptOptions, name: &str, bundle: &Bundle) -> Result<Vec<Script>> {
    let mut context = Context::new();
    context.insert("node_data_root", &options.node_data_root);
    context.insert("dir_name", &dir_name(name));
    context.insert("bootnodes", &bundle.external_bootnodes);
    if let Some(network_id) = bundle.chain_config.network_id {
        context.insert("network_id", &network_id);
    }

    let mut templates = vec![
        (RUN_NODE_SCRIPT, format!("{}{}", HEADER, RUN_NODE)),
        (ATTACH_SCRIPT, format!("{}{}{}", HEADER, REQUIRE_IPC, ATTACH)),
    ];
    if options.gui_client {
        templates.push((GUI_CLIENT_SCRIPT, format!("{}{}{}", HEADER, REQUIRE_IPC, GUI_CLIENT)));
    }

    templates
        .into_iter()
        .map(|(file_name, template)| {
            let content = Tera::one_off(&template, &context, false)?;
            Ok(Script { file_name, content })
        })
        .collect()
}

/// Directory name for a blockchain: anything outside `[A-Za-z0-9._-]` becomes `_`
fn dir_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ChainManifest;

    fn bundle(network_id: Option<u64>, bootnodes: &[&str]) -> Bundle {
        Bundle {
            genesis: serde_json::json!({"nonce": "0x42"}),
            external_bootnodes: bootnodes.iter().map(|s| s.to_string()).collect(),
            chain_config: ChainManifest {
                backend: "ethereum".to_string(),
                network_id,
                chain_type: "poa".to_string(),
            },
        }
    }

    #[test]
    fn test_render_run_script() {
        let scripts = render_scripts(
            &ScriptOptions::default(),
            "testnet",
            &bundle(
                Some(4242),
                &[
                    "enode://abc@203.0.113.5:30303",
                    "enode://def@203.0.113.6:30303",
                ],
            ),
        )
        .unwrap();

        let run = &scripts[0];
        assert_eq!(run.file_name, RUN_NODE_SCRIPT);
        assert!(run.content.starts_with("#!/bin/bash\nset -e # Exit on error\n"));
        assert!(
            run.content
                .contains("datadir=\"$HOME/.catena/ethereum/testnet\"\n")
        );
        assert!(run.content.contains(
            "geth --datadir \"$datadir\" --networkid 4242 --bootnodes enode://abc@203.0.113.5:30303,enode://def@203.0.113.6:30303 --rpc $parameters\n"
        ));
    }

    #[test]
    fn test_render_without_network_id_or_bootnodes() {
        let scripts =
            render_scripts(&ScriptOptions::default(), "testnet", &bundle(None, &[])).unwrap();

        assert!(
            scripts[0]
                .content
                .contains("geth --datadir \"$datadir\" --rpc $parameters\n")
        );
    }

    #[test]
    fn test_attach_and_gui_scripts() {
        let scripts =
            render_scripts(&ScriptOptions::default(), "testnet", &bundle(Some(1), &[])).unwrap();

        let names: Vec<_> = scripts.iter().map(|s| s.file_name).collect();
        assert_eq!(names, vec![RUN_NODE_SCRIPT, ATTACH_SCRIPT, GUI_CLIENT_SCRIPT]);
        assert!(scripts[1].content.contains("if [ ! -S \"$ipc\" ]"));
        assert!(scripts[1].content.ends_with("geth attach \"ipc://$ipc\"\n"));
        assert!(scripts[2].content.ends_with("mist --rpc \"$ipc\"\n"));

        let without_gui = render_scripts(
            &ScriptOptions {
                gui_client: false,
                ..Default::default()
            },
            "testnet",
            &bundle(Some(1), &[]),
        )
        .unwrap();
        assert_eq!(without_gui.len(), 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = bundle(Some(7), &["enode://abc@10.0.0.1:30303"]);
        let first = render_scripts(&ScriptOptions::default(), "net one", &input).unwrap();
        let second = render_scripts(&ScriptOptions::default(), "net one", &input).unwrap();

        assert_eq!(first, second);
        assert!(first[0].content.contains("/net_one\""));
    }

    #[test]
    fn test_dir_name() {
        assert_eq!(dir_name("test-net_1.0"), "test-net_1.0");
        assert_eq!(dir_name("a b/c$d"), "a_b_c_d");
    }
}
