//! Cloud creation and listing

use super::{Result, State, Workflow, WorkflowError, pretty_json, require_value};
use catena_core::Cloud;
use catena_registry::CloudRequest;

const AUTHENTICATION_TITLE: &str = "Authentication (JSON)";

/// Authentication must be a JSON document
fn validate_authentication(answer: &str) -> Result<String> {
    let value = require_value(AUTHENTICATION_TITLE, answer)?;
    serde_json::from_str::<serde_json::Value>(&value).map_err(|e| {
        WorkflowError::Validation(format!("Authentication is not valid JSON: {}", e))
    })?;
    Ok(value)
}

impl Workflow<'_> {
    pub(super) async fn create_cloud(&mut self) -> Result<State> {
        let Some(name) = self.ask_required("Cloud name", "")? else {
            return Ok(State::MainMenu);
        };

        let types = self.registry.cloud_types().await?;
        let Some(cloud_type) = self.choose("Cloud type", &types, String::clone)? else {
            return Ok(State::MainMenu);
        };

        let Some(authentication) =
            self.ask_validated(AUTHENTICATION_TITLE, "", validate_authentication)?
        else {
            return Ok(State::MainMenu);
        };
        let Some(user_data_file) = self
            .console
            .prompt("File for userdata (e.g. cloud-init), if any", "")?
        else {
            return Ok(State::MainMenu);
        };
        let Some(proxy) = self.console.prompt("Enter proxy, if any", "")? else {
            return Ok(State::MainMenu);
        };
        let Some(image) = self.ask_required("Enter the VM image", "")? else {
            return Ok(State::MainMenu);
        };

        let request = CloudRequest::build(
            &cloud_type,
            &name,
            &authentication,
            &image,
            &user_data_file,
            &proxy,
        )
        .await?;
        self.registry.create_cloud(&request).await?;

        self.console
            .alert(&format!("Cloud '{}' has been created.", name))?;
        Ok(State::MainMenu)
    }

    pub(super) fn list_clouds(&mut self, clouds: Vec<Cloud>) -> Result<State> {
        let Some(cloud) = self.choose("Choose a cloud", &clouds, Cloud::label)? else {
            return Ok(State::MainMenu);
        };

        self.console.alert(&pretty_json(&cloud)?)?;
        Ok(State::CloudList(clouds))
    }
}
