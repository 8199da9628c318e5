//! Local account creation and listing

use super::{Result, State, Workflow, pretty_json};

impl Workflow<'_> {
    pub(super) async fn create_account(&mut self) -> Result<State> {
        let password = loop {
            let Some(first) = self.console.password("Enter password")? else {
                return Ok(State::MainMenu);
            };
            let Some(second) = self.console.password("Repeat password")? else {
                return Ok(State::MainMenu);
            };

            if first != second {
                self.console.alert("Passwords are not the same!")?;
            } else if first.is_empty() {
                self.console.alert("The password must not be empty.")?;
            } else {
                break first;
            }
        };

        let (address, keyfile) = self.keystore.create_account(&password).await?;

        self.console.alert(&format!(
            "The address for the new account is:\n\n{}\n\n\
             The json data is stored under:\n\n{}\n\n\
             ATTENTION: It is important to remember the password and the account \
             and to keep the json file safe.",
            address,
            keyfile.display()
        ))?;
        Ok(State::MainMenu)
    }

    pub(super) async fn list_accounts(&mut self, addresses: Vec<String>) -> Result<State> {
        let Some(address) = self.choose("Choose an account", &addresses, String::clone)? else {
            return Ok(State::MainMenu);
        };

        match self.keystore.get_account(&address).await? {
            Some(account) => self.console.alert(&pretty_json(&account.raw)?)?,
            None => self
                .console
                .alert(&format!("Account {} not found.", address))?,
        }
        Ok(State::AccountList(addresses))
    }
}
