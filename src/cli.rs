use clap::Parser;
use manager_editor::{ApiConfig, Field, ManagerType, RouteId};
use std::time::Duration;

#[derive(Parser)]
#[command(version, about = "Edit a manager record on the user service")]
pub struct Args {
    #[arg(long, env = "MANAGER_ID", help = "Identifier of the manager to edit")]
    pub id: RouteId,

    #[arg(long = "api-host", help = "Overrides MANAGER_API_HOST")]
    pub api_host: Option<String>,

    #[arg(long = "api-port", help = "Overrides MANAGER_API_PORT")]
    pub api_port: Option<u16>,

    #[arg(long = "timeout-ms", help = "Overrides MANAGER_API_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    #[arg(long = "full-name")]
    pub full_name: Option<String>,

    #[arg(long = "contact-number")]
    pub contact_number: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long = "manager-type")]
    pub manager_type: Option<ManagerType>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(
        long = "change-password",
        help = "Open the change-password view instead of submitting"
    )]
    pub change_password: bool,
}

impl Args {
    pub fn edits(&self) -> Vec<(Field, String)> {
        [
            (Field::FullName, self.full_name.clone()),
            (Field::ContactNumber, self.contact_number.clone()),
            (Field::Username, self.username.clone()),
            (Field::ManagerType, self.manager_type.map(|x| x.to_string())),
            (Field::Email, self.email.clone()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|x| (field, x)))
        .collect()
    }

    /// Overlays the connection flags that were given on `config`.
    pub fn apply(&self, mut config: ApiConfig) -> ApiConfig {
        if let Some(host) = &self.api_host {
            config.host = host.clone();
        }
        if let Some(port) = self.api_port {
            config.port = port;
        }
        match self.timeout_ms {
            Some(ms) => config.with_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}
