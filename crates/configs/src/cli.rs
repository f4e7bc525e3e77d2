//! Command-line flags of the memo server. Flags override file and environment values.

use clap::Parser;

use crate::AppConfig;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "server", about = "Memo CRUD service")]
pub struct ServerArgs {
    /// Port to bind
    #[arg(long = "grpc-port", visible_alias = "port")]
    pub port: Option<u16>,
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Database host, e.g. `localhost:3306`
    #[arg(long = "db-host")]
    pub db_host: Option<String>,
    /// Database user
    #[arg(long = "db-user")]
    pub db_user: Option<String>,
    /// Database password
    #[arg(long = "db-password")]
    pub db_password: Option<String>,
    /// Database schema
    #[arg(long = "db-schema")]
    pub db_schema: Option<String>,
    /// Full database URL (`mysql://...` or `sqlite:...`), replaces the db-* flags
    #[arg(long = "database-url")]
    pub database_url: Option<String>,
    /// Alternate TOML config file
    #[arg(long)]
    pub config: Option<String>,
}

impl ServerArgs {
    pub fn apply_to(&self, cfg: &mut AppConfig) {
        if let Some(port) = self.port { cfg.server.port = port; }
        if let Some(host) = &self.host { cfg.server.host = host.clone(); }
        if let Some(v) = &self.db_host { cfg.database.host = v.clone(); }
        if let Some(v) = &self.db_user { cfg.database.user = v.clone(); }
        if let Some(v) = &self.db_password { cfg.database.password = v.clone(); }
        if let Some(v) = &self.db_schema { cfg.database.schema = v.clone(); }
        if let Some(v) = &self.database_url { cfg.database.url = v.clone(); }
    }
}
