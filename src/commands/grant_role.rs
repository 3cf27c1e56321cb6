//! Grant-role command - Promote a registered user, e.g. to admin.

use std::sync::Arc;

use crate::cli::args::GrantRoleArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{RoleManager, RoleService};

/// Execute the grant-role command
pub async fn execute(args: GrantRoleArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let roles = RoleManager::new(Arc::new(Persistence::new(db.get_connection())));

    let user = roles.grant(&args.email, &args.role).await?;
    println!("{}: {}", user.email, user.roles.join(", "));

    Ok(())
}
