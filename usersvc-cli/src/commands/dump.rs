//! Print every stored user
//!
//! Quick look at the database without starting the server.

use anyhow::{Context, Result};
use clap::Parser;

use usersvc_server::{db, User, UserRepo};

use crate::config::UsersvcConfig;

/// Arguments for the dump command
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Print a JSON array instead of one line per user
    #[arg(long)]
    pub json: bool,
}

pub async fn run_dump(args: DumpArgs, config: UsersvcConfig) -> Result<()> {
    let database_url = args.database_url.unwrap_or(config.database.url);

    let pool = db::open(&database_url, 1)
        .await
        .with_context(|| format!("Failed to open database at {database_url}"))?;

    let users = UserRepo::new(&pool)
        .list_all()
        .await
        .context("Failed to read users")?;
    pool.close().await;

    if args.json {
        let json = serde_json::to_string_pretty(&users).context("Failed to serialize users")?;
        println!("{}", json);
        return Ok(());
    }

    for user in &users {
        println!("{}", format_row(user));
    }
    println!("{} user(s)", users.len());

    Ok(())
}

fn format_row(user: &User) -> String {
    let age = user
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{}\t{}\t{}\t{}", user.id, user.email, user.name, age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_shows_dash_for_missing_age() {
        let user = User {
            id: 3,
            email: "a@x.com".into(),
            name: "A".into(),
            age: None,
        };
        assert_eq!(format_row(&user), "3\ta@x.com\tA\t-");
    }
}
