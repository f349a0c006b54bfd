//! Operator CLI: the tasks a deployment runs against the database directly
//! rather than through the HTTP surface.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use sqlx::{Executor, PgPool};

use crate::models::Role;
use crate::store::users::{self, AdminUserUpdate};

#[derive(Parser)]
#[command(name = "storefront-admin")]
#[command(about = "Operator tasks for the storefront database")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Promote an existing user to the admin role")]
    PromoteAdmin {
        #[arg(long)]
        email: String,
    },

    #[command(about = "Run a SQL seed file against the database")]
    Seed {
        #[arg(long, default_value = "seed-data.sql")]
        file: PathBuf,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = crate::config::config();
    let pool = crate::db::connect(&config.database).await?;
    crate::db::run_migrations(&pool).await?;

    match cli.command {
        Commands::PromoteAdmin { email } => promote_admin(&pool, &email).await,
        Commands::Seed { file } => seed(&pool, &file).await,
    }
}

async fn promote_admin(pool: &PgPool, email: &str) -> anyhow::Result<()> {
    let Some(user) = users::find_by_email(pool, email).await? else {
        bail!("user {} not found; they need to sign up first", email);
    };

    if user.role.is_admin() {
        println!("{} is already {}", user.email, user.role);
        return Ok(());
    }

    let update = AdminUserUpdate {
        role: Some(Role::Admin),
        ..Default::default()
    };
    users::admin_update(pool, user.id, &update).await?;

    println!("{} promoted to admin", user.email);
    Ok(())
}

async fn seed(pool: &PgPool, file: &Path) -> anyhow::Result<()> {
    let sql = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read seed file {}", file.display()))?;

    // Simple query protocol; seed files hold many statements
    pool.execute(sql.as_str())
        .await
        .context("seed script failed")?;

    for table in ["categories", "products", "product_images"] {
        let count_sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = sqlx::query_scalar(&count_sql).fetch_one(pool).await?;
        println!("{:>6}  {}", count, table);
    }

    println!("seed complete");
    Ok(())
}
