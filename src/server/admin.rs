//! Administrative subcommands sharing the daemon's configuration surface.

#![expect(
    clippy::print_stdout,
    reason = "administrative output goes to the console"
)]

use anyhow::{Context, Result, bail};

use crate::{
    config::{AppConfig, Commands, CreateSiteArgs, PathsArgs, RevalidateArgs},
    content,
    db::{self, DbConnection, apply_migrations, establish_pool},
    models::{NewSite, Site},
    revalidate::{HttpInvalidator, Invalidator, NullInvalidator, revalidate_paths},
};

/// Execute one administrative subcommand against the configured database.
///
/// # Errors
///
/// Returns any error raised while connecting to the database or running the
/// command itself.
pub async fn run_command(command: Commands, config: &AppConfig) -> Result<()> {
    let pool = establish_pool(&config.database)
        .await
        .context("failed to build database pool")?;
    let mut conn = pool
        .get()
        .await
        .context("failed to get database connection")?;
    apply_migrations(&mut conn, &config.database)
        .await
        .context("failed to apply migrations")?;
    match command {
        Commands::CreateSite(args) => create_site(&mut conn, &args).await,
        Commands::Sites => print_sites(&mut conn).await,
        Commands::Paths(args) => print_paths(&mut conn, &args).await,
        Commands::Revalidate(args) => revalidate(&mut conn, config, &args).await,
    }
}

async fn print_sites(conn: &mut DbConnection) -> Result<()> {
    for site in db::list_sites(conn).await.context("failed to list sites")? {
        let host = site
            .subdomain
            .or(site.custom_domain)
            .unwrap_or_else(|| "-".to_owned());
        println!("{}\t{}\t{}", site.id, host, site.name);
    }
    Ok(())
}

async fn create_site(conn: &mut DbConnection, args: &CreateSiteArgs) -> Result<()> {
    if args.subdomain.is_none() && args.custom_domain.is_none() {
        bail!("a site needs a subdomain or a custom domain");
    }
    let id = db::create_site(
        conn,
        &NewSite {
            name: &args.name,
            subdomain: args.subdomain.as_deref(),
            custom_domain: args.custom_domain.as_deref(),
        },
    )
    .await
    .context("failed to create site")?;
    println!("site {} created (id {id})", args.name);
    Ok(())
}

async fn print_paths(conn: &mut DbConnection, args: &PathsArgs) -> Result<()> {
    let site = require_site(conn, &args.host).await?;
    for path in content::enumerate_site(conn, &site).await? {
        println!("{path}");
    }
    Ok(())
}

async fn revalidate(
    conn: &mut DbConnection,
    config: &AppConfig,
    args: &RevalidateArgs,
) -> Result<()> {
    let site = require_site(conn, &args.host).await?;
    let Some(paths) =
        content::revalidation_paths_for(conn, &site, &args.category_path).await?
    else {
        bail!("no category at {}", args.category_path);
    };
    let invalidator: Box<dyn Invalidator> = match config.revalidate_endpoint.as_deref() {
        Some(endpoint) => Box::new(HttpInvalidator::new(
            endpoint.parse().context("invalid revalidation endpoint")?,
        )),
        None => Box::new(NullInvalidator),
    };
    let succeeded = revalidate_paths(invalidator.as_ref(), &paths).await;
    println!("revalidated {succeeded}/{} paths", paths.len());
    Ok(())
}

async fn require_site(conn: &mut DbConnection, host: &str) -> Result<Site> {
    db::site_by_host_key(conn, host)
        .await
        .context("site lookup failed")?
        .with_context(|| format!("no site for host {host}"))
}
