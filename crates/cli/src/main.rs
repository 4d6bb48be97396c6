use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use smile_cli::render::{render_appointment, render_list, render_procedures, render_record};
use smile_cli::{config_from_env, init_tracing, login_hint, parse_assignment};
use smile_client::HttpResources;
use smile_core::{
    logout, ClientError, CoreConfig, LoadState, RecordId, RemoteResources, ResourceKind, ResourceList, Session,
    TokenStore,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "smile")]
#[command(about = "Bright Smile dental clinic administration")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored access token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Forget the stored access token
    Logout,
    /// List every record of a resource
    List {
        /// appointments, patients, doctors, clinics or affiliations
        resource: ResourceKind,
    },
    /// Show one record, fetched fresh from the server
    Show { resource: ResourceKind, id: RecordId },
    /// Create a record
    Add {
        resource: ResourceKind,
        /// Field value as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Replace a record; fields not given keep their current values
    Update {
        resource: ResourceKind,
        id: RecordId,
        /// Field value as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Delete a record
    Delete { resource: ResourceKind, id: RecordId },
    /// List the procedures appointments can be booked for
    Procedures,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Store a token for subsequent commands
    Set { token: String },
    /// Show whether a token is stored and when it expires
    Show,
}

struct Connection {
    remote: Arc<HttpResources>,
    session: Arc<Session>,
}

impl Connection {
    fn open(cfg: &CoreConfig) -> anyhow::Result<Self> {
        let session = TokenStore::new(cfg.token_file()).session()?;
        Ok(Self {
            remote: Arc::new(HttpResources::new(cfg)?),
            session: Arc::new(session),
        })
    }

    fn list(&self, kind: ResourceKind) -> ResourceList<HttpResources> {
        ResourceList::new(self.remote.clone(), self.session.clone(), kind)
    }

    /// List loaded from the server; a failed load ends the command with its message.
    async fn loaded(&self, kind: ResourceKind) -> anyhow::Result<ResourceList<HttpResources>> {
        let mut list = self.list(kind);
        list.load().await;
        if let LoadState::Failed(message) = list.load_state() {
            bail!("{}", message);
        }
        Ok(list)
    }
}

fn apply_fields<R>(list: &mut ResourceList<R>, fields: Vec<(String, String)>) -> anyhow::Result<()>
where
    R: RemoteResources + ?Sized,
{
    for (name, value) in fields {
        list.set_field(&name, value)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    let cfg = config_from_env().context("invalid configuration")?;

    let result = run(cli, &cfg).await;
    if let Err(e) = &result {
        if let Some(hint) = e.downcast_ref::<ClientError>().and_then(login_hint) {
            tracing::warn!("{}", hint);
        }
    }
    result
}

async fn run(cli: Cli, cfg: &CoreConfig) -> anyhow::Result<()> {
    let store = TokenStore::new(cfg.token_file());

    match cli.command {
        Some(Commands::Token { action }) => match action {
            TokenAction::Set { token } => {
                let session = Session::new(&token)?;
                store.save(&token)?;
                tracing::info!("stored token at {}", store.path().display());
                match session.expires_at() {
                    Some(exp) => println!("Token stored; expires at {}", exp),
                    None => println!("Token stored"),
                }
            }
            TokenAction::Show => match store.load()? {
                None => println!("No token stored at {}", store.path().display()),
                Some(token) => {
                    let session = Session::new(token)?;
                    match session.expires_at() {
                        Some(exp) if session.is_expired_at(chrono::Utc::now()) => {
                            println!("Token expired at {}", exp)
                        }
                        Some(exp) => println!("Token valid until {}", exp),
                        None => println!("Token stored (no expiry)"),
                    }
                }
            },
        },
        Some(Commands::Logout) => {
            logout(&store)?;
            println!("Logged out");
        }
        Some(Commands::List { resource }) => {
            let ctx = Connection::open(cfg)?;
            let mut list = ctx.list(resource);
            list.load().await;
            tracing::debug!("rendering {} {} records", list.records().len(), resource);
            print!("{}", render_list(&list));
        }
        Some(Commands::Show { resource, id }) => {
            let ctx = Connection::open(cfg)?;
            let mut list = ctx.list(resource);
            list.load_lookups().await;
            if resource == ResourceKind::Appointment {
                print!("{}", render_appointment(&list.appointment_details(id).await?));
            } else {
                let record = list.fetch_one(id).await?;
                print!("{}", render_record(&list, &record));
            }
        }
        Some(Commands::Add { resource, fields }) => {
            let ctx = Connection::open(cfg)?;
            let mut list = ctx.list(resource);
            list.begin_create();
            apply_fields(&mut list, fields)?;
            let id = list.submit().await?;
            tracing::info!("created {} {} via {}", resource, id, cfg.api_base());
            println!("Created {} {}", resource.spec().singular, id);
        }
        Some(Commands::Update {
            resource,
            id,
            fields,
        }) => {
            let ctx = Connection::open(cfg)?;
            let mut list = ctx.loaded(resource).await?;
            list.begin_edit(id)?;
            apply_fields(&mut list, fields)?;
            list.submit().await?;
            tracing::info!("updated {} {} via {}", resource, id, cfg.api_base());
            println!("Updated {} {}", resource.spec().singular, id);
        }
        Some(Commands::Delete { resource, id }) => {
            let ctx = Connection::open(cfg)?;
            ctx.list(resource).delete(id).await?;
            tracing::info!("deleted {} {} via {}", resource, id, cfg.api_base());
            println!("Deleted {} {}", resource.spec().singular, id);
        }
        Some(Commands::Procedures) => {
            let ctx = Connection::open(cfg)?;
            let procedures = ctx.remote.procedures(&ctx.session).await?;
            print!("{}", render_procedures(&procedures));
        }
        None => {
            println!("No command given. Use --help for usage.");
        }
    }

    Ok(())
}
