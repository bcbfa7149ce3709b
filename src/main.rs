use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use todo_client::config::ClientConfig;
use todo_client::error::{ApiError, ConfigError};
use todo_client::net::api::ApiClient;
use todo_client::net::types::UpdateTodo;
use todo_client::router::{Navigation, Router};
use todo_client::services::{auth, todos};
use todo_client::state::auth::AuthStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("login required: navigation to {0} redirected to {1}")]
    LoginRequired(&'static str, &'static str),
    #[error("no route matches {0}")]
    NoRoute(String),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "todo-cli", about = "Todo API client")]
struct Cli {
    /// Overrides `TODO_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "TODO_TOKEN")]
    token: Option<String>,

    #[arg(long, env = "TODO_USERNAME", default_value = "")]
    username: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the issued token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "TODO_PASSWORD")]
        password: String,
    },
    Todos(TodosCommand),
    /// Show where navigating to PATH would land under the current session.
    Route { path: String },
}

#[derive(Args, Debug)]
struct TodosCommand {
    #[command(subcommand)]
    command: TodosSubcommand,
}

#[derive(Subcommand, Debug)]
enum TodosSubcommand {
    List,
    Create {
        title: String,
    },
    Get {
        id: i64,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    Delete {
        id: i64,
    },
}

struct CliContext {
    auth: AuthStore,
    router: Router,
    client: ApiClient,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match cli.base_url.as_deref() {
        Some(base_url) => ClientConfig { base_url: ClientConfig::new(base_url)?.base_url, ..ClientConfig::from_env()? },
        None => ClientConfig::from_env()?,
    };

    let auth = AuthStore::new();
    if let Some(token) = cli.token.filter(|t| !t.is_empty()) {
        auth.set_auth(token, cli.username);
    }
    let ctx = CliContext { router: Router::new(auth.clone()), client: ApiClient::new(&config, auth.clone())?, auth };

    match cli.command {
        Command::Login { username, password } => run_login(&ctx, &username, &password).await,
        Command::Todos(command) => run_todos(&ctx, command).await,
        Command::Route { path } => run_route(&ctx, &path),
    }
}

async fn run_login(ctx: &CliContext, username: &str, password: &str) -> Result<(), CliError> {
    let response = auth::login(&ctx.client, username, password).await?;
    println!("{}", response.token);
    Ok(())
}

async fn run_todos(ctx: &CliContext, command: TodosCommand) -> Result<(), CliError> {
    if let Navigation::Redirect(to) = ctx.router.navigate("/") {
        return Err(CliError::LoginRequired("/", to.path));
    }

    match command.command {
        TodosSubcommand::List => print_json(&todos::list(&ctx.client).await?),
        TodosSubcommand::Create { title } => print_json(&todos::create(&ctx.client, &title).await?),
        TodosSubcommand::Get { id } => print_json(&todos::get(&ctx.client, id).await?),
        TodosSubcommand::Update { id, title, completed } => {
            let update = UpdateTodo { title, completed };
            print_json(&todos::update(&ctx.client, id, &update).await?)
        }
        TodosSubcommand::Delete { id } => {
            todos::delete(&ctx.client, id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

fn run_route(ctx: &CliContext, path: &str) -> Result<(), CliError> {
    let who = ctx.auth.username().filter(|u| !u.is_empty()).unwrap_or_else(|| "anonymous".to_owned());
    match ctx.router.navigate(path) {
        Navigation::Proceed(route) => println!("{who}: proceed to {} ({})", route.path, route.name),
        Navigation::Redirect(route) => println!("{who}: redirect to {} ({})", route.path, route.name),
        Navigation::NotFound(path) => return Err(CliError::NoRoute(path)),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
