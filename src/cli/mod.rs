use clap::{Parser, Subcommand};
use cloudbridge_api::client::ApiClient;
use cloudbridge_api::client::service;

use crate::error::{self, Context};
use crate::input;

mod summary;
mod insert;

/// a cli for a CloudBridge server.
///
/// lists the resources held by the server and uploads new files into one of
/// its backing stores. if no command is provided then it will enter
/// interactive mode.
#[derive(Debug, Parser)]
struct Cli {
    /// host name of server
    ///
    /// will be used in a url so the value must be valid for the hostname part
    /// of a url. examples: example.com | 10.0.0.2 | [fd34::2]
    #[arg(short = 'H', long, default_value = "localhost")]
    host: String,

    /// port of server
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// to use https
    ///
    /// will switch to using a secure channel when communicating with a server
    #[arg(short, long)]
    secure: bool,

    /// user agent sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Option<BaseCmds>
}

pub async fn start() -> error::Result {
    let args = Cli::parse();

    let mut client_builder = ApiClient::builder();
    client_builder.secure(args.secure);
    client_builder.port(Some(args.port));

    if let Some(agent) = args.user_agent {
        client_builder.user_agent(agent);
    }

    if !client_builder.host(&args.host) {
        return Err(error::Error::from(format!(
            "cannot set host to the value provided. {}",
            args.host
        )));
    }

    let client = client_builder.build().context("failed to create api client")?;

    tracing::debug!("using server {}", client.info().url);

    match args.command {
        Some(cmd) => handle(&client, cmd).await,
        None => Interactive::handle(&client).await
    }
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
enum Interactive {
    #[command(flatten)]
    Base(BaseCmds),
    Quit
}

impl Interactive {
    async fn handle(client: &ApiClient) -> error::Result {
        loop {
            let Some(given) = input::read_stdin("> ")? else {
                break;
            };
            let trimmed = given.trim();

            if trimmed.is_empty() {
                continue;
            }

            let Ok(args_list) = shell_words::split(trimmed) else {
                println!("failed to parse command line args");
                continue;
            };

            let cmd = match Interactive::try_parse_from(args_list) {
                Ok(c) => c,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            };

            let result = match cmd {
                Interactive::Base(cmd) => handle(client, cmd).await,
                Interactive::Quit => break,
            };

            if let Err(err) = result {
                println!("{}", err);
            }
        }

        Ok(())
    }
}

#[derive(Debug, Subcommand)]
enum BaseCmds {
    /// displays the resources held by the server
    #[command(alias = "list")]
    Summary(summary::SummaryArgs),

    /// uploads a file into one of the backing stores
    #[command(alias = "upload")]
    Insert(insert::InsertArgs),

    /// retrieves the welcome message of the server
    Greeting,

    /// checks the health of the server
    Health,
}

async fn handle(client: &ApiClient, command: BaseCmds) -> error::Result {
    match command {
        BaseCmds::Summary(given) => summary::handle(client, given).await,
        BaseCmds::Insert(given) => insert::handle(client, given).await,
        BaseCmds::Greeting => greeting(client).await,
        BaseCmds::Health => health(client).await,
    }
}

async fn greeting(client: &ApiClient) -> error::Result {
    let msg = service::greeting(client)
        .await
        .context("failed to retrieve greeting")?;

    println!("{msg}");

    Ok(())
}

async fn health(client: &ApiClient) -> error::Result {
    let result = service::health(client)
        .await
        .context("failed to check server health")?;

    println!("status: {}", result.status);

    if !result.is_up() {
        return Err(error::Error::from("server is not healthy"));
    }

    Ok(())
}
