use std::path::PathBuf;

use clap::Args;
use cloudbridge_api::client::ApiClient;

use crate::error;
use crate::util::{self, StoreArg};
use crate::view::insert::InsertForm;

#[derive(Debug, Args)]
pub struct InsertArgs {
    /// the file to upload
    path: PathBuf,

    /// the store that will hold the file
    #[arg(long, value_enum)]
    store: StoreArg,

    /// name of the file, defaults to the basename of the given path
    #[arg(short, long)]
    name: Option<String>,

    /// manually specify the mime type
    #[arg(
        short,
        long,
        conflicts_with("fallback"),
        value_parser(util::parse_mime)
    )]
    mime: Option<mime::Mime>,

    /// fallback mime if one cannot be deduced
    #[arg(
        long,
        conflicts_with("mime"),
        value_parser(util::parse_mime)
    )]
    fallback: Option<mime::Mime>,

    /// description of the file
    #[arg(short, long, default_value = "")]
    description: String,

    /// owner of the file
    #[arg(short, long, default_value = "")]
    owner: String,
}

pub async fn handle(client: &ApiClient, args: InsertArgs) -> error::Result {
    let mut form = InsertForm::new(args.path, args.store.into());
    form.name = args.name;
    form.mime = args.mime;
    form.fallback = args.fallback;
    form.description = args.description;
    form.owner = args.owner;

    let msg = form.submit(client).await?;

    println!("{msg}");

    Ok(())
}
