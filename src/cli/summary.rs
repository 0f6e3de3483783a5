use chrono::FixedOffset;
use clap::Args;
use cloudbridge_api::client::ApiClient;
use cloudbridge_api::client::resources::RetrieveResources;
use cloudbridge_lib::StorageKind;
use cloudbridge_lib::date::{self, DisplayDate};

use crate::error::{self, Context};
use crate::formatting::{self, BaseSize};
use crate::util::StoreArg;
use crate::view::fetch::ApiFetcher;
use crate::view::summary::SummaryView;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// only list the resources of the given store
    #[arg(long, value_enum)]
    store: Option<StoreArg>,

    /// utc offset the timestamps are displayed in. examples: UTC | +05:30 | -0800
    #[arg(long, default_value = "UTC", value_parser(date::parse_offset))]
    utc_offset: FixedOffset,

    /// prints every field of each resource instead of the table
    #[arg(short, long, conflicts_with("json"))]
    long: bool,

    /// prints the resources as json
    #[arg(long)]
    json: bool,

    /// specifies the format for the file size output
    #[arg(long, default_value_t)]
    size_format: BaseSize,
}

pub async fn handle(client: &ApiClient, args: SummaryArgs) -> error::Result {
    let mut request = RetrieveResources::new();
    request.store(args.store.map(StorageKind::from));

    let fetcher = ApiFetcher::new(client.clone(), request);
    let display = DisplayDate::with_offset(args.utc_offset);

    let mut view = SummaryView::init(&fetcher, display.clone());
    view.settle().await;

    let mut stdout = std::io::stdout();

    if args.json {
        serde_json::to_writer_pretty(&mut stdout, view.resources())
            .context("failed to output to stdout")?;

        println!("");
    } else if args.long {
        for resource in view.resources() {
            formatting::write_resource(&mut stdout, resource, &display, &args.size_format)
                .context("failed to output to stdout")?;

            println!("");
        }

        println!("total: {}", view.resources().len());
    } else {
        view.write(&mut stdout, &formatting::PRETTY_OPTIONS)
            .context("failed to output to stdout")?;
    }

    Ok(())
}
