use cloudbridge_api::client::ApiClient;
use cloudbridge_api::client::error::RequestError;
use cloudbridge_api::client::resources::RetrieveResources;
use cloudbridge_lib::Resource;
use futures::future::BoxFuture;

pub type FetchResult = Result<Vec<Resource>, RequestError>;

/// source of the resource collection shown by the summary view.
///
/// every call to `fetch` is one request. the returned future owns everything
/// it needs so it can be driven on its own task.
pub trait ResourceFetcher {
    fn fetch(&self) -> BoxFuture<'static, FetchResult>;
}

/// fetches resources from a CloudBridge server
pub struct ApiFetcher {
    client: ApiClient,
    request: RetrieveResources,
}

impl ApiFetcher {
    pub fn new(client: ApiClient, request: RetrieveResources) -> Self {
        ApiFetcher { client, request }
    }
}

impl ResourceFetcher for ApiFetcher {
    fn fetch(&self) -> BoxFuture<'static, FetchResult> {
        let client = self.client.clone();
        let request = self.request.clone();

        Box::pin(async move {
            request.send(&client).await
        })
    }
}
