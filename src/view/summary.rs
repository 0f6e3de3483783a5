use cloudbridge_lib::Resource;
use cloudbridge_lib::date::DisplayDate;
use tokio::task::JoinHandle;

use crate::formatting::{Column, TextTable, TableOptions};
use crate::view::fetch::{FetchResult, ResourceFetcher};

pub const COLUMN_COUNT: usize = 5;

pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "file name",
    "file type",
    "file storage",
    "date inserted",
    "date modified",
];

pub type Row = [Option<String>; COLUMN_COUNT];

/// the resource summary table.
///
/// creating the view issues its one and only fetch. the result is applied
/// by `settle`, a failure is logged and leaves the collection as it was.
/// dropping or tearing down the view before that discards the result.
pub struct SummaryView {
    display: DisplayDate,
    resources: Vec<Resource>,
    pending: Option<JoinHandle<FetchResult>>,
}

impl SummaryView {
    /// must be called from within a tokio runtime
    pub fn init<F>(fetcher: &F, display: DisplayDate) -> Self
    where
        F: ResourceFetcher + ?Sized
    {
        let pending = tokio::spawn(fetcher.fetch());

        SummaryView {
            display,
            resources: Vec::new(),
            pending: Some(pending),
        }
    }

    /// waits for the outstanding fetch, if any, and applies its result
    pub async fn settle(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        match pending.await {
            Ok(Ok(list)) => {
                tracing::debug!("received {} resources", list.len());

                self.resources = list;
            },
            Ok(Err(err)) => {
                tracing::error!("error fetching resources: {err}");
            },
            Err(err) => if err.is_cancelled() {
                tracing::debug!("resource fetch was cancelled");
            } else {
                tracing::error!("resource fetch task failed: {err}");
            }
        }
    }

    /// stops the outstanding fetch. a result that arrives later is dropped
    pub fn teardown(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn rows(&self) -> Vec<Row> {
        self.resources.iter()
            .map(|resource| resource_row(resource, &self.display))
            .collect()
    }

    pub fn table(&self) -> TextTable<COLUMN_COUNT> {
        let mut table = TextTable::with_columns(
            COLUMNS.map(Column::new)
        );

        for cells in self.rows() {
            let mut row = table.add_row();

            for (index, cell) in cells.into_iter().enumerate() {
                if let Some(value) = cell {
                    row.set_col(index, value);
                }
            }

            row.finish();
        }

        table
    }

    pub fn write<O>(&self, output: &mut O, options: &TableOptions) -> std::io::Result<()>
    where
        O: std::io::Write
    {
        self.table().write(output, options)
    }
}

impl Drop for SummaryView {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn text_cell(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

fn date_cell(display: &DisplayDate, value: Option<&str>) -> Option<String> {
    match display.format(value) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::warn!("{err}");

            None
        }
    }
}

/// the cells of a single resource in column order
pub fn resource_row(resource: &Resource, display: &DisplayDate) -> Row {
    [
        text_cell(&resource.file_name),
        text_cell(&resource.file_type),
        text_cell(&resource.file_storage),
        date_cell(display, resource.date_inserted.as_deref()),
        date_cell(display, resource.date_modified.as_deref()),
    ]
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cloudbridge_api::client::ApiClient;
    use cloudbridge_api::client::error::RequestError;
    use cloudbridge_api::client::resources::RetrieveResources;
    use cloudbridge_lib::StorageKind;
    use futures::future::BoxFuture;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use super::*;
    use crate::formatting::PRETTY_OPTIONS;
    use crate::view::fetch::ApiFetcher;

    struct StaticFetcher {
        calls: Arc<AtomicUsize>,
        list: Option<Vec<Resource>>,
    }

    impl StaticFetcher {
        fn ok(list: Vec<Resource>) -> Self {
            StaticFetcher {
                calls: Arc::new(AtomicUsize::new(0)),
                list: Some(list),
            }
        }

        fn failing() -> Self {
            StaticFetcher {
                calls: Arc::new(AtomicUsize::new(0)),
                list: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ResourceFetcher for StaticFetcher {
        fn fetch(&self) -> BoxFuture<'static, FetchResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let result = match &self.list {
                Some(list) => Ok(list.clone()),
                None => Err(RequestError::NoEndpoint(StorageKind::S3)),
            };

            Box::pin(async move { result })
        }
    }

    /// holds the response until the sender fires
    struct DelayedFetcher {
        rx: std::sync::Mutex<Option<oneshot::Receiver<Vec<Resource>>>>,
    }

    impl ResourceFetcher for DelayedFetcher {
        fn fetch(&self) -> BoxFuture<'static, FetchResult> {
            let rx = self.rx.lock().unwrap().take().expect("fetch called twice");

            Box::pin(async move {
                rx.await.map_err(|_| RequestError::NoEndpoint(StorageKind::S3))
            })
        }
    }

    fn resource(name: &str, inserted: &str, modified: &str) -> Resource {
        Resource {
            id: Some(format!("id-{name}")),
            file_name: name.into(),
            file_type: "application/pdf".into(),
            file_storage: "MongoDB".into(),
            date_inserted: Some(inserted.into()),
            date_modified: Some(modified.into()),
            ..Default::default()
        }
    }

    fn local_client(port: u16) -> ApiClient {
        let mut builder = ApiClient::builder();
        builder.port(Some(port));

        assert!(builder.host("127.0.0.1"));

        builder.build().unwrap()
    }

    /// answers a single request with a 500 and closes the connection
    async fn failing_server() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;

            let body = "database offline";
            let response = format!(
                "HTTP/1.1 500 Internal Server Error\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );

            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        });

        port
    }

    fn cells(row: &Row) -> Vec<Option<&str>> {
        row.iter().map(|v| v.as_deref()).collect()
    }

    fn render(view: &SummaryView) -> String {
        let mut output = Vec::new();

        view.write(&mut output, &PRETTY_OPTIONS).unwrap();

        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn rows_follow_fetched_resources() {
        let fetcher = StaticFetcher::ok(vec![
            resource("a.pdf", "2025-04-04T05:48:27.283936Z", "2025-12-31T23:05:00Z"),
            resource("b.pdf", "2025-01-01T00:00:00Z", "2025-01-02T09:30:00Z"),
            resource("c.pdf", "2025-02-01T00:00:00Z", ""),
        ]);

        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());

        assert!(view.pending.is_some());

        view.settle().await;

        assert!(view.pending.is_none());

        let rows = view.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(cells(&rows[0]), [
            Some("a.pdf"),
            Some("application/pdf"),
            Some("MongoDB"),
            Some("04/04/2025 05.48"),
            Some("12/31/2025 23.05"),
        ]);
        assert_eq!(rows[1][0].as_deref(), Some("b.pdf"));
        assert_eq!(rows[2][4], None);

        // header, separator and one line per resource
        assert_eq!(render(&view).lines().count(), 2 + 3);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_table_empty() {
        let fetcher = StaticFetcher::failing();
        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());

        view.settle().await;

        assert!(view.resources().is_empty());
        assert!(view.rows().is_empty());
        assert_eq!(render(&view).lines().count(), 2);
    }

    #[tokio::test]
    async fn missing_fields_render_empty_cells() {
        let fetcher = StaticFetcher::ok(vec![Resource {
            file_name: "bare.txt".into(),
            ..Default::default()
        }]);
        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());

        view.settle().await;

        let rows = view.rows();

        assert_eq!(rows.len(), 1);
        assert_eq!(cells(&rows[0]), [Some("bare.txt"), None, None, None, None]);
        assert_eq!(render(&view).lines().count(), 3);
    }

    #[tokio::test]
    async fn malformed_dates_render_empty_cells() {
        let fetcher = StaticFetcher::ok(vec![
            resource("a.pdf", "last tuesday", "2025-12-31T23:05:00Z"),
        ]);
        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());

        view.settle().await;

        let rows = view.rows();

        assert_eq!(rows[0][3], None);
        assert_eq!(rows[0][4].as_deref(), Some("12/31/2025 23.05"));
    }

    #[tokio::test]
    async fn one_fetch_per_init() {
        let fetcher = StaticFetcher::ok(vec![
            resource("a.pdf", "2025-04-04T05:48:27Z", "2025-04-04T05:48:27Z"),
        ]);

        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());

        assert_eq!(fetcher.calls(), 1);

        view.settle().await;
        view.settle().await;
        render(&view);
        render(&view);

        assert_eq!(fetcher.calls(), 1);

        drop(view);

        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());
        view.settle().await;

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(view.rows().len(), 1);
    }

    #[tokio::test]
    async fn teardown_discards_late_result() {
        let (tx, rx) = oneshot::channel();
        let fetcher = DelayedFetcher {
            rx: std::sync::Mutex::new(Some(rx)),
        };

        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());

        assert!(view.rows().is_empty());

        view.teardown();

        assert!(view.pending.is_none());

        // the receiving task is gone so the send may fail, either way
        // nothing reaches the view
        let _ = tx.send(vec![resource("late.pdf", "2025-04-04", "2025-04-04")]);

        view.settle().await;

        assert!(view.resources().is_empty());
    }

    #[tokio::test]
    async fn server_error_leaves_table_empty() {
        let port = failing_server().await;
        let fetcher = ApiFetcher::new(local_client(port), RetrieveResources::new());

        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());
        view.settle().await;

        assert!(view.resources().is_empty());
        assert_eq!(render(&view).lines().count(), 2);
    }

    #[tokio::test]
    async fn refused_connection_leaves_table_empty() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

            listener.local_addr().unwrap().port()
        };
        let fetcher = ApiFetcher::new(local_client(port), RetrieveResources::new());

        let mut view = SummaryView::init(&fetcher, DisplayDate::utc());
        view.settle().await;

        assert!(view.resources().is_empty());
        assert!(view.rows().is_empty());
    }
}
