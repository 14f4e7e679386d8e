use crate::logging::consts::{
    DEFAULT_BATCH_SIZE, FLUSH_INTERVAL, QUICKWIT_CHANNEL_CAPACITY, TIMESTAMP_FIELD,
};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tokio::time;
use tracing::field::{Field, Visit};
use tracing_core::{Event, Subscriber};
use tracing_subscriber::layer::Context as TracingContext;
use tracing_subscriber::Layer;
use url::Url;

type LogRecord = serde_json::Map<String, serde_json::Value>;

/// Ships events carrying a marker field to Quickwit, one index per marker
/// value. Events without a routed marker are ignored.
pub struct QuickwitLayerBuilder {
    quickwit_url: Url,
    marker_field: &'static str,
    routes: HashMap<&'static str, &'static str>,
    batch_size: usize,
}

impl QuickwitLayerBuilder {
    pub fn new(quickwit_url: Url) -> Self {
        Self {
            quickwit_url,
            marker_field: "task",
            routes: HashMap::new(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn marker_field(mut self, field: &'static str) -> Self {
        self.marker_field = field;
        self
    }

    pub fn route(mut self, marker: &'static str, index_id: &'static str) -> Self {
        self.routes.insert(marker, index_id);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Spawns the shipping task, so it must be called inside a tokio runtime.
    pub fn build(self) -> QuickwitLayer {
        let (sender, receiver) = mpsc::channel(QUICKWIT_CHANNEL_CAPACITY);
        let shipper = QuickwitShipper {
            client: Client::new(),
            quickwit_url: self.quickwit_url,
            batch_size: self.batch_size,
            buffers: HashMap::new(),
        };
        tokio::spawn(shipper.run(receiver));
        QuickwitLayer {
            sender,
            marker_field: self.marker_field,
            routes: self.routes,
        }
    }
}

pub struct QuickwitLayer {
    sender: mpsc::Sender<QuickwitLogMessage>,
    marker_field: &'static str,
    routes: HashMap<&'static str, &'static str>,
}

impl QuickwitLayer {
    fn index_for(&self, event: &Event<'_>) -> Option<&'static str> {
        let mut visitor = MarkerVisitor {
            marker_field: self.marker_field,
            marker: None,
        };
        event.record(&mut visitor);
        visitor
            .marker
            .and_then(|marker| self.routes.get(marker.as_str()).copied())
    }
}

impl<S: Subscriber> Layer<S> for QuickwitLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: TracingContext<'_, S>) {
        let Some(index_id) = self.index_for(event) else {
            return;
        };
        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        collector
            .record
            .insert(TIMESTAMP_FIELD.to_string(), unix_timestamp().into());
        collector.record.insert(
            String::from("level"),
            event.metadata().level().as_str().into(),
        );
        // Dropped when the shipper falls behind; logging must never block.
        let _ = self.sender.try_send(QuickwitLogMessage {
            index_id,
            record: collector.record,
        });
    }
}

struct QuickwitShipper {
    client: Client,
    quickwit_url: Url,
    batch_size: usize,
    buffers: HashMap<&'static str, Vec<LogRecord>>,
}

impl QuickwitShipper {
    async fn run(mut self, mut receiver: mpsc::Receiver<QuickwitLogMessage>) {
        let mut ticker = time::interval(FLUSH_INTERVAL);
        loop {
            tokio::select! {
                message = receiver.recv() => match message {
                    Some(QuickwitLogMessage { index_id, record }) => {
                        let buffer = self.buffers.entry(index_id).or_default();
                        buffer.push(record);
                        if buffer.len() >= self.batch_size {
                            self.flush(index_id).await;
                        }
                    }
                    None => break,
                },
                _ = ticker.tick() => self.flush_all().await,
            }
        }
        self.flush_all().await;
    }

    async fn flush_all(&mut self) {
        let index_ids = self.buffers.keys().copied().collect::<Vec<_>>();
        for index_id in index_ids {
            self.flush(index_id).await;
        }
    }

    async fn flush(&mut self, index_id: &'static str) {
        let Some(records) = self.buffers.get_mut(index_id).map(std::mem::take) else {
            return;
        };
        if records.is_empty() {
            return;
        }
        let body = match to_ndjson(&records) {
            Ok(body) => body,
            Err(err) => {
                eprintln!("Failed to serialize {} log records: {err}", records.len());
                return;
            }
        };
        let ingest_url = match ingest_url(&self.quickwit_url, index_id) {
            Ok(url) => url,
            Err(err) => {
                eprintln!("Invalid Quickwit ingest URL for {index_id}: {err}");
                return;
            }
        };
        // Reporting through `tracing` here would feed back into this layer.
        if let Err(err) = self.client.post(ingest_url).body(body).send().await {
            eprintln!("Failed to ship {} records to {index_id}: {err}", records.len());
        }
    }
}

pub fn ingest_url(quickwit_url: &Url, index_id: &str) -> Result<Url, url::ParseError> {
    // Without a trailing slash `join` would replace the last path segment.
    let mut base = quickwit_url.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join(&format!("api/v1/{index_id}/ingest"))
}

pub fn to_ndjson<V: Serialize>(records: &[V]) -> io::Result<Vec<u8>> {
    let mut body = Vec::new();
    for record in records {
        serde_json::to_writer(&mut body, record)?;
        body.push(b'\n');
    }
    Ok(body)
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[derive(Debug)]
struct QuickwitLogMessage {
    index_id: &'static str,
    record: LogRecord,
}

struct MarkerVisitor {
    marker_field: &'static str,
    marker: Option<String>,
}

impl Visit for MarkerVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.marker_field {
            self.marker = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

#[derive(Default)]
struct FieldCollector {
    record: LogRecord,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record
            .insert(field.name().to_string(), format!("{value:?}").into());
    }
}
