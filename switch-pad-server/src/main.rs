mod http;
mod input_tracker;
mod sink;
mod transmitter;

use futures::StreamExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::{select, spawn};
use tokio_stream::wrappers::TcpListenerStream;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use crate::input_tracker::{InputTracker, InputTrackerHandle};
use crate::sink::SerialSink;

const LISTEN_ADDR: (&str, u16) = ("0.0.0.0", 8000);

fn main() {
    FmtSubscriber::builder()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async_main());
}

async fn async_main() {
    info!(
        "Starting switch-pad server on {}:{}",
        LISTEN_ADDR.0, LISTEN_ADDR.1
    );
    let tcp_listener = TcpListener::bind(LISTEN_ADDR)
        .await
        .expect("Failed to bind address");
    let sink = SerialSink::open().expect("Failed to open the controller serial link");

    let tracker = InputTracker::new();
    let tracker_handle = tracker.handle();
    let held_inputs = tracker.held_inputs();
    let tracker_task = spawn(tracker.run());

    let (exit_sender, exit_receiver) = oneshot::channel();
    let mut transmitter_task = spawn(transmitter::run(sink, held_inputs, exit_receiver));

    let accept_task = spawn(accept_connections(tcp_listener, tracker_handle.clone()));
    info!("Server started, waiting for connections");

    // Run until the transmitter dies (fatal sink failure) or we are told to
    // stop.
    let transmitter_result = select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
            exit_sender.send(()).ok();
            (&mut transmitter_task).await
        }
        result = &mut transmitter_task => result,
    };

    match transmitter_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Transmission loop failed: {e:#}"),
        Err(e) => error!("Transmission task panicked: {e}"),
    }

    info!("Server shutting down");
    accept_task.abort();
    tracker_handle.shutdown().await;
    tracker_task.await.ok();
    info!("Server shut down");
}

async fn accept_connections(tcp_listener: TcpListener, tracker: InputTrackerHandle) {
    let mut connections = TcpListenerStream::new(tcp_listener);

    while let Some(connection) = connections.next().await {
        match connection {
            Ok(connection) => {
                spawn(http::handle_connection(connection, tracker.clone()));
            }
            Err(e) => {
                error!("New connection error: {e}");
                continue;
            }
        }
    }
}
