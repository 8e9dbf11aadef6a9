use std::{future::Future, io, net::SocketAddr, sync::Arc};

use futures_util::{SinkExt, StreamExt};
use http::{header::CONNECTION, HeaderValue};
use tokio::{
    net::{TcpListener, TcpStream, ToSocketAddrs},
    sync::{OwnedSemaphorePermit, Semaphore},
};
use tokio_util::codec::Decoder;

use crate::http::{codec::HttpCodec, Request, Response};

type Handler<S, F> = fn(Request, S) -> F;

const MAX_CONNECTIONS: usize = 1_000;

/// One task per connection, one request per connection. The semaphore caps
/// how many connections are in flight at once.
pub struct Server<S, F> {
    state: S,
    handler: Handler<S, F>,
    semaphore: Arc<Semaphore>,
}

impl<S, F> Server<S, F>
where
    S: Clone + Send + Sync + 'static,
    F: Future<Output = Response> + Send + 'static,
{
    pub fn new(state: S, handler: Handler<S, F>) -> Self {
        Self {
            state,
            handler,
            semaphore: Arc::new(Semaphore::new(MAX_CONNECTIONS)),
        }
    }

    pub async fn bind<A: ToSocketAddrs>(self, addr: A) -> io::Result<()> {
        let server = Arc::new(self);

        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        tracing::info!(target: "listener", ?addr, "server is running");

        loop {
            let (socket, addr) = listener.accept().await?;
            let Ok(permit) = Arc::clone(&server.semaphore).acquire_owned().await else {
                return Ok(());
            };

            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let _ = tokio::time::timeout(
                    crate::TIMEOUT_DURATION,
                    server.handle_connection(socket, addr, permit),
                )
                .await;
            });
        }
    }

    #[tracing::instrument(skip(self, socket, permit))]
    async fn handle_connection(
        self: Arc<Self>,
        socket: TcpStream,
        addr: SocketAddr,
        permit: OwnedSemaphorePermit,
    ) {
        let mut framed = HttpCodec::default().framed(socket);

        let request = match framed.next().await.transpose() {
            Ok(Some(request)) => request,
            Ok(None) => {
                tracing::debug!("connection ended before a request arrived");
                return;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to read request");
                return;
            }
        };

        tracing::info!(
            target: "requests",
            method = %request.method(),
            path = %request.uri().path(),
            "inbound request"
        );

        let mut response = (self.handler)(request, self.state.clone()).await;

        const CLOSE: HeaderValue = HeaderValue::from_static("close");
        response.headers_mut().insert(CONNECTION, CLOSE);

        drop(permit);

        if let Err(err) = framed.send(response).await {
            tracing::warn!(%err, "failed to send response");
        }
    }
}
