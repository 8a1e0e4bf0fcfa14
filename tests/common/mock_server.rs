use std::net::TcpListener;

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

/// A wiremock server driven from synchronous tests.
///
/// The server lives on its own runtime; the blocking reqwest client under
/// test must stay outside it.
pub struct BlockingMockServer {
    server: MockServer,
    rt: Runtime,
}

impl BlockingMockServer {
    pub fn start() -> Self {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn received_requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// Checks every `expect` set on the mounted mocks.
    pub fn verify(&self) {
        self.rt.block_on(self.server.verify());
    }
}

/// A base URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder().no_proxy().build().unwrap()
}
