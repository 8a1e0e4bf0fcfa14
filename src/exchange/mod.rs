pub mod transport;

pub use transport::{HttpTransport, LocalTransport, Transport};
