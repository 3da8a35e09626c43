pub mod options;
pub mod proxy;

pub use options::{GrpcOptions, RealityOptions, TlsOptions, TransportOptions, WsOptions};
pub use proxy::{
    AnyTlsRecord, Endpoint, Hysteria2Record, ProxyRecord, ShadowsocksRecord, Socks5Record,
    TrojanRecord, TuicRecord, VMessRecord, VlessRecord,
};
