use std::net::SocketAddr;

pub const ADDR_VAR: &str = "CLASSMIXER_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Reads the bind address from `CLASSMIXER_ADDR`, falling back to
    /// `127.0.0.1:8080` when it is unset.
    pub fn from_env() -> Result<Self, String> {
        let raw = std::env::var(ADDR_VAR).ok();
        Self::from_value(raw.as_deref())
    }

    fn from_value(raw: Option<&str>) -> Result<Self, String> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_ADDR);
        let addr = raw
            .parse()
            .map_err(|e| format!("{ADDR_VAR}='{raw}' is not a socket address: {e}"))?;
        Ok(ServerConfig { addr })
    }
}
