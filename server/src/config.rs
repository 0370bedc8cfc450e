use std::net::SocketAddr;
use std::path::PathBuf;

use error_stack::ResultExt;
use kernel::KernelError;

static SERVER_ADDR: &str = "SERVER_ADDR";
static LOG_DIR: &str = "LOG_DIR";

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_DIR: &str = "./logs/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let bind = lookup(SERVER_ADDR).unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let bind = bind
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("Env {} has invalid value {:?}", SERVER_ADDR, bind))?;
        let log_dir = lookup(LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        Ok(Self { bind, log_dir })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use crate::config::ServerConfig;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(|_| None).expect("defaults are valid");
        assert_eq!(config.bind, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.log_dir, PathBuf::from("./logs/"));
    }

    #[test]
    fn values_are_read_from_env() {
        let env = HashMap::from([
            ("SERVER_ADDR", "127.0.0.1:3000"),
            ("LOG_DIR", "/var/log/books"),
        ]);
        let config = ServerConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))
            .expect("values are valid");
        assert_eq!(config.bind, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.log_dir, PathBuf::from("/var/log/books"));
    }

    #[test]
    fn invalid_address_is_rejected() {
        let result = ServerConfig::from_lookup(|key| {
            (key == "SERVER_ADDR").then(|| "not-an-address".to_string())
        });
        assert!(result.is_err());
    }
}
