use std::env;
use std::net::{AddrParseError, SocketAddr};

const DEFAULT_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub addr: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn get_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.get_addr().parse()
    }

    pub fn init_from_env(&mut self) -> Result<(), String> {
        self.addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

        self.port = match env::var("SERVER_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|_| "SERVER_PORT is not a valid u16".to_string())?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(())
    }
}
