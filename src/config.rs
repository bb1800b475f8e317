//! Command line and environment configuration for the server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, ValueEnum};

use crate::{Error, auth::AuthGuard};

/// The REST API server for tracking expenses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Connection string for the expense database, e.g. a file path such as
    /// `expenses.db`, `sqlite://expenses.db` or `:memory:`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 2565)]
    pub port: u16,

    /// The address to listen on.
    #[arg(long, env = "BIND_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// How to check the `Authorization` header.
    #[arg(long, env = "AUTH_MODE", value_enum, default_value_t = AuthMode::DateHeader)]
    pub auth_mode: AuthMode,

    /// The expected `Authorization` header value when `--auth-mode token` is used.
    #[arg(long, env = "AUTH_TOKEN")]
    pub auth_token: Option<String>,
}

/// The `Authorization` header check to apply to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthMode {
    /// Require a date such as "November 10, 2009".
    DateHeader,
    /// Require the header to equal `--auth-token`.
    Token,
    /// Do not check the header.
    None,
}

impl Config {
    /// The socket address the server should bind to.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Build the [AuthGuard] selected by the auth mode.
    ///
    /// # Errors
    /// Returns an [Error::MissingAuthToken] if token mode is selected without
    /// a token.
    pub fn auth_guard(&self) -> Result<AuthGuard, Error> {
        match self.auth_mode {
            AuthMode::DateHeader => Ok(AuthGuard::DateHeader),
            AuthMode::None => Ok(AuthGuard::Disabled),
            AuthMode::Token => match &self.auth_token {
                Some(token) if !token.is_empty() => Ok(AuthGuard::Token(token.clone())),
                _ => Err(Error::MissingAuthToken),
            },
        }
    }
}
