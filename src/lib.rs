pub mod auth;
pub mod config;
pub mod error;
pub mod http_api;
pub mod mcp_server;
pub mod openai;
pub mod state;
pub mod storage;
pub mod tools;
