//! Real-time messaging glue
//!
//! Client side of the external socket server: one managed connection with
//! bounded fixed-delay reconnects, and the `new-message` payload.

pub mod client;
pub mod message;

pub use client::{
    ConnectionState, InboundEvent, Link, ReconnectPolicy, Socket, SocketConfig, SocketEvent,
    SocketManager, Transport,
};
pub use message::{NewMessage, NEW_MESSAGE_EVENT};
