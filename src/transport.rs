//! Async DNS transport: a client, not a server, cascading over a configured
//! upstream list. Grounded in `resolver/query.go`'s `localQuery` (stop on the
//! first transport-level failure, don't fall through to the next server; try
//! the next server only on a response that isn't a final answer) and in
//! `heimdall`'s async/`tracing` idiom for I/O.

use std::net::SocketAddr;

use async_trait::async_trait;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::dnssec::constants::DNSSEC_UDP_SIZE;
use crate::error::{Result, ValidatorError};

/// A DNS exchange, abstracted so tests can inject canned responses instead
/// of hitting the network (mirrors the original Go `Resolver`'s mockable
/// `queryFn` field).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn exchange(&self, qname: &Name, qtype: RecordType) -> Result<Message>;
}

fn build_query(qname: Name, qtype: RecordType, id: u16) -> Message {
    let mut query = Query::new();
    query.set_name(qname);
    query.set_query_type(qtype);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new();
    message.set_id(id);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);

    let mut edns = Edns::new();
    edns.set_dnssec_ok(true);
    edns.set_max_payload(DNSSEC_UDP_SIZE);
    edns.set_version(0);
    message.set_edns(edns);

    message
}

/// Client over `tokio::net::UdpSocket`, cascading over `config.upstream_servers`.
pub struct UdpTransport {
    config: ResolverConfig,
}

impl UdpTransport {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    async fn exchange_one(&self, server: SocketAddr, qname: &Name, qtype: RecordType) -> Result<Message> {
        let id = rand::random::<u16>();
        let query = build_query(qname.clone(), qtype, id);

        let mut buf = Vec::with_capacity(512);
        {
            let mut encoder = BinEncoder::new(&mut buf);
            query
                .emit(&mut encoder)
                .map_err(|e| ValidatorError::Transport(format!("failed to encode query: {e}")))?;
        }

        let bind_addr = if server.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| ValidatorError::Transport(format!("bind failed: {e}")))?;
        socket
            .connect(server)
            .await
            .map_err(|e| ValidatorError::Transport(format!("connect to {server} failed: {e}")))?;

        tokio::time::timeout(self.config.timeout, socket.send(&buf))
            .await
            .map_err(|_| ValidatorError::Transport(format!("send to {server} timed out")))?
            .map_err(|e| ValidatorError::Transport(format!("send to {server} failed: {e}")))?;

        let mut recv_buf = vec![0u8; DNSSEC_UDP_SIZE as usize];
        let len = tokio::time::timeout(self.config.timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| ValidatorError::Transport(format!("read from {server} timed out")))?
            .map_err(|e| ValidatorError::Transport(format!("read from {server} failed: {e}")))?;

        debug!(server = %server, qname = %qname, qtype = %qtype, bytes = len, "received DNS response");

        Message::from_vec(&recv_buf[..len])
            .map_err(|e| ValidatorError::Transport(format!("malformed response from {server}: {e}")))
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn exchange(&self, qname: &Name, qtype: RecordType) -> Result<Message> {
        for server in &self.config.upstream_servers {
            let message = self.exchange_one(*server, qname, qtype).await?;
            match message.response_code() {
                ResponseCode::NoError | ResponseCode::NXDomain => return Ok(message),
                other => {
                    warn!(server = %server, rcode = ?other, "non-final response, trying next server");
                    continue;
                }
            }
        }
        Err(ValidatorError::NoNameServer)
    }
}
