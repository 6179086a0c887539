#![allow(dead_code)]
use super::ResponseBuilder;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, MX, TXT};
use hickory_proto::rr::{RData, RecordType};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinHandle;

/// Zone data and misbehaviours served by [`MockDnsServer`].
///
/// Names are matched case-insensitively, without the trailing dot.
#[derive(Clone, Default)]
pub struct MockZone {
    records: HashMap<(String, RecordType), Vec<RData>>,
    rcodes: HashMap<String, ResponseCode>,
    truncate_over_udp: HashSet<String>,
    silent: HashSet<String>,
    wrong_id: HashSet<String>,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(mut self, name: &str, record_type: RecordType, rdata: RData) -> Self {
        self.records
            .entry((Self::key(name), record_type))
            .or_default()
            .push(rdata);
        self
    }

    pub fn txt(self, name: &str, chunks: &[&str]) -> Self {
        self.add(
            name,
            RecordType::TXT,
            RData::TXT(TXT::new(chunks.iter().map(|c| c.to_string()).collect())),
        )
    }

    pub fn a(self, name: &str, ip: &str) -> Self {
        self.add(name, RecordType::A, RData::A(A(ip.parse().unwrap())))
    }

    pub fn aaaa(self, name: &str, ip: &str) -> Self {
        self.add(name, RecordType::AAAA, RData::AAAA(AAAA(ip.parse().unwrap())))
    }

    pub fn mx(self, name: &str, preference: u16, exchange: &str) -> Self {
        self.add(
            name,
            RecordType::MX,
            RData::MX(MX::new(preference, ResponseBuilder::name(exchange))),
        )
    }

    pub fn nxdomain(self, name: &str) -> Self {
        self.rcode(name, ResponseCode::NXDomain)
    }

    pub fn servfail(self, name: &str) -> Self {
        self.rcode(name, ResponseCode::ServFail)
    }

    /// Every answer for `name` carries `rcode` and no records.
    pub fn rcode(mut self, name: &str, rcode: ResponseCode) -> Self {
        self.rcodes.insert(Self::key(name), rcode);
        self
    }

    /// UDP answers for `name` come back empty with the TC bit set.
    pub fn truncate_over_udp(mut self, name: &str) -> Self {
        self.truncate_over_udp.insert(Self::key(name));
        self
    }

    /// Queries for `name` are never answered.
    pub fn silent(mut self, name: &str) -> Self {
        self.silent.insert(Self::key(name));
        self
    }

    /// Answers for `name` carry a different message ID.
    pub fn wrong_id(mut self, name: &str) -> Self {
        self.wrong_id.insert(Self::key(name));
        self
    }

    fn key(name: &str) -> String {
        name.trim_end_matches('.').to_ascii_lowercase()
    }

    fn answer(&self, query_bytes: &[u8], over_udp: bool) -> Option<Vec<u8>> {
        let query = Message::from_vec(query_bytes).ok()?;
        let question = query.queries().first()?.clone();
        let name = Self::key(&question.name().to_utf8());

        if self.silent.contains(&name) {
            return None;
        }

        let mut response = ResponseBuilder::answering(&query);

        if let Some(rcode) = self.rcodes.get(&name) {
            response = response.rcode(*rcode);
        } else if over_udp && self.truncate_over_udp.contains(&name) {
            response = response.truncated();
        } else if let Some(records) = self.records.get(&(name.clone(), question.query_type())) {
            for rdata in records {
                response = response.rdata(&name, rdata.clone());
            }
        }

        let mut bytes = response.build();
        if self.wrong_id.contains(&name) {
            bytes[0] ^= 0xff;
        }
        Some(bytes)
    }
}

/// Loopback DNS server answering from a [`MockZone`] over UDP and TCP on
/// the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    tasks: Vec<JoinHandle<()>>,
}

impl MockDnsServer {
    pub async fn start(zone: MockZone) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let zone = Arc::new(zone);
        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));

        let udp_task = {
            let zone = Arc::clone(&zone);
            let counter = Arc::clone(&udp_queries);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
                    counter.fetch_add(1, Ordering::SeqCst);
                    if let Some(response) = zone.answer(&buf[..len], true) {
                        let _ = socket.send_to(&response, peer).await;
                    }
                }
            })
        };

        let tcp_task = {
            let zone = Arc::clone(&zone);
            let counter = Arc::clone(&tcp_queries);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let zone = Arc::clone(&zone);
                    tokio::spawn(async move {
                        let _ = Self::serve_tcp(stream, &zone).await;
                    });
                }
            })
        };

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            tasks: vec![udp_task, tcp_task],
        })
    }

    async fn serve_tcp(mut stream: TcpStream, zone: &MockZone) -> Result<(), std::io::Error> {
        let mut length = [0u8; 2];
        stream.read_exact(&mut length).await?;

        let mut query = vec![0u8; u16::from_be_bytes(length) as usize];
        stream.read_exact(&mut query).await?;

        if let Some(response) = zone.answer(&query, false) {
            stream
                .write_all(&(response.len() as u16).to_be_bytes())
                .await?;
            stream.write_all(&response).await?;
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
