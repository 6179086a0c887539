use bytes::Bytes;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use spf_flattener_domain::{DomainError, MailExchanger};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Answer section of one response, split by the record types SPF needs.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    pub ipv4: Vec<Ipv4Addr>,

    pub ipv6: Vec<Ipv6Addr>,

    /// One entry per TXT record, character-strings concatenated.
    pub txt: Vec<String>,

    pub mx: Vec<MailExchanger>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse_bytes(response_bytes: Bytes) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(&response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let mut response = DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            ipv4: Vec::new(),
            ipv6: Vec::new(),
            txt: Vec::new(),
            mx: Vec::new(),
        };

        // CNAME records in the answer are skipped; the recursive server
        // already appended the target's records after them.
        for record in message.answers() {
            match record.data() {
                RData::A(a) => response.ipv4.push(a.0),
                RData::AAAA(aaaa) => response.ipv6.push(aaaa.0),
                RData::TXT(txt) => response.txt.push(
                    txt.txt_data()
                        .iter()
                        .map(|chunk| String::from_utf8_lossy(chunk))
                        .collect(),
                ),
                RData::MX(mx) => response
                    .mx
                    .push(MailExchanger::new(mx.preference(), mx.exchange().to_utf8())),
                _ => {}
            }
        }

        debug!(
            rcode = Self::rcode_to_status(response.rcode),
            ipv4 = response.ipv4.len(),
            ipv6 = response.ipv6.len(),
            txt = response.txt.len(),
            mx = response.mx.len(),
            truncated = response.truncated,
            "DNS response parsed"
        );

        Ok(response)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
