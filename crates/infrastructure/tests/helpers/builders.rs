#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, TXT};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use std::str::FromStr;

/// Builder for wire-format DNS responses used by parser and server tests.
pub struct ResponseBuilder {
    message: Message,
}

impl ResponseBuilder {
    pub fn new(id: u16) -> Self {
        let mut message = Message::new(id, MessageType::Response, OpCode::Query);
        message.set_recursion_desired(true);
        message.set_recursion_available(true);
        Self { message }
    }

    /// Response skeleton echoing the ID and question of `query`.
    pub fn answering(query: &Message) -> Self {
        let mut builder = Self::new(query.id());
        for question in query.queries() {
            builder.message.add_query(question.clone());
        }
        builder
    }

    pub fn question(mut self, query: Query) -> Self {
        self.message.add_query(query);
        self
    }

    pub fn rdata(mut self, name: &str, rdata: RData) -> Self {
        self.message
            .add_answer(Record::from_rdata(Self::name(name), 300, rdata));
        self
    }

    pub fn a(self, name: &str, ip: &str) -> Self {
        self.rdata(name, RData::A(A(ip.parse().unwrap())))
    }

    pub fn aaaa(self, name: &str, ip: &str) -> Self {
        self.rdata(name, RData::AAAA(AAAA(ip.parse().unwrap())))
    }

    pub fn txt(self, name: &str, chunks: &[&str]) -> Self {
        self.rdata(
            name,
            RData::TXT(TXT::new(chunks.iter().map(|c| c.to_string()).collect())),
        )
    }

    pub fn mx(self, name: &str, preference: u16, exchange: &str) -> Self {
        self.rdata(name, RData::MX(MX::new(preference, Self::name(exchange))))
    }

    pub fn cname(self, name: &str, target: &str) -> Self {
        self.rdata(name, RData::CNAME(CNAME(Self::name(target))))
    }

    pub fn rcode(mut self, rcode: ResponseCode) -> Self {
        self.message.set_response_code(rcode);
        self
    }

    pub fn truncated(mut self) -> Self {
        self.message.set_truncated(true);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.message.to_vec().unwrap()
    }

    pub fn name(name: &str) -> Name {
        Name::from_str(name).unwrap()
    }
}
