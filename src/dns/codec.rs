//! DNS message codec for the single-question TXT exchange the responder speaks.
//!
//! Wire layout of every response (RFC 1035 section 4.1):
//!
//! ```text
//! ID       copied from the request
//! flags    0x84 0x80: QR=1 OPCODE=QUERY AA=1 TC=0 RD=0 RA=1 RCODE=NOERROR
//! QDCOUNT  1, the request question echoed verbatim
//! ANCOUNT  one per token
//! NSCOUNT  0
//! ARCOUNT  0
//! answers  NAME=queried name, TYPE=TXT (16), CLASS=IN (1), TTL=60,
//!          RDATA=the token as one <character-string>
//! ```

use crate::error::Error;
use trust_dns_proto::op::{Message, MessageType, OpCode, Query};
use trust_dns_proto::rr::rdata::TXT;
use trust_dns_proto::rr::{RData, Record, RecordType};

/// TTL in seconds of every answer record.
pub const ANSWER_TTL: u32 = 60;

/// A decoded DNS request carrying exactly one question.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    id: u16,
    message_type: MessageType,
    op_code: OpCode,
    question: Query,
}

impl DnsQuery {
    #[must_use]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &Query {
        &self.question
    }

    #[must_use]
    pub fn query_type(&self) -> RecordType {
        self.question.query_type()
    }

    /// Whether the message is a plain query (`QR=0`, `OPCODE=QUERY`) rather than a response,
    /// notify, update or other operation.
    #[must_use]
    pub fn is_standard_query(&self) -> bool {
        self.message_type == MessageType::Query && self.op_code == OpCode::Query
    }

    /// The question name lowercased, in presentation format with a trailing dot.
    #[must_use]
    pub fn lowercase_name(&self) -> String {
        self.question.name().to_lowercase().to_ascii()
    }
}

/// Decode a raw datagram into a [`DnsQuery`].
///
/// # Errors
///
/// Returns [`Error::MalformedQuery`] if the datagram isn't a well-formed DNS message, or
/// [`Error::UnexpectedQuestionCount`] if it doesn't carry exactly one question.
pub fn decode_query(bytes: &[u8]) -> Result<DnsQuery, Error> {
    let message = Message::from_vec(bytes).map_err(Error::MalformedQuery)?;
    let [question]: [Query; 1] = message
        .queries()
        .to_vec()
        .try_into()
        .map_err(|queries: Vec<Query>| Error::UnexpectedQuestionCount(queries.len()))?;
    Ok(DnsQuery {
        id: message.id(),
        message_type: message.message_type(),
        op_code: message.op_code(),
        question,
    })
}

/// An authoritative TXT answer to a [`DnsQuery`].
#[derive(Debug, Clone)]
pub struct DnsResponse {
    id: u16,
    question: Query,
    tokens: Vec<String>,
}

impl DnsResponse {
    /// Build a response to `query` with one TXT answer per token, in the given order.
    #[must_use]
    pub fn answer(query: &DnsQuery, tokens: &[String]) -> Self {
        Self {
            id: query.id,
            question: query.question.clone(),
            tokens: tokens.to_vec(),
        }
    }

    /// Encode the response for the wire.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DNSError`] if the message can't be encoded, e.g. for a token longer than
    /// 255 bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut message = Message::new();
        message
            .set_id(self.id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_authoritative(true)
            .set_recursion_desired(false)
            .set_recursion_available(true);
        message.add_query(self.question.clone());
        message.add_answers(self.records());
        Ok(message.to_vec()?)
    }

    fn records(&self) -> Vec<Record> {
        self.tokens
            .iter()
            .map(|token| {
                Record::from_rdata(
                    self.question.name().clone(),
                    ANSWER_TTL,
                    RData::TXT(TXT::new(vec![token.clone()])),
                )
            })
            .collect()
    }
}

/// Encode a single-question query, for tests.
#[cfg(test)]
pub(crate) fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    use trust_dns_proto::rr::Name;

    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    message.to_vec().unwrap()
}

/// The TXT strings of every answer in an encoded single-question response, in wire order.
#[cfg(test)]
pub(crate) fn answer_tokens(bytes: &[u8]) -> Vec<String> {
    fn skip_name(bytes: &[u8], mut pos: usize) -> usize {
        loop {
            let len = usize::from(bytes[pos]);
            if len & 0xc0 == 0xc0 {
                return pos + 2;
            }
            pos += 1 + len;
            if len == 0 {
                return pos;
            }
        }
    }

    let answer_count = u16::from_be_bytes([bytes[6], bytes[7]]);
    // Header, then the question name, type and class.
    let mut pos = skip_name(bytes, 12) + 4;
    (0..answer_count)
        .map(|_| {
            // Name, then type, class and TTL.
            pos = skip_name(bytes, pos) + 8;
            let rdlength = usize::from(u16::from_be_bytes([bytes[pos], bytes[pos + 1]]));
            let rdata = &bytes[pos + 2..pos + 2 + rdlength];
            pos += 2 + rdlength;
            let len = usize::from(rdata[0]);
            String::from_utf8(rdata[1..=len].to_vec()).unwrap()
        })
        .collect()
}
