use crate::dns::codec::{decode_query, DnsQuery, DnsResponse};
use crate::error::Error;
use crate::zone::DynZoneStore;
use std::net::SocketAddr;
use tracing::{debug, error, info, warn};
use trust_dns_proto::rr::RecordType;

#[derive(Clone)]
pub struct Handler {
    zone_store: DynZoneStore,
}

impl Handler {
    #[must_use]
    pub fn new(zone_store: DynZoneStore) -> Self {
        Handler { zone_store }
    }

    /// Answer one datagram. Returns the response bytes to send back to `src`, or `None` when
    /// nothing should be sent. Never fails: problems with a single query are logged here.
    pub async fn handle(&self, datagram: &[u8], src: SocketAddr) -> Option<Vec<u8>> {
        match self.dispatch_request(datagram, src).await {
            Ok(response) => response,
            Err(err @ (Error::MalformedQuery(_) | Error::UnexpectedQuestionCount(_))) => {
                warn!("dropping query from {src}: {err:?}");
                None
            }
            Err(err) => {
                error!("error handling query from {src}: {err:?}");
                None
            }
        }
    }

    async fn dispatch_request(
        &self,
        datagram: &[u8],
        src: SocketAddr,
    ) -> Result<Option<Vec<u8>>, Error> {
        let query = decode_query(datagram)?;
        debug!(
            %src,
            id = query.id(),
            name = %query.question().name(),
            query_type = %query.query_type(),
            "received query"
        );

        // Responses, notifies, updates etc. are never answered.
        if !query.is_standard_query() {
            return Ok(None);
        }

        match query.query_type() {
            RecordType::TXT => self.handle_request_txt(&query, src).await,
            _ => Ok(None),
        }
    }

    async fn handle_request_txt(
        &self,
        query: &DnsQuery,
        src: SocketAddr,
    ) -> Result<Option<Vec<u8>>, Error> {
        let zone = self.zone_store.load().await?;
        let name = query.lowercase_name();
        let Some(tokens) = zone.get(&name) else {
            debug!("no tokens for \"{name}\"");
            return Ok(None);
        };

        info!("answering \"{name}\" for {src} with {} token(s)", tokens.len());
        DnsResponse::answer(query, tokens).to_bytes().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::codec::{answer_tokens, query_bytes, ANSWER_TTL};
    use crate::zone::{FileZoneStore, InMemoryZoneStore, ZoneMap};
    use std::sync::Arc;
    use trust_dns_proto::op::{Message, MessageType};

    const SCENARIO: &str = "example.com.\nTOKEN-A\nexample.com.\nTOKEN-B\n";

    fn src() -> SocketAddr {
        "192.0.2.1:5300".parse().unwrap()
    }

    fn handler(contents: &str) -> Handler {
        Handler::new(Arc::new(InMemoryZoneStore::new(ZoneMap::parse(contents))))
    }

    #[tokio::test]
    async fn test_txt_answer() {
        let request = query_bytes(0x1234, "_acme-challenge.example.com.", RecordType::TXT);
        let bytes = handler(SCENARIO).handle(&request, src()).await.unwrap();

        let response = Message::from_vec(&bytes).unwrap();
        assert_eq!(response.id(), 0x1234);
        assert_eq!(response.message_type(), MessageType::Response);
        assert!(response.authoritative());
        assert!(response.recursion_available());
        assert_eq!(response.queries().len(), 1);
        assert_eq!(response.answers().len(), 2);
        assert!(response
            .answers()
            .iter()
            .all(|r| r.record_type() == RecordType::TXT && r.ttl() == ANSWER_TTL));
        assert_eq!(answer_tokens(&bytes), ["TOKEN-A", "TOKEN-B"]);
    }

    #[tokio::test]
    async fn test_txt_answer_keeps_file_order() {
        let request = query_bytes(1, "_acme-challenge.example.com.", RecordType::TXT);
        let bytes = handler("example.com
Z-TOKEN
other.com
X
example.com
A-TOKEN
")
            .handle(&request, src())
            .await
            .unwrap();

        assert_eq!(answer_tokens(&bytes), ["Z-TOKEN", "A-TOKEN"]);
    }

    #[tokio::test]
    async fn test_query_name_is_case_insensitive() {
        let request = query_bytes(1, "_ACME-Challenge.Example.COM.", RecordType::TXT);
        let bytes = handler(SCENARIO).handle(&request, src()).await.unwrap();

        let response = Message::from_vec(&bytes).unwrap();
        assert_eq!(answer_tokens(&bytes), ["TOKEN-A", "TOKEN-B"]);
        assert_eq!(
            response.queries()[0].name().to_ascii(),
            "_ACME-Challenge.Example.COM."
        );
    }

    #[tokio::test]
    async fn test_non_txt_query_unanswered() {
        let handler = handler(SCENARIO);
        for record_type in [RecordType::A, RecordType::AAAA, RecordType::SOA, RecordType::ANY] {
            let request = query_bytes(1, "_acme-challenge.example.com.", record_type);
            assert!(handler.handle(&request, src()).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_unknown_name_unanswered() {
        let handler = handler(SCENARIO);
        for name in ["example.com.", "_acme-challenge.other.com.", "_acme-challenge.com."] {
            let request = query_bytes(1, name, RecordType::TXT);
            assert!(handler.handle(&request, src()).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_malformed_unanswered() {
        let handler = handler(SCENARIO);
        assert!(handler.handle(&[], src()).await.is_none());
        assert!(handler.handle(&[0xde, 0xad, 0xbe], src()).await.is_none());
        assert!(handler.handle(&[0xff; 64], src()).await.is_none());
    }

    #[tokio::test]
    async fn test_response_message_unanswered() {
        let mut request = query_bytes(1, "_acme-challenge.example.com.", RecordType::TXT);
        request[2] |= 0x80;
        assert!(handler(SCENARIO).handle(&request, src()).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_zone_file_unanswered() {
        let dir = tempfile::tempdir().unwrap();
        let handler = Handler::new(Arc::new(FileZoneStore::new(dir.path().join("missing"))));

        let request = query_bytes(1, "_acme-challenge.example.com.", RecordType::TXT);
        assert!(handler.handle(&request, src()).await.is_none());
    }

    #[tokio::test]
    async fn test_zone_file_reloaded_per_query() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acmedns.txt");
        let handler = Handler::new(Arc::new(FileZoneStore::new(&path)));
        let request = query_bytes(1, "_acme-challenge.example.com.", RecordType::TXT);

        tokio::fs::write(&path, "other.com\nTOKEN-X\n").await.unwrap();
        assert!(handler.handle(&request, src()).await.is_none());

        tokio::fs::write(&path, SCENARIO).await.unwrap();
        let bytes = handler.handle(&request, src()).await.unwrap();
        assert_eq!(answer_tokens(&bytes), ["TOKEN-A", "TOKEN-B"]);

        tokio::fs::write(&path, "example.com\nTOKEN-C\n").await.unwrap();
        let bytes = handler.handle(&request, src()).await.unwrap();
        assert_eq!(answer_tokens(&bytes), ["TOKEN-C"]);

        // Same token count, different content.
        tokio::fs::write(&path, "example.com\nTOKEN-D\n").await.unwrap();
        let bytes = handler.handle(&request, src()).await.unwrap();
        assert_eq!(answer_tokens(&bytes), ["TOKEN-D"]);
    }

    #[tokio::test]
    async fn test_oversized_token_unanswered() {
        let contents = format!("example.com\n{}\n", "x".repeat(300));
        let request = query_bytes(1, "_acme-challenge.example.com.", RecordType::TXT);
        assert!(handler(&contents).handle(&request, src()).await.is_none());
    }
}
