//! Wire codec helpers shared by the dispatcher and the translator.

use dohgate_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

pub fn decode(datagram: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(datagram)
        .map_err(|e| DomainError::MalformedClientQuery(format!("Failed to decode datagram: {}", e)))
}

/// Empty reply skeleton for `request`: same id, opcode and RD flag, QR and RA
/// set, questions copied.
pub fn reply_to(request: &Message) -> Message {
    let mut reply = Message::new();
    reply
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError);
    for query in request.queries() {
        reply.add_query(query.clone());
    }
    reply
}

pub fn server_failure(request: &Message) -> Message {
    let mut reply = reply_to(request);
    reply.set_response_code(ResponseCode::ServFail);
    reply
}

pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::Serialization(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}
