use dohgate_infrastructure::dns::wire_response::encode;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};

pub fn query_datagram(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    encode(&message).unwrap()
}

pub fn empty_datagram(id: u16) -> Vec<u8> {
    let mut message = Message::new();
    message.set_id(id).set_message_type(MessageType::Query);
    encode(&message).unwrap()
}

pub fn parse_reply(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}
