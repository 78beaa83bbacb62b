//! Property tests for the PDU engine.

use acnpdu_core::io::IoStack;
use acnpdu_core::pdu::{Packable, PduError, Sizeable, parse_pdu};
use acnpdu_core::protocols::e133::{E133Header, E133Layer, E133Pdu};
use acnpdu_core::protocols::rdm::{RdmLayer, RdmPdu, VECTOR_RDMNET_DATA};
use acnpdu_core::protocols::root::{Cid, RootLayer, RootPdu, VECTOR_ROOT_E133};
use acnpdu_core::{MessageBody, MessageSpec, decode_frame, encode_message};
use proptest::prelude::*;

fn header_strategy() -> impl Strategy<Value = E133Header> {
    ("[ -~]{0,64}", any::<u32>(), any::<u16>())
        .prop_map(|(source, sequence, endpoint)| E133Header::new(source, sequence, endpoint))
}

fn payload_strategy(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max)
}

fn pack(pdu: &impl Packable) -> Vec<u8> {
    let mut buf = vec![0u8; pdu.size()];
    let written = pdu.pack(&mut buf).expect("pack");
    assert_eq!(written, buf.len());
    buf
}

proptest! {
    #[test]
    fn leaf_round_trip(
        vector in any::<u32>(),
        header in header_strategy(),
        payload in payload_strategy(6000),
    ) {
        let pdu = E133Pdu::leaf(vector, header.clone(), payload.clone());
        let bytes = pack(&pdu);
        let parsed = parse_pdu::<E133Layer>(&bytes).expect("parse");
        prop_assert_eq!(parsed.vector, vector);
        prop_assert_eq!(&parsed.header, &header);
        prop_assert_eq!(parsed.data, &payload[..]);
        prop_assert_eq!(parsed.length, bytes.len());
    }

    #[test]
    fn nested_round_trip(
        cid in any::<[u8; 16]>(),
        vector in any::<u32>(),
        header in header_strategy(),
        command in payload_strategy(300),
    ) {
        let rdm = RdmPdu::leaf(VECTOR_RDMNET_DATA, (), command.clone());
        let rdm_size = rdm.size();
        let e133 = E133Pdu::wrap(vector, header.clone(), rdm);
        let root = RootPdu::wrap(VECTOR_ROOT_E133, Cid::from_bytes(cid), e133);
        let bytes = pack(&root);

        let outer = parse_pdu::<RootLayer>(&bytes).expect("root");
        prop_assert_eq!(outer.header, Cid::from_bytes(cid));
        let middle = parse_pdu::<E133Layer>(outer.data).expect("e133");
        prop_assert_eq!(middle.data.len(), rdm_size);
        prop_assert_eq!(&middle.header, &header);
        let inner = parse_pdu::<RdmLayer>(middle.data).expect("rdm");
        prop_assert_eq!(inner.data, &command[..]);
    }

    #[test]
    fn data_size_matches_packed_body(
        header in header_strategy(),
        payload in payload_strategy(5000),
    ) {
        let inner = E133Pdu::leaf(1, header.clone(), payload);
        let inner_size = inner.size();
        let outer = E133Pdu::wrap(1, header, inner);
        prop_assert_eq!(outer.data_size(), inner_size);
        prop_assert_eq!(outer.header_size(), 71);

        let bytes = pack(&outer);
        let parsed = parse_pdu::<E133Layer>(&bytes).expect("parse");
        prop_assert_eq!(parsed.data.len(), outer.data_size());
    }

    #[test]
    fn truncated_pdu_never_parses(
        header in header_strategy(),
        payload in payload_strategy(600),
        cut in 1usize..700,
    ) {
        let bytes = pack(&E133Pdu::leaf(1, header, payload));
        let cut = cut.min(bytes.len());
        let err = parse_pdu::<E133Layer>(&bytes[..bytes.len() - cut]).expect_err("truncated");
        prop_assert!(matches!(
            err,
            PduError::TruncatedInput { .. } | PduError::MalformedLength { .. }
        ), "unexpected error: {:?}", err);
    }

    #[test]
    fn truncated_frame_never_decodes(
        source in "[a-z]{0,20}",
        data in payload_strategy(64),
        cut in 1usize..200,
    ) {
        let spec = MessageSpec {
            cid: "000102030405060708090a0b0c0d0e0f".to_string(),
            source,
            sequence: 1,
            endpoint: 1,
            vector: 1,
            body: MessageBody::Rdm { command: hex::encode(data) },
        };
        let frame = encode_message(&spec).expect("encode");
        // keep at least one byte of the root block
        let cut = cut.min(frame.len() - 17);
        prop_assert!(decode_frame(&frame[..frame.len() - cut]).is_err());
    }

    #[test]
    fn flatten_is_idempotent(chunks in prop::collection::vec(payload_strategy(64), 0..16)) {
        let mut stack = IoStack::new();
        for chunk in &chunks {
            stack.write(chunk).expect("write");
        }
        let first = stack.flatten();
        prop_assert_eq!(&first, &stack.flatten());
        prop_assert_eq!(first.len(), stack.size());
    }

    #[test]
    fn overlong_length_claim_is_rejected(
        header in header_strategy(),
        payload in payload_strategy(3000),
        extra in 1usize..=100,
    ) {
        let mut bytes = pack(&E133Pdu::leaf(1, header, payload));
        let claimed = bytes.len() + extra;
        bytes[0] = 0x70 | ((claimed >> 8) as u8 & 0x0F);
        bytes[1] = claimed as u8;
        let err = parse_pdu::<E133Layer>(&bytes).expect_err("overlong");
        prop_assert!(
            matches!(err, PduError::MalformedLength { length, .. } if length == claimed),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn stack_matches_tree(
        vector in any::<u32>(),
        header in header_strategy(),
        payload in payload_strategy(6000),
    ) {
        let tree = E133Pdu::leaf(vector, header.clone(), payload.clone());
        let packed = pack(&tree);

        let mut stack = IoStack::new();
        stack.write(&payload).expect("write");
        E133Pdu::prepend(&mut stack, vector, &header).expect("prepend");
        prop_assert_eq!(&stack.flatten()[..], &packed[..]);

        let mut prepended = IoStack::new();
        tree.prepend_to(&mut prepended).expect("prepend_to");
        prop_assert_eq!(&prepended.flatten()[..], &packed[..]);
        prop_assert_eq!(&tree.pack_to_bytes().expect("stream")[..], &packed[..]);
    }
}
