//! Properties of list reconciliation and stream decoding

use chatcast::client::{Delivery, MessageList, SseDecoder, SseEvent};
use chatcast::shared::Message;
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_message() -> impl Strategy<Value = Message> {
    ("[a-e]", "[a-z ]{0,12}").prop_map(|(id, content)| Message::with_id(id, "u1", "Alice", content))
}

#[derive(Debug, Clone)]
enum Op {
    Local(Message),
    Echo(Message),
    Publish(String, bool),
    Pending(String),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_message().prop_map(Op::Local),
        arb_message().prop_map(Op::Echo),
        ("[a-e]", any::<bool>()).prop_map(|(id, ok)| Op::Publish(id, ok)),
        "[a-e]".prop_map(Op::Pending),
    ]
}

fn apply(list: &MessageList, op: &Op) -> MessageList {
    match op {
        Op::Local(message) => list.insert_local(message.clone()),
        Op::Echo(message) => list.upsert_echo(message.clone()),
        Op::Publish(id, ok) => list.record_publish(id, *ok),
        Op::Pending(id) => list.mark_pending(id),
    }
}

fn first_appearance(ops: &[Op]) -> Vec<String> {
    let mut seen = HashSet::new();
    ops.iter()
        .filter_map(|op| match op {
            Op::Local(m) | Op::Echo(m) => Some(m.id.clone()),
            _ => None,
        })
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

proptest! {
    #[test]
    fn ids_are_unique_in_first_appearance_order(ops in prop::collection::vec(arb_op(), 0..40)) {
        let list = ops.iter().fold(MessageList::new(), |list, op| apply(&list, op));
        let ids: Vec<String> = list.ids().into_iter().map(String::from).collect();
        prop_assert_eq!(ids, first_appearance(&ops));
    }

    #[test]
    fn echo_is_idempotent(ops in prop::collection::vec(arb_op(), 0..20), echo in arb_message()) {
        let list = ops.iter().fold(MessageList::new(), |list, op| apply(&list, op));
        let once = list.upsert_echo(echo.clone());
        let twice = once.upsert_echo(echo);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn echo_after_local_insert_keeps_length(message in arb_message(), ok in any::<bool>()) {
        let list = MessageList::new()
            .insert_local(message.clone())
            .record_publish(&message.id, ok)
            .upsert_echo(message.clone());
        prop_assert_eq!(list.len(), 1);
        prop_assert_eq!(list.delivery(&message.id), Some(Delivery::Echoed));

        // A late publish failure leaves the echo alone
        let late = list.record_publish(&message.id, false);
        prop_assert!(late.failed_ids().is_empty());
    }

    #[test]
    fn decoding_ignores_chunk_boundaries(
        contents in prop::collection::vec("[a-zé ]{0,10}", 1..5),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut wire = String::new();
        for (n, content) in contents.iter().enumerate() {
            wire.push_str(&format!("id: m{}\nevent: chat.message\ndata: {}\n\n", n, content));
        }
        let bytes = wire.as_bytes();

        let mut points: Vec<usize> = cuts.iter().map(|cut| cut.index(bytes.len() + 1)).collect();
        points.sort_unstable();
        points.dedup();

        let mut decoder = SseDecoder::new();
        let mut events: Vec<SseEvent> = Vec::new();
        let mut start = 0;
        for point in points.into_iter().chain(std::iter::once(bytes.len())) {
            events.extend(decoder.feed(&bytes[start..point]));
            start = point;
        }

        prop_assert_eq!(events.len(), contents.len());
        for (n, (event, content)) in events.iter().zip(&contents).enumerate() {
            let id = format!("m{}", n);
            prop_assert_eq!(event.id.as_deref(), Some(id.as_str()));
            prop_assert_eq!(&event.data, content);
        }
    }
}
