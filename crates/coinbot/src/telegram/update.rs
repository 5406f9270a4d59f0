//! Conversion of Telegram updates into core events

use coincore::Inbound;
use teloxide::types::{CallbackQuery, ChatId, Message, Update, UpdateKind, UserId};

/// A routable update: the core event, where to answer, and the callback to ack.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub inbound: Inbound,
    pub chat_id: ChatId,
    pub callback: Option<CallbackQuery>,
}

/// Extracts the event the bot reacts to.
///
/// Only text messages and callback queries carrying data are routed.
/// Everything else (stickers, edits, member updates, ...) yields `None`.
pub fn incoming_from_update(update: Update) -> Option<Incoming> {
    match update.kind {
        UpdateKind::Message(message) => from_message(message),
        UpdateKind::CallbackQuery(query) => from_callback(query),
        _ => None,
    }
}

fn from_message(message: Message) -> Option<Incoming> {
    let text = message.text()?.to_string();
    let sender = message
        .from
        .as_ref()
        .and_then(|user| user_id_to_i64(user.id))
        .unwrap_or(message.chat.id.0);

    Some(Incoming {
        inbound: Inbound::text(sender, text),
        chat_id: message.chat.id,
        callback: None,
    })
}

fn from_callback(query: CallbackQuery) -> Option<Incoming> {
    let data = query.data.clone()?;
    let sender = user_id_to_i64(query.from.id)?;
    let chat_id = query
        .message
        .as_ref()
        .map(|message| message.chat().id)
        .unwrap_or_else(|| ChatId::from(query.from.id));

    Some(Incoming {
        inbound: Inbound::callback(sender, data),
        chat_id,
        callback: Some(query),
    })
}

fn user_id_to_i64(id: UserId) -> Option<i64> {
    i64::try_from(id.0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coincore::Payload;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    // Parsed from text like the webhook body; `from_value` loses the update kind.
    fn parse(value: serde_json::Value) -> Update {
        serde_json::from_str(&value.to_string()).unwrap()
    }

    fn text_update(text: &str) -> Update {
        parse(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "text": text
            }
        }))
    }

    #[test]
    fn test_text_message() {
        let incoming = incoming_from_update(text_update("/start")).unwrap();
        assert_eq!(incoming.inbound, Inbound::text(42, "/start"));
        assert_eq!(incoming.chat_id, ChatId(42));
        assert!(incoming.callback.is_none());
    }

    #[test]
    fn test_callback_query() {
        let update = parse(json!({
            "update_id": 2,
            "callback_query": {
                "id": "cbq1",
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "chat_instance": "ci",
                "data": "play",
                "message": {
                    "message_id": 11,
                    "date": 1700000000,
                    "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                    "text": "menu"
                }
            }
        }));
        let incoming = incoming_from_update(update).unwrap();
        assert_eq!(incoming.inbound.payload, Payload::Callback("play".to_string()));
        assert_eq!(incoming.inbound.sender, 42);
        assert_eq!(incoming.chat_id, ChatId(42));
        assert!(incoming.callback.is_some());
    }

    #[test]
    fn test_callback_without_message_answers_the_user() {
        let update = parse(json!({
            "update_id": 3,
            "callback_query": {
                "id": "cbq2",
                "from": {"id": 77, "is_bot": false, "first_name": "Bo"},
                "chat_instance": "ci",
                "data": "wallet"
            }
        }));
        let incoming = incoming_from_update(update).unwrap();
        assert_eq!(incoming.chat_id, ChatId(77));
    }

    #[test]
    fn test_message_without_text_is_ignored() {
        let update = parse(json!({
            "update_id": 4,
            "message": {
                "message_id": 12,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "location": {"latitude": 1.0, "longitude": 2.0}
            }
        }));
        assert!(matches!(update.kind, UpdateKind::Message(_)));
        assert!(incoming_from_update(update).is_none());
    }

    #[test]
    fn test_text_update_is_a_message_kind() {
        assert!(matches!(text_update("hi").kind, UpdateKind::Message(_)));
    }
}
