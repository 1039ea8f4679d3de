//! Host integration tests
//!
//! Full conversations through the skill handler and the in-memory session
//! store, checking what the host sees on the wire and what is persisted.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;

use FailChat::{
    config::UnknownIntentPolicy,
    dialog::REASSURANCE_ANSWERS,
    handlers::{RequestEnvelope, RequestType},
    state::session::{SESSION_ANSWER_ID, SESSION_CALL_TO_ID, SESSION_STAGE},
    DialogError, FailChatError,
};

#[tokio::test]
async fn test_launch_persists_awaiting_stage() {
    let host = TestHost::new();

    let response = host.launch().await.unwrap();

    assert_eq!(ssml(&response), "<speak>Are you ok?</speak>");
    assert!(!ends_session(&response));
    let body = response.response.as_ref().unwrap();
    assert_eq!(
        body.reprompt.as_ref().unwrap().output_speech.ssml,
        "<speak>I didn't hear a response, are you ok?</speak>"
    );

    let attributes = host.store.attributes(&host.session_id).await.unwrap();
    assert_eq!(attributes.get(SESSION_STAGE), Some(&json!(1)));
}

#[tokio::test]
async fn test_good_path_closes_and_forgets_session() {
    let host = TestHost::new();

    host.launch().await.unwrap();
    let good = host.intent("ConditionGoodIntent").await.unwrap();

    let answer = REASSURANCE_ANSWERS
        .iter()
        .find(|a| spoken(&good) == a.spoken_text)
        .expect("answer from the pool");
    let card = good.response.as_ref().unwrap().card.as_ref().unwrap();
    assert_eq!(card.content, answer.card_text);
    assert_eq!(card.title, "Fail Chat");
    assert!(!ends_session(&good));

    let closed = host.intent("ConfirmGoodConditionIntent").await.unwrap();
    assert_eq!(spoken(&closed), "I am always here if you need me");
    assert!(ends_session(&closed));
    assert!(closed.response.as_ref().unwrap().reprompt.is_none());
    assert!(!host.store.exists(&host.session_id).await);
}

#[tokio::test]
async fn test_bad_path_offers_and_calls_same_contact() {
    let host = TestHost::new();

    host.launch().await.unwrap();
    let offer = host.intent("ConditionBad").await.unwrap();
    let offered = spoken(&offer).trim_start_matches("Shall I call").to_string();

    let attributes = host.store.attributes(&host.session_id).await.unwrap();
    assert_eq!(attributes.get(SESSION_STAGE), Some(&json!(4)));
    assert!(attributes.contains_key(SESSION_CALL_TO_ID));

    let request = RequestEnvelope::intent(host.session_id.as_str(), "ConditionBadConfirm")
        .with_slot("CallToName", "Dor")
        .with_slot("Answer", "yes");
    let call = host.send(request).await.unwrap();

    assert_eq!(spoken(&call), format!("Ok, calling{}", offered));
    assert!(!ends_session(&call));
    let reprompt = &call.response.as_ref().unwrap().reprompt.as_ref().unwrap().output_speech.ssml;
    assert_eq!(reprompt, "<speak>AnswerCallToNamewe had2slots</speak>");

    let attributes = host.store.attributes(&host.session_id).await.unwrap();
    assert_eq!(attributes.get(SESSION_STAGE), Some(&json!(5)));
    assert!(attributes.contains_key(SESSION_CALL_TO_ID));
}

#[tokio::test]
async fn test_call_can_close_session_when_configured() {
    let host = TestHost::with_settings(test_settings(true, UnknownIntentPolicy::Fallback));

    host.launch().await.unwrap();
    host.intent("ConditionBad").await.unwrap();
    let call = host.intent("ConditionBadConfirm").await.unwrap();

    assert!(spoken(&call).starts_with("Ok, calling"));
    assert!(ends_session(&call));
    assert!(!host.store.exists(&host.session_id).await);
}

#[tokio::test]
async fn test_confused_answer_uses_pause() {
    let host = TestHost::new();

    host.launch().await.unwrap();
    host.intent("ConditionGood").await.unwrap();
    let confused = host.intent("ConditionBad").await.unwrap();

    assert_eq!(
        ssml(&confused),
        "<speak>I was asking if you are ok! <break time=\"0.3s\" /> ok, ok?</speak>"
    );
    let attributes = host.store.attributes(&host.session_id).await.unwrap();
    assert_eq!(attributes.get(SESSION_STAGE), Some(&json!(1)));
    assert!(!attributes.contains_key(SESSION_ANSWER_ID));
}

#[tokio::test]
async fn test_session_ended_deletes_state() {
    let host = TestHost::new();

    host.launch().await.unwrap();
    assert!(host.store.exists(&host.session_id).await);

    let ended = host.end().await.unwrap();

    assert!(ended.response.is_none());
    assert!(!host.store.exists(&host.session_id).await);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let host = TestHost::new();

    host.launch().await.unwrap();
    let other = host
        .send(RequestEnvelope::intent("other-session", "ConditionBad"))
        .await
        .unwrap();

    assert_eq!(spoken(&other), "Sorry, I couldn't hear you well. You can ask for help again.");
    assert!(host.store.exists(&host.session_id).await);
}

#[tokio::test]
async fn test_unknown_intent_fallback_keeps_state() {
    let host = TestHost::new();

    host.launch().await.unwrap();
    let response = host.intent("AMAZON.StopIntent").await.unwrap();

    assert_eq!(spoken(&response), "Sorry, I didn't understand that. You can ask for help.");
    assert!(!ends_session(&response));
    let attributes = host.store.attributes(&host.session_id).await.unwrap();
    assert_eq!(attributes.get(SESSION_STAGE), Some(&json!(1)));
}

#[tokio::test]
async fn test_unknown_intent_rejected_when_configured() {
    let host = TestHost::with_settings(test_settings(false, UnknownIntentPolicy::Reject));

    let result = host.intent("AMAZON.StopIntent").await;

    assert_matches!(
        result,
        Err(FailChatError::Dialog(DialogError::UnknownIntent(name))) if name == "AMAZON.StopIntent"
    );
}

#[tokio::test]
async fn test_intent_request_without_name_is_invalid() {
    let host = TestHost::new();
    let request = RequestEnvelope::new(RequestType::Intent, host.session_id.as_str());

    let result = host.send(request).await;

    assert_matches!(result, Err(FailChatError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let host = TestHost::new();
    let mut request = RequestEnvelope::new(RequestType::Launch, host.session_id.as_str());
    request.request_id = Some("req-42".to_string());

    let response = host.send(request).await.unwrap();

    assert_eq!(response.request_id, "req-42");
    assert_eq!(response.session_id, host.session_id);
    assert_eq!(response.version, "1.0");
}

#[tokio::test]
async fn test_wire_round_trip_from_json_line() {
    let host = TestHost::new();
    let line = r#"{"type":"Intent","intentName":"HelpIntent","sessionId":"wire-session"}"#;

    let request = RequestEnvelope::from_json(line).unwrap();
    let response = host.send(request).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

    assert_eq!(json["sessionId"], "wire-session");
    assert_eq!(json["response"]["outputSpeech"]["type"], "SSML");
    assert_eq!(json["response"]["shouldEndSession"], false);
    assert!(json["response"]["outputSpeech"]["ssml"]
        .as_str()
        .unwrap()
        .contains("Knock knock jokes"));
}

#[tokio::test]
async fn test_every_line_gets_exactly_one_reply() {
    let host = TestHost::with_settings(test_settings(false, UnknownIntentPolicy::Reject));
    let lines = [
        r#"{"type":"Launch","sessionId":"line-session","requestId":"r-1"}"#,
        r#"{"type":"Intent","intentName":"AMAZON.StopIntent","sessionId":"line-session","requestId":"r-2"}"#,
        "garbage",
        r#"{"type":"Intent","intentName":"HelpIntent","sessionId":"line-session","requestId":"r-4"}"#,
    ];

    let mut replies = Vec::new();
    for line in lines {
        replies.push(host.line(line).await);
    }

    assert_eq!(replies.len(), 4);

    assert!(!replies[0].is_error());
    assert_eq!(spoken(&replies[0]), "Are you ok?");

    let rejected = &replies[1];
    assert_eq!(rejected.request_id, "r-2");
    assert_eq!(rejected.session_id, "line-session");
    assert!(rejected.response.is_none());
    assert_eq!(rejected.error.as_ref().unwrap().code, "unknown_intent");

    let garbage = &replies[2];
    assert!(garbage.response.is_none());
    assert_eq!(garbage.session_id, "");
    assert_eq!(garbage.error.as_ref().unwrap().code, "malformed_request");

    // The rejected intent left the conversation where it was
    assert_eq!(spoken(&replies[3]), "You can ask, who's there, or you can say exit.");
}

#[tokio::test]
async fn test_failed_line_echoes_known_ids() {
    let host = TestHost::new();

    let nameless = host.line(r#"{"type":"Intent","sessionId":"s-9","requestId":"r-9"}"#).await;
    assert_eq!(nameless.session_id, "s-9");
    assert_eq!(nameless.request_id, "r-9");
    assert_eq!(nameless.error.as_ref().unwrap().code, "invalid_request");

    let unknown_type = host.line(r#"{"type":"Bogus","sessionId":"s-9","requestId":"r-10"}"#).await;
    assert_eq!(unknown_type.session_id, "s-9");
    assert_eq!(unknown_type.request_id, "r-10");
    assert_eq!(unknown_type.error.as_ref().unwrap().code, "malformed_request");

    let json: serde_json::Value = serde_json::from_str(&unknown_type.to_json().unwrap()).unwrap();
    assert_eq!(json["response"], serde_json::Value::Null);
    assert!(json["error"]["message"].as_str().unwrap().contains("Serialization error"));
}
