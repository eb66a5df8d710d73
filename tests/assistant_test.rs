//! Integration tests for the assistant session against a mocked
//! chat completions API

mod test_utils;

#[cfg(test)]
mod tests {
    use storefront::ai::chat::{
        ChatTurn, EMPTY_REPLY_FALLBACK, ERROR_FALLBACK, GREETING, SessionStatus,
    };

    use crate::test_utils::{completion_body, persona, test_session};

    /// Tests a successful round trip appends the model's reply
    #[tokio::test]
    async fn it_appends_model_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-api-key")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": persona()},
                    {"role": "user", "content": "Something sweet for Diwali?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("Namaste! Putharekulu make a lovely festive gift."))
            .create_async()
            .await;

        let session = test_session(&server.url());
        session
            .submit("Something sweet for Diwali?")
            .finished()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            session.transcript(),
            vec![
                ChatTurn::assistant(GREETING),
                ChatTurn::user("Something sweet for Diwali?"),
                ChatTurn::assistant("Namaste! Putharekulu make a lovely festive gift."),
            ]
        );
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    /// Tests a transport failure turns into the fallback apology
    #[tokio::test]
    async fn it_recovers_from_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let session = test_session(&server.url());
        session
            .submit("spicy pickle recommendation")
            .finished()
            .await
            .unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1], ChatTurn::user("spicy pickle recommendation"));
        assert_eq!(transcript[2], ChatTurn::assistant(ERROR_FALLBACK));
        assert!(transcript[2].text.contains("WhatsApp"));
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    /// Tests an unreachable service is handled like any other failure
    #[tokio::test]
    async fn it_recovers_from_unreachable_service() {
        let session = test_session("http://127.0.0.1:9");
        session.submit("hello").finished().await.unwrap();

        assert_eq!(session.transcript().last().unwrap().text, ERROR_FALLBACK);
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    /// Tests a malformed payload is a failure
    #[tokio::test]
    async fn it_recovers_from_malformed_payload() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"object":"chat.completion","choices":[]}"#)
            .create_async()
            .await;

        let session = test_session(&server.url());
        session.submit("hello").finished().await.unwrap();

        assert_eq!(session.transcript().last().unwrap().text, ERROR_FALLBACK);
    }

    /// Tests an empty reply is replaced with the retry message
    #[tokio::test]
    async fn it_replaces_empty_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(""))
            .create_async()
            .await;

        let session = test_session(&server.url());
        session.submit("hello").finished().await.unwrap();

        assert_eq!(
            session.transcript().last().unwrap().text,
            EMPTY_REPLY_FALLBACK
        );
    }

    /// Tests each accepted question gets exactly one answer, in order
    #[tokio::test]
    async fn it_keeps_turns_in_order() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("Try the Gongura."))
            .expect(2)
            .create_async()
            .await;

        let session = test_session(&server.url());
        session.submit("first").finished().await.unwrap();
        // Ignored, nothing is sent
        assert!(!session.submit("   ").is_accepted());
        session.submit("second").finished().await.unwrap();

        let texts: Vec<String> = session.transcript().into_iter().map(|t| t.text).collect();
        assert_eq!(
            texts,
            vec![
                GREETING.to_string(),
                "first".to_string(),
                "Try the Gongura.".to_string(),
                "second".to_string(),
                "Try the Gongura.".to_string(),
            ]
        );
    }
}
