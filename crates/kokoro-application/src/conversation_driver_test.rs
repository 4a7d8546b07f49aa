#[cfg(test)]
mod tests {
    use crate::analyzer_service::EntryAnalyzer;
    use crate::conversation_driver::ConversationDriver;
    use crate::test_support::MockInsightService;
    use kokoro_core::conversation::{ChatState, TurnSender};
    use kokoro_core::error::KokoroError;
    use std::sync::Arc;

    fn driver_with(mock: MockInsightService) -> (Arc<ConversationDriver>, Arc<MockInsightService>) {
        let service = Arc::new(mock);
        let analyzer = Arc::new(EntryAnalyzer::new(service.clone()));
        (
            Arc::new(ConversationDriver::new(service.clone(), analyzer)),
            service,
        )
    }

    #[tokio::test]
    async fn test_start_rejects_empty_seed_text() {
        let (driver, service) = driver_with(MockInsightService::new());

        let err = driver.start("   ").await.unwrap_err();

        assert!(err.is_session_state());
        assert_eq!(driver.state().await, ChatState::Idle);
        assert_eq!(service.analyze_calls(), 0);
    }

    #[tokio::test]
    async fn test_start_seeds_from_analysis_and_appends_opening_turn() {
        let (driver, service) =
            driver_with(MockInsightService::new().with_opening_reply("How was the project?"));

        let opening = driver.start("Today I wrapped up the release.").await.unwrap();

        assert_eq!(opening, "How was the project?");
        assert_eq!(driver.state().await, ChatState::AwaitingUserTurn);
        // The seed text was analyzed for grounding before the opening call.
        assert_eq!(service.analyze_calls(), 1);

        let transcript = driver.transcript().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].sender, TurnSender::Ai);
    }

    #[tokio::test]
    async fn test_start_failure_returns_to_idle() {
        let (driver, _) = driver_with(MockInsightService::new().with_opening_failure());

        let err = driver.start("A long enough seed entry.").await.unwrap_err();

        assert!(matches!(err, KokoroError::ServiceUnavailable(_)));
        assert_eq!(driver.state().await, ChatState::Idle);
        assert!(driver.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn test_double_start_is_rejected() {
        let (driver, _) = driver_with(MockInsightService::new());
        driver.start("A long enough seed entry.").await.unwrap();

        let err = driver.start("Another seed.").await.unwrap_err();
        assert!(err.is_session_state());
    }

    #[tokio::test]
    async fn test_failed_reply_rolls_back_the_user_turn() {
        let (driver, _) = driver_with(
            MockInsightService::new()
                .with_opening_reply("hi")
                .with_turn_replies(vec![Err(KokoroError::service_unavailable(
                    "connection refused",
                ))]),
        );
        driver.start("A long enough seed entry.").await.unwrap();

        let err = driver.submit("I'm stressed").await.unwrap_err();

        assert!(matches!(err, KokoroError::ServiceUnavailable(_)));
        // The transcript is exactly the opening turn again and the session
        // is ready for another attempt.
        assert_eq!(driver.transcript().await.flatten(), "AI: hi");
        assert_eq!(driver.state().await, ChatState::AwaitingUserTurn);
    }

    #[tokio::test]
    async fn test_successful_turn_appends_both_sides() {
        let (driver, _) = driver_with(
            MockInsightService::new()
                .with_opening_reply("hi")
                .with_turn_replies(vec![Ok("That sounds rough.".to_string())]),
        );
        driver.start("A long enough seed entry.").await.unwrap();

        let reply = driver.submit("I'm stressed").await.unwrap();

        assert_eq!(reply, "That sounds rough.");
        assert_eq!(
            driver.transcript().await.flatten(),
            "AI: hi\nMe: I'm stressed\nAI: That sounds rough."
        );
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_without_append() {
        let (driver, _) = driver_with(MockInsightService::new());
        driver.start("A long enough seed entry.").await.unwrap();

        let err = driver.submit("  ").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(driver.transcript().await.len(), 1);
        assert_eq!(driver.state().await, ChatState::AwaitingUserTurn);
    }

    #[tokio::test]
    async fn test_submit_while_reply_in_flight_is_rejected() {
        let (driver, service) = driver_with(MockInsightService::new().with_opening_reply("hi"));
        let gate = service.gate_chat_turn();
        driver.start("A long enough seed entry.").await.unwrap();

        let in_flight = {
            let driver = driver.clone();
            tokio::spawn(async move { driver.submit("first message").await })
        };

        // Wait until the first submission is actually in flight.
        while driver.state().await != ChatState::AwaitingAiTurn {
            tokio::task::yield_now().await;
        }

        let err = driver.submit("second message").await.unwrap_err();
        assert!(err.is_session_state());
        // No duplicate append happened for the rejected turn.
        assert_eq!(driver.transcript().await.len(), 2);

        gate.notify_one();
        in_flight.await.unwrap().unwrap();
        assert_eq!(driver.state().await, ChatState::AwaitingUserTurn);
        assert_eq!(driver.transcript().await.len(), 3);
    }

    #[tokio::test]
    async fn test_close_flattens_a_session_with_turns() {
        let (driver, _) = driver_with(
            MockInsightService::new()
                .with_opening_reply("hi")
                .with_turn_replies(vec![Ok("nice".to_string())]),
        );
        driver.start("A long enough seed entry.").await.unwrap();
        driver.submit("good day").await.unwrap();

        let flattened = driver.close().await.unwrap();
        assert_eq!(flattened, "AI: hi\nMe: good day\nAI: nice");
        assert_eq!(driver.state().await, ChatState::Closed);

        // Closed is terminal.
        assert!(driver.close().await.is_none());
        assert!(driver.submit("anything").await.is_err());
    }

    #[tokio::test]
    async fn test_close_discards_an_empty_session() {
        let (driver, _) = driver_with(MockInsightService::new());
        assert!(driver.close().await.is_none());
        assert_eq!(driver.state().await, ChatState::Idle);
    }

    #[tokio::test]
    async fn test_late_reply_cannot_corrupt_a_closed_session() {
        let (driver, service) = driver_with(
            MockInsightService::new()
                .with_opening_reply("hi")
                .with_turn_replies(vec![Ok("too late".to_string())]),
        );
        let gate = service.gate_chat_turn();
        driver.start("A long enough seed entry.").await.unwrap();

        let in_flight = {
            let driver = driver.clone();
            tokio::spawn(async move { driver.submit("closing soon").await })
        };
        while driver.state().await != ChatState::AwaitingAiTurn {
            tokio::task::yield_now().await;
        }

        // Exit chat mid-call: the pending user turn is part of the
        // flattened transcript, the eventual reply is not.
        let flattened = driver.close().await.unwrap();
        assert_eq!(flattened, "AI: hi\nMe: closing soon");

        gate.notify_one();
        let late = in_flight.await.unwrap();
        assert!(late.unwrap_err().is_session_state());
        assert_eq!(driver.transcript().await.flatten(), "AI: hi\nMe: closing soon");
        assert_eq!(driver.state().await, ChatState::Closed);
    }
}
