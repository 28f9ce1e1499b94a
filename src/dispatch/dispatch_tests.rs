//! Tests for prompt composition and dispatch

use std::sync::mpsc;

use super::*;

fn dispatcher(model: Option<&str>) -> (Dispatcher, mpsc::Receiver<CompletionRequest>) {
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(tx, model.map(str::to_string), "nb-1".to_string());
    (dispatcher, rx)
}

#[test]
fn test_ask_question_embeds_prompt_draft_and_context() {
    let question = compose_ask_question(
        "What are the findings?",
        "# Draft\nresults",
        "Sources:\n(1) {}",
        "nb-7",
    );

    assert!(question.contains("notebook nb-7"));
    assert!(question.contains("Question: What are the findings?"));
    assert!(question.contains("Current draft markdown:\n# Draft\nresults"));
    assert!(question.contains("Notebook context:\nSources:\n(1) {}"));
}

#[test]
fn test_edit_question_asks_for_revised_markdown_only() {
    let question = compose_edit_question("Tighten the intro", "# Draft body");

    assert!(question.contains("INSTRUCTIONS:\nTighten the intro"));
    assert!(question.contains("ONLY the revised markdown"));
    assert!(question.ends_with("---\n# Draft body"));
    // Context is deliberately omitted from edit instructions
    assert!(!question.contains("Notebook context"));
}

#[test]
fn test_dispatch_without_model_fails_fast() {
    let (mut dispatcher, rx) = dispatcher(None);

    let result = dispatcher.dispatch("Summarize this", Mode::Ask, "", "", "conv-1");

    let error = result.unwrap_err();
    assert!(matches!(error, CopilotError::NotConfigured));
    assert!(error.to_string().contains("Configure a default chat model"));
    // No backend call was made
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_dispatch_sends_tagged_request_once() {
    let (mut dispatcher, rx) = dispatcher(Some("model-a"));

    let request_id = dispatcher
        .dispatch("question", Mode::Ask, "draft", "ctx", "conv-9")
        .unwrap();

    let request = rx.recv().unwrap();
    assert_eq!(
        request.tag,
        OutcomeTag::Chat {
            conversation: "conv-9".to_string(),
            mode: Mode::Ask,
            request_id,
        }
    );
    assert_eq!(request.ask.strategy_model, "model-a");
    assert_eq!(request.ask.answer_model, "model-a");
    assert_eq!(request.ask.final_answer_model, "model-a");
    assert!(request.ask.question.contains("question"));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_dispatch_request_ids_increment() {
    let (mut dispatcher, _rx) = dispatcher(Some("model-a"));

    let first = dispatcher
        .dispatch("a", Mode::Ask, "", "", "conv-1")
        .unwrap();
    let second = dispatcher
        .dispatch("b", Mode::Edit, "", "", "conv-1")
        .unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_dispatch_fails_when_worker_gone() {
    let (mut dispatcher, rx) = dispatcher(Some("model-a"));
    drop(rx);

    let result = dispatcher.dispatch("question", Mode::Ask, "", "", "conv-1");
    assert!(matches!(result, Err(CopilotError::WorkerUnavailable)));
}
