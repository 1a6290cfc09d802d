use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mathchat::agent::Agent;
use mathchat::errors::ChatError;
use mathchat::models::conversation::{ChatRequest, IncomingMessage};
use mathchat::models::message::Message;
use mathchat::prompt_template::SystemPrompt;
use mathchat::providers::configs::OpenAiProviderConfig;
use mathchat::providers::openai::OpenAiProvider;
use mathchat::systems::{LocalMultiply, RemoteMultiply, ToolClient};

const BIG: &str = "123456789012345678901234567890";
const BIG_TIMES_TWO: &str = "246913578024691357802469135780";

fn provider_for(server: &MockServer) -> Result<Arc<OpenAiProvider>> {
    let mut config = OpenAiProviderConfig::new("test-key");
    config.host = server.uri();
    Ok(Arc::new(OpenAiProvider::new(config)?))
}

fn tool_call_response() -> Value {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_big",
                    "type": "function",
                    "function": {
                        "name": "multiply",
                        "arguments": json!({"a": BIG, "b": "2"}).to_string()
                    }
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
}

fn answer_response(text: &str) -> Value {
    json!({
        "choices": [{
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

/// First call asks for the tool, the follow-up (which carries the tool result) answers
async fn mount_tool_round(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("tool_call_id"))
        .and(body_string_contains(BIG_TIMES_TWO))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_response(&format!(
            "{} x 2 = {}",
            BIG, BIG_TIMES_TWO
        ))))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_response()))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
}

async fn run_tool_round(tools: Arc<dyn ToolClient>, llm: &MockServer) -> Result<()> {
    mount_tool_round(llm).await;
    let agent = Agent::new(provider_for(llm)?, tools, SystemPrompt::default());

    let prompt = format!("Multiply {} by 2", BIG);
    let reply = agent
        .reply(ChatRequest::new(vec![IncomingMessage::new("user", &prompt)]))
        .await?;

    assert!(reply.message.contains(BIG_TIMES_TWO));
    assert_eq!(
        reply.history,
        vec![Message::user(prompt), Message::assistant(reply.message.clone())]
    );
    Ok(())
}

#[tokio::test]
async fn test_tool_round_with_local_multiply() -> Result<()> {
    let llm = MockServer::start().await;
    run_tool_round(Arc::new(LocalMultiply), &llm).await
}

#[tokio::test]
async fn test_tool_round_with_remote_multiply() -> Result<()> {
    let llm = MockServer::start().await;
    let tool_service = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/multiply"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": BIG_TIMES_TWO, "error": null})),
        )
        .expect(1)
        .mount(&tool_service)
        .await;

    let remote = RemoteMultiply::new(format!("{}/multiply", tool_service.uri()))?;
    run_tool_round(Arc::new(remote), &llm).await
}

#[tokio::test]
async fn test_upstream_failure_makes_one_call() -> Result<()> {
    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .expect(1)
        .mount(&llm)
        .await;

    let agent = Agent::new(
        provider_for(&llm)?,
        Arc::new(LocalMultiply),
        SystemPrompt::default(),
    );
    let result = agent
        .reply(ChatRequest::new(vec![IncomingMessage::new("user", "hello")]))
        .await;

    let error = result.expect_err("upstream failure should surface");
    assert!(matches!(error, ChatError::Upstream(_)));
    assert_eq!(error.status_code(), 502);
    assert_eq!(error.public_message(), "Upstream service call failed.");
    Ok(())
}
