//! Integration tests for the Ollama provider.
//!
//! These tests are ignored by default because they require:
//! - A running Ollama server (`OLLAMA_HOST`, or in `.env` file)
//! - The `llama3.1:8b` model pulled locally
//!
//! To run these tests:
//! ```sh
//! cargo test -p planwise_model_providers --test ollama_integration -- --ignored
//! ```

use planwise_model_providers::OllamaProvider;
use planwise_models::ModelRegistry;
use planwise_models::llm::{GenerationRequest, Llm, Message, OutputFormat};
use std::sync::Arc;

const MODEL: &str = "ollama/llama3.1:8b";

fn get_llm(model_id: &str) -> Llm {
    let _ = dotenvy::dotenv();

    let mut registry = ModelRegistry::new();
    registry.register_llm_provider("ollama", Arc::new(OllamaProvider::from_env()));
    registry.llm(model_id).expect("model should be valid")
}

#[tokio::test]
#[ignore = "requires a running Ollama server"]
async fn test_basic_generation() {
    let request = GenerationRequest::new(vec![Message::user(
        "Reply with the single word hello.",
    )]);

    let response = get_llm(MODEL).generate(request).await.unwrap();
    assert!(
        response.text.to_lowercase().contains("hello"),
        "got: {}",
        response.text
    );
}

#[tokio::test]
#[ignore = "requires a running Ollama server"]
async fn test_json_format() {
    let request = GenerationRequest::new(vec![
        Message::system("Respond only with a JSON object of the form {\"city\": string}."),
        Message::user("Which city is the capital of India?"),
    ])
    .output_format(OutputFormat::Json);

    let response = get_llm(MODEL).generate(request).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&response.text).unwrap();
    assert!(value.is_object(), "got: {}", response.text);
}

#[tokio::test]
#[ignore = "requires a running Ollama server"]
async fn test_invalid_model_error() {
    let request = GenerationRequest::new(vec![Message::user("hi")]);
    let result = get_llm("ollama/not-a-real-model").generate(request).await;
    assert!(result.is_err());
}
