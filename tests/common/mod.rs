use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;
use reqcollector::error::{ReqCollectorError, Result};
use reqcollector::providers::{CompletionResponse, Message, Provider};

/// Provider answering from a fixed script; `None` entries fail
#[allow(dead_code)]
pub struct MockProvider {
    script: Mutex<Vec<Option<String>>>,
    received: Mutex<Vec<Vec<Message>>>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new(script: Vec<Option<&str>>) -> Self {
        let mut script: Vec<Option<String>> =
            script.into_iter().map(|s| s.map(str::to_string)).collect();
        script.reverse();
        Self {
            script: Mutex::new(script),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Every message list the provider was called with
    pub fn received(&self) -> Vec<Vec<Message>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        self.received.lock().unwrap().push(messages.to_vec());
        match self.script.lock().unwrap().pop().flatten() {
            Some(reply) => Ok(CompletionResponse::new(Message::assistant(reply))),
            None => Err(ReqCollectorError::Provider("mock service unavailable".to_string()).into()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
