//! Scripted gateway for use-case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use council_domain::{Message, Model};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

struct ScriptedReply {
    delay: Duration,
    result: Result<String, String>,
}

/// Gateway that replies from per-model scripts, in the order they were
/// queued. Unscripted calls fail, which keeps tests honest about how many
/// calls each stage makes.
pub(crate) struct ScriptedGateway {
    scripts: Mutex<HashMap<String, VecDeque<ScriptedReply>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script(&self, model: &str, result: Result<&str, &str>) {
        self.script_delayed(model, Duration::ZERO, result);
    }

    pub fn script_delayed(&self, model: &str, delay: Duration, result: Result<&str, &str>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(ScriptedReply {
                delay,
                result: result.map(str::to_string).map_err(str::to_string),
            });
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, model: &Model, _messages: &[Message]) -> Result<String, GatewayError> {
        let reply = {
            self.calls.lock().unwrap().push(model.to_string());
            self.scripts
                .lock()
                .unwrap()
                .get_mut(model.as_str())
                .and_then(VecDeque::pop_front)
        };

        match reply {
            Some(reply) => {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                reply.result.map_err(GatewayError::RequestFailed)
            }
            None => Err(GatewayError::RequestFailed(format!(
                "no scripted reply for {model}"
            ))),
        }
    }
}
