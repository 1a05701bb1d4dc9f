//! Mock collaborators for testing.
//!
//! These are used internally by the test suite and are not part of the
//! public API.

use std::sync::Mutex;

use plexrpc::ApiError;
use plexrpc::MessageObject;
use plexrpc::Result;

use crate::api::Api;
use crate::api::PluginMeta;
use crate::api::ResultSink;

/// One recorded `register` forward.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterCall {
    pub apikey: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub functions: Vec<MessageObject>,
}

/// One recorded `run` forward.
#[derive(Debug, Clone, PartialEq)]
pub struct RunCall {
    pub apikey: String,
    pub function: String,
    pub args: Vec<MessageObject>,
}

/// An API layer that records every forward it receives.
///
/// When constructed with [`MockApi::failing`], every call fails with the
/// given error instead, without recording anything.
#[derive(Debug, Default)]
pub struct MockApi {
    registers: Mutex<Vec<RegisterCall>>,
    runs: Mutex<Vec<RunCall>>,
    failure: Option<ApiError>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn register_calls(&self) -> Vec<RegisterCall> {
        self.registers.lock().unwrap().clone()
    }

    pub fn run_calls(&self) -> Vec<RunCall> {
        self.runs.lock().unwrap().clone()
    }

    /// Total number of forwards that reached this mock.
    pub fn call_count(&self) -> usize {
        self.registers.lock().unwrap().len() + self.runs.lock().unwrap().len()
    }
}

impl Api for MockApi {
    fn register(&self, meta: PluginMeta<'_>, functions: &[MessageObject]) -> Result<()> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.registers.lock().unwrap().push(RegisterCall {
            apikey: meta.apikey.to_string(),
            name: meta.name.to_string(),
            description: meta.description.to_string(),
            author: meta.author.to_string(),
            license: meta.license.to_string(),
            functions: functions.to_vec(),
        });
        Ok(())
    }

    fn run(
        &self,
        apikey: &str,
        function: &str,
        args: &[MessageObject],
        sink: &mut dyn ResultSink,
    ) -> Result<()> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.runs.lock().unwrap().push(RunCall {
            apikey: apikey.to_string(),
            function: function.to_string(),
            args: args.to_vec(),
        });
        // Echo the arguments back so tests can observe sink delivery.
        sink.deliver(args.to_vec());
        Ok(())
    }
}

/// A sink that keeps everything delivered to it.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub delivered: Vec<Vec<MessageObject>>,
}

impl ResultSink for RecordingSink {
    fn deliver(&mut self, result: Vec<MessageObject>) {
        self.delivered.push(result);
    }
}
