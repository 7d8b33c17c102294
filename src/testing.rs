//! Test-only transport spy.

use std::{cell::RefCell, collections::VecDeque};

use crate::{
    CatboxError,
    transport::{FormRequest, Transport},
};

/// Records every request and replays queued responses in order.
///
/// Panics if more requests are sent than responses were queued.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    requests: RefCell<Vec<FormRequest>>,
    responses: RefCell<VecDeque<Result<String, CatboxError>>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(body.to_string()));
        self
    }

    pub(crate) fn fail(self, err: CatboxError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    pub(crate) fn requests(&self) -> Vec<FormRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: FormRequest) -> Result<String, CatboxError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request #{}", self.calls()))
    }
}
